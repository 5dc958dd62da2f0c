//! 餐廳點餐示例：建立食材與菜單、查詢可供應品項、點餐並出餐

use kitchen::model::{
    IngredientPatch, NewIngredient, NewPosition, OrderPatch, OrderStatus, RequestedLine,
};
use kitchen::{InMemoryRepository, KitchenService};
use rust_decimal::Decimal;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=== 餐廳點餐示例 ===\n");

    let mut service = KitchenService::new(InMemoryRepository::new());

    // 食材
    let bun = service.create_ingredient(NewIngredient::new("Bun").with_available(20))?;
    let patty = service.create_ingredient(NewIngredient::new("Beef Patty").with_available(6))?;
    let cheese = service.create_ingredient(NewIngredient::new("Cheese").with_available(3))?;
    let potato = service.create_ingredient(NewIngredient::new("Potato").with_available(0))?;

    // 菜單
    let burger = service.create_position(
        NewPosition::new("Cheeseburger", Decimal::from(250))
            .with_description("雙層起司")
            .with_ingredient(bun.id, 1)
            .with_ingredient(patty.id, 2)
            .with_ingredient(cheese.id, 1),
    )?;
    service.create_position(
        NewPosition::new("Fries", Decimal::from(90)).with_ingredient(potato.id, 2),
    )?;
    let tea = service.create_position(
        NewPosition::new("Iced Tea", Decimal::from(60)).with_changable(false),
    )?;

    println!("菜單:");
    let menu = service.menu_availability();
    for item in &menu.available {
        match item.availability.units() {
            Some(units) => println!("  - {}: 可製作 {} 份", item.position.name, units),
            None => println!("  - {}: 未設定配方", item.position.name),
        }
    }
    for item in &menu.unavailable {
        let missing: Vec<_> = item
            .availability
            .blocking
            .iter()
            .map(|e| e.ingredient_name.as_str())
            .collect();
        println!("  - {}: 售完（缺 {}）", item.position.name, missing.join(", "));
    }

    // 點餐
    let placed = service.create_order(
        12,
        &[
            RequestedLine::new(burger.position.id, 2),
            RequestedLine::new(tea.position.id, 2),
        ],
    )?;
    println!("\n桌號 12 訂單 {}，金額 {}", placed.order.id, placed.quote.total_cost);

    if let Err(err) = service.create_order(4, &[RequestedLine::new(burger.position.id, 4)]) {
        println!("桌號 4 點餐失敗: {}", err);
    }

    // 補貨後再查詢
    service.patch_ingredient(potato.id, &IngredientPatch::default().with_available(10))?;
    println!("\n補貨後可供應 {} 個品項", service.menu_availability().available.len());

    // 出餐
    for status in [OrderStatus::Progress, OrderStatus::Ready, OrderStatus::Issued] {
        let order = service.patch_order(placed.order.id, &OrderPatch::default().with_status(status))?;
        println!("訂單狀態: {}", order.status);
    }
    println!("處理中的訂單: {}", service.current_orders()?.len());

    Ok(())
}
