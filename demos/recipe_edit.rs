//! 配方編輯示例：以目標配方取代既有配方，觀察比對出的寫入

use kitchen::calc::AssociationReconciler;
use kitchen::model::position::entries_from_amounts;
use kitchen::model::{
    IngredientAmount, KitchenRepository, MenuSnapshot, NewIngredient, NewPosition,
};
use kitchen::{IncrementalAvailability, InMemoryRepository, KitchenService};
use rust_decimal::Decimal;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=== 配方編輯示例 ===\n");

    let mut service = KitchenService::new(InMemoryRepository::new());

    let rice = service.create_ingredient(NewIngredient::new("Rice").with_available(50))?;
    let egg = service.create_ingredient(NewIngredient::new("Egg").with_available(12))?;
    let scallion = service.create_ingredient(NewIngredient::new("Scallion").with_available(8))?;
    let ham = service.create_ingredient(NewIngredient::new("Ham").with_available(4))?;

    let fried_rice = service.create_position(
        NewPosition::new("Fried Rice", Decimal::from(90))
            .with_ingredient(rice.id, 2)
            .with_ingredient(egg.id, 1)
            .with_ingredient(scallion.id, 1),
    )?;
    let id = fried_rice.position.id;

    let mut cache = IncrementalAvailability::build(service.repository());
    if let Some(availability) = cache.get(id) {
        println!("原配方可製作 {} 份", availability.max_units);
    }

    // 目標：蛋改為 2、去掉蔥、加火腿
    let desired = [
        IngredientAmount::new(egg.id, 2),
        IngredientAmount::new(rice.id, 2),
        IngredientAmount::new(ham.id, 1),
    ];

    // 先預覽比對結果
    let existing = service.repository().existing_associations(id).unwrap_or_default();
    let preview = entries_from_amounts(&desired)?;
    let plan = AssociationReconciler::reconcile(&existing, &preview)?;
    println!(
        "比對結果: 新增 {} / 更新 {} / 刪除 {}",
        plan.to_insert.len(),
        plan.to_update.len(),
        plan.to_delete.len()
    );

    let detail = service.replace_position_ingredients(id, &desired)?;
    println!("\n新配方:");
    for entry in &detail.ingredients {
        println!(
            "  - {} x{}（庫存 {}）",
            entry.ingredient_name, entry.required_count, entry.current_stock
        );
    }

    cache.mark_position_changed(id);
    cache.refresh(service.repository());
    if let Some(availability) = cache.get(id) {
        println!("新配方可製作 {} 份", availability.max_units);
    }

    println!("\n食材總數: {}", service.repository().ingredients().len());

    Ok(())
}
