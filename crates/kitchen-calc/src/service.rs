//! 點餐服務：串接儲存層與計算核心
//!
//! HTTP 層的每個端點對應一個方法；錯誤以 [`kitchen_core::KitchenError`] 回傳，
//! 由 HTTP 層轉換為回應碼。

use chrono::NaiveDateTime;
use kitchen_core::position::entries_from_amounts;
use kitchen_core::{
    Ingredient, IngredientAmount, IngredientId, IngredientPatch, KitchenError, KitchenRepository,
    NewIngredient, NewPosition, Order, OrderId, OrderPatch, Position, PositionId, PositionPatch,
    RequestedLine, Settings,
};

use crate::availability::{AvailabilityCalculator, MenuAvailability, PositionAvailability};
use crate::fulfillment::OrderFulfillmentChecker;
use crate::reconcile::AssociationReconciler;
use crate::{OrderSummary, OrderedPosition, PlacedOrder, PositionDetail};

/// 點餐服務
pub struct KitchenService<R> {
    /// 儲存協作者
    repository: R,

    /// 服務配置
    settings: Option<Settings>,
}

impl<R: KitchenRepository> KitchenService<R> {
    /// 創建新的服務
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            settings: None,
        }
    }

    /// 建構器模式：注入配置
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = Some(settings);
        self
    }

    pub fn settings(&self) -> Option<&Settings> {
        self.settings.as_ref()
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn into_repository(self) -> R {
        self.repository
    }

    // ---------------------------------------------------------------- 食材

    /// 新增食材，初始庫存預設為零
    pub fn create_ingredient(&mut self, request: NewIngredient) -> kitchen_core::Result<Ingredient> {
        let available = request.initial_stock()?;
        if self.repository.ingredient_by_name(&request.name).is_some() {
            return Err(KitchenError::DuplicateName(request.name));
        }

        let ingredient = self.repository.insert_ingredient(request.name, available)?;
        tracing::info!(
            "新增食材 {} ({})，庫存 {}",
            ingredient.id,
            ingredient.name,
            ingredient.available
        );
        Ok(ingredient)
    }

    pub fn list_ingredients(&self) -> Vec<Ingredient> {
        self.repository.ingredients()
    }

    /// 修改食材名稱或庫存
    pub fn patch_ingredient(
        &mut self,
        id: IngredientId,
        patch: &IngredientPatch,
    ) -> kitchen_core::Result<Ingredient> {
        let mut ingredient = self
            .repository
            .ingredient(id)
            .ok_or(KitchenError::UnknownIngredient(id))?;

        if let Some(name) = &patch.name {
            self.ensure_ingredient_name_free(name, id)?;
        }
        ingredient.apply_patch(patch)?;

        self.repository.save_ingredient(ingredient.clone())?;
        tracing::debug!("更新食材 {}，庫存 {}", id, ingredient.available);
        Ok(ingredient)
    }

    /// 以增減量調整庫存（點餐不會自動扣庫存）
    pub fn adjust_stock(&mut self, id: IngredientId, delta: i64) -> kitchen_core::Result<Ingredient> {
        let mut ingredient = self
            .repository
            .ingredient(id)
            .ok_or(KitchenError::UnknownIngredient(id))?;

        ingredient.adjust(delta)?;
        self.repository.save_ingredient(ingredient.clone())?;
        tracing::debug!("調整食材 {} 庫存 {:+}，現為 {}", id, delta, ingredient.available);
        Ok(ingredient)
    }

    /// 刪除食材與引用它的配方項目
    pub fn delete_ingredient(&mut self, id: IngredientId) -> kitchen_core::Result<Ingredient> {
        let ingredient = self.repository.delete_ingredient(id)?;
        tracing::info!("刪除食材 {} ({})", id, ingredient.name);
        Ok(ingredient)
    }

    // ---------------------------------------------------------------- 品項

    /// 新增品項與其配方
    pub fn create_position(&mut self, request: NewPosition) -> kitchen_core::Result<PositionDetail> {
        if self.repository.position_by_name(&request.name).is_some() {
            return Err(KitchenError::DuplicateName(request.name));
        }

        let bill_of_materials = request.validate()?;
        for entry in bill_of_materials.entries() {
            self.ensure_ingredient_exists(entry.ingredient_id)?;
        }

        let position = self
            .repository
            .insert_position(&request, bill_of_materials)?;
        tracing::info!(
            "新增品項 {} ({})，配方 {} 項",
            position.id,
            position.name,
            position.bill_of_materials.len()
        );
        Ok(self.detail(position))
    }

    /// 全部品項連同配方
    pub fn list_positions(&self) -> Vec<PositionDetail> {
        self.repository
            .positions()
            .into_iter()
            .map(|position| self.detail(position))
            .collect()
    }

    /// 修改品項基本欄位（不含配方）
    pub fn patch_position(
        &mut self,
        id: PositionId,
        patch: &PositionPatch,
    ) -> kitchen_core::Result<Position> {
        let mut position = self
            .repository
            .position(id)
            .ok_or(KitchenError::UnknownPosition(id))?;

        if patch.is_empty() {
            return Ok(position);
        }
        if let Some(name) = &patch.name {
            if let Some(other) = self.repository.position_by_name(name) {
                if other.id != id {
                    return Err(KitchenError::DuplicateName(name.clone()));
                }
            }
        }

        position.apply_patch(patch)?;
        self.repository.save_position(position.clone())?;
        tracing::debug!("更新品項 {}", id);
        Ok(position)
    }

    /// 以目標配方取代品項配方，只寫入有差異的關聯
    pub fn replace_position_ingredients(
        &mut self,
        id: PositionId,
        desired: &[IngredientAmount],
    ) -> kitchen_core::Result<PositionDetail> {
        if self.repository.position(id).is_none() {
            return Err(KitchenError::UnknownPosition(id));
        }

        let desired = entries_from_amounts(desired)?;
        for entry in &desired {
            self.ensure_ingredient_exists(entry.ingredient_id)?;
        }

        let existing = self
            .repository
            .existing_associations(id)
            .ok_or(KitchenError::UnknownPosition(id))?;
        let plan = AssociationReconciler::reconcile(&existing, &desired)?;

        tracing::debug!(
            "品項 {} 配方比對：新增 {}，更新 {}，刪除 {}",
            id,
            plan.to_insert.len(),
            plan.to_update.len(),
            plan.to_delete.len()
        );

        if !plan.is_noop() {
            self.repository
                .apply_associations(id, &plan.to_insert, &plan.to_update, &plan.to_delete)?;
        }

        let position = self
            .repository
            .position(id)
            .ok_or(KitchenError::UnknownPosition(id))?;
        Ok(self.detail(position))
    }

    /// 刪除品項、其配方與引用它的訂單明細
    pub fn delete_position(&mut self, id: PositionId) -> kitchen_core::Result<Position> {
        let position = self.repository.delete_position(id)?;
        tracing::info!("刪除品項 {} ({})", id, position.name);
        Ok(position)
    }

    /// 單一品項的可製作份數
    pub fn position_availability(&self, id: PositionId) -> kitchen_core::Result<PositionAvailability> {
        let position = self
            .repository
            .position(id)
            .ok_or(KitchenError::UnknownPosition(id))?;
        let stocked = self
            .repository
            .stocked_bill_of_materials(id)
            .ok_or(KitchenError::UnknownPosition(id))?;

        Ok(PositionAvailability {
            availability: AvailabilityCalculator::compute(&stocked),
            position,
        })
    }

    /// 整份菜單的可供應情況
    pub fn menu_availability(&self) -> MenuAvailability {
        let items: Vec<_> = self
            .repository
            .positions()
            .into_iter()
            .map(|position| {
                let stocked = self
                    .repository
                    .stocked_bill_of_materials(position.id)
                    .unwrap_or_default();
                (position, stocked)
            })
            .collect();

        tracing::debug!("計算菜單可供應情況：品項 {} 個", items.len());
        let menu = AvailabilityCalculator::compute_menu(items);
        tracing::debug!(
            "可供應 {} 個，不可供應 {} 個",
            menu.available.len(),
            menu.unavailable.len()
        );
        menu
    }

    // ---------------------------------------------------------------- 訂單

    /// 檢查庫存後建立訂單（不扣庫存）
    pub fn create_order(
        &mut self,
        table_id: u32,
        requested: &[RequestedLine],
    ) -> kitchen_core::Result<PlacedOrder> {
        tracing::debug!("桌號 {} 點餐：{} 行", table_id, requested.len());

        let quote = match OrderFulfillmentChecker::validate(requested, &self.repository) {
            Ok(quote) => quote,
            Err(err) => {
                tracing::warn!("桌號 {} 點餐失敗: {}", table_id, err);
                return Err(err);
            }
        };

        let order = Order::new(table_id, quote.order_lines(), now());
        self.repository.insert_order(order.clone())?;

        tracing::info!(
            "建立訂單 {}：桌號 {}，金額 {}",
            order.id,
            table_id,
            quote.total_cost
        );
        Ok(PlacedOrder { order, quote })
    }

    /// 全部訂單
    pub fn list_orders(&self) -> kitchen_core::Result<Vec<OrderSummary>> {
        self.repository
            .orders()
            .into_iter()
            .map(|order| self.summarize(order))
            .collect()
    }

    /// 尚未出餐的訂單
    pub fn current_orders(&self) -> kitchen_core::Result<Vec<OrderSummary>> {
        self.repository
            .orders()
            .into_iter()
            .filter(Order::is_current)
            .map(|order| self.summarize(order))
            .collect()
    }

    /// 修改桌號或推進狀態
    pub fn patch_order(&mut self, id: OrderId, patch: &OrderPatch) -> kitchen_core::Result<Order> {
        let mut order = self
            .repository
            .order(id)
            .ok_or(KitchenError::UnknownOrder(id))?;

        order.apply_patch(patch, now())?;
        self.repository.save_order(order.clone())?;
        tracing::info!("訂單 {} 狀態 {}", id, order.status);
        Ok(order)
    }

    // ---------------------------------------------------------------- 內部

    fn ensure_ingredient_exists(&self, id: IngredientId) -> kitchen_core::Result<()> {
        match self.repository.ingredient_stock(id) {
            Some(_) => Ok(()),
            None => Err(KitchenError::UnknownIngredient(id)),
        }
    }

    fn ensure_ingredient_name_free(&self, name: &str, id: IngredientId) -> kitchen_core::Result<()> {
        match self.repository.ingredient_by_name(name) {
            Some(other) if other.id != id => Err(KitchenError::DuplicateName(name.to_string())),
            _ => Ok(()),
        }
    }

    fn detail(&self, position: Position) -> PositionDetail {
        let ingredients = self
            .repository
            .stocked_bill_of_materials(position.id)
            .unwrap_or_default();
        PositionDetail {
            position,
            ingredients,
        }
    }

    fn summarize(&self, order: Order) -> kitchen_core::Result<OrderSummary> {
        let cost = OrderFulfillmentChecker::order_cost(&order.lines, &self.repository)?;
        let positions = order
            .lines
            .iter()
            .filter_map(|line| {
                self.repository
                    .position(line.position_id)
                    .map(|position| OrderedPosition {
                        position,
                        count: line.count,
                    })
            })
            .collect();

        Ok(OrderSummary {
            order,
            cost,
            positions,
        })
    }
}

fn now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}
