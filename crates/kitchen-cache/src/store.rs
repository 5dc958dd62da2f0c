//! 記憶體儲存
//!
//! 以有序映射保存食材、品項與訂單；每個寫入方法先完成全部檢查再修改，
//! 失敗時不留下部分寫入。

use kitchen_core::{
    BillOfMaterials, BomEntry, Ingredient, IngredientId, KitchenError, KitchenRepository,
    MenuSnapshot, NewPosition, Order, OrderId, Position, PositionId, StockedBomEntry,
};
use std::collections::BTreeMap;

/// 記憶體儲存庫
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    ingredients: BTreeMap<IngredientId, Ingredient>,
    positions: BTreeMap<PositionId, Position>,
    orders: Vec<Order>,
    last_ingredient_id: i64,
    last_position_id: i64,
}

impl InMemoryRepository {
    /// 創建空的儲存庫
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ingredient_count(&self) -> usize {
        self.ingredients.len()
    }

    pub fn position_count(&self) -> usize {
        self.positions.len()
    }

    fn require_ingredient(&self, id: IngredientId) -> kitchen_core::Result<()> {
        if self.ingredients.contains_key(&id) {
            Ok(())
        } else {
            Err(KitchenError::UnknownIngredient(id))
        }
    }
}

impl MenuSnapshot for InMemoryRepository {
    fn ingredient_stock(&self, id: IngredientId) -> Option<u32> {
        self.ingredients.get(&id).map(|i| i.available)
    }

    fn position(&self, id: PositionId) -> Option<Position> {
        self.positions.get(&id).cloned()
    }

    fn stocked_bill_of_materials(&self, id: PositionId) -> Option<Vec<StockedBomEntry>> {
        let position = self.positions.get(&id)?;
        Some(
            position
                .bill_of_materials
                .entries()
                .iter()
                .filter_map(|entry| {
                    self.ingredients.get(&entry.ingredient_id).map(|ingredient| {
                        StockedBomEntry::new(
                            ingredient.id,
                            ingredient.name.clone(),
                            entry.count,
                            ingredient.available,
                        )
                    })
                })
                .collect(),
        )
    }
}

impl KitchenRepository for InMemoryRepository {
    fn ingredients(&self) -> Vec<Ingredient> {
        self.ingredients.values().cloned().collect()
    }

    fn ingredient(&self, id: IngredientId) -> Option<Ingredient> {
        self.ingredients.get(&id).cloned()
    }

    fn ingredient_by_name(&self, name: &str) -> Option<Ingredient> {
        self.ingredients.values().find(|i| i.name == name).cloned()
    }

    fn insert_ingredient(&mut self, name: String, available: u32) -> kitchen_core::Result<Ingredient> {
        if self.ingredient_by_name(&name).is_some() {
            return Err(KitchenError::DuplicateName(name));
        }

        self.last_ingredient_id += 1;
        let ingredient = Ingredient::new(IngredientId(self.last_ingredient_id), name, available);
        self.ingredients.insert(ingredient.id, ingredient.clone());
        Ok(ingredient)
    }

    fn save_ingredient(&mut self, ingredient: Ingredient) -> kitchen_core::Result<()> {
        match self.ingredients.get_mut(&ingredient.id) {
            Some(stored) => {
                *stored = ingredient;
                Ok(())
            }
            None => Err(KitchenError::UnknownIngredient(ingredient.id)),
        }
    }

    fn delete_ingredient(&mut self, id: IngredientId) -> kitchen_core::Result<Ingredient> {
        let ingredient = self
            .ingredients
            .remove(&id)
            .ok_or(KitchenError::UnknownIngredient(id))?;

        for position in self.positions.values_mut() {
            position.bill_of_materials.remove(id);
        }
        Ok(ingredient)
    }

    fn positions(&self) -> Vec<Position> {
        self.positions.values().cloned().collect()
    }

    fn position_by_name(&self, name: &str) -> Option<Position> {
        self.positions.values().find(|p| p.name == name).cloned()
    }

    fn insert_position(
        &mut self,
        request: &NewPosition,
        bill_of_materials: BillOfMaterials,
    ) -> kitchen_core::Result<Position> {
        if self.position_by_name(&request.name).is_some() {
            return Err(KitchenError::DuplicateName(request.name.clone()));
        }
        for entry in bill_of_materials.entries() {
            self.require_ingredient(entry.ingredient_id)?;
        }

        self.last_position_id += 1;
        let position = request.to_position(PositionId(self.last_position_id), bill_of_materials);
        self.positions.insert(position.id, position.clone());
        Ok(position)
    }

    fn save_position(&mut self, mut position: Position) -> kitchen_core::Result<()> {
        let stored = self
            .positions
            .get_mut(&position.id)
            .ok_or(KitchenError::UnknownPosition(position.id))?;

        position.bill_of_materials = stored.bill_of_materials.clone();
        *stored = position;
        Ok(())
    }

    fn delete_position(&mut self, id: PositionId) -> kitchen_core::Result<Position> {
        let position = self
            .positions
            .remove(&id)
            .ok_or(KitchenError::UnknownPosition(id))?;

        for order in &mut self.orders {
            order.lines.retain(|line| line.position_id != id);
        }
        Ok(position)
    }

    fn apply_associations(
        &mut self,
        id: PositionId,
        to_insert: &[BomEntry],
        to_update: &[BomEntry],
        to_delete: &[BomEntry],
    ) -> kitchen_core::Result<()> {
        let current = self
            .positions
            .get(&id)
            .ok_or(KitchenError::UnknownPosition(id))?;
        let mut bill_of_materials = current.bill_of_materials.clone();

        for entry in to_delete {
            if bill_of_materials.remove(entry.ingredient_id).is_none() {
                return Err(KitchenError::Storage(format!(
                    "品項 {} 沒有食材 {} 的關聯",
                    id, entry.ingredient_id
                )));
            }
        }
        for entry in to_update {
            if !bill_of_materials.uses(entry.ingredient_id) {
                return Err(KitchenError::Storage(format!(
                    "品項 {} 沒有食材 {} 的關聯",
                    id, entry.ingredient_id
                )));
            }
            bill_of_materials.upsert(*entry)?;
        }
        for entry in to_insert {
            self.require_ingredient(entry.ingredient_id)?;
            if bill_of_materials.uses(entry.ingredient_id) {
                return Err(KitchenError::DuplicateIngredient(entry.ingredient_id));
            }
            bill_of_materials.upsert(*entry)?;
        }

        if let Some(position) = self.positions.get_mut(&id) {
            position.bill_of_materials = bill_of_materials;
        }
        Ok(())
    }

    fn orders(&self) -> Vec<Order> {
        self.orders.clone()
    }

    fn order(&self, id: OrderId) -> Option<Order> {
        self.orders.iter().find(|o| o.id == id).cloned()
    }

    fn insert_order(&mut self, order: Order) -> kitchen_core::Result<()> {
        if self.orders.iter().any(|o| o.id == order.id) {
            return Err(KitchenError::Storage(format!("訂單 {} 已存在", order.id)));
        }
        self.orders.push(order);
        Ok(())
    }

    fn save_order(&mut self, order: Order) -> kitchen_core::Result<()> {
        let stored = self
            .orders
            .iter_mut()
            .find(|o| o.id == order.id)
            .ok_or(KitchenError::UnknownOrder(order.id))?;
        *stored = order;
        Ok(())
    }
}
