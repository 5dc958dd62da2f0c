//! 持久化協作者介面
//!
//! 計算核心只透過這些介面讀取快照；交易與實際儲存由實作者負責。

use std::collections::HashMap;

use crate::bom::{BillOfMaterials, BomEntry, StockedBomEntry};
use crate::ingredient::{Ingredient, IngredientId};
use crate::order::{Order, OrderId};
use crate::position::{NewPosition, Position, PositionId};
use crate::Result;

/// 唯讀快照
///
/// 呼叫端須在計算前取得一致的快照；計算期間不保證庫存不被他人修改。
pub trait MenuSnapshot {
    /// 查詢單一食材庫存
    fn ingredient_stock(&self, id: IngredientId) -> Option<u32>;

    /// 批次查詢食材庫存（不存在的食材不會出現在結果中）
    fn ingredient_stocks(&self, ids: &[IngredientId]) -> HashMap<IngredientId, u32> {
        ids.iter()
            .filter_map(|&id| self.ingredient_stock(id).map(|stock| (id, stock)))
            .collect()
    }

    /// 查詢品項
    fn position(&self, id: PositionId) -> Option<Position>;

    /// 品項配方連同食材名稱與現有庫存；品項不存在時為 `None`
    fn stocked_bill_of_materials(&self, id: PositionId) -> Option<Vec<StockedBomEntry>>;

    /// 品項既有的配方關聯，依食材ID遞增排序
    fn existing_associations(&self, id: PositionId) -> Option<Vec<BomEntry>> {
        self.position(id)
            .map(|position| position.bill_of_materials.entries().to_vec())
    }
}

/// 完整的儲存協作者
///
/// 寫入方法各自為一個交易：失敗時不得留下部分寫入。
pub trait KitchenRepository: MenuSnapshot {
    /// 全部食材，依ID遞增
    fn ingredients(&self) -> Vec<Ingredient>;

    fn ingredient(&self, id: IngredientId) -> Option<Ingredient>;

    fn ingredient_by_name(&self, name: &str) -> Option<Ingredient>;

    /// 新增食材並分配ID
    fn insert_ingredient(&mut self, name: String, available: u32) -> Result<Ingredient>;

    /// 覆寫既有食材
    fn save_ingredient(&mut self, ingredient: Ingredient) -> Result<()>;

    /// 刪除食材，連同所有引用它的配方項目
    fn delete_ingredient(&mut self, id: IngredientId) -> Result<Ingredient>;

    /// 全部品項，依ID遞增
    fn positions(&self) -> Vec<Position>;

    fn position_by_name(&self, name: &str) -> Option<Position>;

    /// 新增品項並分配ID
    fn insert_position(
        &mut self,
        request: &NewPosition,
        bill_of_materials: BillOfMaterials,
    ) -> Result<Position>;

    /// 覆寫品項的基本欄位（配方不變，配方只透過 `apply_associations` 修改）
    fn save_position(&mut self, position: Position) -> Result<()>;

    /// 刪除品項，連同其配方與所有引用它的訂單明細
    fn delete_position(&mut self, id: PositionId) -> Result<Position>;

    /// 以單一交易套用配方關聯的新增、更新與刪除
    fn apply_associations(
        &mut self,
        id: PositionId,
        to_insert: &[BomEntry],
        to_update: &[BomEntry],
        to_delete: &[BomEntry],
    ) -> Result<()>;

    /// 全部訂單，依建立順序
    fn orders(&self) -> Vec<Order>;

    fn order(&self, id: OrderId) -> Option<Order>;

    fn insert_order(&mut self, order: Order) -> Result<()>;

    /// 覆寫既有訂單
    fn save_order(&mut self, order: Order) -> Result<()>;
}
