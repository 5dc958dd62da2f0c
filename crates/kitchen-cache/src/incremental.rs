//! 增量可製作份數
//!
//! 快取每個品項上次計算的結果，只在食材或配方變動後重算受影響的品項。

use crate::dirty_tracking::DirtyTracker;
use kitchen_calc::{Availability, AvailabilityCalculator};
use kitchen_core::{IngredientId, KitchenRepository, MenuSnapshot, PositionId};
use std::collections::HashMap;

/// 增量可製作份數快取
#[derive(Debug, Clone, Default)]
pub struct IncrementalAvailability {
    cache: HashMap<PositionId, Availability>,
    dirty: DirtyTracker,
}

impl IncrementalAvailability {
    /// 創建空的快取
    pub fn new() -> Self {
        Self::default()
    }

    /// 以儲存庫中全部品項建立快取
    pub fn build<R: KitchenRepository + ?Sized>(repository: &R) -> Self {
        let mut cache = Self::new();
        cache
            .dirty
            .mark_all(repository.positions().into_iter().map(|p| p.id));
        cache.refresh(repository);
        cache
    }

    /// 食材庫存或名稱變動：標記所有使用該食材的品項
    pub fn mark_ingredient_changed<R: KitchenRepository + ?Sized>(
        &mut self,
        repository: &R,
        ingredient_id: IngredientId,
    ) {
        self.dirty.mark_all(
            repository
                .positions()
                .into_iter()
                .filter(|p| p.bill_of_materials.uses(ingredient_id))
                .map(|p| p.id),
        );

        // 食材已刪除時儲存庫中的配方也已移除，改以快取內容判斷
        let cached = self
            .cache
            .iter()
            .filter(|(_, availability)| {
                availability
                    .blocking
                    .iter()
                    .chain(&availability.non_blocking)
                    .any(|entry| entry.ingredient_id == ingredient_id)
            })
            .map(|(id, _)| *id);
        self.dirty.mark_all(cached);
    }

    /// 品項配方變動、新增或刪除
    pub fn mark_position_changed(&mut self, position_id: PositionId) {
        self.dirty.mark_dirty(position_id);
    }

    /// 重算所有髒品項，回傳重算過的品項ID（依ID遞增）
    ///
    /// 已不存在的品項從快取移除，不列入回傳值。
    pub fn refresh<S: MenuSnapshot + ?Sized>(&mut self, snapshot: &S) -> Vec<PositionId> {
        let mut recomputed = Vec::new();

        for position_id in self.dirty.take_dirty_positions() {
            match snapshot.stocked_bill_of_materials(position_id) {
                Some(stocked) => {
                    self.cache
                        .insert(position_id, AvailabilityCalculator::compute(&stocked));
                    recomputed.push(position_id);
                }
                None => {
                    self.cache.remove(&position_id);
                }
            }
        }

        recomputed
    }

    /// 取得快取結果（可能已過期，見 [`Self::is_stale`]）
    pub fn get(&self, position_id: PositionId) -> Option<&Availability> {
        self.cache.get(&position_id)
    }

    /// 是否等待重算
    pub fn is_stale(&self, position_id: PositionId) -> bool {
        self.dirty.is_dirty(position_id)
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// 清空快取與髒標記
    pub fn clear(&mut self) {
        self.cache.clear();
        self.dirty.clear();
    }
}
