//! 髒標記追蹤

use kitchen_core::PositionId;
use std::collections::BTreeSet;

/// 髒標記追蹤器：記錄可製作份數需要重算的品項
#[derive(Debug, Clone, Default)]
pub struct DirtyTracker {
    dirty_positions: BTreeSet<PositionId>,
}

impl DirtyTracker {
    /// 創建新的追蹤器
    pub fn new() -> Self {
        Self::default()
    }

    /// 標記品項為髒
    pub fn mark_dirty(&mut self, position_id: PositionId) {
        self.dirty_positions.insert(position_id);
    }

    /// 一次標記多個品項
    pub fn mark_all(&mut self, position_ids: impl IntoIterator<Item = PositionId>) {
        self.dirty_positions.extend(position_ids);
    }

    /// 檢查品項是否為髒
    pub fn is_dirty(&self, position_id: PositionId) -> bool {
        self.dirty_positions.contains(&position_id)
    }

    pub fn is_clean(&self) -> bool {
        self.dirty_positions.is_empty()
    }

    /// 清除所有髒標記
    pub fn clear(&mut self) {
        self.dirty_positions.clear();
    }

    /// 取出並清除所有髒品項（依ID遞增）
    pub fn take_dirty_positions(&mut self) -> Vec<PositionId> {
        std::mem::take(&mut self.dirty_positions)
            .into_iter()
            .collect()
    }
}
