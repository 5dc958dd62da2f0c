//! # Kitchen Core
//!
//! 核心資料模型與類型定義：食材、品項（含配方）、訂單，以及持久化協作者介面

pub mod bom;
pub mod config;
pub mod ingredient;
pub mod order;
pub mod position;
pub mod repository;

// Re-export 主要類型
pub use bom::{BillOfMaterials, BomEntry, StockedBomEntry};
pub use config::Settings;
pub use ingredient::{Ingredient, IngredientId, IngredientPatch, NewIngredient};
pub use order::{Order, OrderId, OrderLine, OrderPatch, OrderStatus, RequestedLine};
pub use position::{IngredientAmount, NewPosition, Position, PositionId, PositionPatch};
pub use repository::{KitchenRepository, MenuSnapshot};

use rust_decimal::Decimal;

/// 點餐系統錯誤類型
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum KitchenError {
    #[error("找不到食材: {0}")]
    UnknownIngredient(IngredientId),

    #[error("找不到品項: {0}")]
    UnknownPosition(PositionId),

    #[error("找不到訂單: {0}")]
    UnknownOrder(OrderId),

    #[error("食材庫存不足，無法製作品項: {0}")]
    InsufficientStock(PositionId),

    #[error("無效的數量: {0}")]
    InvalidQuantity(i64),

    #[error("無效的價格: {0}")]
    InvalidCost(Decimal),

    #[error("金額超出可表示範圍，品項: {0}")]
    CostOverflow(PositionId),

    #[error("名稱已存在: {0}")]
    DuplicateName(String),

    #[error("配方中食材重複: {0}")]
    DuplicateIngredient(IngredientId),

    #[error("既有配方關聯未依食材ID遞增排序")]
    UnsortedAssociations,

    #[error("訂單狀態不可由 {from} 變更為 {to}")]
    InvalidStatusTransition { from: OrderStatus, to: OrderStatus },

    #[error("更新內容不能全部為空")]
    EmptyPatch,

    #[error("配置錯誤: {0}")]
    Config(String),

    #[error("儲存層錯誤: {0}")]
    Storage(String),
}

/// 錯誤分類（供外層轉換為回應碼）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 引用的食材、品項或訂單不存在
    UnknownEntity,
    /// 庫存不足以完成訂單
    InsufficientStock,
    /// 數量小於等於零或超出範圍
    InvalidQuantity,
    /// 與既有資料衝突（名稱重複、狀態倒退）
    Conflict,
    /// 其他輸入驗證失敗
    InvalidInput,
    /// 配置或儲存層問題
    Internal,
}

impl KitchenError {
    /// 取得錯誤分類
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownIngredient(_) | Self::UnknownPosition(_) | Self::UnknownOrder(_) => {
                ErrorKind::UnknownEntity
            }
            Self::InsufficientStock(_) => ErrorKind::InsufficientStock,
            Self::InvalidQuantity(_) => ErrorKind::InvalidQuantity,
            Self::DuplicateName(_) | Self::InvalidStatusTransition { .. } => ErrorKind::Conflict,
            Self::InvalidCost(_)
            | Self::CostOverflow(_)
            | Self::DuplicateIngredient(_)
            | Self::UnsortedAssociations
            | Self::EmptyPatch => ErrorKind::InvalidInput,
            Self::Config(_) | Self::Storage(_) => ErrorKind::Internal,
        }
    }

    /// 是否為呼叫端輸入造成（可換輸入重試）
    pub fn is_client_error(&self) -> bool {
        self.kind() != ErrorKind::Internal
    }
}

pub type Result<T> = std::result::Result<T, KitchenError>;

/// 驗證庫存值（允許為零）
pub fn stock_quantity(value: i64) -> Result<u32> {
    u32::try_from(value).map_err(|_| KitchenError::InvalidQuantity(value))
}

/// 驗證用量或點餐數量（必須大於零）
pub fn positive_quantity(value: i64) -> Result<u32> {
    match u32::try_from(value) {
        Ok(count) if count > 0 => Ok(count),
        _ => Err(KitchenError::InvalidQuantity(value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            KitchenError::UnknownPosition(PositionId(3)).kind(),
            ErrorKind::UnknownEntity
        );
        assert_eq!(
            KitchenError::InsufficientStock(PositionId(3)).kind(),
            ErrorKind::InsufficientStock
        );
        assert_eq!(KitchenError::InvalidQuantity(0).kind(), ErrorKind::InvalidQuantity);
        assert_eq!(
            KitchenError::DuplicateName("Soup".to_string()).kind(),
            ErrorKind::Conflict
        );
        assert_eq!(
            KitchenError::CostOverflow(PositionId(3)).kind(),
            ErrorKind::InvalidInput
        );
        assert!(!KitchenError::Storage("down".to_string()).is_client_error());
    }

    #[test]
    fn test_quantity_validation() {
        assert_eq!(stock_quantity(0), Ok(0));
        assert_eq!(stock_quantity(-1), Err(KitchenError::InvalidQuantity(-1)));
        assert_eq!(positive_quantity(5), Ok(5));
        assert_eq!(positive_quantity(0), Err(KitchenError::InvalidQuantity(0)));
        assert_eq!(positive_quantity(-2), Err(KitchenError::InvalidQuantity(-2)));

        let too_large = i64::from(u32::MAX) + 1;
        assert_eq!(
            positive_quantity(too_large),
            Err(KitchenError::InvalidQuantity(too_large))
        );
    }
}
