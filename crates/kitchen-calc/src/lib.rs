//! # Kitchen Calculation Engine
//!
//! 可製作份數、訂單可履行性與配方關聯比對；皆為純函數，不做 I/O 也不記錄日誌。
//! [`KitchenService`] 則是串接儲存層的呼叫端。

pub mod availability;
pub mod fulfillment;
pub mod reconcile;
pub mod service;

// Re-export 主要類型
pub use availability::{
    Availability, AvailabilityCalculator, MenuAvailability, PositionAvailability, NO_RECIPE,
};
pub use fulfillment::{OrderFulfillmentChecker, OrderQuote, QuotedLine};
pub use reconcile::{AssociationReconciler, ReconcilePlan};
pub use service::KitchenService;

use kitchen_core::{Order, Position, StockedBomEntry};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 品項連同配方明細
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionDetail {
    pub position: Position,

    /// 配方項目連同食材名稱與庫存
    pub ingredients: Vec<StockedBomEntry>,
}

/// 建立訂單的結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedOrder {
    pub order: Order,
    pub quote: OrderQuote,
}

/// 訂單中的品項與份數
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderedPosition {
    pub position: Position,
    pub count: u32,
}

/// 訂單列表項目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub order: Order,

    /// 以目前售價重新計算的金額
    pub cost: Decimal,

    /// 仍存在的品項
    pub positions: Vec<OrderedPosition>,
}
