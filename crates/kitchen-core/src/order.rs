//! 訂單模型

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::position::PositionId;
use crate::{positive_quantity, KitchenError, Result};

/// 訂單ID
pub type OrderId = Uuid;

/// 訂單狀態（只能往前推進）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// 已接單
    Accepted,
    /// 製作中
    Progress,
    /// 已完成待出餐
    Ready,
    /// 已出餐（終態）
    Issued,
}

impl OrderStatus {
    /// 是否可由目前狀態變更為 `next`（允許跳過中間狀態）
    pub fn can_advance_to(self, next: OrderStatus) -> bool {
        next > self
    }

    /// 是否為終態
    pub fn is_terminal(self) -> bool {
        self == OrderStatus::Issued
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OrderStatus::Accepted => "ACCEPTED",
            OrderStatus::Progress => "PROGRESS",
            OrderStatus::Ready => "READY",
            OrderStatus::Issued => "ISSUED",
        };
        f.write_str(name)
    }
}

/// 訂單明細
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    /// 品項ID
    pub position_id: PositionId,

    /// 份數（大於零）
    pub count: u32,
}

impl OrderLine {
    pub fn new(position_id: PositionId, count: u32) -> Self {
        Self { position_id, count }
    }
}

/// 點餐請求中的一行（尚未驗證）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestedLine {
    pub position_id: PositionId,
    pub count: i64,
}

impl RequestedLine {
    pub fn new(position_id: PositionId, count: i64) -> Self {
        Self { position_id, count }
    }

    /// 轉換為訂單明細，份數必須大於零
    pub fn to_line(&self) -> Result<OrderLine> {
        Ok(OrderLine::new(self.position_id, positive_quantity(self.count)?))
    }
}

/// 訂單
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// 訂單ID
    pub id: OrderId,

    /// 桌號
    pub table_id: u32,

    /// 狀態
    pub status: OrderStatus,

    /// 建立時間
    pub created_at: NaiveDateTime,

    /// 最後更新時間
    pub updated_at: NaiveDateTime,

    /// 出餐時間（僅 ISSUED 時有值）
    pub ended_at: Option<NaiveDateTime>,

    /// 明細（建立後不可修改）
    pub lines: Vec<OrderLine>,
}

impl Order {
    /// 創建新的訂單（狀態為 ACCEPTED）
    pub fn new(table_id: u32, lines: Vec<OrderLine>, now: NaiveDateTime) -> Self {
        Self {
            id: Uuid::new_v4(),
            table_id,
            status: OrderStatus::Accepted,
            created_at: now,
            updated_at: now,
            ended_at: None,
            lines,
        }
    }

    /// 推進訂單狀態，進入 ISSUED 時記錄出餐時間
    ///
    /// 重複設定目前狀態不視為錯誤，也不更動任何欄位。
    pub fn advance(&mut self, next: OrderStatus, now: NaiveDateTime) -> Result<()> {
        if next == self.status {
            return Ok(());
        }
        if !self.status.can_advance_to(next) {
            return Err(KitchenError::InvalidStatusTransition {
                from: self.status,
                to: next,
            });
        }

        self.status = next;
        if next.is_terminal() {
            self.ended_at = Some(now);
        }
        self.updated_at = now;
        Ok(())
    }

    /// 套用部分更新
    pub fn apply_patch(&mut self, patch: &OrderPatch, now: NaiveDateTime) -> Result<()> {
        patch.validate()?;

        if let Some(status) = patch.status {
            self.advance(status, now)?;
        }
        if let Some(table_id) = patch.table_id {
            self.table_id = table_id;
        }
        self.updated_at = now;
        Ok(())
    }

    /// 是否仍在處理中（未出餐）
    pub fn is_current(&self) -> bool {
        !self.status.is_terminal()
    }

    /// 總份數
    pub fn total_units(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.count)).sum()
    }
}

/// 訂單部分更新
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderPatch {
    #[serde(default)]
    pub table_id: Option<u32>,

    #[serde(default)]
    pub status: Option<OrderStatus>,
}

impl OrderPatch {
    /// 建構器模式：設置桌號
    pub fn with_table_id(mut self, table_id: u32) -> Self {
        self.table_id = Some(table_id);
        self
    }

    /// 建構器模式：設置狀態
    pub fn with_status(mut self, status: OrderStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// 至少需要一個欄位
    pub fn validate(&self) -> Result<()> {
        if self.table_id.is_none() && self.status.is_none() {
            return Err(KitchenError::EmptyPatch);
        }
        Ok(())
    }
}
