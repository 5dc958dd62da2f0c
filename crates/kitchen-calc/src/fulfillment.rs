//! 訂單可履行性檢查

use kitchen_core::{
    KitchenError, MenuSnapshot, OrderLine, Position, RequestedLine, StockedBomEntry,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 通過檢查的訂單明細
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotedLine {
    /// 品項（檢查當下的快照）
    pub position: Position,

    /// 份數
    pub count: u32,

    /// 配方連同檢查當下的庫存
    pub ingredients: Vec<StockedBomEntry>,
}

impl QuotedLine {
    /// 此行金額
    pub fn cost(&self) -> kitchen_core::Result<Decimal> {
        self.position.line_cost(self.count)
    }
}

/// 訂單報價（檢查通過後的結果）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderQuote {
    /// 總金額 = Σ 售價 × 份數
    pub total_cost: Decimal,

    /// 依請求順序的明細
    pub lines: Vec<QuotedLine>,
}

impl OrderQuote {
    /// 轉換為待寫入的訂單明細
    pub fn order_lines(&self) -> Vec<OrderLine> {
        self.lines
            .iter()
            .map(|line| OrderLine::new(line.position.id, line.count))
            .collect()
    }
}

/// 訂單可履行性檢查器
pub struct OrderFulfillmentChecker;

impl OrderFulfillmentChecker {
    /// 以快照檢查每一行請求是否有足夠庫存，並計算總金額
    ///
    /// 依請求順序逐行檢查，遇到第一個不足的食材立即失敗並回報該行的品項。
    /// 每行獨立比對快照庫存，同一品項出現多行時不會合併計算。
    /// 此檢查不修改庫存。金額超出 [`Decimal`] 範圍時回報 `CostOverflow`。
    pub fn validate<S>(requested: &[RequestedLine], snapshot: &S) -> kitchen_core::Result<OrderQuote>
    where
        S: MenuSnapshot + ?Sized,
    {
        let mut total_cost = Decimal::ZERO;
        let mut lines = Vec::with_capacity(requested.len());

        for request in requested {
            let line = request.to_line()?;

            let position = snapshot
                .position(line.position_id)
                .ok_or(KitchenError::UnknownPosition(line.position_id))?;
            let ingredients = snapshot
                .stocked_bill_of_materials(line.position_id)
                .ok_or(KitchenError::UnknownPosition(line.position_id))?;

            if !Self::can_fulfill(&ingredients, line.count) {
                return Err(KitchenError::InsufficientStock(line.position_id));
            }

            total_cost = total_cost
                .checked_add(position.line_cost(line.count)?)
                .ok_or(KitchenError::CostOverflow(line.position_id))?;
            lines.push(QuotedLine {
                position,
                count: line.count,
                ingredients,
            });
        }

        Ok(OrderQuote { total_cost, lines })
    }

    /// 每種食材都滿足 `用量 × 份數 <= 庫存`
    pub fn can_fulfill(ingredients: &[StockedBomEntry], count: u32) -> bool {
        ingredients.iter().all(|entry| entry.covers(count))
    }

    /// 重新計算既有訂單明細的金額（已刪除的品項不計）
    pub fn order_cost<S>(lines: &[OrderLine], snapshot: &S) -> kitchen_core::Result<Decimal>
    where
        S: MenuSnapshot + ?Sized,
    {
        lines.iter().try_fold(Decimal::ZERO, |total, line| {
            let Some(position) = snapshot.position(line.position_id) else {
                return Ok(total);
            };
            total
                .checked_add(position.line_cost(line.count)?)
                .ok_or(KitchenError::CostOverflow(line.position_id))
        })
    }
}
