//! 可製作份數計算

use kitchen_core::{Position, StockedBomEntry};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// 配方為空時的份數標記：表示「未定義配方」，不是「庫存無限」
pub const NO_RECIPE: i64 = -1;

/// 單一品項的可製作情況
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    /// 以現有庫存最多可製作的份數；配方為空時為 [`NO_RECIPE`]
    pub max_units: i64,

    /// 連一份都不夠的食材
    pub blocking: Vec<StockedBomEntry>,

    /// 至少夠一份的食材
    pub non_blocking: Vec<StockedBomEntry>,
}

impl Availability {
    /// 是否定義了配方
    pub fn has_recipe(&self) -> bool {
        self.max_units != NO_RECIPE
    }

    /// 可製作份數；未定義配方時為 `None`
    pub fn units(&self) -> Option<u32> {
        u32::try_from(self.max_units).ok()
    }

    /// 是否被庫存卡住（有配方但一份都做不出來）
    pub fn is_blocked(&self) -> bool {
        self.max_units == 0
    }
}

/// 可製作份數計算器
pub struct AvailabilityCalculator;

impl AvailabilityCalculator {
    /// 計算可製作份數並區分卡住與未卡住的食材
    ///
    /// 每種食材可支撐 `floor(庫存 / 用量)` 份，取最小值即為品項份數。
    /// 份數為零的食材歸為 `blocking`，其餘歸為 `non_blocking`，
    /// 即使它同時是最緊的限制。兩組保留輸入順序。
    pub fn compute(bill_of_materials: &[StockedBomEntry]) -> Availability {
        let mut max_units: Option<u32> = None;
        let mut blocking = Vec::new();
        let mut non_blocking = Vec::new();

        for entry in bill_of_materials {
            let units = entry.units_possible();
            max_units = Some(max_units.map_or(units, |current| current.min(units)));

            if units == 0 {
                blocking.push(entry.clone());
            } else {
                non_blocking.push(entry.clone());
            }
        }

        Availability {
            max_units: max_units.map_or(NO_RECIPE, i64::from),
            blocking,
            non_blocking,
        }
    }

    /// 只計算份數
    pub fn max_units(bill_of_materials: &[StockedBomEntry]) -> i64 {
        bill_of_materials
            .iter()
            .map(StockedBomEntry::units_possible)
            .min()
            .map_or(NO_RECIPE, i64::from)
    }

    /// 平行計算整份菜單，依份數是否為零分成可供應與不可供應
    ///
    /// 未定義配方（[`NO_RECIPE`]）的品項歸為可供應。
    pub fn compute_menu(items: Vec<(Position, Vec<StockedBomEntry>)>) -> MenuAvailability {
        let computed: Vec<PositionAvailability> = items
            .into_par_iter()
            .map(|(position, stocked)| PositionAvailability {
                availability: Self::compute(&stocked),
                position,
            })
            .collect();

        let (unavailable, available): (Vec<_>, Vec<_>) = computed
            .into_iter()
            .partition(|item| item.availability.is_blocked());

        MenuAvailability {
            available,
            unavailable,
        }
    }
}

/// 品項連同其可製作情況
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionAvailability {
    pub position: Position,
    pub availability: Availability,
}

/// 整份菜單的可供應情況
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuAvailability {
    /// 份數不為零的品項
    pub available: Vec<PositionAvailability>,

    /// 份數為零的品項
    pub unavailable: Vec<PositionAvailability>,
}
