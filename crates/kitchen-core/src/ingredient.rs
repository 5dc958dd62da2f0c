//! 食材模型

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{stock_quantity, KitchenError, Result};

/// 食材ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IngredientId(pub i64);

impl fmt::Display for IngredientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 食材與現有庫存
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    /// 食材ID
    pub id: IngredientId,

    /// 名稱（唯一）
    pub name: String,

    /// 現有庫存
    pub available: u32,
}

impl Ingredient {
    /// 創建新的食材記錄
    pub fn new(id: IngredientId, name: String, available: u32) -> Self {
        Self {
            id,
            name,
            available,
        }
    }

    /// 入庫
    pub fn restock(&mut self, quantity: u32) -> Result<()> {
        self.available = self
            .available
            .checked_add(quantity)
            .ok_or(KitchenError::InvalidQuantity(i64::from(quantity)))?;
        Ok(())
    }

    /// 出庫（不可低於零）
    pub fn withdraw(&mut self, quantity: u32) -> Result<()> {
        if quantity > self.available {
            return Err(KitchenError::InvalidQuantity(
                i64::from(self.available) - i64::from(quantity),
            ));
        }
        self.available -= quantity;
        Ok(())
    }

    /// 依增減量調整庫存
    pub fn adjust(&mut self, delta: i64) -> Result<()> {
        let next = i64::from(self.available)
            .checked_add(delta)
            .ok_or(KitchenError::InvalidQuantity(delta))?;
        self.available = stock_quantity(next)?;
        Ok(())
    }

    /// 套用部分更新（驗證失敗時不做任何修改）
    pub fn apply_patch(&mut self, patch: &IngredientPatch) -> Result<()> {
        patch.validate()?;

        if let Some(available) = patch.available {
            self.available = stock_quantity(available)?;
        }
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        Ok(())
    }

    /// 以此庫存可滿足幾份指定用量
    pub fn units_for(&self, required_count: u32) -> u32 {
        self.available.checked_div(required_count).unwrap_or(0)
    }
}

/// 新增食材請求
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewIngredient {
    pub name: String,

    /// 初始庫存，未提供時為零
    #[serde(default)]
    pub available: Option<i64>,
}

impl NewIngredient {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            available: None,
        }
    }

    /// 建構器模式：設置初始庫存
    pub fn with_available(mut self, available: i64) -> Self {
        self.available = Some(available);
        self
    }

    /// 驗證後的初始庫存
    pub fn initial_stock(&self) -> Result<u32> {
        self.available.map(stock_quantity).unwrap_or(Ok(0))
    }
}

/// 食材部分更新
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientPatch {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub available: Option<i64>,
}

impl IngredientPatch {
    /// 建構器模式：設置名稱
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// 建構器模式：設置庫存
    pub fn with_available(mut self, available: i64) -> Self {
        self.available = Some(available);
        self
    }

    /// 至少需要一個欄位，且庫存不可為負
    pub fn validate(&self) -> Result<()> {
        if self.name.is_none() && self.available.is_none() {
            return Err(KitchenError::EmptyPatch);
        }
        if let Some(available) = self.available {
            stock_quantity(available)?;
        }
        Ok(())
    }
}
