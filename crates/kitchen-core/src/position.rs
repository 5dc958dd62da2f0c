//! 品項（菜單上的餐點）模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::bom::{BillOfMaterials, BomEntry};
use crate::ingredient::IngredientId;
use crate::{positive_quantity, KitchenError, Result};

/// 品項ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PositionId(pub i64);

impl fmt::Display for PositionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 品項
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// 品項ID
    pub id: PositionId,

    /// 名稱（唯一）
    pub name: String,

    /// 說明
    pub description: Option<String>,

    /// 是否可客製
    pub is_changable: bool,

    /// 售價（不可為負）
    pub cost: Decimal,

    /// 配方
    pub bill_of_materials: BillOfMaterials,
}

impl Position {
    /// 創建新的品項（無配方）
    pub fn new(id: PositionId, name: String, cost: Decimal) -> Self {
        Self {
            id,
            name,
            description: None,
            is_changable: false,
            cost,
            bill_of_materials: BillOfMaterials::new(),
        }
    }

    /// 建構器模式：設置說明
    pub fn with_description(mut self, description: String) -> Self {
        self.description = Some(description);
        self
    }

    /// 建構器模式：設置是否可客製
    pub fn with_changable(mut self, is_changable: bool) -> Self {
        self.is_changable = is_changable;
        self
    }

    /// 建構器模式：設置配方
    pub fn with_bill_of_materials(mut self, bill_of_materials: BillOfMaterials) -> Self {
        self.bill_of_materials = bill_of_materials;
        self
    }

    /// 點 `count` 份的金額
    pub fn line_cost(&self, count: u32) -> Result<Decimal> {
        self.cost
            .checked_mul(Decimal::from(count))
            .ok_or(KitchenError::CostOverflow(self.id))
    }

    /// 套用部分更新，只改動有提供的欄位
    pub fn apply_patch(&mut self, patch: &PositionPatch) -> Result<()> {
        patch.validate()?;

        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(description) = &patch.description {
            self.description = Some(description.clone());
        }
        if let Some(is_changable) = patch.is_changable {
            self.is_changable = is_changable;
        }
        if let Some(cost) = patch.cost {
            self.cost = cost;
        }
        Ok(())
    }
}

/// 檢查售價：不可為負，且必須是整數金額
pub fn validate_cost(cost: Decimal) -> Result<()> {
    if cost < Decimal::ZERO || !cost.fract().is_zero() {
        return Err(KitchenError::InvalidCost(cost));
    }
    Ok(())
}

/// 請求中的食材用量（尚未驗證）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientAmount {
    pub ingredient_id: IngredientId,
    pub count: i64,
}

impl IngredientAmount {
    pub fn new(ingredient_id: IngredientId, count: i64) -> Self {
        Self {
            ingredient_id,
            count,
        }
    }

    /// 轉換為配方項目，用量必須大於零
    pub fn to_entry(&self) -> Result<BomEntry> {
        Ok(BomEntry::new(self.ingredient_id, positive_quantity(self.count)?))
    }
}

/// 驗證一組食材用量，保留請求順序
pub fn entries_from_amounts(amounts: &[IngredientAmount]) -> Result<Vec<BomEntry>> {
    amounts.iter().map(IngredientAmount::to_entry).collect()
}

/// 新增品項請求
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPosition {
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub is_changable: Option<bool>,

    pub cost: Decimal,

    #[serde(default)]
    pub ingredients: Vec<IngredientAmount>,
}

impl NewPosition {
    pub fn new(name: impl Into<String>, cost: Decimal) -> Self {
        Self {
            name: name.into(),
            description: None,
            is_changable: None,
            cost,
            ingredients: Vec::new(),
        }
    }

    /// 建構器模式：設置說明
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// 建構器模式：設置是否可客製
    pub fn with_changable(mut self, is_changable: bool) -> Self {
        self.is_changable = Some(is_changable);
        self
    }

    /// 建構器模式：添加食材用量
    pub fn with_ingredient(mut self, ingredient_id: IngredientId, count: i64) -> Self {
        self.ingredients
            .push(IngredientAmount::new(ingredient_id, count));
        self
    }

    /// 驗證售價與用量，回傳配方
    pub fn validate(&self) -> Result<BillOfMaterials> {
        validate_cost(self.cost)?;
        BillOfMaterials::from_entries(entries_from_amounts(&self.ingredients)?)
    }

    /// 由已驗證的欄位逐一建立品項
    pub fn to_position(&self, id: PositionId, bill_of_materials: BillOfMaterials) -> Position {
        Position {
            id,
            name: self.name.clone(),
            description: self.description.clone(),
            is_changable: self.is_changable.unwrap_or(false),
            cost: self.cost,
            bill_of_materials,
        }
    }
}

/// 品項部分更新
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionPatch {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub is_changable: Option<bool>,

    #[serde(default)]
    pub cost: Option<Decimal>,
}

impl PositionPatch {
    /// 建構器模式：設置名稱
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// 建構器模式：設置說明
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// 建構器模式：設置是否可客製
    pub fn with_changable(mut self, is_changable: bool) -> Self {
        self.is_changable = Some(is_changable);
        self
    }

    /// 建構器模式：設置售價
    pub fn with_cost(mut self, cost: Decimal) -> Self {
        self.cost = Some(cost);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.is_changable.is_none()
            && self.cost.is_none()
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(cost) = self.cost {
            validate_cost(cost)?;
        }
        Ok(())
    }
}
