//! 配方（物料清單）模型

use serde::{Deserialize, Serialize};

use crate::ingredient::IngredientId;
use crate::{KitchenError, Result};

/// 配方項目：製作一份品項所需的某食材用量
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BomEntry {
    /// 食材ID
    pub ingredient_id: IngredientId,

    /// 每份用量（必須大於零）
    pub count: u32,
}

impl BomEntry {
    pub fn new(ingredient_id: IngredientId, count: u32) -> Self {
        Self {
            ingredient_id,
            count,
        }
    }

    /// 檢查用量
    pub fn validate(&self) -> Result<()> {
        if self.count == 0 {
            return Err(KitchenError::InvalidQuantity(0));
        }
        Ok(())
    }
}

/// 品項配方
///
/// 內部依食材ID遞增排序，每種食材至多一筆，用量皆大於零。
/// 此排序即為關聯比對所依賴的順序。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<BomEntry>", into = "Vec<BomEntry>")]
pub struct BillOfMaterials {
    entries: Vec<BomEntry>,
}

impl BillOfMaterials {
    /// 創建空配方
    pub fn new() -> Self {
        Self::default()
    }

    /// 由任意順序的項目建立配方
    pub fn from_entries(entries: impl IntoIterator<Item = BomEntry>) -> Result<Self> {
        let mut entries: Vec<BomEntry> = entries.into_iter().collect();
        for entry in &entries {
            entry.validate()?;
        }

        entries.sort_by_key(|e| e.ingredient_id);
        if let Some(pair) = entries
            .windows(2)
            .find(|pair| pair[0].ingredient_id == pair[1].ingredient_id)
        {
            return Err(KitchenError::DuplicateIngredient(pair[0].ingredient_id));
        }

        Ok(Self { entries })
    }

    /// 依食材ID遞增排列的項目
    pub fn entries(&self) -> &[BomEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 查詢某食材的每份用量
    pub fn count_of(&self, ingredient_id: IngredientId) -> Option<u32> {
        self.position_of(ingredient_id)
            .ok()
            .map(|index| self.entries[index].count)
    }

    /// 是否使用某食材
    pub fn uses(&self, ingredient_id: IngredientId) -> bool {
        self.position_of(ingredient_id).is_ok()
    }

    /// 新增或更新一筆項目
    pub fn upsert(&mut self, entry: BomEntry) -> Result<()> {
        entry.validate()?;
        match self.position_of(entry.ingredient_id) {
            Ok(index) => self.entries[index].count = entry.count,
            Err(index) => self.entries.insert(index, entry),
        }
        Ok(())
    }

    /// 移除某食材，回傳被移除的項目
    pub fn remove(&mut self, ingredient_id: IngredientId) -> Option<BomEntry> {
        self.position_of(ingredient_id)
            .ok()
            .map(|index| self.entries.remove(index))
    }

    fn position_of(&self, ingredient_id: IngredientId) -> std::result::Result<usize, usize> {
        self.entries
            .binary_search_by_key(&ingredient_id, |e| e.ingredient_id)
    }
}

impl TryFrom<Vec<BomEntry>> for BillOfMaterials {
    type Error = KitchenError;

    fn try_from(entries: Vec<BomEntry>) -> Result<Self> {
        Self::from_entries(entries)
    }
}

impl From<BillOfMaterials> for Vec<BomEntry> {
    fn from(bom: BillOfMaterials) -> Self {
        bom.entries
    }
}

/// 配方項目連同食材名稱與現有庫存（儲存層的聯結查詢結果）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StockedBomEntry {
    /// 食材ID
    pub ingredient_id: IngredientId,

    /// 食材名稱
    pub ingredient_name: String,

    /// 每份用量
    pub required_count: u32,

    /// 現有庫存
    pub current_stock: u32,
}

impl StockedBomEntry {
    pub fn new(
        ingredient_id: IngredientId,
        ingredient_name: impl Into<String>,
        required_count: u32,
        current_stock: u32,
    ) -> Self {
        Self {
            ingredient_id,
            ingredient_name: ingredient_name.into(),
            required_count,
            current_stock,
        }
    }

    /// 以現有庫存可製作的份數（向下取整）
    ///
    /// 用量為零屬於上游應拒絕的輸入，此處視為無法製作。
    pub fn units_possible(&self) -> u32 {
        self.current_stock
            .checked_div(self.required_count)
            .unwrap_or(0)
    }

    /// 現有庫存是否足以製作指定份數
    pub fn covers(&self, units: u32) -> bool {
        u64::from(self.required_count) * u64::from(units) <= u64::from(self.current_stock)
    }

    /// 不含庫存的配方項目
    pub fn entry(&self) -> BomEntry {
        BomEntry::new(self.ingredient_id, self.required_count)
    }
}
