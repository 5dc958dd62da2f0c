//! 配方關聯比對
//!
//! 比對品項既有的（食材, 用量）關聯與目標配方，產生最少的新增、更新與刪除。

use kitchen_core::{BomEntry, IngredientId, KitchenError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// 比對結果：三組互不重疊的寫入
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcilePlan {
    /// 既有關聯中沒有的食材（依目標順序）
    pub to_insert: Vec<BomEntry>,

    /// 用量改變的食材，帶新用量（依目標順序）
    pub to_update: Vec<BomEntry>,

    /// 目標中沒有的既有關聯（依食材ID遞增）
    pub to_delete: Vec<BomEntry>,
}

impl ReconcilePlan {
    /// 是否不需任何寫入
    pub fn is_noop(&self) -> bool {
        self.to_insert.is_empty() && self.to_update.is_empty() && self.to_delete.is_empty()
    }

    /// 寫入筆數
    pub fn write_count(&self) -> usize {
        self.to_insert.len() + self.to_update.len() + self.to_delete.len()
    }

    /// 將計畫套用到既有關聯上，回傳依食材ID遞增的結果
    pub fn apply(&self, existing: &[BomEntry]) -> Vec<BomEntry> {
        let deleted: HashSet<IngredientId> =
            self.to_delete.iter().map(|e| e.ingredient_id).collect();

        let mut result: Vec<BomEntry> = existing
            .iter()
            .filter(|e| !deleted.contains(&e.ingredient_id))
            .map(|e| {
                self.to_update
                    .iter()
                    .find(|u| u.ingredient_id == e.ingredient_id)
                    .copied()
                    .unwrap_or(*e)
            })
            .chain(self.to_insert.iter().copied())
            .collect();

        result.sort_by_key(|e| e.ingredient_id);
        result
    }
}

/// 配方關聯比對器
pub struct AssociationReconciler;

impl AssociationReconciler {
    /// 比對既有關聯與目標配方
    ///
    /// `existing` 必須依食材ID遞增排序（由儲存層保證），每個目標項目以二分搜尋
    /// 查找對應的既有關聯：
    /// - 找到且用量不同：列入 `to_update`
    /// - 找到且用量相同：不需寫入
    /// - 找不到：列入 `to_insert`
    ///
    /// 找到的既有關聯即被認領，最後未被認領的既有關聯全部列入 `to_delete`。
    /// 食材ID是否存在由呼叫端事先驗證。
    pub fn reconcile(
        existing: &[BomEntry],
        desired: &[BomEntry],
    ) -> kitchen_core::Result<ReconcilePlan> {
        if existing
            .windows(2)
            .any(|pair| pair[0].ingredient_id >= pair[1].ingredient_id)
        {
            return Err(KitchenError::UnsortedAssociations);
        }

        let mut claimed = vec![false; existing.len()];
        let mut seen = HashSet::with_capacity(desired.len());
        let mut plan = ReconcilePlan::default();

        for entry in desired {
            entry.validate()?;
            if !seen.insert(entry.ingredient_id) {
                return Err(KitchenError::DuplicateIngredient(entry.ingredient_id));
            }

            match Self::binary_search(existing, entry.ingredient_id) {
                Some(index) => {
                    if existing[index].count != entry.count {
                        plan.to_update.push(*entry);
                    }
                    claimed[index] = true;
                }
                None => plan.to_insert.push(*entry),
            }
        }

        plan.to_delete = existing
            .iter()
            .zip(&claimed)
            .filter(|&(_, &is_claimed)| !is_claimed)
            .map(|(entry, _)| *entry)
            .collect();

        Ok(plan)
    }

    /// 遞增排序陣列上的標準二分搜尋
    fn binary_search(sorted: &[BomEntry], target: IngredientId) -> Option<usize> {
        let mut low = 0;
        let mut high = sorted.len();

        while low < high {
            let mid = low + (high - low) / 2;
            let candidate = sorted[mid].ingredient_id;

            if candidate == target {
                return Some(mid);
            }
            if candidate < target {
                low = mid + 1;
            } else {
                high = mid;
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;
    use std::collections::BTreeMap;

    fn entries(pairs: &[(i64, u32)]) -> Vec<BomEntry> {
        pairs
            .iter()
            .map(|&(id, count)| BomEntry::new(IngredientId(id), count))
            .collect()
    }

    #[rstest]
    // 部分重疊：保留 1、新增 4、刪除 3
    #[case(&[(1, 2), (3, 5)], &[(1, 2), (4, 7)], &[(4, 7)], &[], &[(3, 5)])]
    // 只改用量
    #[case(&[(1, 2)], &[(1, 9)], &[], &[(1, 9)], &[])]
    // 從無到有
    #[case(&[], &[(2, 1), (1, 3)], &[(2, 1), (1, 3)], &[], &[])]
    // 清空配方
    #[case(&[(1, 1), (2, 2)], &[], &[], &[], &[(1, 1), (2, 2)])]
    // 完全不重疊
    #[case(&[(1, 1), (2, 2)], &[(3, 3)], &[(3, 3)], &[], &[(1, 1), (2, 2)])]
    // 重疊且混合變更
    #[case(
        &[(1, 1), (2, 2), (5, 5), (8, 8)],
        &[(8, 8), (2, 3), (6, 1)],
        &[(6, 1)],
        &[(2, 3)],
        &[(1, 1), (5, 5)]
    )]
    fn test_reconcile(
        #[case] existing: &[(i64, u32)],
        #[case] desired: &[(i64, u32)],
        #[case] to_insert: &[(i64, u32)],
        #[case] to_update: &[(i64, u32)],
        #[case] to_delete: &[(i64, u32)],
    ) {
        let plan = AssociationReconciler::reconcile(&entries(existing), &entries(desired)).unwrap();

        assert_eq!(plan.to_insert, entries(to_insert));
        assert_eq!(plan.to_update, entries(to_update));
        assert_eq!(plan.to_delete, entries(to_delete));
    }

    #[test]
    fn test_identical_sets_are_noop() {
        let existing = entries(&[(1, 2), (3, 5), (9, 1)]);
        let plan = AssociationReconciler::reconcile(&existing, &existing).unwrap();

        assert!(plan.is_noop());
        assert_eq!(plan.write_count(), 0);
    }

    #[test]
    fn test_rejects_invalid_input() {
        assert_eq!(
            AssociationReconciler::reconcile(&entries(&[(3, 1), (1, 1)]), &[]),
            Err(KitchenError::UnsortedAssociations)
        );
        assert_eq!(
            AssociationReconciler::reconcile(&[], &entries(&[(1, 1), (1, 2)])),
            Err(KitchenError::DuplicateIngredient(IngredientId(1)))
        );
        assert_eq!(
            AssociationReconciler::reconcile(&[], &entries(&[(1, 0)])),
            Err(KitchenError::InvalidQuantity(0))
        );
    }

    #[test]
    fn test_binary_search_finds_every_element() {
        let sorted = entries(&[(1, 1), (4, 1), (6, 1), (10, 1), (15, 1)]);

        for (index, entry) in sorted.iter().enumerate() {
            assert_eq!(
                AssociationReconciler::binary_search(&sorted, entry.ingredient_id),
                Some(index)
            );
        }
        for missing in [0, 2, 5, 11, 20] {
            assert_eq!(
                AssociationReconciler::binary_search(&sorted, IngredientId(missing)),
                None
            );
        }
        assert_eq!(AssociationReconciler::binary_search(&[], IngredientId(1)), None);
    }

    fn arb_existing() -> impl Strategy<Value = Vec<BomEntry>> {
        prop::collection::btree_map(0i64..40, 1u32..10, 0..15).prop_map(|map| {
            map.into_iter()
                .map(|(id, count)| BomEntry::new(IngredientId(id), count))
                .collect()
        })
    }

    fn arb_desired() -> impl Strategy<Value = Vec<BomEntry>> {
        prop::collection::btree_map(0i64..40, 1u32..10, 0..15)
            .prop_map(|map| {
                map.into_iter()
                    .map(|(id, count)| BomEntry::new(IngredientId(id), count))
                    .collect::<Vec<_>>()
            })
            .prop_shuffle()
    }

    proptest! {
        #[test]
        fn prop_apply_yields_desired(existing in arb_existing(), desired in arb_desired()) {
            let plan = AssociationReconciler::reconcile(&existing, &desired).unwrap();

            let mut expected = desired.clone();
            expected.sort_by_key(|e| e.ingredient_id);
            prop_assert_eq!(plan.apply(&existing), expected);
        }

        #[test]
        fn prop_outputs_are_disjoint_and_minimal(existing in arb_existing(), desired in arb_desired()) {
            let plan = AssociationReconciler::reconcile(&existing, &desired).unwrap();

            let before: BTreeMap<IngredientId, u32> =
                existing.iter().map(|e| (e.ingredient_id, e.count)).collect();
            let after: BTreeMap<IngredientId, u32> =
                desired.iter().map(|e| (e.ingredient_id, e.count)).collect();

            for entry in &plan.to_insert {
                prop_assert!(!before.contains_key(&entry.ingredient_id));
            }
            for entry in &plan.to_update {
                prop_assert!(before.contains_key(&entry.ingredient_id));
                prop_assert_ne!(before[&entry.ingredient_id], entry.count);
            }
            for entry in &plan.to_delete {
                prop_assert!(!after.contains_key(&entry.ingredient_id));
            }

            let changed = after
                .iter()
                .filter(|(id, count)| before.get(id) != Some(count))
                .count();
            let removed = before.keys().filter(|id| !after.contains_key(id)).count();
            prop_assert_eq!(plan.write_count(), changed + removed);
        }

        #[test]
        fn prop_reconcile_with_itself_is_noop(existing in arb_existing()) {
            let plan = AssociationReconciler::reconcile(&existing, &existing).unwrap();
            prop_assert!(plan.is_noop());
        }
    }
}
