//! 觀察域 → 決策域物品 ID 對照
//!
//! 兩個編號空間絕大多數重疊，只有少數物品（例如 LMS 專用變體）在決策端
//! 使用不同 ID。對照表是靜態設定，未登錄的 ID 原樣返回。

use std::collections::HashMap;

use super::config::ConfigError;

/// 物品 ID 對照器，建構後唯讀
#[derive(Clone, Debug, Default)]
pub struct IdentifierReconciler {
    table: HashMap<i32, i32>,
}

impl IdentifierReconciler {
    /// 從 (觀察域, 決策域) 配對建構
    ///
    /// 對照表必須封閉：任何目標 ID 不能再被映射到別的 ID，
    /// 這樣 `to_decision_id` 才是冪等的。
    pub fn new(pairs: &[(i32, i32)]) -> Result<Self, ConfigError> {
        let table: HashMap<i32, i32> = pairs.iter().copied().collect();
        for (&from, &to) in &table {
            if let Some(&next) = table.get(&to) {
                if next != to {
                    return Err(ConfigError::EquivalenceChain { from, to, next });
                }
            }
        }
        Ok(Self { table })
    }

    pub fn to_decision_id(&self, observing_id: i32) -> i32 {
        self.table.get(&observing_id).copied().unwrap_or(observing_id)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

// ============================================================================
// 單元測試
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn reconciler() -> IdentifierReconciler {
        IdentifierReconciler::new(&[(20405, 4151), (23615, 22613), (20593, 11802)]).unwrap()
    }

    #[test]
    fn test_mapped_ids() {
        let r = reconciler();
        assert_eq!(r.to_decision_id(20405), 4151);
        assert_eq!(r.to_decision_id(23615), 22613);
    }

    #[test]
    fn test_identity_fallback() {
        let r = reconciler();
        assert_eq!(r.to_decision_id(4151), 4151);
        assert_eq!(r.to_decision_id(0), 0);
        assert_eq!(r.to_decision_id(-1), -1);
        assert_eq!(r.to_decision_id(i32::MAX), i32::MAX);
    }

    #[test]
    fn test_chained_table_rejected() {
        let result = IdentifierReconciler::new(&[(1, 2), (2, 3)]);
        assert!(matches!(
            result,
            Err(ConfigError::EquivalenceChain { from: 1, to: 2, next: 3 })
        ));
    }

    #[test]
    fn test_self_mapping_allowed() {
        let r = IdentifierReconciler::new(&[(5, 5), (6, 5)]).unwrap();
        assert_eq!(r.to_decision_id(6), 5);
        assert_eq!(r.to_decision_id(5), 5);
    }

    proptest! {
        #[test]
        fn prop_to_decision_id_idempotent(x in any::<i32>()) {
            let r = reconciler();
            let once = r.to_decision_id(x);
            prop_assert_eq!(r.to_decision_id(once), once);
        }
    }
}
