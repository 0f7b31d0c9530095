//! 物品元數據查詢
//!
//! 觀察端（遊戲客戶端）提供的物品資訊：名稱、標準化（noted / placeholder
//! 變體還原成本體）以及 14 軸裝備加成。推論引擎與角色分類只透過
//! `ItemCatalog` trait 取用，查不到時一律回傳 `None`，由呼叫端降級處理。

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::constants::BONUS_COUNT;
use super::equipment::BonusVector;

/// 物品元數據查詢介面
pub trait ItemCatalog {
    /// 物品名稱（小寫比對由呼叫端處理）
    fn name(&self, item_id: i32) -> Option<&str>;

    /// 將 noted / placeholder 變體還原為本體 ID，未知 ID 原樣返回
    fn canonicalize(&self, item_id: i32) -> i32;

    /// 裝備加成；沒有詳細屬性時返回 `None`
    fn stats(&self, item_id: i32) -> Option<BonusVector>;
}

/// 單一物品記錄（設定檔格式）
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub id: i32,
    pub name: String,
    /// 14 軸加成，順序同 `BonusVector`
    #[serde(default)]
    pub stats: Option<[f64; BONUS_COUNT]>,
    /// noted / placeholder 等變體 ID
    #[serde(default)]
    pub variants: Vec<i32>,
}

impl ItemRecord {
    pub fn new(id: i32, name: &str, stats: Option<[f64; BONUS_COUNT]>) -> Self {
        Self {
            id,
            name: name.to_string(),
            stats,
            variants: Vec::new(),
        }
    }

    pub fn with_variants(mut self, variants: &[i32]) -> Self {
        self.variants = variants.to_vec();
        self
    }
}

/// 以靜態資料建構的物品目錄，初始化後唯讀
#[derive(Clone, Debug, Default)]
pub struct StaticItemCatalog {
    items: HashMap<i32, ItemRecord>,
    canonical: HashMap<i32, i32>,
}

impl StaticItemCatalog {
    pub fn new(records: &[ItemRecord]) -> Self {
        let mut items = HashMap::with_capacity(records.len());
        let mut canonical = HashMap::new();
        for record in records {
            for &variant in &record.variants {
                canonical.insert(variant, record.id);
            }
            items.insert(record.id, record.clone());
        }
        Self { items, canonical }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl ItemCatalog for StaticItemCatalog {
    fn name(&self, item_id: i32) -> Option<&str> {
        self.items.get(&item_id).map(|r| r.name.as_str())
    }

    fn canonicalize(&self, item_id: i32) -> i32 {
        self.canonical.get(&item_id).copied().unwrap_or(item_id)
    }

    fn stats(&self, item_id: i32) -> Option<BonusVector> {
        self.items
            .get(&item_id)
            .and_then(|r| r.stats)
            .map(BonusVector::from_array)
    }
}

// ============================================================================
// 單元測試
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> StaticItemCatalog {
        let mut whip_stats = [0.0; BONUS_COUNT];
        whip_stats[1] = 82.0;
        whip_stats[10] = 82.0;
        StaticItemCatalog::new(&[
            ItemRecord::new(4151, "Abyssal whip", Some(whip_stats)).with_variants(&[4152, 14032]),
            ItemRecord::new(391, "Manta ray", None),
        ])
    }

    #[test]
    fn test_canonicalize_variants() {
        let catalog = catalog();
        assert_eq!(catalog.canonicalize(4152), 4151);
        assert_eq!(catalog.canonicalize(14032), 4151);
        assert_eq!(catalog.canonicalize(4151), 4151);
        assert_eq!(catalog.canonicalize(-5), -5);
    }

    #[test]
    fn test_stats_lookup() {
        let catalog = catalog();
        let stats = catalog.stats(4151).expect("whip stats");
        assert_eq!(stats.get(10), 82.0);
        assert!(catalog.stats(391).is_none());
        assert!(catalog.stats(12345).is_none());
    }

    #[test]
    fn test_name_lookup() {
        let catalog = catalog();
        assert_eq!(catalog.name(4151), Some("Abyssal whip"));
        assert_eq!(catalog.name(0), None);
        assert_eq!(catalog.len(), 2);
    }
}
