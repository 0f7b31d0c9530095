//! 靜態設定資料
//!
//! 啟動時載入一次、之後唯讀：ID 對照表、特攻武器白名單、標準裝備組、
//! 物品目錄（名稱 + 14 軸加成）與附魔弩箭清單。
//! `PerceptionConfig::default()` 內建一組可直接運行的資料。

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use super::constants::{BONUS_COUNT, DEFAULT_MOVEMENT_DISTANCE_OPTIONS};
use super::equipment::EquipmentInferenceEngine;
use super::ids::IdentifierReconciler;
use super::items::{ItemCatalog, ItemRecord, StaticItemCatalog};
use super::loadouts::{LoadoutBaseline, Loadouts};
use super::roles::{default_allowlists, RoleClassifier, WeaponAllowlists};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("equivalence table is not closed: {from} -> {to} -> {next}")]
    EquivalenceChain { from: i32, to: i32, next: i32 },

    #[error("movement distance head needs at least 2 options, got {0}")]
    DistanceOptions(usize),

    #[error("duplicate item id {0}")]
    DuplicateItem(i32),

    #[error("variant id {variant} of item {item} collides with another item")]
    VariantCollision { item: i32, variant: i32 },
}

/// 附魔弩箭（決策域 ID）
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnchantedBolts {
    pub diamond: Vec<i32>,
    pub dragonstone: Vec<i32>,
    pub opal: Vec<i32>,
}

impl Default for EnchantedBolts {
    fn default() -> Self {
        Self {
            diamond: vec![9243, 21946],
            dragonstone: vec![9244, 21948],
            opal: vec![9236, 21932],
        }
    }
}

/// 感知層設定（JSON）
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerceptionConfig {
    /// (觀察域 ID, 決策域 ID)
    pub equivalences: Vec<(i32, i32)>,
    pub allowlists: WeaponAllowlists,
    pub loadouts: Loadouts,
    pub items: Vec<ItemRecord>,
    pub bolts: EnchantedBolts,
    pub movement_distance_options: usize,
}

impl Default for PerceptionConfig {
    fn default() -> Self {
        Self {
            equivalences: default_equivalences(),
            allowlists: default_allowlists(),
            loadouts: default_loadouts(),
            items: default_items(),
            bolts: EnchantedBolts::default(),
            movement_distance_options: DEFAULT_MOVEMENT_DISTANCE_OPTIONS,
        }
    }
}

impl PerceptionConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        info!(path = %path.display(), items = config.items.len(), "loaded perception config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.movement_distance_options < 2 {
            return Err(ConfigError::DistanceOptions(self.movement_distance_options));
        }
        let mut seen = HashSet::with_capacity(self.items.len());
        for item in &self.items {
            if !seen.insert(item.id) {
                return Err(ConfigError::DuplicateItem(item.id));
            }
        }
        for item in &self.items {
            if let Some(&variant) = item.variants.iter().find(|v| seen.contains(v)) {
                return Err(ConfigError::VariantCollision {
                    item: item.id,
                    variant,
                });
            }
        }
        // 封閉性由 IdentifierReconciler 檢查
        IdentifierReconciler::new(&self.equivalences)?;
        Ok(())
    }
}

// ============================================================================
// 執行期查詢表
// ============================================================================

/// 由設定建構的唯讀查詢表，注入到每個 session
#[derive(Clone, Debug)]
pub struct PerceptionTables {
    pub reconciler: IdentifierReconciler,
    pub roles: RoleClassifier,
    pub catalog: StaticItemCatalog,
    pub loadouts: Loadouts,
    pub baseline: LoadoutBaseline,
    pub bolts: EnchantedBolts,
    pub movement_distance_options: usize,
}

impl PerceptionTables {
    pub fn from_config(config: &PerceptionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let reconciler = IdentifierReconciler::new(&config.equivalences)?;
        let catalog = StaticItemCatalog::new(&config.items);
        let baseline = LoadoutBaseline::from_loadouts(&config.loadouts, &catalog);
        Ok(Self {
            reconciler,
            roles: RoleClassifier::new(&config.allowlists),
            catalog,
            loadouts: config.loadouts.clone(),
            baseline,
            bolts: config.bolts.clone(),
            movement_distance_options: config.movement_distance_options,
        })
    }

    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_config(&PerceptionConfig::default())
    }

    pub fn inference(&self) -> EquipmentInferenceEngine<'_> {
        EquipmentInferenceEngine::new(&self.reconciler)
    }

    /// 標準化後轉入決策域
    pub fn decision_id(&self, observing_id: i32) -> i32 {
        self.reconciler
            .to_decision_id(self.catalog.canonicalize(observing_id))
    }
}

// ============================================================================
// 內建資料
// ============================================================================

fn default_equivalences() -> Vec<(i32, i32)> {
    // LMS 專用變體 → 一般版本
    vec![
        (20405, 4151),
        (20407, 5698),
        (20784, 13652),
        (20593, 11802),
        (20557, 4153),
        (23615, 22613),
        (23620, 22622),
        (20408, 11235),
        (23630, 19481),
        (23619, 22636),
        (23611, 11785),
        (20431, 4675),
    ]
}

fn default_loadouts() -> Loadouts {
    Loadouts {
        melee: vec![4151, 12954, 10828, 6585, 2412, 2503, 1079, 7462, 3105],
        ranged: vec![11785, 10828, 6585, 2412, 2503, 1079, 7462, 3105, 9243],
        mage: vec![4675, 6889, 10828, 6585, 2412, 4712, 4714, 7462, 3105],
        tank: vec![2503, 1079, 12954],
        melee_spec: vec![13652, 10828, 6585, 2503, 1079, 7462, 3105],
    }
}

type Stats = [f64; BONUS_COUNT];

fn stats(attack: [f64; 5], defence: [f64; 5], other: [f64; 4]) -> Stats {
    [
        attack[0], attack[1], attack[2], attack[3], attack[4],
        defence[0], defence[1], defence[2], defence[3], defence[4],
        other[0], other[1], other[2], other[3],
    ]
}

/// 可交易裝備：noted 版本 ID 為本體 + 1
fn item(id: i32, name: &str, s: Stats) -> ItemRecord {
    ItemRecord::new(id, name, Some(s)).with_variants(&[id + 1])
}

/// 彈藥可堆疊，沒有 noted 版本
fn ammo(id: i32, name: &str, ranged_strength: f64) -> ItemRecord {
    ItemRecord::new(id, name, Some(stats([0.0; 5], [0.0; 5], [0.0, ranged_strength, 0.0, 0.0])))
}

fn default_items() -> Vec<ItemRecord> {
    const Z: [f64; 5] = [0.0; 5];
    vec![
        // 近戰武器
        item(4151, "Abyssal whip", stats([0.0, 82.0, 0.0, 0.0, 0.0], Z, [82.0, 0.0, 0.0, 0.0])),
        item(5698, "Dragon dagger(p++)", stats([40.0, 25.0, -4.0, 1.0, 0.0], [0.0, 0.0, 0.0, 1.0, 0.0], [40.0, 0.0, 0.0, 0.0])),
        item(13652, "Dragon claws", stats([41.0, 57.0, -4.0, 0.0, 0.0], [13.0, 26.0, 7.0, 0.0, 0.0], [56.0, 0.0, 0.0, 0.0])),
        item(11802, "Armadyl godsword", stats([0.0, 132.0, 80.0, 0.0, 0.0], Z, [132.0, 0.0, 0.0, 8.0])),
        item(27690, "Voidwaker", stats([70.0, 80.0, -2.0, 0.0, 0.0], [1.0, 4.0, 0.0, 0.0, 0.0], [80.0, 0.0, 0.0, 0.0])),
        item(4153, "Granite maul", stats([0.0, 0.0, 81.0, 0.0, 0.0], Z, [79.0, 0.0, 0.0, 0.0])),
        item(22613, "Vesta's longsword", stats([106.0, 121.0, -2.0, 0.0, 0.0], [1.0, 4.0, 3.0, 0.0, 0.0], [118.0, 0.0, 0.0, 0.0])),
        item(22622, "Statius's warhammer", stats([-4.0, -4.0, 123.0, 0.0, 0.0], Z, [114.0, 0.0, 0.0, 0.0])),
        // 遠程武器
        item(11235, "Dark bow", stats([0.0, 0.0, 0.0, 0.0, 95.0], Z, [0.0, 0.0, 0.0, 0.0])),
        item(19481, "Heavy ballista", stats([0.0, 0.0, 0.0, 0.0, 125.0], Z, [0.0, 15.0, 0.0, 0.0])),
        item(22636, "Morrigan's javelin", stats([0.0, 0.0, 0.0, 0.0, 105.0], Z, [0.0, 145.0, 0.0, 0.0])),
        item(26374, "Zaryte crossbow", stats([0.0, 0.0, 0.0, 0.0, 110.0], Z, [0.0, 0.0, 0.0, 1.0])),
        item(11785, "Armadyl crossbow", stats([0.0, 0.0, 0.0, 0.0, 100.0], Z, [0.0, 0.0, 0.0, 1.0])),
        item(22804, "Dragon knife", stats([0.0, 0.0, 0.0, 0.0, 35.0], Z, [0.0, 25.0, 0.0, 0.0])),
        item(9185, "Rune crossbow", stats([0.0, 0.0, 0.0, 0.0, 90.0], Z, [0.0, 0.0, 0.0, 0.0])),
        // 魔法武器
        item(24424, "Volatile nightmare staff", stats([0.0, 0.0, 0.0, 16.0, 0.0], [0.0, 0.0, 0.0, 16.0, 0.0], [0.0, 0.0, 15.0, 0.0])),
        item(4675, "Ancient staff", stats([10.0, -1.0, 40.0, 15.0, 0.0], [2.0, 3.0, 1.0, 15.0, 0.0], [50.0, 0.0, 0.0, 0.0])),
        item(21006, "Kodai wand", stats([0.0, 0.0, 0.0, 28.0, 0.0], [0.0, 3.0, 3.0, 20.0, 0.0], [0.0, 0.0, 15.0, 0.0])),
        // 防具
        item(10828, "Helm of neitiznot", stats(Z, [31.0, 29.0, 34.0, 3.0, 30.0], [3.0, 0.0, 0.0, 3.0])),
        item(6585, "Amulet of fury", stats([10.0; 5], [15.0; 5], [8.0, 0.0, 0.0, 5.0])),
        item(2412, "Saradomin cape", stats([0.0, 0.0, 0.0, 10.0, 0.0], [1.0, 1.0, 1.0, 10.0, 0.0], [0.0, 0.0, 0.0, 0.0])),
        item(2503, "Black d'hide body", stats([0.0, 0.0, 0.0, -15.0, 30.0], [55.0, 47.0, 60.0, 50.0, 57.0], [0.0, 0.0, 0.0, 0.0])),
        item(1079, "Rune platelegs", stats([0.0, 0.0, 0.0, -21.0, -11.0], [51.0, 49.0, 47.0, -4.0, 49.0], [0.0, 0.0, 0.0, 0.0])),
        item(4712, "Ahrim's robetop", stats([0.0, 0.0, 0.0, 30.0, -10.0], [52.0, 37.0, 63.0, 30.0, 0.0], [0.0, 0.0, 0.0, 0.0])),
        item(4714, "Ahrim's robeskirt", stats([0.0, 0.0, 0.0, 22.0, -7.0], [33.0, 30.0, 36.0, 22.0, 0.0], [0.0, 0.0, 0.0, 0.0])),
        item(7462, "Barrows gloves", stats([12.0, 12.0, 12.0, 6.0, 12.0], [12.0, 12.0, 12.0, 6.0, 12.0], [12.0, 0.0, 0.0, 0.0])),
        item(3105, "Climbing boots", stats(Z, Z, [2.0, 0.0, 0.0, 0.0])),
        item(12954, "Dragon defender", stats([25.0, 24.0, 23.0, -3.0, -2.0], [25.0, 24.0, 23.0, -3.0, -2.0], [6.0, 0.0, 0.0, 0.0])),
        item(6889, "Mage's book", stats([0.0, 0.0, 0.0, 15.0, 0.0], [0.0, 0.0, 0.0, 15.0, 0.0], [0.0, 0.0, 0.0, 0.0])),
        item(2550, "Ring of recoil", stats(Z, Z, [0.0; 4])),
        // 彈藥
        ammo(9243, "Diamond bolts (e)", 105.0),
        ammo(21946, "Diamond dragon bolts (e)", 117.0),
        ammo(9244, "Dragonstone bolts (e)", 117.0),
        ammo(21948, "Dragonstone dragon bolts (e)", 122.0),
        ammo(9236, "Opal bolts (e)", 14.0),
        ammo(21932, "Opal dragon bolts (e)", 122.0),
        // 消耗品（沒有裝備屬性）
        ItemRecord::new(391, "Manta ray", None).with_variants(&[392]),
        ItemRecord::new(3144, "Cooked karambwan", None).with_variants(&[3145]),
    ]
}

// ============================================================================
// 單元測試
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::equipment::BonusVector;

    #[test]
    fn test_default_config_valid() {
        let config = PerceptionConfig::default();
        assert!(config.validate().is_ok());
        let tables = PerceptionTables::from_config(&config).unwrap();
        assert_eq!(tables.baseline.candidate_count(), 5);
        assert_eq!(tables.reconciler.to_decision_id(20405), 4151);
        assert_eq!(tables.catalog.canonicalize(4152), 4151);
    }

    #[test]
    fn test_decision_id_canonicalizes_then_reconciles() {
        let tables = PerceptionTables::builtin().unwrap();
        // 記號變體 → 基礎 ID
        assert_eq!(tables.decision_id(4152), 4151);
        // LMS 變體 → 一般版本
        assert_eq!(tables.decision_id(20405), 4151);
        assert_eq!(tables.decision_id(4151), 4151);
        assert_eq!(tables.decision_id(-1), -1);
    }

    #[test]
    fn test_default_baseline_is_positive() {
        let tables = PerceptionTables::builtin().unwrap();
        let baseline = tables.baseline.bonuses();
        assert!(baseline.get(BonusVector::SLASH_DEFENCE) > 0.0);
        assert!(baseline.get(BonusVector::MELEE_STRENGTH) > 0.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = PerceptionConfig::from_json_str(r#"{ "movement_distance_options": 9 }"#).unwrap();
        assert_eq!(config.movement_distance_options, 9);
        assert_eq!(config.loadouts, default_loadouts());
    }

    #[test]
    fn test_json_round_trip_of_items() {
        let json = r#"{
            "items": [{ "id": 1, "name": "Test sword", "stats": [1,2,3,4,5,6,7,8,9,10,11,12,13,14] }],
            "equivalences": [[100, 1]]
        }"#;
        let config = PerceptionConfig::from_json_str(json).unwrap();
        let tables = PerceptionTables::from_config(&config).unwrap();
        assert_eq!(tables.catalog.stats(1).unwrap().get(13), 14.0);
        assert_eq!(tables.reconciler.to_decision_id(100), 1);
    }

    #[test]
    fn test_invalid_configs_rejected() {
        assert!(matches!(
            PerceptionConfig::from_json_str(r#"{ "movement_distance_options": 1 }"#),
            Err(ConfigError::DistanceOptions(1))
        ));
        assert!(matches!(
            PerceptionConfig::from_json_str(r#"{ "equivalences": [[1, 2], [2, 3]] }"#),
            Err(ConfigError::EquivalenceChain { .. })
        ));
        assert!(matches!(
            PerceptionConfig::from_json_str(
                r#"{ "items": [{ "id": 5, "name": "a" }, { "id": 5, "name": "b" }] }"#
            ),
            Err(ConfigError::DuplicateItem(5))
        ));
        assert!(matches!(
            PerceptionConfig::from_json_str(
                r#"{ "items": [{ "id": 5, "name": "a", "variants": [6] }, { "id": 6, "name": "b" }] }"#
            ),
            Err(ConfigError::VariantCollision { item: 5, variant: 6 })
        ));
        // 屬性必須剛好 14 軸
        assert!(matches!(
            PerceptionConfig::from_json_str(r#"{ "items": [{ "id": 5, "name": "a", "stats": [1, 2] }] }"#),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            PerceptionConfig::load("/nonexistent/pvp_env.json"),
            Err(ConfigError::Io(_))
        ));
    }
}
