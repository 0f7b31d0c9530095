//! 武器角色分類
//!
//! 兩種分類來源：
//! - 名稱關鍵字（需要 `ItemCatalog`）：判斷遠程 / 魔法 / 近戰
//! - 白名單：特定特攻武器，一個概念武器可能對應多個 ID（耗損、裝飾、LMS 變體）
//!
//! # 預設近戰偏差
//!
//! 查不到元數據或 ID 非正數時，遠程與魔法都回傳 false，
//! 因此 `is_melee_weapon` 預設為 true。這是刻意的保守退路。

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::items::ItemCatalog;

const RANGED_KEYWORDS: [&str; 9] = [
    "crossbow",
    "bow",
    "ballista",
    "javelin",
    "knife",
    "dart",
    "thrown axe",
    "blowpipe",
    "chinchompa",
];

const MAGE_KEYWORDS: [&str; 4] = ["staff", "wand", "sceptre", "trident"];

/// 攻擊風格
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombatStyle {
    Melee,
    Ranged,
    Mage,
}

impl CombatStyle {
    pub fn all() -> &'static [CombatStyle] {
        &[CombatStyle::Melee, CombatStyle::Ranged, CombatStyle::Mage]
    }
}

// ============================================================================
// 特攻武器定義
// ============================================================================

/// 追蹤的特攻武器
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecialWeapon {
    DragonDagger,
    DragonClaws,
    ArmadylGodsword,
    Voidwaker,
    GraniteMaul,
    VestasLongsword,
    StatiusWarhammer,
    DarkBow,
    HeavyBallista,
    MorrigansJavelin,
    ZaryteCrossbow,
    ArmadylCrossbow,
    DragonKnife,
    VolatileNightmareStaff,
}

/// 特攻武器定義結構
#[derive(Clone, Copy, Debug)]
pub struct SpecialWeaponDef {
    pub weapon: SpecialWeapon,
    pub name: &'static str,
    pub style: CombatStyle,
    /// 特攻消耗（百分比）
    pub energy: i32,
    /// 預設白名單（決策域 ID）
    pub ids: &'static [i32],
}

pub const SPECIAL_WEAPON_COUNT: usize = 14;

/// 特攻武器定義表（順序與 SpecialWeapon 枚舉值一致，也是 observation 順序）
pub static SPECIAL_WEAPON_DEFS: [SpecialWeaponDef; SPECIAL_WEAPON_COUNT] = [
    // 近戰
    SpecialWeaponDef { weapon: SpecialWeapon::DragonDagger, name: "dragon_dagger", style: CombatStyle::Melee, energy: 25, ids: &[1215, 1231, 5680, 5698, 20407] },
    SpecialWeaponDef { weapon: SpecialWeapon::DragonClaws, name: "dragon_claws", style: CombatStyle::Melee, energy: 50, ids: &[13652, 20784] },
    SpecialWeaponDef { weapon: SpecialWeapon::ArmadylGodsword, name: "armadyl_godsword", style: CombatStyle::Melee, energy: 50, ids: &[11802, 20368, 20593] },
    SpecialWeaponDef { weapon: SpecialWeapon::Voidwaker, name: "voidwaker", style: CombatStyle::Melee, energy: 50, ids: &[27690] },
    SpecialWeaponDef { weapon: SpecialWeapon::GraniteMaul, name: "granite_maul", style: CombatStyle::Melee, energy: 50, ids: &[4153, 12848, 20557, 24225, 24227] },
    SpecialWeaponDef { weapon: SpecialWeapon::VestasLongsword, name: "vestas_longsword", style: CombatStyle::Melee, energy: 25, ids: &[22613, 22615, 23615, 24617] },
    SpecialWeaponDef { weapon: SpecialWeapon::StatiusWarhammer, name: "statius_warhammer", style: CombatStyle::Melee, energy: 35, ids: &[22622, 22624, 23620] },
    // 遠程
    SpecialWeaponDef { weapon: SpecialWeapon::DarkBow, name: "dark_bow", style: CombatStyle::Ranged, energy: 55, ids: &[11235, 12765, 12766, 12767, 12768, 20408] },
    SpecialWeaponDef { weapon: SpecialWeapon::HeavyBallista, name: "heavy_ballista", style: CombatStyle::Ranged, energy: 65, ids: &[19481, 23630] },
    SpecialWeaponDef { weapon: SpecialWeapon::MorrigansJavelin, name: "morrigans_javelin", style: CombatStyle::Ranged, energy: 50, ids: &[22636, 23619] },
    SpecialWeaponDef { weapon: SpecialWeapon::ZaryteCrossbow, name: "zaryte_crossbow", style: CombatStyle::Ranged, energy: 75, ids: &[26374] },
    SpecialWeaponDef { weapon: SpecialWeapon::ArmadylCrossbow, name: "armadyl_crossbow", style: CombatStyle::Ranged, energy: 50, ids: &[11785, 23611] },
    SpecialWeaponDef { weapon: SpecialWeapon::DragonKnife, name: "dragon_knife", style: CombatStyle::Ranged, energy: 25, ids: &[22804, 22806, 22808, 22810] },
    // 魔法
    SpecialWeaponDef { weapon: SpecialWeapon::VolatileNightmareStaff, name: "volatile_nightmare_staff", style: CombatStyle::Mage, energy: 55, ids: &[24424] },
];

impl SpecialWeapon {
    pub fn all() -> impl Iterator<Item = SpecialWeapon> {
        SPECIAL_WEAPON_DEFS.iter().map(|d| d.weapon)
    }

    pub fn to_index(&self) -> usize {
        *self as usize
    }

    pub fn def(&self) -> &'static SpecialWeaponDef {
        &SPECIAL_WEAPON_DEFS[self.to_index()]
    }

    pub fn style(&self) -> CombatStyle {
        self.def().style
    }

    pub fn energy(&self) -> i32 {
        self.def().energy
    }
}

/// 白名單設定：未列出的武器使用預設表
pub type WeaponAllowlists = HashMap<SpecialWeapon, Vec<i32>>;

pub fn default_allowlists() -> WeaponAllowlists {
    SPECIAL_WEAPON_DEFS
        .iter()
        .map(|d| (d.weapon, d.ids.to_vec()))
        .collect()
}

// ============================================================================
// 分類器
// ============================================================================

/// 武器角色分類器，初始化後唯讀
#[derive(Clone, Debug)]
pub struct RoleClassifier {
    allowlists: HashMap<SpecialWeapon, HashSet<i32>>,
}

impl Default for RoleClassifier {
    fn default() -> Self {
        Self::new(&default_allowlists())
    }
}

impl RoleClassifier {
    pub fn new(overrides: &WeaponAllowlists) -> Self {
        let allowlists = SPECIAL_WEAPON_DEFS
            .iter()
            .map(|d| {
                let ids = overrides
                    .get(&d.weapon)
                    .map(|ids| ids.iter().copied().collect())
                    .unwrap_or_else(|| d.ids.iter().copied().collect());
                (d.weapon, ids)
            })
            .collect();
        Self { allowlists }
    }

    fn lowercase_name(item_id: i32, catalog: Option<&dyn ItemCatalog>) -> Option<String> {
        if item_id <= 0 {
            return None;
        }
        catalog?.name(item_id).map(|n| n.to_lowercase())
    }

    pub fn is_ranged_weapon(&self, item_id: i32, catalog: Option<&dyn ItemCatalog>) -> bool {
        Self::lowercase_name(item_id, catalog)
            .map(|name| RANGED_KEYWORDS.iter().any(|k| name.contains(k)))
            .unwrap_or(false)
    }

    pub fn is_mage_weapon(&self, item_id: i32, catalog: Option<&dyn ItemCatalog>) -> bool {
        Self::lowercase_name(item_id, catalog)
            .map(|name| MAGE_KEYWORDS.iter().any(|k| name.contains(k)))
            .unwrap_or(false)
    }

    /// 非遠程且非魔法即近戰（含查無資料的情況）
    pub fn is_melee_weapon(&self, item_id: i32, catalog: Option<&dyn ItemCatalog>) -> bool {
        !self.is_ranged_weapon(item_id, catalog) && !self.is_mage_weapon(item_id, catalog)
    }

    pub fn style_of(&self, item_id: i32, catalog: Option<&dyn ItemCatalog>) -> CombatStyle {
        if self.is_ranged_weapon(item_id, catalog) {
            CombatStyle::Ranged
        } else if self.is_mage_weapon(item_id, catalog) {
            CombatStyle::Mage
        } else {
            CombatStyle::Melee
        }
    }

    pub fn is_specific(&self, weapon: SpecialWeapon, item_id: i32) -> bool {
        item_id > 0
            && self
                .allowlists
                .get(&weapon)
                .map(|ids| ids.contains(&item_id))
                .unwrap_or(false)
    }

    /// 找出物品對應的特攻武器
    pub fn special_weapon(&self, item_id: i32) -> Option<SpecialWeapon> {
        SpecialWeapon::all().find(|&w| self.is_specific(w, item_id))
    }

    fn is_spec_of_style(&self, item_id: i32, style: CombatStyle) -> bool {
        SpecialWeapon::all()
            .filter(|w| w.style() == style)
            .any(|w| self.is_specific(w, item_id))
    }

    pub fn is_melee_special_weapon(&self, item_id: i32) -> bool {
        self.is_spec_of_style(item_id, CombatStyle::Melee)
    }

    pub fn is_range_spec_weapon(&self, item_id: i32) -> bool {
        self.is_spec_of_style(item_id, CombatStyle::Ranged)
    }

    pub fn is_mage_spec_weapon(&self, item_id: i32) -> bool {
        self.is_spec_of_style(item_id, CombatStyle::Mage)
    }

    pub fn is_any_spec_weapon(&self, item_id: i32) -> bool {
        self.special_weapon(item_id).is_some()
    }
}

// ============================================================================
// 單元測試
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::items::{ItemRecord, StaticItemCatalog};

    fn catalog() -> StaticItemCatalog {
        StaticItemCatalog::new(&[
            ItemRecord::new(4151, "Abyssal whip", None),
            ItemRecord::new(9185, "Rune crossbow", None),
            ItemRecord::new(22804, "Dragon knife", None),
            ItemRecord::new(12926, "Toxic blowpipe", None),
            ItemRecord::new(4675, "Ancient staff", None),
            ItemRecord::new(21006, "Kodai wand", None),
            ItemRecord::new(11905, "Trident of the seas", None),
            ItemRecord::new(10033, "Chinchompa", None),
        ])
    }

    #[test]
    fn test_name_classification() {
        let c = catalog();
        let rc = RoleClassifier::default();
        let lookup: Option<&dyn ItemCatalog> = Some(&c);

        assert!(rc.is_ranged_weapon(9185, lookup));
        assert!(rc.is_ranged_weapon(22804, lookup));
        assert!(rc.is_ranged_weapon(12926, lookup));
        assert!(rc.is_ranged_weapon(10033, lookup));
        assert!(rc.is_mage_weapon(4675, lookup));
        assert!(rc.is_mage_weapon(21006, lookup));
        assert!(rc.is_mage_weapon(11905, lookup));
        assert!(rc.is_melee_weapon(4151, lookup));
        assert!(!rc.is_melee_weapon(9185, lookup));
        assert_eq!(rc.style_of(4675, lookup), CombatStyle::Mage);
    }

    #[test]
    fn test_non_positive_defaults_to_melee() {
        let c = catalog();
        let rc = RoleClassifier::default();
        for id in [0, -1, i32::MIN] {
            assert!(!rc.is_ranged_weapon(id, Some(&c)));
            assert!(!rc.is_mage_weapon(id, Some(&c)));
            assert!(rc.is_melee_weapon(id, Some(&c)));
        }
    }

    #[test]
    fn test_missing_catalog_defaults_to_melee() {
        let rc = RoleClassifier::default();
        assert!(!rc.is_ranged_weapon(9185, None));
        assert!(!rc.is_mage_weapon(4675, None));
        assert!(rc.is_melee_weapon(9185, None));
    }

    #[test]
    fn test_specific_variants() {
        let rc = RoleClassifier::default();
        // 同一武器的多個 ID 變體
        assert!(rc.is_specific(SpecialWeapon::DragonDagger, 1215));
        assert!(rc.is_specific(SpecialWeapon::DragonDagger, 5698));
        assert!(rc.is_specific(SpecialWeapon::DarkBow, 12768));
        assert!(!rc.is_specific(SpecialWeapon::DarkBow, 4151));
        assert_eq!(rc.special_weapon(11785), Some(SpecialWeapon::ArmadylCrossbow));
        assert_eq!(rc.special_weapon(4151), None);
    }

    #[test]
    fn test_composite_predicates() {
        let rc = RoleClassifier::default();
        assert!(rc.is_melee_special_weapon(13652));
        assert!(!rc.is_melee_special_weapon(19481));
        assert!(rc.is_range_spec_weapon(19481));
        assert!(rc.is_mage_spec_weapon(24424));
        assert!(!rc.is_mage_spec_weapon(0));
    }

    #[test]
    fn test_allowlist_override() {
        let mut overrides = WeaponAllowlists::new();
        overrides.insert(SpecialWeapon::Voidwaker, vec![99999]);
        let rc = RoleClassifier::new(&overrides);
        assert!(rc.is_specific(SpecialWeapon::Voidwaker, 99999));
        assert!(!rc.is_specific(SpecialWeapon::Voidwaker, 27690));
        // 其他武器保留預設表
        assert!(rc.is_specific(SpecialWeapon::DragonClaws, 13652));
    }

    #[test]
    fn test_def_table_order() {
        for (idx, def) in SPECIAL_WEAPON_DEFS.iter().enumerate() {
            assert_eq!(def.weapon.to_index(), idx);
        }
    }
}
