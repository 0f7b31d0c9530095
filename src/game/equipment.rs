//! 裝備槽、加成向量與對手裝備推論
//!
//! # 推論流程
//!
//! ```text
//! 外觀編碼 (12) ──► 解碼物品/套件 ──► 外觀位置→裝備槽 ──► 標準化 + 對照 ID
//!                                                          │
//!                                     有屬性: 累加加成, 信心 0.95
//!                                     無屬性: 保留物品, 信心 0.1
//! ```
//!
//! 戒指與彈藥在外觀中永遠看不到，固定給 0.1 / 0.3 信心。
//! 平均信心只計算 11 個實際存在的槽位。

use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::constants::{
    APPEARANCE_ITEM_OFFSET, APPEARANCE_KIT_OFFSET, APPEARANCE_SLOT_COUNT, BONUS_COUNT,
    CONFIDENCE_AMMUNITION, CONFIDENCE_NO_STATS, CONFIDENCE_OBSERVED, CONFIDENCE_RING,
    EQUIPMENT_SLOT_COUNT, EXISTING_SLOT_COUNT,
};
use super::ids::IdentifierReconciler;
use super::items::ItemCatalog;
use super::loadouts::LoadoutBaseline;

// ============================================================================
// 裝備槽
// ============================================================================

/// 決策域裝備表的槽位
///
/// 表格共 14 格，其中 6、8、11 是保留位（手臂、頭髮、下巴），
/// 無法以此枚舉表示，因此永遠不會被寫入。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentSlot {
    Head = 0,
    Cape = 1,
    Amulet = 2,
    Weapon = 3,
    Body = 4,
    Shield = 5,
    Legs = 7,
    Hands = 9,
    Feet = 10,
    Ring = 12,
    Ammunition = 13,
}

impl EquipmentSlot {
    /// 11 個實際存在的槽位
    pub fn all() -> &'static [EquipmentSlot; EXISTING_SLOT_COUNT] {
        &[
            EquipmentSlot::Head,
            EquipmentSlot::Cape,
            EquipmentSlot::Amulet,
            EquipmentSlot::Weapon,
            EquipmentSlot::Body,
            EquipmentSlot::Shield,
            EquipmentSlot::Legs,
            EquipmentSlot::Hands,
            EquipmentSlot::Feet,
            EquipmentSlot::Ring,
            EquipmentSlot::Ammunition,
        ]
    }

    pub fn to_index(&self) -> usize {
        *self as usize
    }

    /// 保留位與越界索引返回 None
    pub fn from_index(index: usize) -> Option<Self> {
        Self::all().iter().copied().find(|s| s.to_index() == index)
    }

    /// 外觀編碼位置 → 裝備槽（手臂、頭髮、下巴沒有對應）
    pub fn from_appearance(position: usize) -> Option<Self> {
        match position {
            0 => Some(EquipmentSlot::Head),
            1 => Some(EquipmentSlot::Cape),
            2 => Some(EquipmentSlot::Amulet),
            3 => Some(EquipmentSlot::Weapon),
            4 => Some(EquipmentSlot::Body),
            5 => Some(EquipmentSlot::Shield),
            7 => Some(EquipmentSlot::Legs),
            9 => Some(EquipmentSlot::Hands),
            10 => Some(EquipmentSlot::Feet),
            _ => None,
        }
    }

    /// 外觀中永遠看不到的槽位
    pub fn fixed_confidence(&self) -> Option<f64> {
        match self {
            EquipmentSlot::Ring => Some(CONFIDENCE_RING),
            EquipmentSlot::Ammunition => Some(CONFIDENCE_AMMUNITION),
            _ => None,
        }
    }
}

// ============================================================================
// 加成向量
// ============================================================================

/// 14 軸裝備加成，可逐元素相加
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BonusVector([f64; BONUS_COUNT]);

impl BonusVector {
    pub const STAB_ATTACK: usize = 0;
    pub const SLASH_ATTACK: usize = 1;
    pub const CRUSH_ATTACK: usize = 2;
    pub const MAGIC_ATTACK: usize = 3;
    pub const RANGED_ATTACK: usize = 4;
    pub const STAB_DEFENCE: usize = 5;
    pub const SLASH_DEFENCE: usize = 6;
    pub const CRUSH_DEFENCE: usize = 7;
    pub const MAGIC_DEFENCE: usize = 8;
    pub const RANGED_DEFENCE: usize = 9;
    pub const MELEE_STRENGTH: usize = 10;
    pub const RANGED_STRENGTH: usize = 11;
    pub const MAGIC_DAMAGE: usize = 12;
    pub const PRAYER: usize = 13;

    pub fn zero() -> Self {
        Self::default()
    }

    pub fn from_array(values: [f64; BONUS_COUNT]) -> Self {
        Self(values)
    }

    pub fn as_array(&self) -> &[f64; BONUS_COUNT] {
        &self.0
    }

    /// 越界軸返回 0
    pub fn get(&self, axis: usize) -> f64 {
        self.0.get(axis).copied().unwrap_or(0.0)
    }

    pub fn scale(&self, factor: f64) -> Self {
        Self(self.0.map(|v| v * factor))
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&v| v == 0.0)
    }

    /// 一組物品的加成總和，沒有屬性的物品貢獻 0
    pub fn from_items(items: &[i32], catalog: &dyn ItemCatalog) -> Self {
        items
            .iter()
            .filter(|&&id| id > 0)
            .filter_map(|&id| catalog.stats(catalog.canonicalize(id)))
            .fold(Self::zero(), |acc, stats| acc + stats)
    }

    pub fn melee_attack(&self) -> f64 {
        self.0[Self::STAB_ATTACK]
            .max(self.0[Self::SLASH_ATTACK])
            .max(self.0[Self::CRUSH_ATTACK])
    }

    pub fn melee_defence(&self) -> f64 {
        (self.0[Self::STAB_DEFENCE] + self.0[Self::SLASH_DEFENCE] + self.0[Self::CRUSH_DEFENCE])
            / 3.0
    }
}

impl Add for BonusVector {
    type Output = BonusVector;

    fn add(mut self, rhs: BonusVector) -> BonusVector {
        self += rhs;
        self
    }
}

impl AddAssign for BonusVector {
    fn add_assign(&mut self, rhs: BonusVector) {
        for (lhs, rhs) in self.0.iter_mut().zip(rhs.0.iter()) {
            *lhs += rhs;
        }
    }
}

// ============================================================================
// 裝備快照
// ============================================================================

/// 單一角色在單一 tick 的裝備快照，每 tick 重建，建構後不再修改
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EquipmentSnapshot {
    slots: [Option<i32>; EQUIPMENT_SLOT_COUNT],
    bonuses: BonusVector,
    confidence: [f64; EQUIPMENT_SLOT_COUNT],
}

impl Default for EquipmentSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}

impl EquipmentSnapshot {
    /// 尚未觀察到對手時的合法狀態：全空、零加成、零信心
    pub fn empty() -> Self {
        Self {
            slots: [None; EQUIPMENT_SLOT_COUNT],
            bonuses: BonusVector::zero(),
            confidence: [0.0; EQUIPMENT_SLOT_COUNT],
        }
    }

    /// 決策域物品 ID
    pub fn item(&self, slot: EquipmentSlot) -> Option<i32> {
        self.slots[slot.to_index()]
    }

    pub fn weapon(&self) -> Option<i32> {
        self.item(EquipmentSlot::Weapon)
    }

    pub fn items(&self) -> impl Iterator<Item = (EquipmentSlot, i32)> + '_ {
        EquipmentSlot::all()
            .iter()
            .filter_map(|&slot| self.item(slot).map(|id| (slot, id)))
    }

    pub fn bonuses(&self) -> &BonusVector {
        &self.bonuses
    }

    pub fn confidence(&self, slot: EquipmentSlot) -> f64 {
        self.confidence[slot.to_index()]
    }

    /// 11 個實際槽位的平均信心
    pub fn average_confidence(&self) -> f64 {
        let total: f64 = EquipmentSlot::all()
            .iter()
            .map(|s| self.confidence[s.to_index()])
            .sum();
        total / EXISTING_SLOT_COUNT as f64
    }

    /// 依平均信心在觀察值與基準之間線性插值
    pub fn blend(&self, baseline: &LoadoutBaseline) -> BonusVector {
        blend(self, baseline)
    }
}

/// `observed * c + baseline * (1 - c)`，c 為平均信心
pub fn blend(snapshot: &EquipmentSnapshot, baseline: &LoadoutBaseline) -> BonusVector {
    let c = snapshot.average_confidence();
    let observed = snapshot.bonuses().as_array();
    let prior = baseline.bonuses().as_array();
    let mut out = [0.0; BONUS_COUNT];
    for axis in 0..BONUS_COUNT {
        out[axis] = observed[axis] * c + prior[axis] * (1.0 - c);
    }
    BonusVector::from_array(out)
}

// ============================================================================
// 推論引擎
// ============================================================================

enum AppearanceEntry {
    Item(i32),
    Kit,
    Empty,
}

fn decode_appearance(value: i32) -> AppearanceEntry {
    if value >= APPEARANCE_ITEM_OFFSET {
        AppearanceEntry::Item(value - APPEARANCE_ITEM_OFFSET)
    } else if value >= APPEARANCE_KIT_OFFSET {
        AppearanceEntry::Kit
    } else {
        AppearanceEntry::Empty
    }
}

/// 從外觀編碼推論對手裝備
pub struct EquipmentInferenceEngine<'a> {
    reconciler: &'a IdentifierReconciler,
}

impl<'a> EquipmentInferenceEngine<'a> {
    pub fn new(reconciler: &'a IdentifierReconciler) -> Self {
        Self { reconciler }
    }

    pub fn infer(
        &self,
        appearance: Option<&[i32]>,
        catalog: Option<&dyn ItemCatalog>,
        actor_id: i32,
    ) -> EquipmentSnapshot {
        let (appearance, catalog) = match (appearance, catalog) {
            (Some(a), Some(c)) => (a, c),
            _ => {
                debug!(actor_id, "no appearance or catalog, empty snapshot");
                return EquipmentSnapshot::empty();
            }
        };

        let mut snapshot = EquipmentSnapshot::empty();

        for (position, &value) in appearance.iter().take(APPEARANCE_SLOT_COUNT).enumerate() {
            let observing_id = match decode_appearance(value) {
                AppearanceEntry::Item(id) => id,
                AppearanceEntry::Kit | AppearanceEntry::Empty => continue,
            };
            let Some(slot) = EquipmentSlot::from_appearance(position) else {
                continue;
            };

            let canonical = catalog.canonicalize(observing_id);
            let decision_id = self.reconciler.to_decision_id(canonical);
            let idx = slot.to_index();
            snapshot.slots[idx] = Some(decision_id);

            match catalog.stats(canonical).or_else(|| catalog.stats(decision_id)) {
                Some(stats) => {
                    snapshot.bonuses += stats;
                    snapshot.confidence[idx] = CONFIDENCE_OBSERVED;
                }
                None => {
                    snapshot.confidence[idx] = CONFIDENCE_NO_STATS;
                }
            }
        }

        for slot in [EquipmentSlot::Ring, EquipmentSlot::Ammunition] {
            if let Some(c) = slot.fixed_confidence() {
                snapshot.confidence[slot.to_index()] = c;
            }
        }

        debug!(
            actor_id,
            weapon = ?snapshot.weapon(),
            confidence = snapshot.average_confidence(),
            "inferred equipment"
        );
        snapshot
    }
}

// ============================================================================
// 單元測試
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::items::{ItemRecord, StaticItemCatalog};

    fn stats_with(axis: usize, value: f64) -> [f64; BONUS_COUNT] {
        let mut s = [0.0; BONUS_COUNT];
        s[axis] = value;
        s
    }

    fn catalog() -> StaticItemCatalog {
        StaticItemCatalog::new(&[
            ItemRecord::new(11785, "Armadyl crossbow", Some(stats_with(BonusVector::RANGED_ATTACK, 100.0))),
            ItemRecord::new(10828, "Helm of neitiznot", Some(stats_with(BonusVector::SLASH_DEFENCE, 32.0)))
                .with_variants(&[10829]),
            ItemRecord::new(6585, "Amulet of fury", None),
            ItemRecord::new(20593, "Armadyl godsword", None),
        ])
    }

    fn appearance(entries: &[(usize, i32)]) -> Vec<i32> {
        let mut a = vec![0; APPEARANCE_SLOT_COUNT];
        for &(pos, value) in entries {
            a[pos] = value;
        }
        a
    }

    #[test]
    fn test_empty_snapshot_for_missing_input() {
        let reconciler = IdentifierReconciler::default();
        let engine = EquipmentInferenceEngine::new(&reconciler);
        let c = catalog();

        for snapshot in [
            engine.infer(None, Some(&c), 1),
            engine.infer(Some(&appearance(&[(3, 512 + 11785)])), None, 1),
        ] {
            assert!(snapshot.bonuses().is_zero());
            assert_eq!(snapshot.average_confidence(), 0.0);
            for slot in EquipmentSlot::all() {
                assert_eq!(snapshot.item(*slot), None);
                assert_eq!(snapshot.confidence(*slot), 0.0);
            }
        }
    }

    #[test]
    fn test_weapon_only_ranged() {
        let reconciler = IdentifierReconciler::default();
        let engine = EquipmentInferenceEngine::new(&reconciler);
        let c = catalog();
        let a = appearance(&[(3, APPEARANCE_ITEM_OFFSET + 11785)]);

        let snapshot = engine.infer(Some(&a), Some(&c), 7);
        assert_eq!(snapshot.weapon(), Some(11785));
        assert_eq!(snapshot.confidence(EquipmentSlot::Weapon), 0.95);
        assert_eq!(snapshot.confidence(EquipmentSlot::Ring), 0.1);
        assert_eq!(snapshot.confidence(EquipmentSlot::Ammunition), 0.3);
        assert_eq!(snapshot.bonuses().get(BonusVector::RANGED_ATTACK), 100.0);

        let expected = (0.95 + 0.1 + 0.3) / 11.0;
        assert!((snapshot.average_confidence() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_kits_and_missing_counterparts_skipped() {
        let reconciler = IdentifierReconciler::default();
        let engine = EquipmentInferenceEngine::new(&reconciler);
        let c = catalog();
        // 身體是套件，手臂/頭髮/下巴沒有裝備槽
        let a = appearance(&[
            (4, APPEARANCE_KIT_OFFSET + 18),
            (6, APPEARANCE_ITEM_OFFSET + 11785),
            (8, APPEARANCE_ITEM_OFFSET + 11785),
            (11, APPEARANCE_ITEM_OFFSET + 11785),
        ]);

        let snapshot = engine.infer(Some(&a), Some(&c), 7);
        assert_eq!(snapshot.items().count(), 0);
        assert!(snapshot.bonuses().is_zero());
        assert_eq!(snapshot.confidence(EquipmentSlot::Body), 0.0);
    }

    #[test]
    fn test_missing_stats_keeps_item_low_confidence() {
        let reconciler = IdentifierReconciler::default();
        let engine = EquipmentInferenceEngine::new(&reconciler);
        let c = catalog();
        let a = appearance(&[(2, APPEARANCE_ITEM_OFFSET + 6585)]);

        let snapshot = engine.infer(Some(&a), Some(&c), 7);
        assert_eq!(snapshot.item(EquipmentSlot::Amulet), Some(6585));
        assert_eq!(snapshot.confidence(EquipmentSlot::Amulet), 0.1);
        assert!(snapshot.bonuses().is_zero());
    }

    #[test]
    fn test_canonicalize_then_reconcile() {
        let reconciler = IdentifierReconciler::new(&[(20593, 11802)]).unwrap();
        let engine = EquipmentInferenceEngine::new(&reconciler);
        let c = catalog();
        let a = appearance(&[
            (0, APPEARANCE_ITEM_OFFSET + 10829),
            (3, APPEARANCE_ITEM_OFFSET + 20593),
        ]);

        let snapshot = engine.infer(Some(&a), Some(&c), 7);
        assert_eq!(snapshot.item(EquipmentSlot::Head), Some(10828));
        assert_eq!(snapshot.confidence(EquipmentSlot::Head), 0.95);
        assert_eq!(snapshot.weapon(), Some(11802));
        assert_eq!(snapshot.bonuses().get(BonusVector::SLASH_DEFENCE), 32.0);
    }

    #[test]
    fn test_reserved_slots_unrepresentable() {
        for idx in [6, 8, 11, 14, 99] {
            assert_eq!(EquipmentSlot::from_index(idx), None);
        }
        assert_eq!(EquipmentSlot::from_index(13), Some(EquipmentSlot::Ammunition));
    }

    #[test]
    fn test_blend_endpoints() {
        let observed = BonusVector::from_array(stats_with(BonusVector::RANGED_ATTACK, 80.0));
        let baseline = LoadoutBaseline::from_bonuses(BonusVector::from_array(
            stats_with(BonusVector::RANGED_ATTACK, 30.0),
        ));

        let mut full = EquipmentSnapshot::empty();
        full.bonuses = observed;
        full.confidence = [1.0; EQUIPMENT_SLOT_COUNT];
        assert_eq!(full.blend(&baseline), observed);

        let none = EquipmentSnapshot {
            bonuses: observed,
            ..EquipmentSnapshot::empty()
        };
        assert_eq!(none.blend(&baseline), *baseline.bonuses());
    }

    #[test]
    fn test_blend_midpoint() {
        let baseline = LoadoutBaseline::from_bonuses(BonusVector::from_array(
            stats_with(BonusVector::MELEE_STRENGTH, 100.0),
        ));
        let mut half = EquipmentSnapshot::empty();
        for slot in EquipmentSlot::all() {
            half.confidence[slot.to_index()] = 0.5;
        }
        let blended = half.blend(&baseline);
        assert!((blended.get(BonusVector::MELEE_STRENGTH) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_bonus_vector_helpers() {
        let mut s = [0.0; BONUS_COUNT];
        s[BonusVector::STAB_ATTACK] = 10.0;
        s[BonusVector::SLASH_ATTACK] = 82.0;
        s[BonusVector::STAB_DEFENCE] = 30.0;
        s[BonusVector::SLASH_DEFENCE] = 60.0;
        let v = BonusVector::from_array(s);
        assert_eq!(v.melee_attack(), 82.0);
        assert_eq!(v.melee_defence(), 30.0);
        assert_eq!(v.get(99), 0.0);
        assert_eq!((v + v).get(BonusVector::SLASH_ATTACK), 164.0);
    }
}
