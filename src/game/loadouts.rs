//! 標準裝備組與基準加成
//!
//! 決策端提供幾組標準裝備（近戰、遠程、魔法、坦克、近戰特攻），
//! 每組第一個物品按慣例是武器。基準加成是各組加成總和的平均值，
//! 用來在對手裝備看不清楚時作為先驗。

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::equipment::BonusVector;
use super::items::ItemCatalog;
use super::roles::CombatStyle;

/// 標準裝備組（決策域 ID）
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Loadouts {
    #[serde(default)]
    pub melee: Vec<i32>,
    #[serde(default)]
    pub ranged: Vec<i32>,
    #[serde(default)]
    pub mage: Vec<i32>,
    #[serde(default)]
    pub tank: Vec<i32>,
    #[serde(default)]
    pub melee_spec: Vec<i32>,
}

impl Loadouts {
    /// 基準計算用的候選組合
    pub fn candidates(&self) -> [&[i32]; 5] {
        [
            &self.melee,
            &self.ranged,
            &self.mage,
            &self.tank,
            &self.melee_spec,
        ]
    }

    pub fn for_style(&self, style: CombatStyle) -> &[i32] {
        match style {
            CombatStyle::Melee => &self.melee,
            CombatStyle::Ranged => &self.ranged,
            CombatStyle::Mage => &self.mage,
        }
    }

    /// 第一個物品視為武器
    pub fn weapon(&self, style: CombatStyle) -> Option<i32> {
        self.for_style(style).first().copied().filter(|&id| id > 0)
    }

    /// 所有組合中出現過的物品
    pub fn contains(&self, item_id: i32) -> bool {
        item_id > 0 && self.candidates().iter().any(|set| set.contains(&item_id))
    }

    pub fn all_items(&self) -> impl Iterator<Item = i32> + '_ {
        self.candidates()
            .into_iter()
            .flat_map(|set| set.iter().copied())
            .filter(|&id| id > 0)
    }
}

fn is_non_empty(set: &[i32]) -> bool {
    set.iter().any(|&id| id > 0)
}

/// 預先計算的基準加成，建構後唯讀
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct LoadoutBaseline {
    bonuses: BonusVector,
    candidate_count: usize,
}

impl LoadoutBaseline {
    /// 各組加成總和 / 非空組數（以組為單位平均，不是以物品）
    pub fn compute(candidates: &[&[i32]], catalog: &dyn ItemCatalog) -> Self {
        let mut total = BonusVector::zero();
        let mut count = 0usize;
        for set in candidates.iter().filter(|s| is_non_empty(s)) {
            total += BonusVector::from_items(set, catalog);
            count += 1;
        }

        let bonuses = if count == 0 {
            BonusVector::zero()
        } else {
            total.scale(1.0 / count as f64)
        };
        debug!(candidate_count = count, "computed loadout baseline");
        Self {
            bonuses,
            candidate_count: count,
        }
    }

    pub fn from_loadouts(loadouts: &Loadouts, catalog: &dyn ItemCatalog) -> Self {
        Self::compute(&loadouts.candidates(), catalog)
    }

    pub fn from_bonuses(bonuses: BonusVector) -> Self {
        Self {
            bonuses,
            candidate_count: 1,
        }
    }

    pub fn bonuses(&self) -> &BonusVector {
        &self.bonuses
    }

    pub fn candidate_count(&self) -> usize {
        self.candidate_count
    }
}

pub fn compute_baseline(candidates: &[&[i32]], catalog: &dyn ItemCatalog) -> BonusVector {
    *LoadoutBaseline::compute(candidates, catalog).bonuses()
}

// ============================================================================
// 單元測試
// ============================================================================
