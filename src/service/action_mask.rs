//! Action Mask 構建
//!
//! 12 個動作頭，每個頭的 index 0 都是 no-op 且永遠合法，
//! 所以資源為零時該頭只剩 no-op 可選，不會出現全 false 的頭。

use super::contract::validate_masks;
use super::error::ContractError;
use crate::game::{
    head_sizes, CombatStyle, PerceptionTables, PlayerState, SpecialWeapon, TickSnapshot,
    HEAD_ATTACK, HEAD_DISTANCE, HEAD_FOOD, HEAD_GEAR, HEAD_KARAMBWAN, HEAD_MAGE, HEAD_MELEE,
    HEAD_MOVEMENT, HEAD_NAMES, HEAD_POTION, HEAD_PRAYER, HEAD_RANGED, HEAD_VENGEANCE,
    REDEMPTION_PRAYER_LEVEL, SMITE_PRAYER_LEVEL, VENGEANCE_MAGIC_LEVEL,
};

// ============================================================================
// 可用性
// ============================================================================

/// 玩家擁有（裝備組或身上）的特攻武器，順序同 `SPECIAL_WEAPON_DEFS`
pub fn owned_special_weapons(tables: &PerceptionTables, player: &PlayerState) -> Vec<SpecialWeapon> {
    let worn: Vec<i32> = player
        .equipment
        .iter()
        .chain(std::iter::once(&player.weapon))
        .filter(|&&id| id > 0)
        .map(|&id| tables.decision_id(id))
        .collect();

    SpecialWeapon::all()
        .filter(|&w| {
            tables
                .loadouts
                .all_items()
                .chain(worn.iter().copied())
                .any(|id| tables.roles.is_specific(w, id))
        })
        .collect()
}

/// 各攻擊風格目前是否可用
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Availability {
    pub melee: bool,
    pub ranged: bool,
    pub mage: bool,
    pub melee_spec: bool,
    pub ranged_spec: bool,
    pub mage_spec: bool,
}

impl Availability {
    pub fn compute(tables: &PerceptionTables, snapshot: &TickSnapshot) -> Self {
        let player = &snapshot.player;
        let wielded = (player.weapon > 0).then(|| {
            tables
                .roles
                .style_of(tables.decision_id(player.weapon), Some(&tables.catalog))
        });
        let has_gear =
            |style: CombatStyle| tables.loadouts.weapon(style).is_some() || wielded == Some(style);

        let melee = has_gear(CombatStyle::Melee);
        let ranged = has_gear(CombatStyle::Ranged) && player.has_ranged_ammo;
        let mage = has_gear(CombatStyle::Mage) && player.has_magic_runes;

        let owned = owned_special_weapons(tables, player);
        let can_spec = |style: CombatStyle| {
            owned
                .iter()
                .any(|w| w.style() == style && player.special_percent >= w.energy())
        };

        Self {
            melee,
            ranged,
            mage,
            melee_spec: melee && can_spec(CombatStyle::Melee),
            ranged_spec: ranged && can_spec(CombatStyle::Ranged),
            mage_spec: mage && can_spec(CombatStyle::Mage),
        }
    }
}

// ============================================================================
// ActionMaskSet
// ============================================================================

/// 12 個動作頭的合法性
#[derive(Clone, Debug, PartialEq)]
pub struct ActionMaskSet {
    heads: Vec<Vec<bool>>,
}

impl ActionMaskSet {
    /// 檢查形狀後建構
    pub fn from_heads(heads: Vec<Vec<bool>>, distance_options: usize) -> Result<Self, ContractError> {
        validate_masks(&heads, distance_options)?;
        Ok(Self { heads })
    }

    pub fn heads(&self) -> &[Vec<bool>] {
        &self.heads
    }

    pub fn head(&self, index: usize) -> Option<&[bool]> {
        self.heads.get(index).map(|h| h.as_slice())
    }

    pub fn head_count(&self) -> usize {
        self.heads.len()
    }

    pub fn is_legal(&self, head: usize, option: usize) -> bool {
        self.head(head)
            .and_then(|h| h.get(option))
            .copied()
            .unwrap_or(false)
    }

    /// (頭名稱, 合法性) 依頭順序
    pub fn named(&self) -> impl Iterator<Item = (&'static str, &[bool])> + '_ {
        HEAD_NAMES
            .iter()
            .zip(self.heads.iter())
            .map(|(&name, head)| (name, head.as_slice()))
    }
}

fn head(size: usize, legal: impl Fn(usize) -> bool) -> Vec<bool> {
    (0..size).map(|option| option == 0 || legal(option)).collect()
}

/// 每 tick 依同一份快照產生 action mask
pub struct ActionMaskGenerator<'a> {
    tables: &'a PerceptionTables,
}

impl<'a> ActionMaskGenerator<'a> {
    pub fn new(tables: &'a PerceptionTables) -> Self {
        Self { tables }
    }

    pub fn generate(&self, snapshot: &TickSnapshot) -> Result<ActionMaskSet, ContractError> {
        let distance_options = self.tables.movement_distance_options;
        let sizes = head_sizes(distance_options);
        let player = &snapshot.player;
        let target = &snapshot.target;
        let available = Availability::compute(self.tables, snapshot);
        let attackable = target.attackable();
        let mut heads = vec![Vec::new(); sizes.len()];

        // none, mage, ranged, melee
        heads[HEAD_ATTACK] = head(sizes[HEAD_ATTACK], |o| {
            attackable
                && match o {
                    1 => available.mage,
                    2 => available.ranged,
                    3 => available.melee,
                    _ => false,
                }
        });

        // none, basic, spec
        heads[HEAD_MELEE] = head(sizes[HEAD_MELEE], |o| match o {
            1 => available.melee,
            2 => available.melee_spec,
            _ => false,
        });
        heads[HEAD_RANGED] = head(sizes[HEAD_RANGED], |o| match o {
            1 => available.ranged,
            2 => available.ranged_spec,
            _ => false,
        });

        // none, ice, blood, spec
        heads[HEAD_MAGE] = head(sizes[HEAD_MAGE], |o| match o {
            1 => available.mage && player.ice_barrage_usable,
            2 => available.mage && player.blood_barrage_usable,
            3 => available.mage_spec,
            _ => false,
        });

        // none, brew, restore, combat, ranging
        let potion_ready = player.timers.potion_cycle_ticks <= 0;
        let doses = &player.consumables;
        heads[HEAD_POTION] = head(sizes[HEAD_POTION], |o| {
            potion_ready
                && match o {
                    1 => doses.brew_doses > 0,
                    2 => doses.restore_potion_doses > 0,
                    3 => doses.combat_potion_doses > 0,
                    4 => doses.ranging_potion_doses > 0,
                    _ => false,
                }
        });

        heads[HEAD_FOOD] = head(sizes[HEAD_FOOD], |_| {
            player.timers.food_cycle_ticks <= 0 && doses.food_count > 0
        });
        heads[HEAD_KARAMBWAN] = head(sizes[HEAD_KARAMBWAN], |_| {
            player.timers.karambwan_cycle_ticks <= 0 && doses.karambwan_count > 0
        });

        heads[HEAD_VENGEANCE] = head(sizes[HEAD_VENGEANCE], |_| {
            player.lunar_spellbook
                && !player.vengeance_active
                && player.vengeance_cooldown_ticks <= 0
                && player.base_levels.magic >= VENGEANCE_MAGIC_LEVEL
        });

        heads[HEAD_GEAR] = head(sizes[HEAD_GEAR], |_| {
            self.tables.loadouts.tank.iter().any(|&id| id > 0)
        });

        // none, adjacent, under, farcast, diagonal
        let can_move = player.frozen_ticks <= 0 && target.present;
        heads[HEAD_MOVEMENT] = head(sizes[HEAD_MOVEMENT], |_| can_move);
        heads[HEAD_DISTANCE] = head(sizes[HEAD_DISTANCE], |_| can_move);

        // none, magic, ranged, melee, smite, redemption
        let has_points = player.prayer_points > 0;
        heads[HEAD_PRAYER] = head(sizes[HEAD_PRAYER], |o| {
            has_points
                && match o {
                    1..=3 => true,
                    4 => player.base_levels.prayer >= SMITE_PRAYER_LEVEL,
                    5 => player.base_levels.prayer >= REDEMPTION_PRAYER_LEVEL,
                    _ => false,
                }
        });

        ActionMaskSet::from_heads(heads, distance_options)
    }
}

// ============================================================================
// 單元測試
// ============================================================================
