//! Observation 構建
//!
//! 每個 tick 產生固定 176 維的觀察向量，index 與名稱永久綁定：
//! - 風格 / 祈禱 / 血量旗標
//! - 消耗品、計時器、等級
//! - 傷害追蹤、移動、距離
//! - 命中 / 祈禱計數（整場與最近窗口）
//! - 附魔弩箭、特攻武器、裝備統計區塊（自己與對手，目前與上次攻擊）
//! - 模式、復仇、各風格可用性
//!
//! 未知訊號一律編碼為中性值；超出範圍的值不截斷，留給 `range_anomalies` 回報。

use std::borrow::Cow;

use self::FeatureRange::*;
use super::action_mask::{owned_special_weapons, Availability};
use super::contract::{range_anomalies, validate_observation, RangeAnomaly};
use super::error::ContractError;
use crate::game::{
    AttackStateProvider, BonusVector, CombatStyle, CounterWindow, EquipmentSnapshot,
    FightCounters, ItemCatalog, PerceptionTables, PlayerState, SpecialWeapon, TickSnapshot,
    FIGHT_COUNTER_FEATURES, GEAR_BLOCK_FEATURES, MAX_HIT_SCALE, MAX_PRAYER_POINTS_FALLBACK,
    OBS_SIZE, TOTAL_DAMAGE_SCALE,
};

// ============================================================================
// 特徵定義表
// ============================================================================

/// 特徵的預期範圍類別（只用於診斷，不截斷）
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeatureRange {
    /// {0, 1}
    Flag,
    /// [0, 1]
    Percent,
    /// [-99, 99]
    RelativeLevel,
    /// [1, 99]
    AbsoluteLevel,
    /// [-500, 500]
    GearStat,
    /// [-10, 200]，負值表示未知或未啟用
    Ticks,
    /// [0, 100]
    Count,
    /// [-1, 200]
    Distance,
}

impl FeatureRange {
    pub fn bounds(&self) -> (f64, f64) {
        match self {
            Flag | Percent => (0.0, 1.0),
            RelativeLevel => (-99.0, 99.0),
            AbsoluteLevel => (1.0, 99.0),
            GearStat => (-500.0, 500.0),
            Ticks => (-10.0, 200.0),
            Count => (0.0, 100.0),
            Distance => (-1.0, 200.0),
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        match self {
            Flag => value == 0.0 || value == 1.0,
            _ => {
                let (lo, hi) = self.bounds();
                (lo..=hi).contains(&value)
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeatureDef {
    pub name: &'static str,
    pub range: FeatureRange,
}

const fn def(name: &'static str, range: FeatureRange) -> FeatureDef {
    FeatureDef { name, range }
}

/// index → 特徵，重新編號是破壞性變更
pub static FEATURE_DEFS: [FeatureDef; OBS_SIZE] = [
    def("player_melee_equipped", Flag), // 0
    def("player_ranged_equipped", Flag), // 1
    def("player_mage_equipped", Flag), // 2
    def("player_spec_weapon_equipped", Flag), // 3
    def("player_special_percent", Percent), // 4
    def("player_protect_melee", Flag), // 5
    def("player_protect_ranged", Flag), // 6
    def("player_protect_magic", Flag), // 7
    def("player_smite", Flag), // 8
    def("player_redemption", Flag), // 9
    def("player_offensive_prayer", Flag), // 10
    def("player_health", Percent), // 11
    def("target_health", Percent), // 12
    def("target_melee_equipped", Flag), // 13
    def("target_ranged_equipped", Flag), // 14
    def("target_mage_equipped", Flag), // 15
    def("target_spec_weapon_equipped", Flag), // 16
    def("target_protect_melee", Flag), // 17
    def("target_protect_ranged", Flag), // 18
    def("target_protect_magic", Flag), // 19
    def("target_smite", Flag), // 20
    def("target_redemption", Flag), // 21
    def("target_special_percent", Percent), // 22
    def("ranging_potion_doses", Count), // 23
    def("combat_potion_doses", Count), // 24
    def("restore_potion_doses", Count), // 25
    def("brew_doses", Count), // 26
    def("food_count", Count), // 27
    def("karambwan_count", Count), // 28
    def("prayer_points", Percent), // 29
    def("player_frozen_ticks", Ticks), // 30
    def("target_frozen_ticks", Ticks), // 31
    def("player_freeze_immunity_ticks", Ticks), // 32
    def("target_freeze_immunity_ticks", Ticks), // 33
    def("in_melee_range", Flag), // 34
    def("relative_attack", RelativeLevel), // 35
    def("relative_strength", RelativeLevel), // 36
    def("relative_defence", RelativeLevel), // 37
    def("relative_ranged", RelativeLevel), // 38
    def("relative_magic", RelativeLevel), // 39
    def("level_attack", AbsoluteLevel), // 40
    def("level_strength", AbsoluteLevel), // 41
    def("level_defence", AbsoluteLevel), // 42
    def("level_ranged", AbsoluteLevel), // 43
    def("level_magic", AbsoluteLevel), // 44
    def("level_prayer", AbsoluteLevel), // 45
    def("level_hitpoints", AbsoluteLevel), // 46
    def("attack_cycle_ticks", Ticks), // 47
    def("food_cycle_ticks", Ticks), // 48
    def("potion_cycle_ticks", Ticks), // 49
    def("karambwan_cycle_ticks", Ticks), // 50
    def("food_attack_delay_ticks", Ticks), // 51
    def("target_attack_cycle_ticks", Ticks), // 52
    def("target_potion_cycle_ticks", Ticks), // 53
    def("pending_damage_on_target", Percent), // 54
    def("ticks_until_hit_on_target", Ticks), // 55
    def("ticks_until_hit_on_player", Ticks), // 56
    def("player_just_attacked", Flag), // 57
    def("target_just_attacked", Flag), // 58
    def("tick_new_attack_damage", Percent), // 59
    def("damage_on_player_tick", Percent), // 60
    def("damage_on_target_tick", Percent), // 61
    def("player_attacking_target", Flag), // 62
    def("player_moving", Flag), // 63
    def("target_moving", Flag), // 64
    def("player_has_pid", Flag), // 65
    def("ice_barrage_usable", Flag), // 66
    def("blood_barrage_usable", Flag), // 67
    def("destination_to_target_distance", Distance), // 68
    def("player_to_destination_distance", Distance), // 69
    def("player_to_target_distance", Distance), // 70
    def("player_prayed_correct", Flag), // 71
    def("target_prayed_correct", Flag), // 72
    def("total_damage_dealt_scale", Percent), // 73
    def("target_hit_confidence", Percent), // 74
    def("target_hit_melee_share", Percent), // 75
    def("target_hit_magic_share", Percent), // 76
    def("target_hit_ranged_share", Percent), // 77
    def("player_hit_melee_share", Percent), // 78
    def("player_hit_magic_share", Percent), // 79
    def("player_hit_ranged_share", Percent), // 80
    def("target_hit_correct_share", Percent), // 81
    def("target_pray_magic_share", Percent), // 82
    def("target_pray_ranged_share", Percent), // 83
    def("target_pray_melee_share", Percent), // 84
    def("player_pray_magic_share", Percent), // 85
    def("player_pray_ranged_share", Percent), // 86
    def("player_pray_melee_share", Percent), // 87
    def("target_pray_correct_share", Percent), // 88
    def("recent_target_hit_melee_share", Percent), // 89
    def("recent_target_hit_magic_share", Percent), // 90
    def("recent_target_hit_ranged_share", Percent), // 91
    def("recent_player_hit_melee_share", Percent), // 92
    def("recent_player_hit_magic_share", Percent), // 93
    def("recent_player_hit_ranged_share", Percent), // 94
    def("recent_target_hit_correct_share", Percent), // 95
    def("recent_target_pray_magic_share", Percent), // 96
    def("recent_target_pray_ranged_share", Percent), // 97
    def("recent_target_pray_melee_share", Percent), // 98
    def("recent_player_pray_magic_share", Percent), // 99
    def("recent_player_pray_ranged_share", Percent), // 100
    def("recent_player_pray_melee_share", Percent), // 101
    def("recent_target_pray_correct_share", Percent), // 102
    def("enchanted_diamond_bolts", Flag), // 103
    def("enchanted_dragonstone_bolts", Flag), // 104
    def("enchanted_opal_bolts", Flag), // 105
    def("loadout_has_dragon_dagger", Flag), // 106
    def("loadout_has_dragon_claws", Flag), // 107
    def("loadout_has_armadyl_godsword", Flag), // 108
    def("loadout_has_voidwaker", Flag), // 109
    def("loadout_has_granite_maul", Flag), // 110
    def("loadout_has_vestas_longsword", Flag), // 111
    def("loadout_has_statius_warhammer", Flag), // 112
    def("loadout_has_dark_bow", Flag), // 113
    def("loadout_has_heavy_ballista", Flag), // 114
    def("loadout_has_morrigans_javelin", Flag), // 115
    def("loadout_has_zaryte_crossbow", Flag), // 116
    def("loadout_has_armadyl_crossbow", Flag), // 117
    def("loadout_has_dragon_knife", Flag), // 118
    def("loadout_has_volatile_nightmare_staff", Flag), // 119
    def("loadout_has_melee_spec", Flag), // 120
    def("loadout_has_ranged_spec", Flag), // 121
    def("loadout_has_mage_spec", Flag), // 122
    def("player_gear_melee_attack", GearStat), // 123
    def("player_gear_melee_strength", GearStat), // 124
    def("player_gear_ranged_attack", GearStat), // 125
    def("player_gear_ranged_strength", GearStat), // 126
    def("player_gear_magic_attack", GearStat), // 127
    def("player_gear_magic_damage", GearStat), // 128
    def("player_gear_melee_defence", GearStat), // 129
    def("player_gear_ranged_defence", GearStat), // 130
    def("player_gear_magic_defence", GearStat), // 131
    def("player_last_gear_melee_attack", GearStat), // 132
    def("player_last_gear_melee_strength", GearStat), // 133
    def("player_last_gear_ranged_attack", GearStat), // 134
    def("player_last_gear_ranged_strength", GearStat), // 135
    def("player_last_gear_magic_attack", GearStat), // 136
    def("player_last_gear_magic_damage", GearStat), // 137
    def("player_last_gear_melee_defence", GearStat), // 138
    def("player_last_gear_ranged_defence", GearStat), // 139
    def("player_last_gear_magic_defence", GearStat), // 140
    def("target_gear_melee_attack", GearStat), // 141
    def("target_gear_melee_strength", GearStat), // 142
    def("target_gear_ranged_attack", GearStat), // 143
    def("target_gear_ranged_strength", GearStat), // 144
    def("target_gear_magic_attack", GearStat), // 145
    def("target_gear_magic_damage", GearStat), // 146
    def("target_gear_melee_defence", GearStat), // 147
    def("target_gear_ranged_defence", GearStat), // 148
    def("target_gear_magic_defence", GearStat), // 149
    def("target_last_gear_melee_attack", GearStat), // 150
    def("target_last_gear_melee_strength", GearStat), // 151
    def("target_last_gear_ranged_attack", GearStat), // 152
    def("target_last_gear_ranged_strength", GearStat), // 153
    def("target_last_gear_magic_attack", GearStat), // 154
    def("target_last_gear_magic_damage", GearStat), // 155
    def("target_last_gear_melee_defence", GearStat), // 156
    def("target_last_gear_ranged_defence", GearStat), // 157
    def("target_last_gear_magic_defence", GearStat), // 158
    def("target_gear_confidence", Percent), // 159
    def("is_lms", Flag), // 160
    def("is_pvp_arena", Flag), // 161
    def("in_wilderness", Flag), // 162
    def("player_vengeance_active", Flag), // 163
    def("target_vengeance_active", Flag), // 164
    def("player_vengeance_cooldown_ticks", Ticks), // 165
    def("target_vengeance_cooldown_ticks", Ticks), // 166
    def("player_on_lunar_spellbook", Flag), // 167
    def("can_attack_melee", Flag), // 168
    def("can_attack_ranged", Flag), // 169
    def("can_attack_mage", Flag), // 170
    def("can_melee_spec", Flag), // 171
    def("can_ranged_spec", Flag), // 172
    def("can_mage_spec", Flag), // 173
    def("has_ranged_ammo", Flag), // 174
    def("has_magic_runes", Flag), // 175
];

pub fn feature_def(index: usize) -> Option<&'static FeatureDef> {
    FEATURE_DEFS.get(index)
}

/// 超出範圍的 index 回傳 `feature_<index>`
pub fn feature_label(index: usize) -> Cow<'static, str> {
    match feature_def(index) {
        Some(def) => Cow::Borrowed(def.name),
        None => Cow::Owned(format!("feature_{}", index)),
    }
}

// ============================================================================
// ObservationVector
// ============================================================================

/// 已驗證的 176 維有限向量
#[derive(Clone, Debug, PartialEq)]
pub struct ObservationVector {
    data: Vec<f64>,
}

impl ObservationVector {
    /// 形狀或有限性不符即拒絕
    pub fn new(data: Vec<f64>) -> Result<Self, ContractError> {
        validate_observation(&data)?;
        Ok(Self { data })
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// 超出範圍的 index 回傳 0
    pub fn value(&self, index: usize) -> f64 {
        self.data.get(index).copied().unwrap_or(0.0)
    }

    pub fn label(&self, index: usize) -> Cow<'static, str> {
        feature_label(index)
    }

    pub fn range_anomalies(&self) -> Vec<RangeAnomaly> {
        range_anomalies(&self.data)
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.data
    }
}

// ============================================================================
// 組裝
// ============================================================================

/// 上次攻擊時確認的裝備加成；`None` 時使用目前值
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LastConfirmedGear {
    pub player: Option<BonusVector>,
    pub target: Option<BonusVector>,
}

fn flag(value: bool) -> f64 {
    if value {
        1.0
    } else {
        0.0
    }
}

fn ratio(numerator: i32, denominator: i32) -> f64 {
    if denominator <= 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

fn percent(value: i32) -> f64 {
    value as f64 / 100.0
}

/// 9 個裝備統計：近戰攻擊/力量、遠程攻擊/力量、魔法攻擊/傷害、三種防禦
pub fn gear_block(bonuses: &BonusVector) -> [f64; GEAR_BLOCK_FEATURES] {
    [
        bonuses.melee_attack(),
        bonuses.get(BonusVector::MELEE_STRENGTH),
        bonuses.get(BonusVector::RANGED_ATTACK),
        bonuses.get(BonusVector::RANGED_STRENGTH),
        bonuses.get(BonusVector::MAGIC_ATTACK),
        bonuses.get(BonusVector::MAGIC_DAMAGE),
        bonuses.melee_defence(),
        bonuses.get(BonusVector::RANGED_DEFENCE),
        bonuses.get(BonusVector::MAGIC_DEFENCE),
    ]
}

fn counter_shares(window: Option<&CounterWindow>) -> [f64; FIGHT_COUNTER_FEATURES] {
    window.map(|w| w.shares()).unwrap_or([0.0; FIGHT_COUNTER_FEATURES])
}

/// 每 tick 組裝觀察向量，相同輸入必得相同輸出
pub struct ObservationAssembler<'a> {
    tables: &'a PerceptionTables,
}

impl<'a> ObservationAssembler<'a> {
    pub fn new(tables: &'a PerceptionTables) -> Self {
        Self { tables }
    }

    /// 玩家身上裝備的加成總和
    pub fn player_gear(&self, player: &PlayerState) -> BonusVector {
        let ids: Vec<i32> = player
            .equipment
            .iter()
            .filter(|&&id| id > 0)
            .map(|&id| self.tables.decision_id(id))
            .collect();
        BonusVector::from_items(&ids, &self.tables.catalog)
    }

    /// 對手與基準混合後的加成
    pub fn target_gear(&self, target_gear: &EquipmentSnapshot) -> BonusVector {
        target_gear.blend(&self.tables.baseline)
    }

    pub fn assemble(
        &self,
        snapshot: &TickSnapshot,
        target_gear: &EquipmentSnapshot,
        counters: Option<&FightCounters>,
        last: &LastConfirmedGear,
    ) -> Result<ObservationVector, ContractError> {
        let tables = self.tables;
        let catalog: &dyn ItemCatalog = &tables.catalog;
        let roles = &tables.roles;
        let player = &snapshot.player;
        let target = &snapshot.target;
        let combat = &snapshot.combat;
        let actors: [&dyn AttackStateProvider; 2] = [player, target];

        let mut data = Vec::with_capacity(OBS_SIZE);

        // ============================================================================
        // 風格、祈禱、血量 (0-22)
        // ============================================================================
        let weapon = if player.weapon > 0 {
            tables.decision_id(player.weapon)
        } else {
            0
        };
        data.push(flag(roles.is_melee_weapon(weapon, Some(catalog)))); // 0
        data.push(flag(roles.is_ranged_weapon(weapon, Some(catalog)))); // 1
        data.push(flag(roles.is_mage_weapon(weapon, Some(catalog)))); // 2
        data.push(flag(roles.is_any_spec_weapon(weapon))); // 3
        data.push(percent(player.special_percent)); // 4

        let prayers = &player.prayers;
        data.push(flag(prayers.protect_melee)); // 5
        data.push(flag(prayers.protect_ranged)); // 6
        data.push(flag(prayers.protect_magic)); // 7
        data.push(flag(prayers.smite)); // 8
        data.push(flag(prayers.redemption)); // 9
        data.push(flag(prayers.offensive)); // 10

        data.push(ratio(player.health, player.max_health)); // 11
        data.push(target.health_fraction()); // 12

        // 對手武器尚未看到時全部為 0
        let target_style = target_gear
            .weapon()
            .map(|id| (roles.style_of(id, Some(catalog)), roles.is_any_spec_weapon(id)));
        for style in [CombatStyle::Melee, CombatStyle::Ranged, CombatStyle::Mage] {
            data.push(flag(target_style.map(|(s, _)| s == style).unwrap_or(false))); // 13-15
        }
        data.push(flag(target_style.map(|(_, spec)| spec).unwrap_or(false))); // 16

        let target_prayers = &target.prayers;
        data.push(flag(target_prayers.protect_melee)); // 17
        data.push(flag(target_prayers.protect_ranged)); // 18
        data.push(flag(target_prayers.protect_magic)); // 19
        data.push(flag(target_prayers.smite)); // 20
        data.push(flag(target_prayers.redemption)); // 21
        data.push(percent(target.special_percent)); // 22

        // ============================================================================
        // 消耗品、計時器、等級 (23-53)
        // ============================================================================
        let supplies = &player.consumables;
        data.push(supplies.ranging_potion_doses as f64); // 23
        data.push(supplies.combat_potion_doses as f64); // 24
        data.push(supplies.restore_potion_doses as f64); // 25
        data.push(supplies.brew_doses as f64); // 26
        data.push(supplies.food_count as f64); // 27
        data.push(supplies.karambwan_count as f64); // 28

        let max_prayer = if player.base_levels.prayer > 0 {
            player.base_levels.prayer as f64
        } else {
            MAX_PRAYER_POINTS_FALLBACK
        };
        data.push(player.prayer_points as f64 / max_prayer); // 29

        for actor in actors {
            data.push(actor.frozen_ticks() as f64); // 30-31
        }
        for actor in actors {
            data.push(actor.freeze_immunity_ticks() as f64); // 32-33
        }
        data.push(flag(combat.in_melee_range)); // 34

        // 加成後的等級可超過 99，不截斷
        let base = player.base_levels.combat();
        for (i, level) in player.levels.combat().iter().enumerate() {
            data.push(*level as f64 - base[i] as f64); // 35-39
        }
        for level in player.levels.all() {
            data.push(level as f64); // 40-46
        }

        let timers = &player.timers;
        data.push(timers.attack_cycle_ticks as f64); // 47
        data.push(timers.food_cycle_ticks as f64); // 48
        data.push(timers.potion_cycle_ticks as f64); // 49
        data.push(timers.karambwan_cycle_ticks as f64); // 50
        data.push(timers.food_attack_delay_ticks as f64); // 51
        data.push(target.attack_cycle_ticks() as f64); // 52
        data.push(target.potion_cycle_ticks() as f64); // 53

        debug_assert_eq!(data.len(), 54, "timer section mismatch");

        // ============================================================================
        // 傷害追蹤、移動、距離 (54-74)
        // ============================================================================
        data.push(combat.pending_damage_on_target as f64 / MAX_HIT_SCALE); // 54
        data.push(combat.ticks_until_hit_on_target as f64); // 55
        data.push(combat.ticks_until_hit_on_player as f64); // 56
        for actor in actors {
            data.push(flag(actor.just_attacked())); // 57-58
        }
        data.push(combat.tick_new_attack_damage as f64 / MAX_HIT_SCALE); // 59
        data.push(player.damage_taken_this_tick as f64 / MAX_HIT_SCALE); // 60
        data.push(target.damage_taken_this_tick as f64 / MAX_HIT_SCALE); // 61

        data.push(flag(player.attacking_target)); // 62
        for actor in actors {
            data.push(flag(actor.is_moving())); // 63-64
        }
        data.push(flag(player.has_pid)); // 65
        data.push(flag(player.ice_barrage_usable)); // 66
        data.push(flag(player.blood_barrage_usable)); // 67

        data.push(combat.destination_to_target_distance as f64); // 68
        data.push(combat.player_to_destination_distance as f64); // 69
        data.push(combat.player_to_target_distance as f64); // 70

        data.push(flag(combat.player_prayed_correct)); // 71
        data.push(flag(combat.target_prayed_correct)); // 72
        data.push(combat.total_damage_dealt as f64 / TOTAL_DAMAGE_SCALE); // 73
        data.push(combat.target_hit_confidence); // 74

        // ============================================================================
        // 命中 / 祈禱計數 (75-102)
        // ============================================================================
        data.extend(counter_shares(counters.map(|c| &c.lifetime))); // 75-88
        data.extend(counter_shares(counters.map(|c| &c.recent))); // 89-102

        debug_assert_eq!(data.len(), 103, "counter section mismatch");

        // ============================================================================
        // 弩箭、特攻武器 (103-122)
        // ============================================================================
        let worn: Vec<i32> = player
            .equipment
            .iter()
            .chain(std::iter::once(&player.ammunition))
            .filter(|&&id| id > 0)
            .map(|&id| tables.decision_id(id))
            .collect();
        let wearing_any = |ids: &[i32]| worn.iter().any(|id| ids.contains(id));
        data.push(flag(wearing_any(&tables.bolts.diamond[..]))); // 103
        data.push(flag(wearing_any(&tables.bolts.dragonstone[..]))); // 104
        data.push(flag(wearing_any(&tables.bolts.opal[..]))); // 105

        let owned = owned_special_weapons(tables, player);
        for weapon in SpecialWeapon::all() {
            data.push(flag(owned.contains(&weapon))); // 106-119
        }
        for style in [CombatStyle::Melee, CombatStyle::Ranged, CombatStyle::Mage] {
            data.push(flag(owned.iter().any(|w| w.style() == style))); // 120-122
        }

        // ============================================================================
        // 裝備統計區塊 (123-159)
        // ============================================================================
        let player_gear = self.player_gear(player);
        let target_blended = self.target_gear(target_gear);
        data.extend(gear_block(&player_gear)); // 123-131
        data.extend(gear_block(&last.player.unwrap_or(player_gear))); // 132-140
        data.extend(gear_block(&target_blended)); // 141-149
        data.extend(gear_block(&last.target.unwrap_or(target_blended))); // 150-158
        data.push(target_gear.average_confidence()); // 159

        debug_assert_eq!(data.len(), 160, "gear section mismatch");

        // ============================================================================
        // 模式、復仇、可用性 (160-175)
        // ============================================================================
        data.push(flag(snapshot.mode.lms)); // 160
        data.push(flag(snapshot.mode.pvp_arena)); // 161
        data.push(flag(snapshot.mode.wilderness)); // 162
        for actor in actors {
            data.push(flag(actor.vengeance_active())); // 163-164
        }
        for actor in actors {
            data.push(actor.vengeance_cooldown_ticks() as f64); // 165-166
        }
        data.push(flag(player.lunar_spellbook)); // 167

        let available = Availability::compute(tables, snapshot);
        data.push(flag(available.melee)); // 168
        data.push(flag(available.ranged)); // 169
        data.push(flag(available.mage)); // 170
        data.push(flag(available.melee_spec)); // 171
        data.push(flag(available.ranged_spec)); // 172
        data.push(flag(available.mage_spec)); // 173
        data.push(flag(player.has_ranged_ammo)); // 174
        data.push(flag(player.has_magic_runes)); // 175

        ObservationVector::new(data)
    }
}

// ============================================================================
// 單元測試
// ============================================================================
