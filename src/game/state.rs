//! 單一 tick 的遊戲狀態快照
//!
//! 由宿主（遊戲客戶端）每 tick 以 JSON 提供。所有欄位都有預設值，
//! 缺少的訊號一律退回中性值；計時器以負數表示未知或未啟用。

use serde::{Deserialize, Serialize};

fn unknown_ticks() -> i32 {
    -1
}

/// 技能等級
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillLevels {
    pub attack: i32,
    pub strength: i32,
    pub defence: i32,
    pub ranged: i32,
    pub magic: i32,
    pub prayer: i32,
    pub hitpoints: i32,
}

impl Default for SkillLevels {
    fn default() -> Self {
        Self {
            attack: 99,
            strength: 99,
            defence: 99,
            ranged: 99,
            magic: 99,
            prayer: 99,
            hitpoints: 99,
        }
    }
}

impl SkillLevels {
    /// 攻擊、力量、防禦、遠程、魔法（相對等級使用的五項）
    pub fn combat(&self) -> [i32; 5] {
        [self.attack, self.strength, self.defence, self.ranged, self.magic]
    }

    pub fn all(&self) -> [i32; 7] {
        [
            self.attack,
            self.strength,
            self.defence,
            self.ranged,
            self.magic,
            self.prayer,
            self.hitpoints,
        ]
    }
}

/// 頭頂與攻擊性祈禱
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrayerState {
    pub protect_melee: bool,
    pub protect_ranged: bool,
    pub protect_magic: bool,
    pub smite: bool,
    pub redemption: bool,
    /// piety / rigour / augury 任一
    pub offensive: bool,
}

/// 消耗品存量
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Consumables {
    pub ranging_potion_doses: i32,
    pub combat_potion_doses: i32,
    pub restore_potion_doses: i32,
    pub brew_doses: i32,
    pub food_count: i32,
    pub karambwan_count: i32,
}

/// 距離可再次行動的 tick 數（<= 0 表示就緒）
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionTimers {
    pub attack_cycle_ticks: i32,
    pub food_cycle_ticks: i32,
    pub potion_cycle_ticks: i32,
    pub karambwan_cycle_ticks: i32,
    pub food_attack_delay_ticks: i32,
}

// ============================================================================
// 角色攻擊狀態能力介面
// ============================================================================

/// 玩家與對手統一實作的攻擊狀態介面
pub trait AttackStateProvider {
    fn attack_cycle_ticks(&self) -> i32;
    fn potion_cycle_ticks(&self) -> i32;
    fn just_attacked(&self) -> bool;
    fn frozen_ticks(&self) -> i32;
    fn freeze_immunity_ticks(&self) -> i32;
    fn vengeance_active(&self) -> bool;
    fn vengeance_cooldown_ticks(&self) -> i32;
    fn is_moving(&self) -> bool;
}

// ============================================================================
// 本地玩家
// ============================================================================

/// 本地玩家的確認狀態
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerState {
    /// 已穿戴物品（觀察域 ID），順序不拘
    pub equipment: Vec<i32>,
    pub weapon: i32,
    pub ammunition: i32,
    pub health: i32,
    pub max_health: i32,
    pub special_percent: i32,
    pub prayer_points: i32,
    pub base_levels: SkillLevels,
    pub levels: SkillLevels,
    pub prayers: PrayerState,
    pub consumables: Consumables,
    pub timers: ActionTimers,
    pub frozen_ticks: i32,
    pub freeze_immunity_ticks: i32,
    pub vengeance_active: bool,
    pub vengeance_cooldown_ticks: i32,
    pub lunar_spellbook: bool,
    pub moving: bool,
    pub attacking_target: bool,
    pub has_pid: bool,
    pub just_attacked: bool,
    pub has_ranged_ammo: bool,
    pub has_magic_runes: bool,
    pub ice_barrage_usable: bool,
    pub blood_barrage_usable: bool,
    pub damage_taken_this_tick: i32,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            equipment: Vec::new(),
            weapon: 0,
            ammunition: 0,
            health: 99,
            max_health: 99,
            special_percent: 100,
            prayer_points: 99,
            base_levels: SkillLevels::default(),
            levels: SkillLevels::default(),
            prayers: PrayerState::default(),
            consumables: Consumables::default(),
            timers: ActionTimers::default(),
            frozen_ticks: 0,
            freeze_immunity_ticks: 0,
            vengeance_active: false,
            vengeance_cooldown_ticks: 0,
            lunar_spellbook: false,
            moving: false,
            attacking_target: false,
            has_pid: false,
            just_attacked: false,
            has_ranged_ammo: false,
            has_magic_runes: false,
            ice_barrage_usable: false,
            blood_barrage_usable: false,
            damage_taken_this_tick: 0,
        }
    }
}

impl AttackStateProvider for PlayerState {
    fn attack_cycle_ticks(&self) -> i32 {
        self.timers.attack_cycle_ticks
    }

    fn potion_cycle_ticks(&self) -> i32 {
        self.timers.potion_cycle_ticks
    }

    fn just_attacked(&self) -> bool {
        self.just_attacked
    }

    fn frozen_ticks(&self) -> i32 {
        self.frozen_ticks
    }

    fn freeze_immunity_ticks(&self) -> i32 {
        self.freeze_immunity_ticks
    }

    fn vengeance_active(&self) -> bool {
        self.vengeance_active
    }

    fn vengeance_cooldown_ticks(&self) -> i32 {
        self.vengeance_cooldown_ticks
    }

    fn is_moving(&self) -> bool {
        self.moving
    }
}

// ============================================================================
// 對手
// ============================================================================

/// 對手的可見狀態（裝備只能從外觀推論）
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetState {
    pub present: bool,
    pub actor_id: i32,
    /// 12 位外觀編碼；`None` 表示尚未觀察到
    pub appearance: Option<Vec<i32>>,
    /// 血條比例 (ratio / scale)，scale <= 0 表示血條未顯示
    pub health_ratio: i32,
    pub health_scale: i32,
    pub special_percent: i32,
    pub prayers: PrayerState,
    #[serde(default = "unknown_ticks")]
    pub attack_cycle_ticks: i32,
    #[serde(default = "unknown_ticks")]
    pub potion_cycle_ticks: i32,
    pub frozen_ticks: i32,
    pub freeze_immunity_ticks: i32,
    pub vengeance_active: bool,
    #[serde(default = "unknown_ticks")]
    pub vengeance_cooldown_ticks: i32,
    pub moving: bool,
    pub just_attacked: bool,
    pub dead: bool,
    pub damage_taken_this_tick: i32,
}

impl Default for TargetState {
    fn default() -> Self {
        Self {
            present: false,
            actor_id: -1,
            appearance: None,
            health_ratio: 0,
            health_scale: 0,
            special_percent: 0,
            prayers: PrayerState::default(),
            attack_cycle_ticks: unknown_ticks(),
            potion_cycle_ticks: unknown_ticks(),
            frozen_ticks: 0,
            freeze_immunity_ticks: 0,
            vengeance_active: false,
            vengeance_cooldown_ticks: unknown_ticks(),
            moving: false,
            just_attacked: false,
            dead: false,
            damage_taken_this_tick: 0,
        }
    }
}

impl TargetState {
    /// 可攻擊：在場且未死亡
    pub fn attackable(&self) -> bool {
        self.present && !self.dead
    }

    /// 血量比例；血條未顯示時視為滿血，不在場為 0
    pub fn health_fraction(&self) -> f64 {
        if !self.present {
            0.0
        } else if self.health_scale <= 0 {
            1.0
        } else {
            (self.health_ratio as f64 / self.health_scale as f64).clamp(0.0, 1.0)
        }
    }
}

impl AttackStateProvider for TargetState {
    fn attack_cycle_ticks(&self) -> i32 {
        self.attack_cycle_ticks
    }

    fn potion_cycle_ticks(&self) -> i32 {
        self.potion_cycle_ticks
    }

    fn just_attacked(&self) -> bool {
        self.just_attacked
    }

    fn frozen_ticks(&self) -> i32 {
        self.frozen_ticks
    }

    fn freeze_immunity_ticks(&self) -> i32 {
        self.freeze_immunity_ticks
    }

    fn vengeance_active(&self) -> bool {
        self.vengeance_active
    }

    fn vengeance_cooldown_ticks(&self) -> i32 {
        self.vengeance_cooldown_ticks
    }

    fn is_moving(&self) -> bool {
        self.moving
    }
}

// ============================================================================
// 戰鬥與追蹤
// ============================================================================

/// 戰鬥衍生統計
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatState {
    pub in_melee_range: bool,
    pub player_to_target_distance: i32,
    pub player_to_destination_distance: i32,
    pub destination_to_target_distance: i32,
    pub pending_damage_on_target: i32,
    pub ticks_until_hit_on_target: i32,
    pub ticks_until_hit_on_player: i32,
    pub tick_new_attack_damage: i32,
    pub player_prayed_correct: bool,
    pub target_prayed_correct: bool,
    pub total_damage_dealt: i32,
    /// 對手命中判斷的信心 [0, 1]
    pub target_hit_confidence: f64,
}

impl Default for CombatState {
    fn default() -> Self {
        Self {
            in_melee_range: false,
            player_to_target_distance: -1,
            player_to_destination_distance: -1,
            destination_to_target_distance: -1,
            pending_damage_on_target: 0,
            ticks_until_hit_on_target: -1,
            ticks_until_hit_on_player: -1,
            tick_new_attack_damage: 0,
            player_prayed_correct: false,
            target_prayed_correct: false,
            total_damage_dealt: 0,
            target_hit_confidence: 0.0,
        }
    }
}

/// 一個統計窗口內的命中 / 祈禱計數
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CounterWindow {
    pub target_attack_count: u32,
    pub player_attack_count: u32,
    pub target_hit_melee: u32,
    pub target_hit_magic: u32,
    pub target_hit_ranged: u32,
    pub player_hit_melee: u32,
    pub player_hit_magic: u32,
    pub player_hit_ranged: u32,
    /// 對手用了玩家沒有防護的風格
    pub target_hit_correct: u32,
    /// 玩家攻擊時對手開的祈禱
    pub target_pray_magic: u32,
    pub target_pray_ranged: u32,
    pub target_pray_melee: u32,
    /// 對手攻擊時玩家開的祈禱
    pub player_pray_magic: u32,
    pub player_pray_ranged: u32,
    pub player_pray_melee: u32,
    pub target_pray_correct: u32,
}

fn share(count: u32, total: u32) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}

impl CounterWindow {
    /// 14 個比例，順序同 observation
    pub fn shares(&self) -> [f64; 14] {
        let t = self.target_attack_count;
        let p = self.player_attack_count;
        [
            share(self.target_hit_melee, t),
            share(self.target_hit_magic, t),
            share(self.target_hit_ranged, t),
            share(self.player_hit_melee, p),
            share(self.player_hit_magic, p),
            share(self.player_hit_ranged, p),
            share(self.target_hit_correct, t),
            share(self.target_pray_magic, p),
            share(self.target_pray_ranged, p),
            share(self.target_pray_melee, p),
            share(self.player_pray_magic, t),
            share(self.player_pray_ranged, t),
            share(self.player_pray_melee, t),
            share(self.target_pray_correct, p),
        ]
    }
}

/// 整場與最近窗口的計數（由可選的戰鬥追蹤器提供）
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FightCounters {
    pub lifetime: CounterWindow,
    pub recent: CounterWindow,
}

/// 遊戲模式旗標
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameMode {
    pub lms: bool,
    pub pvp_arena: bool,
    pub wilderness: bool,
}

/// 單一 tick 的完整輸入
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TickSnapshot {
    pub tick: u64,
    pub player: PlayerState,
    pub target: TargetState,
    pub combat: CombatState,
    pub counters: Option<FightCounters>,
    pub mode: GameMode,
}

impl TickSnapshot {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

// ============================================================================
// 單元測試
// ============================================================================
