//! 感知層常量定義

// ============================================================================
// 外觀編碼常量
// ============================================================================

pub const APPEARANCE_SLOT_COUNT: usize = 12; // 外觀編碼位置數
pub const APPEARANCE_ITEM_OFFSET: i32 = 512; // 物品編碼偏移
pub const APPEARANCE_KIT_OFFSET: i32 = 256;  // 外觀套件（純裝飾）偏移

// ============================================================================
// 裝備表常量
// ============================================================================

pub const EQUIPMENT_SLOT_COUNT: usize = 14;  // 決策域裝備表大小（含 3 個保留位）
pub const EXISTING_SLOT_COUNT: usize = 11;   // 實際存在的裝備槽
pub const BONUS_COUNT: usize = 14;           // 加成軸數量

pub const CONFIDENCE_OBSERVED: f64 = 0.95;     // 有完整屬性的可見物品
pub const CONFIDENCE_NO_STATS: f64 = 0.1;      // 可見但缺少屬性
pub const CONFIDENCE_RING: f64 = 0.1;          // 戒指永遠不可見
pub const CONFIDENCE_AMMUNITION: f64 = 0.3;    // 彈藥永遠不可見

// ============================================================================
// Observation 常量
// ============================================================================

pub const OBS_SIZE: usize = 176;
pub const GEAR_BLOCK_FEATURES: usize = 9;     // 每組裝備統計特徵數
pub const FIGHT_COUNTER_FEATURES: usize = 14; // 命中/祈禱計數特徵數

pub const MAX_PRAYER_POINTS_FALLBACK: f64 = 99.0;
pub const MAX_HIT_SCALE: f64 = 100.0;        // 傷害正規化
pub const TOTAL_DAMAGE_SCALE: f64 = 1000.0;  // 累計傷害正規化

// ============================================================================
// 技能等級門檻
// ============================================================================

pub const SMITE_PRAYER_LEVEL: i32 = 52;
pub const REDEMPTION_PRAYER_LEVEL: i32 = 49;
pub const VENGEANCE_MAGIC_LEVEL: i32 = 94;

// ============================================================================
// Action 常量
// ============================================================================

pub const ACTION_HEAD_COUNT: usize = 12;
pub const DEFAULT_MOVEMENT_DISTANCE_OPTIONS: usize = 7; // none + 1..6 格

pub const HEAD_ATTACK: usize = 0;
pub const HEAD_MELEE: usize = 1;
pub const HEAD_RANGED: usize = 2;
pub const HEAD_MAGE: usize = 3;
pub const HEAD_POTION: usize = 4;
pub const HEAD_FOOD: usize = 5;
pub const HEAD_KARAMBWAN: usize = 6;
pub const HEAD_VENGEANCE: usize = 7;
pub const HEAD_GEAR: usize = 8;
pub const HEAD_MOVEMENT: usize = 9;
pub const HEAD_DISTANCE: usize = 10;
pub const HEAD_PRAYER: usize = 11;

pub const ATTACK_OPTIONS: usize = 4;    // none, mage, ranged, melee
pub const MELEE_OPTIONS: usize = 3;     // none, basic, spec
pub const RANGED_OPTIONS: usize = 3;    // none, basic, spec
pub const MAGE_OPTIONS: usize = 4;      // none, ice, blood, spec
pub const POTION_OPTIONS: usize = 5;    // none, brew, restore, combat, ranging
pub const FOOD_OPTIONS: usize = 2;
pub const KARAMBWAN_OPTIONS: usize = 2;
pub const VENGEANCE_OPTIONS: usize = 2;
pub const GEAR_OPTIONS: usize = 2;      // none, tank
pub const MOVEMENT_OPTIONS: usize = 5;  // none, adjacent, under, farcast, diagonal
pub const PRAYER_OPTIONS: usize = 6;    // none, magic, ranged, melee, smite, redemption

/// 各動作頭的固定大小（movement distance 由設定決定）
pub fn head_sizes(distance_options: usize) -> [usize; ACTION_HEAD_COUNT] {
    [
        ATTACK_OPTIONS,
        MELEE_OPTIONS,
        RANGED_OPTIONS,
        MAGE_OPTIONS,
        POTION_OPTIONS,
        FOOD_OPTIONS,
        KARAMBWAN_OPTIONS,
        VENGEANCE_OPTIONS,
        GEAR_OPTIONS,
        MOVEMENT_OPTIONS,
        distance_options,
        PRAYER_OPTIONS,
    ]
}

pub const HEAD_NAMES: [&str; ACTION_HEAD_COUNT] = [
    "attack",
    "melee",
    "ranged",
    "mage",
    "potion",
    "food",
    "karambwan",
    "vengeance",
    "gear",
    "movement",
    "distance",
    "prayer",
];
