//! 領域核心模組
//!
//! 包含感知層的靜態資料與純查詢：
//! - `constants`: 編碼常量、槽位、動作頭大小
//! - `items`: 物品元數據查詢（名稱、標準化、加成）
//! - `ids`: 觀察域 → 決策域 ID 對照
//! - `roles`: 武器角色分類與特攻武器白名單
//! - `equipment`: 裝備槽、加成向量、對手裝備推論
//! - `loadouts`: 標準裝備組與基準加成
//! - `state`: 單一 tick 的遊戲狀態快照
//! - `config`: 靜態設定載入與執行期查詢表

pub mod config;
pub mod constants;
pub mod equipment;
pub mod ids;
pub mod items;
pub mod loadouts;
pub mod roles;
pub mod state;

pub use config::{ConfigError, EnchantedBolts, PerceptionConfig, PerceptionTables};
pub use constants::*;
pub use equipment::{blend, BonusVector, EquipmentInferenceEngine, EquipmentSlot, EquipmentSnapshot};
pub use ids::IdentifierReconciler;
pub use items::{ItemCatalog, ItemRecord, StaticItemCatalog};
pub use loadouts::{compute_baseline, LoadoutBaseline, Loadouts};
pub use roles::{CombatStyle, RoleClassifier, SpecialWeapon, WeaponAllowlists, SPECIAL_WEAPON_DEFS};
pub use state::{
    AttackStateProvider, CombatState, CounterWindow, FightCounters, GameMode, PlayerState,
    TargetState, TickSnapshot,
};
