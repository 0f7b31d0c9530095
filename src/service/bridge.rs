//! 環境橋接介面
//!
//! 宿主每 tick 依序呼叫 `on_tick_start` → `on_tick_processed` → `on_tick_end`，
//! 並在 processed 之後讀取 observation 與 mask。

use super::action_mask::ActionMaskSet;
use super::error::ContractError;
use super::observation::ObservationVector;
use crate::game::{FightCounters, TickSnapshot};

pub trait EnvironmentBridge {
    fn get_observations(&self) -> Result<&ObservationVector, ContractError>;
    fn get_action_masks(&self) -> Result<&ActionMaskSet, ContractError>;

    /// 標準裝備組，第一個物品為武器
    fn get_melee_gear(&self) -> Vec<i32>;
    fn get_ranged_gear(&self) -> Vec<i32>;
    fn get_mage_gear(&self) -> Vec<i32>;

    fn on_tick_start(&mut self);
    fn on_tick_processed(&mut self);
    fn on_tick_end(&mut self);
}

// ============================================================================
// 戰鬥追蹤能力
// ============================================================================

/// 可選的命中 / 祈禱計數來源
pub trait FightTracker: Send + Sync {
    fn counters(&self, snapshot: &TickSnapshot) -> Option<FightCounters>;
}

/// 宿主沒有追蹤器時使用，計數全部編碼為 0
#[derive(Clone, Copy, Debug, Default)]
pub struct DisabledTracker;

impl FightTracker for DisabledTracker {
    fn counters(&self, _snapshot: &TickSnapshot) -> Option<FightCounters> {
        None
    }
}

/// 讀取快照上附帶的計數
#[derive(Clone, Copy, Debug, Default)]
pub struct SnapshotTracker;

impl FightTracker for SnapshotTracker {
    fn counters(&self, snapshot: &TickSnapshot) -> Option<FightCounters> {
        snapshot.counters
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trackers() {
        let mut snapshot = TickSnapshot::default();
        let mut counters = FightCounters::default();
        counters.lifetime.player_attack_count = 3;
        snapshot.counters = Some(counters);

        assert_eq!(DisabledTracker.counters(&snapshot), None);
        assert_eq!(SnapshotTracker.counters(&snapshot), Some(counters));
    }
}
