//! 無狀態批次組裝
//!
//! 每個快照彼此獨立，用 rayon 平行處理；計數取自快照本身，
//! 上次攻擊裝備一律使用目前值。

use rayon::prelude::*;

use super::bridge::{FightTracker, SnapshotTracker};
use super::error::ContractError;
use super::observation::LastConfirmedGear;
use super::session::{assemble_tick, infer_target, TickOutput};
use crate::game::{PerceptionTables, TickSnapshot};

pub fn assemble_batch(
    tables: &PerceptionTables,
    snapshots: &[TickSnapshot],
) -> Vec<Result<TickOutput, ContractError>> {
    let last = LastConfirmedGear::default();
    snapshots
        .par_iter()
        .map(|snapshot| {
            let counters = SnapshotTracker.counters(snapshot);
            let target_gear = infer_target(tables, snapshot);
            assemble_tick(tables, snapshot, target_gear, counters.as_ref(), &last)
        })
        .collect()
}
