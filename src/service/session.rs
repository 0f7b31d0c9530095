//! 單一對戰 session 的 tick 生命週期
//!
//! 每 tick：`on_tick_start` → `ingest` → `on_tick_processed` → 讀取輸出 → `on_tick_end`。
//! 跨 tick 只保留「上次攻擊時的裝備加成」，其餘輸出在 tick 結束時丟棄。

use std::sync::Arc;

use tracing::{debug, error, warn};

use super::action::{decode_action, PvpCommand};
use super::action_mask::{ActionMaskGenerator, ActionMaskSet};
use super::bridge::{DisabledTracker, EnvironmentBridge, FightTracker};
use super::error::ContractError;
use super::observation::{LastConfirmedGear, ObservationAssembler, ObservationVector};
use crate::game::{
    CombatStyle, EquipmentSnapshot, FightCounters, PerceptionTables, TickSnapshot,
};

/// 一個 tick 的完整輸出
#[derive(Clone, Debug, PartialEq)]
pub struct TickOutput {
    pub tick: u64,
    pub observation: ObservationVector,
    pub masks: ActionMaskSet,
    pub target_gear: EquipmentSnapshot,
}

impl TickOutput {
    pub fn target_confidence(&self) -> f64 {
        self.target_gear.average_confidence()
    }
}

/// 從對手外觀推論裝備
pub fn infer_target(tables: &PerceptionTables, snapshot: &TickSnapshot) -> EquipmentSnapshot {
    tables.inference().infer(
        snapshot.target.appearance.as_deref(),
        Some(&tables.catalog),
        snapshot.target.actor_id,
    )
}

/// 組裝 observation 與 mask，任一違反契約即整個 tick 作廢
pub fn assemble_tick(
    tables: &PerceptionTables,
    snapshot: &TickSnapshot,
    target_gear: EquipmentSnapshot,
    counters: Option<&FightCounters>,
    last: &LastConfirmedGear,
) -> Result<TickOutput, ContractError> {
    let observation =
        ObservationAssembler::new(tables).assemble(snapshot, &target_gear, counters, last)?;
    let masks = ActionMaskGenerator::new(tables).generate(snapshot)?;
    Ok(TickOutput {
        tick: snapshot.tick,
        observation,
        masks,
        target_gear,
    })
}

enum TickPhase {
    Idle,
    Started,
    Processed(Result<TickOutput, ContractError>),
}

pub struct PerceptionSession {
    tables: Arc<PerceptionTables>,
    tracker: Box<dyn FightTracker>,
    pending: Option<TickSnapshot>,
    phase: TickPhase,
    last_gear: LastConfirmedGear,
    last_target_id: i32,
    ticks_processed: u64,
}

impl PerceptionSession {
    pub fn new(tables: Arc<PerceptionTables>) -> Self {
        Self::with_tracker(tables, Box::new(DisabledTracker))
    }

    pub fn with_tracker(tables: Arc<PerceptionTables>, tracker: Box<dyn FightTracker>) -> Self {
        Self {
            tables,
            tracker,
            pending: None,
            phase: TickPhase::Idle,
            last_gear: LastConfirmedGear::default(),
            last_target_id: -1,
            ticks_processed: 0,
        }
    }

    pub fn tables(&self) -> &PerceptionTables {
        &self.tables
    }

    /// 提供本 tick 的快照
    pub fn ingest(&mut self, snapshot: TickSnapshot) {
        if !matches!(self.phase, TickPhase::Started) {
            warn!(tick = snapshot.tick, "snapshot ingested outside on_tick_start");
        }
        self.pending = Some(snapshot);
    }

    pub fn output(&self) -> Result<&TickOutput, ContractError> {
        match &self.phase {
            TickPhase::Processed(Ok(output)) => Ok(output),
            TickPhase::Processed(Err(e)) => Err(e.clone()),
            _ => Err(ContractError::NoTickOutput),
        }
    }

    /// 依本 tick 的 mask 解碼策略輸出
    pub fn decode_action(&self, indices: &[usize]) -> Result<PvpCommand, ContractError> {
        decode_action(indices, &self.output()?.masks)
    }

    pub fn last_confirmed_gear(&self) -> &LastConfirmedGear {
        &self.last_gear
    }

    pub fn ticks_processed(&self) -> u64 {
        self.ticks_processed
    }

    /// 攻擊當下記住裝備；換對手時清掉對手的記錄
    fn remember_gear(
        &self,
        snapshot: &TickSnapshot,
        target_gear: &EquipmentSnapshot,
    ) -> LastConfirmedGear {
        let assembler = ObservationAssembler::new(&self.tables);
        let mut last = self.last_gear;

        if snapshot.target.actor_id != self.last_target_id {
            last.target = None;
        }
        if snapshot.player.just_attacked {
            last.player = Some(assembler.player_gear(&snapshot.player));
        }
        if snapshot.target.just_attacked {
            last.target = Some(assembler.target_gear(target_gear));
        }
        last
    }

    /// 只有輸出通過契約檢查的 tick 才會更新上次裝備
    fn process(&mut self, snapshot: &TickSnapshot) -> Result<TickOutput, ContractError> {
        let counters = self.tracker.counters(snapshot);
        let target_gear = infer_target(&self.tables, snapshot);
        let last = self.remember_gear(snapshot, &target_gear);
        let output = assemble_tick(&self.tables, snapshot, target_gear, counters.as_ref(), &last)?;

        self.last_gear = last;
        self.last_target_id = snapshot.target.actor_id;
        Ok(output)
    }
}

impl EnvironmentBridge for PerceptionSession {
    fn get_observations(&self) -> Result<&ObservationVector, ContractError> {
        self.output().map(|o| &o.observation)
    }

    fn get_action_masks(&self) -> Result<&ActionMaskSet, ContractError> {
        self.output().map(|o| &o.masks)
    }

    fn get_melee_gear(&self) -> Vec<i32> {
        self.tables.loadouts.for_style(CombatStyle::Melee).to_vec()
    }

    fn get_ranged_gear(&self) -> Vec<i32> {
        self.tables.loadouts.for_style(CombatStyle::Ranged).to_vec()
    }

    fn get_mage_gear(&self) -> Vec<i32> {
        self.tables.loadouts.for_style(CombatStyle::Mage).to_vec()
    }

    fn on_tick_start(&mut self) {
        self.pending = None;
        self.phase = TickPhase::Started;
    }

    fn on_tick_processed(&mut self) {
        let Some(snapshot) = self.pending.take() else {
            warn!("on_tick_processed without snapshot");
            self.phase = TickPhase::Processed(Err(ContractError::NoTickOutput));
            return;
        };

        let result = self.process(&snapshot);
        match &result {
            Ok(output) => debug!(
                tick = output.tick,
                confidence = output.target_confidence(),
                "tick processed"
            ),
            Err(e) => error!(tick = snapshot.tick, error = %e, "tick output aborted"),
        }
        self.ticks_processed += 1;
        self.phase = TickPhase::Processed(result);
    }

    fn on_tick_end(&mut self) {
        self.pending = None;
        self.phase = TickPhase::Idle;
    }
}

// ============================================================================
// 單元測試
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::OBS_SIZE;
    use crate::service::bridge::SnapshotTracker;

    fn session() -> PerceptionSession {
        PerceptionSession::new(Arc::new(PerceptionTables::builtin().unwrap()))
    }

    fn run(session: &mut PerceptionSession, snapshot: TickSnapshot) {
        session.on_tick_start();
        session.ingest(snapshot);
        session.on_tick_processed();
    }

    #[test]
    fn test_no_output_outside_tick() {
        let mut session = session();
        assert_eq!(session.get_observations().err(), Some(ContractError::NoTickOutput));

        session.on_tick_start();
        assert_eq!(session.get_action_masks().err(), Some(ContractError::NoTickOutput));
    }

    #[test]
    fn test_tick_lifecycle() {
        let mut session = session();
        run(&mut session, TickSnapshot { tick: 5, ..Default::default() });

        assert_eq!(session.get_observations().unwrap().len(), OBS_SIZE);
        assert_eq!(session.get_action_masks().unwrap().head_count(), 12);
        assert_eq!(session.output().unwrap().tick, 5);
        assert_eq!(session.ticks_processed(), 1);

        session.on_tick_end();
        assert_eq!(session.get_observations().err(), Some(ContractError::NoTickOutput));
    }

    #[test]
    fn test_processed_without_snapshot() {
        let mut session = session();
        session.on_tick_start();
        session.on_tick_processed();
        assert_eq!(session.output().err(), Some(ContractError::NoTickOutput));
    }

    #[test]
    fn test_non_finite_aborts_tick() {
        let mut session = session();
        let mut snapshot = TickSnapshot::default();
        snapshot.combat.target_hit_confidence = f64::NAN;
        run(&mut session, snapshot);

        match session.get_observations() {
            Err(ContractError::NonFinite { index, .. }) => assert_eq!(index, 74),
            other => panic!("unexpected {:?}", other),
        }
        assert!(session.get_action_masks().is_err());
    }

    #[test]
    fn test_player_gear_remembered_at_attack() {
        let mut session = session();
        let mut snapshot = TickSnapshot::default();
        snapshot.player.equipment = vec![4151];
        snapshot.player.just_attacked = true;
        run(&mut session, snapshot.clone());
        session.on_tick_end();

        // 攻擊後換下武器，上次裝備仍是鞭
        snapshot.player.equipment = vec![];
        snapshot.player.just_attacked = false;
        run(&mut session, snapshot);
        let obs = session.get_observations().unwrap();
        assert_eq!(obs.value(123), 0.0);
        assert_eq!(obs.value(132), 82.0);
    }

    #[test]
    fn test_target_memory_reset_on_new_target() {
        let mut session = session();
        let mut snapshot = TickSnapshot::default();
        snapshot.target.present = true;
        snapshot.target.actor_id = 1;
        snapshot.target.just_attacked = true;
        snapshot.target.appearance = Some(vec![0, 0, 0, 4151 + 512]);
        run(&mut session, snapshot.clone());
        assert!(session.last_confirmed_gear().target.is_some());

        snapshot.target.actor_id = 2;
        snapshot.target.just_attacked = false;
        run(&mut session, snapshot);
        assert!(session.last_confirmed_gear().target.is_none());
    }

    #[test]
    fn test_aborted_tick_keeps_last_gear() {
        let mut session = session();
        let mut snapshot = TickSnapshot::default();
        snapshot.player.equipment = vec![4151];
        snapshot.player.just_attacked = true;
        snapshot.target.present = true;
        snapshot.target.actor_id = 1;
        snapshot.target.just_attacked = true;
        snapshot.target.appearance = Some(vec![0, 0, 0, 4151 + 512]);
        run(&mut session, snapshot.clone());
        let confirmed = *session.last_confirmed_gear();
        assert!(confirmed.player.is_some());
        assert!(confirmed.target.is_some());

        // 換武器、換對手，但本 tick 因非有限值中止
        snapshot.player.equipment = vec![];
        snapshot.target.actor_id = 2;
        snapshot.target.just_attacked = false;
        snapshot.combat.target_hit_confidence = f64::NAN;
        run(&mut session, snapshot.clone());
        assert!(session.output().is_err());
        assert_eq!(*session.last_confirmed_gear(), confirmed);

        // 下一個正常 tick 才套用換對手
        snapshot.combat.target_hit_confidence = 0.0;
        run(&mut session, snapshot);
        assert!(session.output().is_ok());
        assert!(session.last_confirmed_gear().target.is_none());
        assert_eq!(session.last_confirmed_gear().player, confirmed.player);
    }

    #[test]
    fn test_tracker_capability() {
        let tables = Arc::new(PerceptionTables::builtin().unwrap());
        let mut snapshot = TickSnapshot::default();
        let mut counters = FightCounters::default();
        counters.lifetime.target_attack_count = 2;
        counters.lifetime.target_hit_melee = 1;
        snapshot.counters = Some(counters);

        let mut disabled = PerceptionSession::new(tables.clone());
        run(&mut disabled, snapshot.clone());
        assert_eq!(disabled.get_observations().unwrap().value(75), 0.0);

        let mut tracked = PerceptionSession::with_tracker(tables, Box::new(SnapshotTracker));
        run(&mut tracked, snapshot);
        assert_eq!(tracked.get_observations().unwrap().value(75), 0.5);
    }

    #[test]
    fn test_bridge_gear_lists() {
        let session = session();
        assert_eq!(session.get_melee_gear().first(), Some(&4151));
        assert_eq!(session.get_ranged_gear().first(), Some(&11785));
        assert_eq!(session.get_mage_gear().first(), Some(&4675));
    }

    #[test]
    fn test_decode_uses_current_masks() {
        let mut session = session();
        assert!(session.decode_action(&[0; 12]).is_err());

        let mut snapshot = TickSnapshot::default();
        snapshot.player.consumables.food_count = 0;
        run(&mut session, snapshot);
        let mut indices = [0; 12];
        indices[5] = 1;
        let command = session.decode_action(&indices).unwrap();
        assert!(!command.eat_food);
        assert_eq!(command.masked_heads, vec!["food"]);
    }
}
