//! gRPC 服務
//!
//! 每個 session id 對應一個 `PerceptionSession`，存在 DashMap 中；
//! 單一 entry 的鎖即為同一 session 的 tick 序列化。

use std::sync::Arc;

use dashmap::DashMap;
use tonic::{Request, Response, Status};
use tracing::{debug, info, warn};

use super::action_mask::ActionMaskSet;
use super::batch::assemble_batch;
use super::bridge::{EnvironmentBridge, SnapshotTracker};
use super::error::ContractError;
use super::observation::{ObservationVector, FEATURE_DEFS};
use super::session::{PerceptionSession, TickOutput};
use crate::game::{head_sizes, PerceptionTables, TickSnapshot, HEAD_NAMES, OBS_SIZE};
use crate::proto::perception_env_server::PerceptionEnv;
use crate::proto::{
    ActionMasks, DecodeActionRequest, DecodeActionResponse, EndSessionRequest, EndSessionResponse,
    GetLoadoutsRequest, GetLoadoutsResponse, GetSpecRequest, GetSpecResponse, MaskHead, Tensor,
    TickBatchRequest, TickBatchResponse, TickBatchResult, TickRequest, TickResponse,
};

impl From<&ObservationVector> for Tensor {
    fn from(observation: &ObservationVector) -> Self {
        Tensor {
            data: observation.as_slice().to_vec(),
            shape: vec![OBS_SIZE as i32],
        }
    }
}

impl From<&ActionMaskSet> for ActionMasks {
    fn from(masks: &ActionMaskSet) -> Self {
        ActionMasks {
            heads: masks
                .named()
                .map(|(name, values)| MaskHead {
                    name: name.to_string(),
                    values: values.to_vec(),
                })
                .collect(),
        }
    }
}

impl From<&TickOutput> for TickResponse {
    fn from(output: &TickOutput) -> Self {
        TickResponse {
            observation: Some(Tensor::from(&output.observation)),
            action_masks: Some(ActionMasks::from(&output.masks)),
            target_confidence: output.target_confidence(),
            tick: output.tick,
        }
    }
}

fn contract_status(e: ContractError) -> Status {
    match e {
        ContractError::NoTickOutput => Status::failed_precondition(e.to_string()),
        ContractError::ActionLength { .. } | ContractError::ActionOutOfRange { .. } => {
            Status::invalid_argument(e.to_string())
        }
        _ => Status::internal(e.to_string()),
    }
}

fn parse_snapshot(json: &str) -> Result<TickSnapshot, Status> {
    TickSnapshot::from_json(json)
        .map_err(|e| Status::invalid_argument(format!("invalid snapshot: {}", e)))
}

/// 單一快照失敗只影響自己的結果
fn batch_result(index: usize, output: &Result<TickOutput, ContractError>) -> TickBatchResult {
    match output {
        Ok(output) => TickBatchResult {
            tick: Some(TickResponse::from(output)),
            error: String::new(),
        },
        Err(e) => {
            warn!(index, error = %e, "batch snapshot aborted");
            TickBatchResult {
                tick: None,
                error: e.to_string(),
            }
        }
    }
}

pub struct PerceptionService {
    tables: Arc<PerceptionTables>,
    sessions: DashMap<String, PerceptionSession>,
}

impl PerceptionService {
    pub fn new(tables: Arc<PerceptionTables>) -> Self {
        Self {
            tables,
            sessions: DashMap::new(),
        }
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }
}

#[tonic::async_trait]
impl PerceptionEnv for PerceptionService {
    async fn tick(&self, request: Request<TickRequest>) -> Result<Response<TickResponse>, Status> {
        let request = request.into_inner();
        if request.session_id.is_empty() {
            return Err(Status::invalid_argument("session_id is required"));
        }
        let snapshot = parse_snapshot(&request.snapshot_json)?;

        let mut session = self
            .sessions
            .entry(request.session_id.clone())
            .or_insert_with(|| {
                info!(session = %request.session_id, "new session");
                PerceptionSession::with_tracker(self.tables.clone(), Box::new(SnapshotTracker))
            });

        // 上一 tick 的輸出保留到下一次 Tick，供 DecodeAction 使用
        session.on_tick_end();
        session.on_tick_start();
        session.ingest(snapshot);
        session.on_tick_processed();

        let output = session.output().map_err(contract_status)?;
        Ok(Response::new(TickResponse::from(output)))
    }

    async fn tick_batch(
        &self,
        request: Request<TickBatchRequest>,
    ) -> Result<Response<TickBatchResponse>, Status> {
        let snapshots = request
            .into_inner()
            .snapshots_json
            .iter()
            .map(|json| parse_snapshot(json))
            .collect::<Result<Vec<_>, _>>()?;
        debug!(count = snapshots.len(), "tick batch");

        let tables = self.tables.clone();
        let outputs = tokio::task::spawn_blocking(move || assemble_batch(&tables, &snapshots))
            .await
            .map_err(|e| Status::internal(format!("batch worker failed: {}", e)))?;

        let results = outputs
            .iter()
            .enumerate()
            .map(|(i, output)| batch_result(i, output))
            .collect();

        Ok(Response::new(TickBatchResponse { results }))
    }

    async fn decode_action(
        &self,
        request: Request<DecodeActionRequest>,
    ) -> Result<Response<DecodeActionResponse>, Status> {
        let request = request.into_inner();
        let indices = request
            .actions
            .iter()
            .map(|&a| usize::try_from(a))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| Status::invalid_argument("negative action index"))?;

        let session = self
            .sessions
            .get(&request.session_id)
            .ok_or_else(|| Status::not_found(format!("unknown session {}", request.session_id)))?;
        let command = session.decode_action(&indices).map_err(contract_status)?;

        Ok(Response::new(DecodeActionResponse {
            command_json: command
                .to_json()
                .map_err(|e| Status::internal(e.to_string()))?,
            masked_heads: command.masked_heads.iter().map(|h| h.to_string()).collect(),
        }))
    }

    async fn end_session(
        &self,
        request: Request<EndSessionRequest>,
    ) -> Result<Response<EndSessionResponse>, Status> {
        let session_id = request.into_inner().session_id;
        let existed = match self.sessions.remove(&session_id) {
            Some((_, session)) => {
                info!(
                    session = %session_id,
                    ticks = session.ticks_processed(),
                    "session ended"
                );
                true
            }
            None => false,
        };
        Ok(Response::new(EndSessionResponse { existed }))
    }

    async fn get_spec(
        &self,
        _request: Request<GetSpecRequest>,
    ) -> Result<Response<GetSpecResponse>, Status> {
        Ok(Response::new(GetSpecResponse {
            observation_size: OBS_SIZE as i32,
            feature_labels: FEATURE_DEFS.iter().map(|d| d.name.to_string()).collect(),
            head_names: HEAD_NAMES.iter().map(|h| h.to_string()).collect(),
            head_sizes: head_sizes(self.tables.movement_distance_options)
                .iter()
                .map(|&n| n as i32)
                .collect(),
        }))
    }

    async fn get_loadouts(
        &self,
        _request: Request<GetLoadoutsRequest>,
    ) -> Result<Response<GetLoadoutsResponse>, Status> {
        let loadouts = &self.tables.loadouts;
        Ok(Response::new(GetLoadoutsResponse {
            melee: loadouts.melee.clone(),
            ranged: loadouts.ranged.clone(),
            mage: loadouts.mage.clone(),
            tank: loadouts.tank.clone(),
            melee_spec: loadouts.melee_spec.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_result_keeps_valid_ticks() {
        let tables = PerceptionTables::builtin().unwrap();
        let snapshot = TickSnapshot {
            tick: 7,
            ..Default::default()
        };
        let mut outputs = assemble_batch(&tables, &[snapshot.clone(), snapshot]);
        outputs[0] = Err(ContractError::NoTickOutput);

        let results: Vec<_> = outputs
            .iter()
            .enumerate()
            .map(|(i, output)| batch_result(i, output))
            .collect();
        assert!(results[0].tick.is_none());
        assert_eq!(results[0].error, ContractError::NoTickOutput.to_string());
        assert!(results[1].error.is_empty());
        assert_eq!(results[1].tick.as_ref().unwrap().tick, 7);
    }

    #[tokio::test]
    async fn test_end_session_releases_state() {
        let service = PerceptionService::new(Arc::new(PerceptionTables::builtin().unwrap()));
        for id in ["a", "b"] {
            service
                .tick(Request::new(TickRequest {
                    session_id: id.to_string(),
                    snapshot_json: "{}".to_string(),
                }))
                .await
                .unwrap();
        }
        assert_eq!(service.session_count(), 2);

        let ended = service
            .end_session(Request::new(EndSessionRequest {
                session_id: "a".to_string(),
            }))
            .await
            .unwrap()
            .into_inner();
        assert!(ended.existed);
        assert_eq!(service.session_count(), 1);
    }

    #[test]
    fn test_contract_status_codes() {
        assert_eq!(
            contract_status(ContractError::NoTickOutput).code(),
            tonic::Code::FailedPrecondition
        );
        assert_eq!(
            contract_status(ContractError::ActionLength {
                expected: 12,
                actual: 3
            })
            .code(),
            tonic::Code::InvalidArgument
        );
    }
}
