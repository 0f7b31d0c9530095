//! 服務層模組
//!
//! 每 tick 的組裝與契約：observation、action mask、動作解碼、
//! session 生命週期、批次處理與 gRPC 服務

pub mod action;
pub mod action_mask;
pub mod batch;
pub mod bridge;
pub mod contract;
pub mod error;
pub mod grpc;
pub mod observation;
pub mod session;

pub use action::{decode_action, PvpCommand};
pub use action_mask::{ActionMaskGenerator, ActionMaskSet, Availability};
pub use batch::assemble_batch;
pub use bridge::{DisabledTracker, EnvironmentBridge, FightTracker, SnapshotTracker};
pub use contract::{range_anomalies, validate_masks, validate_observation, RangeAnomaly};
pub use error::ContractError;
pub use grpc::PerceptionService;
pub use observation::{
    feature_label, LastConfirmedGear, ObservationAssembler, ObservationVector, FEATURE_DEFS,
};
pub use session::{PerceptionSession, TickOutput};
