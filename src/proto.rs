//! gRPC 訊息定義（package `pvp.perception`）
//!
//! 服務骨架由 build.rs 產生並在此 include。

/// 一維數值張量
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Tensor {
    #[prost(double, repeated, tag = "1")]
    pub data: ::prost::alloc::vec::Vec<f64>,
    #[prost(int32, repeated, tag = "2")]
    pub shape: ::prost::alloc::vec::Vec<i32>,
}

/// 單一動作頭的合法性
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MaskHead {
    #[prost(string, tag = "1")]
    pub name: ::prost::alloc::string::String,
    #[prost(bool, repeated, tag = "2")]
    pub values: ::prost::alloc::vec::Vec<bool>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ActionMasks {
    #[prost(message, repeated, tag = "1")]
    pub heads: ::prost::alloc::vec::Vec<MaskHead>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TickRequest {
    #[prost(string, tag = "1")]
    pub session_id: ::prost::alloc::string::String,
    /// `TickSnapshot` 的 JSON
    #[prost(string, tag = "2")]
    pub snapshot_json: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TickResponse {
    #[prost(message, optional, tag = "1")]
    pub observation: ::core::option::Option<Tensor>,
    #[prost(message, optional, tag = "2")]
    pub action_masks: ::core::option::Option<ActionMasks>,
    /// 對手裝備平均信心
    #[prost(double, tag = "3")]
    pub target_confidence: f64,
    #[prost(uint64, tag = "4")]
    pub tick: u64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TickBatchRequest {
    #[prost(string, repeated, tag = "1")]
    pub snapshots_json: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
}

/// 批次中單一快照的結果；失敗時只有 `error`
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TickBatchResult {
    #[prost(message, optional, tag = "1")]
    pub tick: ::core::option::Option<TickResponse>,
    #[prost(string, tag = "2")]
    pub error: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TickBatchResponse {
    #[prost(message, repeated, tag = "1")]
    pub results: ::prost::alloc::vec::Vec<TickBatchResult>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DecodeActionRequest {
    #[prost(string, tag = "1")]
    pub session_id: ::prost::alloc::string::String,
    #[prost(int32, repeated, tag = "2")]
    pub actions: ::prost::alloc::vec::Vec<i32>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DecodeActionResponse {
    /// `PvpCommand` 的 JSON
    #[prost(string, tag = "1")]
    pub command_json: ::prost::alloc::string::String,
    #[prost(string, repeated, tag = "2")]
    pub masked_heads: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct EndSessionRequest {
    #[prost(string, tag = "1")]
    pub session_id: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct EndSessionResponse {
    /// session 是否存在
    #[prost(bool, tag = "1")]
    pub existed: bool,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetSpecRequest {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetSpecResponse {
    #[prost(int32, tag = "1")]
    pub observation_size: i32,
    #[prost(string, repeated, tag = "2")]
    pub feature_labels: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
    #[prost(string, repeated, tag = "3")]
    pub head_names: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
    #[prost(int32, repeated, tag = "4")]
    pub head_sizes: ::prost::alloc::vec::Vec<i32>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetLoadoutsRequest {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetLoadoutsResponse {
    #[prost(int32, repeated, tag = "1")]
    pub melee: ::prost::alloc::vec::Vec<i32>,
    #[prost(int32, repeated, tag = "2")]
    pub ranged: ::prost::alloc::vec::Vec<i32>,
    #[prost(int32, repeated, tag = "3")]
    pub mage: ::prost::alloc::vec::Vec<i32>,
    #[prost(int32, repeated, tag = "4")]
    pub tank: ::prost::alloc::vec::Vec<i32>,
    #[prost(int32, repeated, tag = "5")]
    pub melee_spec: ::prost::alloc::vec::Vec<i32>,
}

include!(concat!(env!("OUT_DIR"), "/pvp.perception.PerceptionEnv.rs"));
