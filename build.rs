//! 生成 PerceptionEnv gRPC 服務骨架
//!
//! 訊息型別直接以 `prost::Message` derive 定義在 `src/proto.rs`，
//! 這裡只用 manual builder 產生 server/client，因此不需要 protoc。

fn method(name: &str, route: &str, input: &str, output: &str) -> tonic_build::manual::Method {
    tonic_build::manual::Method::builder()
        .name(name)
        .route_name(route)
        .input_type(format!("crate::proto::{}", input))
        .output_type(format!("crate::proto::{}", output))
        .codec_path("tonic::codec::ProstCodec")
        .build()
}

fn main() {
    let service = tonic_build::manual::Service::builder()
        .name("PerceptionEnv")
        .package("pvp.perception")
        .method(method("tick", "Tick", "TickRequest", "TickResponse"))
        .method(method("tick_batch", "TickBatch", "TickBatchRequest", "TickBatchResponse"))
        .method(method("decode_action", "DecodeAction", "DecodeActionRequest", "DecodeActionResponse"))
        .method(method("end_session", "EndSession", "EndSessionRequest", "EndSessionResponse"))
        .method(method("get_spec", "GetSpec", "GetSpecRequest", "GetSpecResponse"))
        .method(method("get_loadouts", "GetLoadouts", "GetLoadoutsRequest", "GetLoadoutsResponse"))
        .build();

    tonic_build::manual::Builder::new().compile(&[service]);
    println!("cargo:rerun-if-changed=build.rs");
}
