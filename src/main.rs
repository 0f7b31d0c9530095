use std::sync::Arc;

use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pvp_env::game::{PerceptionConfig, PerceptionTables};
use pvp_env::proto::perception_env_server::PerceptionEnvServer;
use pvp_env::service::PerceptionService;

const DEFAULT_ADDR: &str = "127.0.0.1:50051";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // 沒有設定檔時使用內建資料
    let config = match std::env::var("PVP_ENV_CONFIG") {
        Ok(path) => PerceptionConfig::load(path)?,
        Err(_) => PerceptionConfig::default(),
    };
    let tables = Arc::new(PerceptionTables::from_config(&config)?);
    info!(
        items = tables.catalog.len(),
        equivalences = tables.reconciler.len(),
        baseline_sets = tables.baseline.candidate_count(),
        "perception tables ready"
    );

    let addr = std::env::var("PVP_ENV_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let listener = TcpListener::bind(&addr).await?;
    info!(addr = %listener.local_addr()?, "PerceptionEnv gRPC server listening");

    tonic::transport::Server::builder()
        .add_service(PerceptionEnvServer::new(PerceptionService::new(tables)))
        .serve_with_incoming(TcpListenerStream::new(listener))
        .await?;

    Ok(())
}
