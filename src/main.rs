use anyhow::Result;
use clap::Parser;
use tracing::{error, info};
use tvnsrtools::bootstrap::tracing::init_tracing_subscriber;
use tvnsrtools::cli::ServerArgs;
use tvnsrtools::{MockServer, Settings};

#[tokio::main]
async fn main() -> Result<()> {
    let args = ServerArgs::parse();
    init_tracing_subscriber()?;

    // 加载配置，命令行参数优先
    let mut settings = Settings::load(args.config.as_deref())?;
    args.apply(&mut settings.server);

    info!("Initializing tVNS-R Mock Server...");
    let server = MockServer::from_setting(&settings.server)?;
    if let Some(seed) = settings.server.seed {
        info!(seed, "failure draws are seeded");
    }

    server.run_until(shutdown_signal()).await
}

/// Resolve on Ctrl-C
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Ctrl-C received, shutting down"),
        Err(e) => {
            error!("无法监听 Ctrl-C 信号: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
