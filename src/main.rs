use anyhow::{Context, Result};
use clap::Parser;
use interview_client::{
    create_router, AppState, CaptureDeviceFactory, CaptureManager, Config, FileHandoffStore,
    HandoffStore, HttpInterviewService, InterviewService, SessionController,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Interview session client
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Config file (without extension)
    #[arg(long, default_value = "config/interview-client")]
    config: String,

    /// Interview track, e.g. "Data Scientist"
    #[arg(long)]
    role: Option<String>,

    /// Base URL of the interview service
    #[arg(long)]
    service_url: Option<String>,

    /// Still image used as the camera feed
    #[arg(long)]
    frame_file: Option<PathBuf>,

    /// Port for the control surface
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let mut cfg = Config::load(&args.config)?;

    if let Some(role) = args.role {
        cfg.session.role = role;
    }
    if let Some(url) = args.service_url {
        cfg.service.base_url = url;
    }
    if let Some(path) = args.frame_file {
        cfg.capture.frame_file = Some(path);
    }
    if let Some(port) = args.port {
        cfg.http.port = port;
    }

    info!("Interview client v{}", env!("CARGO_PKG_VERSION"));
    info!("Interview service: {}", cfg.service.base_url);
    info!("Role: {}", cfg.session.role);
    info!("Report handoff directory: {}", cfg.storage.dir.display());

    let service: Arc<dyn InterviewService> =
        Arc::new(HttpInterviewService::new(cfg.service.base_url.clone()));
    let store: Arc<dyn HandoffStore> = Arc::new(FileHandoffStore::new(cfg.storage.dir.clone()));
    let capture = Arc::new(CaptureManager::new(cfg.capture_constraints()));

    let controller = Arc::new(SessionController::new(
        cfg.session_config(),
        service,
        capture,
        Arc::clone(&store),
    ));

    let device = CaptureDeviceFactory::create(cfg.capture_source());
    controller.initialize(device.as_ref()).await;

    let app = create_router(AppState::new(Arc::clone(&controller), store));

    let addr = format!("{}:{}", cfg.http.bind, cfg.http.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Control surface listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
        })
        .await
        .context("HTTP server failed")?;

    controller.dispose();
    info!("Session disposed");

    Ok(())
}
