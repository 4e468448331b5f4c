mod clients;
mod config;
mod dashboard;
mod helpers;
mod models;
mod routes;

use std::path::PathBuf;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;

use clients::ApiClient;
use dashboard::controller::DashboardController;
use dashboard::navigation::Navigation;
use dashboard::runtime::{DashboardActor, DashboardHandle};

#[derive(Clone)]
pub struct AppState {
    pub dashboard: DashboardHandle,
    pub config: Arc<config::Config>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("kafka_console=info,tower_http=info")),
        )
        .init();

    let config_path = std::env::args()
        .skip(1)
        .zip(std::env::args().skip(2))
        .find_map(|(k, v)| (k == "-config" || k == "--config").then_some(v))
        .or_else(|| std::env::args().nth(1).filter(|a| !a.starts_with('-')))
        .unwrap_or_else(|| "/etc/kafka-console/config.yaml".to_string());

    let cfg = config::Config::load(&PathBuf::from(&config_path)).unwrap_or_else(|e| {
        eprintln!("error loading config: {}", e);
        std::process::exit(1);
    });

    let api = ApiClient::new(cfg.api.base_url.clone(), cfg.api_timeout()).unwrap_or_else(|e| {
        eprintln!("error creating API client: {}", e);
        std::process::exit(1);
    });
    info!("using management API at {}", api.base_url);

    let cfg = Arc::new(cfg);

    // Shutdown signal
    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(());

    let controller =
        DashboardController::new(Navigation::new(cfg.ui_base_url()), cfg.dynamic_config);
    let (dashboard, dashboard_task) = DashboardActor::spawn(controller, Arc::new(api), shutdown_rx);

    let state = AppState {
        dashboard,
        config: cfg.clone(),
    };

    let router = routes::build_router(state);

    let listen_addr = cfg.listen_addr();
    let listener = TcpListener::bind(&listen_addr).await.unwrap_or_else(|e| {
        eprintln!("failed to bind {}: {}", listen_addr, e);
        std::process::exit(1);
    });

    info!("kafka-console listening on {}", listen_addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            let _ = shutdown_tx.send(());
        })
        .await
        .unwrap_or_else(|e| {
            eprintln!("server error: {}", e);
            std::process::exit(1);
        });

    if let Err(e) = dashboard_task.await {
        tracing::error!("dashboard task failed: {}", e);
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to listen for ctrl+c: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut s) => {
                s.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
