use crate::cli::ServeArgs;
use crate::infra::{AppState, Services};
use crate::routes::build_router;
use axum_prometheus::PrometheusMetricLayer;
use consultancy::config::{AppConfig, AuthConfig};
use consultancy::error::expose_internal_details;
use consultancy::storage::{connect_with_retry, ConnectionGate, RECONNECT_INTERVAL};
use consultancy::telemetry;
use consultancy::AppError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::signal;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;
    expose_internal_details(config.environment.exposes_error_details());

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let gate = ConnectionGate::default();
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        gate: gate.clone(),
    };

    let services = Services::build(&config);
    seed_admin(&services, &config.auth).await?;

    let store_uri = config.storage.uri.clone();
    tokio::spawn(async move {
        connect_with_retry(&store_uri, &gate, RECONNECT_INTERVAL).await;
    });

    let app = build_router(&services, app_state, &config.server.client_url).layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "consultancy api listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("consultancy api stopped");
    Ok(())
}

async fn seed_admin(services: &Services, auth: &AuthConfig) -> Result<(), AppError> {
    let (Some(email), Some(password)) = (
        auth.seed_admin_email.clone(),
        auth.seed_admin_password.clone(),
    ) else {
        return Ok(());
    };

    let service = services.auth.clone();
    let seeded = tokio::task::spawn_blocking(move || service.seed_admin(&email, &password))
        .await
        .map_err(|err| AppError::Internal(format!("admin seeding task failed: {err}")))?;

    if let Err(err) = seeded {
        warn!(error = %err, "admin account was not seeded");
    }
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!(error = %err, "failed to install ctrl-c handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "failed to install SIGTERM handler");
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

    info!("shutdown signal received");
}
