use std::sync::atomic::Ordering;
use std::time::Duration;

use axum::extract::{Request, State};
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Extension, Json, Router};
use consultancy::admin::admin_router;
use consultancy::assistant::chatbot_router;
use consultancy::auth::auth_router;
use consultancy::storage::ConnectionGate;
use consultancy::subscriptions::subscription_router;
use consultancy::workflows::leads::{contact_router, ticket_router};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tracing::warn;

use crate::infra::{AppState, Services};

/// Every `/api` route, behind the store gate.
pub(crate) fn api_routes(services: &Services, gate: ConnectionGate) -> Router {
    Router::new()
        .merge(contact_router(services.leads.clone()))
        .merge(ticket_router(services.leads.clone()))
        .merge(services.content.router())
        .merge(subscription_router(services.subscriptions.clone()))
        .merge(auth_router(services.auth.clone()))
        .merge(chatbot_router(services.chatbot.clone()))
        .merge(admin_router(services.dashboard.clone()))
        .layer(Extension(services.tokens.clone()))
        .layer(middleware::from_fn_with_state(gate, require_store))
}

pub(crate) fn build_router(services: &Services, state: AppState, client_url: &str) -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .merge(api_routes(services, state.gate.clone()))
        .layer(cors_layer(client_url))
        .layer(Extension(state))
}

pub(crate) fn cors_layer(client_url: &str) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .max_age(Duration::from_secs(60 * 60));

    match HeaderValue::from_str(client_url.trim_end_matches('/')) {
        Ok(origin) => cors.allow_origin(origin),
        Err(err) => {
            warn!(client_url, error = %err, "CLIENT_URL is not a valid origin; CORS disabled");
            cors
        }
    }
}

pub(crate) async fn require_store(
    State(gate): State<ConnectionGate>,
    request: Request,
    next: Next,
) -> Response {
    if !gate.is_connected() {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "error": "database not connected" })),
        )
            .into_response();
    }
    next.run(request).await
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let listening = state.readiness.load(Ordering::Relaxed);
    let store = state.gate.is_connected();

    if listening && store {
        (StatusCode::OK, Json(json!({ "status": "ready" })))
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "initializing",
                "listener": listening,
                "store": store,
            })),
        )
    }
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use consultancy::config::{
        AppConfig, AppEnvironment, AssistantConfig, AuthConfig, EmailConfig, ServerConfig,
        StorageConfig, TelemetryConfig,
    };
    use consultancy::notifications::RecordingTransport;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn config() -> AppConfig {
        AppConfig {
            environment: AppEnvironment::Test,
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                client_url: "http://localhost:3000".to_string(),
            },
            telemetry: TelemetryConfig {
                log_level: "info".to_string(),
            },
            storage: StorageConfig {
                uri: "memory://".to_string(),
            },
            auth: AuthConfig {
                jwt_secret: "test-secret".to_string(),
                token_ttl_hours: 1,
                bcrypt_rounds: 4,
                seed_admin_email: None,
                seed_admin_password: None,
            },
            email: EmailConfig {
                sendgrid_api_key: None,
                from_address: "hello@consultancy.dev".to_string(),
                admin_address: None,
                client_url: "http://localhost:3000".to_string(),
            },
            assistant: AssistantConfig {
                openai_api_key: None,
                model: "gpt-4o-mini".to_string(),
            },
        }
    }

    fn app(gate: ConnectionGate, listening: bool) -> Router {
        let services =
            Services::with_transport(&config(), Arc::new(RecordingTransport::new()));
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(listening)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
            gate,
        };
        build_router(&services, state, "http://localhost:3000")
    }

    async fn get_status(router: Router, uri: &str) -> StatusCode {
        router
            .oneshot(Request::get(uri).body(Body::empty()).expect("request"))
            .await
            .expect("route executes")
            .status()
    }

    #[tokio::test]
    async fn api_is_gated_until_store_connects() {
        let gate = ConnectionGate::default();
        let router = app(gate.clone(), true);

        assert_eq!(
            get_status(router.clone(), "/api/content/blog").await,
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(get_status(router.clone(), "/health").await, StatusCode::OK);
        assert_eq!(
            get_status(router.clone(), "/ready").await,
            StatusCode::SERVICE_UNAVAILABLE
        );

        gate.mark_connected();
        assert_eq!(
            get_status(router.clone(), "/api/content/blog").await,
            StatusCode::OK
        );
        assert_eq!(get_status(router, "/ready").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn readiness_waits_for_listener() {
        let router = app(ConnectionGate::open(), false);
        assert_eq!(
            get_status(router, "/ready").await,
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[tokio::test]
    async fn admin_routes_reject_anonymous_callers() {
        let router = app(ConnectionGate::open(), true);
        for uri in [
            "/api/tickets",
            "/api/admin/dashboard",
            "/api/admin/subscriptions",
            "/api/admin/leads/export",
            "/api/admin/blog",
            "/api/auth/me",
        ] {
            assert_eq!(
                get_status(router.clone(), uri).await,
                StatusCode::UNAUTHORIZED,
                "{uri}"
            );
        }
    }

    #[tokio::test]
    async fn cors_allows_client_origin() {
        let router = app(ConnectionGate::open(), true);
        let response = router
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/api/contact")
                    .header(header::ORIGIN, "http://localhost:3000")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("route executes");

        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://localhost:3000"
        );
    }
}
