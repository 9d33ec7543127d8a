use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Request, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use tower::ServiceExt;

use super::common::*;
use crate::auth::Role;
use crate::workflows::leads::router::contact_handler;
use crate::workflows::leads::{LeadRepository, LeadStatus, MemoryLeadRepository};

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

#[tokio::test]
async fn contact_handler_returns_receipt() {
    let (service, _, _) = build_service();

    let response = contact_handler::<MemoryLeadRepository>(
        State(Arc::new(service)),
        Ok(Json(hot_form())),
    )
    .await
    .into_response();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["leadCategory"], "HOT");
    assert_eq!(body["leadScore"], 100);
    assert!(body["leadId"].as_str().is_some_and(|id| id.starts_with("lead-")));
}

#[tokio::test]
async fn contact_route_rejects_invalid_payload_without_storing() {
    let (service, repository, _) = build_service();
    let router = lead_router(Arc::new(service), &AuthFixture::new());

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/contact",
            json!({ "name": "P", "email": "nope" }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json_body(response).await;
    assert_eq!(body["error"], "Validation failed");
    assert!(body["details"]
        .as_array()
        .is_some_and(|details| details.iter().any(|d| d["field"] == "email")));
    assert!(repository
        .list(&Default::default())
        .expect("list")
        .is_empty());
}

#[tokio::test]
async fn contact_route_surfaces_storage_failure_as_500() {
    let transport = Arc::new(crate::notifications::RecordingTransport::new());
    let service = crate::workflows::leads::LeadService::new(
        Arc::new(UnavailableRepository),
        dispatcher(transport),
    );

    let response = contact_handler(State(Arc::new(service)), Ok(Json(hot_form())))
        .await
        .into_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn contact_route_scores_boundary_lead_as_cold() {
    let (service, repository, _) = build_service();
    let router = lead_router(Arc::new(service), &AuthFixture::new());

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/contact",
            json!({
                "name": "Meera Iyer",
                "email": "meera@example.com",
                "company": "Iyer Studio",
                "phone": "+91 99887 66554",
                "projectType": "Other",
                "budget": "Under ₹3L",
                "timeline": "Flexible",
                "source": "Other",
                "description": "Exploring a small internal tool.",
                "submittedAt": "2026-01-15T10:00:00Z"
            }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["leadScore"], 20);
    assert_eq!(body["leadCategory"], "COLD");
    let stored = repository.list(&Default::default()).expect("list");
    assert_eq!(stored[0].lead_priority, stored[0].lead_category);
}

#[tokio::test]
async fn book_demo_route_returns_booking_id() {
    let (service, repository, _) = build_service();
    let router = lead_router(Arc::new(service), &AuthFixture::new());

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/contact/book-demo",
            json!({ "name": "Arjun", "email": "arjun@example.com", "preferredDate": "next Tuesday" }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert!(body["bookingId"].as_str().is_some_and(|id| id.starts_with("demo-")));
    assert_eq!(repository.demo_bookings().expect("list").len(), 1);
}

#[tokio::test]
async fn ticket_routes_require_admin_token() {
    let (service, _, _) = build_service();
    let auth = AuthFixture::new();
    let router = lead_router(Arc::new(service), &auth);

    let anonymous = router
        .clone()
        .oneshot(
            Request::get("/api/tickets")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);

    let editor = router
        .oneshot(
            Request::get("/api/tickets")
                .header(AUTHORIZATION, auth.bearer(Role::Editor))
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");
    assert_eq!(editor.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn ticket_lifecycle_over_http() {
    let (service, _, _) = build_service();
    let service = Arc::new(service);
    let auth = AuthFixture::new();
    let router = lead_router(service.clone(), &auth);
    let token = auth.bearer(Role::Admin);

    let lead = service.submit(&hot_form()).expect("submitted").record;
    service.submit(&cold_boundary_form()).expect("submitted");

    let listing = router
        .clone()
        .oneshot(
            Request::get("/api/tickets?category=HOT&page=1&limit=5")
                .header(AUTHORIZATION, &token)
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");
    assert_eq!(listing.status(), StatusCode::OK);
    let listing = read_json_body(listing).await;
    assert_eq!(listing["total"], 1);
    assert_eq!(listing["items"][0]["id"], lead.id.0.as_str());

    let mut note = json_request(
        "POST",
        &format!("/api/tickets/{}/notes", lead.id.0),
        json!({ "body": "Spoke with the CTO" }),
    );
    note.headers_mut()
        .insert(AUTHORIZATION, token.parse().expect("header value"));
    let noted = router.clone().oneshot(note).await.expect("route executes");
    assert_eq!(noted.status(), StatusCode::OK);
    let noted = read_json_body(noted).await;
    assert_eq!(noted["notes"][0]["author"], "Test admin");

    let mut follow_up = Request::post(format!("/api/tickets/{}/follow-ups", lead.id.0))
        .body(Body::empty())
        .expect("request builds");
    follow_up
        .headers_mut()
        .insert(AUTHORIZATION, token.parse().expect("header value"));
    let followed = router
        .clone()
        .oneshot(follow_up)
        .await
        .expect("route executes");
    let followed = read_json_body(followed).await;
    assert_eq!(followed["followUpCount"], 1);
    assert_eq!(followed["status"], LeadStatus::InProgress.label());

    let mut regress = json_request(
        "PATCH",
        &format!("/api/tickets/{}", lead.id.0),
        json!({ "status": "new" }),
    );
    regress
        .headers_mut()
        .insert(AUTHORIZATION, token.parse().expect("header value"));
    let regressed = router.oneshot(regress).await.expect("route executes");
    assert_eq!(regressed.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn export_route_streams_csv() {
    let (service, _, _) = build_service();
    let service = Arc::new(service);
    let auth = AuthFixture::new();
    let router = lead_router(service.clone(), &auth);
    service.submit(&hot_form()).expect("submitted");

    let response = router
        .oneshot(
            Request::get("/api/admin/leads/export")
                .header(AUTHORIZATION, auth.bearer(Role::Admin))
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[CONTENT_TYPE],
        mime::TEXT_CSV_UTF_8.as_ref()
    );
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    let text = String::from_utf8(bytes.to_vec()).expect("utf8");
    let mut lines = text.lines();
    assert!(lines.next().is_some_and(|header| header.starts_with("id,submittedAt,name")));
    assert!(lines.next().is_some_and(|row| row.contains("priya@example.com")));
}
