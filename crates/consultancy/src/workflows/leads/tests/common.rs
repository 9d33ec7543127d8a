use std::sync::Arc;

use axum::response::Response;
use axum::{Extension, Router};
use chrono::{Duration, Utc};
use serde_json::Value;

use crate::auth::{AdminAccount, Role, TokenAuthority};
use crate::notifications::{DispatchSettings, NotificationDispatcher, RecordingTransport};
use crate::storage::RepositoryError;
use crate::workflows::leads::{
    contact_router, ticket_router, ContactForm, DemoBooking, LeadFilter, LeadId, LeadRecord,
    LeadRepository, LeadService, MemoryLeadRepository,
};

pub(super) const ADMIN_ADDRESS: &str = "ops@consultancy.dev";

pub(super) fn dispatcher(transport: Arc<RecordingTransport>) -> NotificationDispatcher {
    NotificationDispatcher::new(
        transport,
        DispatchSettings {
            from_address: "hello@consultancy.dev".to_string(),
            admin_address: Some(ADMIN_ADDRESS.to_string()),
            client_url: "http://localhost:3000".to_string(),
        },
    )
}

pub(super) fn build_service() -> (
    LeadService<MemoryLeadRepository>,
    Arc<MemoryLeadRepository>,
    Arc<RecordingTransport>,
) {
    let repository = Arc::new(MemoryLeadRepository::default());
    let transport = Arc::new(RecordingTransport::new());
    let service = LeadService::new(repository.clone(), dispatcher(transport.clone()));
    (service, repository, transport)
}

/// Scores 100: every axis at its best answer.
pub(super) fn hot_form() -> ContactForm {
    ContactForm {
        name: Some("Priya Sharma".to_string()),
        email: Some("Priya@Example.com".to_string()),
        company: Some("Acme Ventures".to_string()),
        phone: Some("+91 98765 43210".to_string()),
        project_type: Some("AI Marketplace Platform".to_string()),
        budget: Some("₹20L+".to_string()),
        timeline: Some("ASAP (< 1 month)".to_string()),
        description: Some("We need a marketplace for AI agents.".to_string()),
        source: Some("Referral".to_string()),
        subject: None,
        message: None,
        submitted_at: Some("2026-01-15T10:00:00Z".to_string()),
    }
}

/// Scores exactly 20: 0 + 5 + 8 + 7.
pub(super) fn cold_boundary_form() -> ContactForm {
    ContactForm {
        project_type: Some("Mobile Application".to_string()),
        budget: Some("Not Sure Yet".to_string()),
        timeline: Some("Flexible".to_string()),
        source: Some("Google Search".to_string()),
        ..hot_form()
    }
}

pub(super) struct AuthFixture {
    pub authority: Arc<TokenAuthority>,
}

impl AuthFixture {
    pub(super) fn new() -> Self {
        Self {
            authority: Arc::new(TokenAuthority::new("test-secret", Duration::hours(1))),
        }
    }

    pub(super) fn bearer(&self, role: Role) -> String {
        let account = AdminAccount {
            id: format!("admin-{}", role.label()),
            email: format!("{}@consultancy.dev", role.label()),
            name: format!("Test {}", role.label()),
            role,
            password_hash: String::new(),
            created_at: Utc::now(),
        };
        let issued = self.authority.issue(&account).expect("token issues");
        format!("Bearer {}", issued.token)
    }
}

pub(super) fn lead_router(
    service: Arc<LeadService<MemoryLeadRepository>>,
    auth: &AuthFixture,
) -> Router {
    contact_router(service.clone())
        .merge(ticket_router(service))
        .layer(Extension(auth.authority.clone()))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("valid json")
}

/// Every write fails as if the store dropped away.
pub(super) struct UnavailableRepository;

impl LeadRepository for UnavailableRepository {
    fn insert(&self, _record: LeadRecord) -> Result<LeadRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn fetch(&self, _id: &LeadId) -> Result<Option<LeadRecord>, RepositoryError> {
        Ok(None)
    }

    fn modify<E, F>(&self, _id: &LeadId, _apply: F) -> Result<LeadRecord, E>
    where
        E: From<RepositoryError>,
        F: FnOnce(&mut LeadRecord) -> Result<(), E>,
    {
        Err(RepositoryError::Unavailable("store offline".to_string()).into())
    }

    fn list(&self, _filter: &LeadFilter) -> Result<Vec<LeadRecord>, RepositoryError> {
        Ok(Vec::new())
    }

    fn insert_demo(&self, _booking: DemoBooking) -> Result<DemoBooking, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn demo_bookings(&self) -> Result<Vec<DemoBooking>, RepositoryError> {
        Ok(Vec::new())
    }
}
