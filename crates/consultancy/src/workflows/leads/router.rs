use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};

use super::domain::{DemoBooking, LeadCategory, LeadId, LeadRecord, LeadStatus};
use super::export::leads_to_csv;
use super::repository::{LeadFilter, LeadRepository};
use super::service::{LeadReceipt, LeadService, LeadUpdate};
use super::validation::{ContactForm, DemoBookingForm};
use crate::auth::{AuthenticatedAdmin, Role};
use crate::error::AppError;
use crate::pagination::{Page, PageRequest};

/// Public intake: the contact form and the demo booking form.
pub fn contact_router<R>(service: Arc<LeadService<R>>) -> Router
where
    R: LeadRepository + 'static,
{
    Router::new()
        .route("/api/contact", post(contact_handler::<R>))
        .route("/api/contact/book-demo", post(book_demo_handler::<R>))
        .with_state(service)
}

/// Admin ticket desk over stored leads.
pub fn ticket_router<R>(service: Arc<LeadService<R>>) -> Router
where
    R: LeadRepository + 'static,
{
    Router::new()
        .route("/api/tickets", get(list_handler::<R>))
        .route(
            "/api/tickets/:lead_id",
            get(detail_handler::<R>).patch(update_handler::<R>),
        )
        .route("/api/tickets/:lead_id/notes", post(note_handler::<R>))
        .route(
            "/api/tickets/:lead_id/follow-ups",
            post(follow_up_handler::<R>),
        )
        .route("/api/admin/leads/export", get(export_handler::<R>))
        .route("/api/admin/demo-bookings", get(demo_bookings_handler::<R>))
        .with_state(service)
}

/// `?status=&category=&page=&limit=`; spelled out because serde's flatten
/// does not cooperate with urlencoded numbers.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct TicketQuery {
    pub status: Option<LeadStatus>,
    pub category: Option<LeadCategory>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl TicketQuery {
    fn filter(&self) -> LeadFilter {
        LeadFilter {
            status: self.status,
            category: self.category,
        }
    }

    fn page_request(&self) -> PageRequest {
        PageRequest {
            page: self.page,
            limit: self.limit,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NoteRequest {
    pub body: Option<String>,
}

pub(crate) async fn contact_handler<R>(
    State(service): State<Arc<LeadService<R>>>,
    payload: Result<Json<ContactForm>, JsonRejection>,
) -> Result<Json<LeadReceipt>, AppError>
where
    R: LeadRepository + 'static,
{
    let Json(form) = payload?;
    let submitted = service.submit(&form)?;
    Ok(Json(LeadReceipt::for_record(&submitted.record)))
}

pub(crate) async fn book_demo_handler<R>(
    State(service): State<Arc<LeadService<R>>>,
    payload: Result<Json<DemoBookingForm>, JsonRejection>,
) -> Result<Json<Value>, AppError>
where
    R: LeadRepository + 'static,
{
    let Json(form) = payload?;
    let submitted = service.book_demo(&form)?;
    Ok(Json(json!({
        "success": true,
        "message": "Your demo request has been received.",
        "bookingId": submitted.record.id,
    })))
}

pub(crate) async fn list_handler<R>(
    State(service): State<Arc<LeadService<R>>>,
    admin: AuthenticatedAdmin,
    query: Result<Query<TicketQuery>, QueryRejection>,
) -> Result<Json<Page<LeadRecord>>, AppError>
where
    R: LeadRepository + 'static,
{
    admin.require(Role::Admin)?;
    let Query(query) = query?;
    Ok(Json(service.list(&query.filter(), query.page_request())?))
}

pub(crate) async fn detail_handler<R>(
    State(service): State<Arc<LeadService<R>>>,
    admin: AuthenticatedAdmin,
    Path(lead_id): Path<String>,
) -> Result<Json<LeadRecord>, AppError>
where
    R: LeadRepository + 'static,
{
    admin.require(Role::Admin)?;
    Ok(Json(service.get(&LeadId(lead_id))?))
}

pub(crate) async fn update_handler<R>(
    State(service): State<Arc<LeadService<R>>>,
    admin: AuthenticatedAdmin,
    Path(lead_id): Path<String>,
    payload: Result<Json<LeadUpdate>, JsonRejection>,
) -> Result<Json<LeadRecord>, AppError>
where
    R: LeadRepository + 'static,
{
    admin.require(Role::Admin)?;
    let Json(update) = payload?;
    Ok(Json(service.update(&LeadId(lead_id), update)?))
}

pub(crate) async fn note_handler<R>(
    State(service): State<Arc<LeadService<R>>>,
    admin: AuthenticatedAdmin,
    Path(lead_id): Path<String>,
    payload: Result<Json<NoteRequest>, JsonRejection>,
) -> Result<Json<LeadRecord>, AppError>
where
    R: LeadRepository + 'static,
{
    admin.require(Role::Admin)?;
    let Json(note) = payload?;
    let body = note.body.unwrap_or_default();
    Ok(Json(service.add_note(
        &LeadId(lead_id),
        admin.author(),
        &body,
    )?))
}

pub(crate) async fn follow_up_handler<R>(
    State(service): State<Arc<LeadService<R>>>,
    admin: AuthenticatedAdmin,
    Path(lead_id): Path<String>,
) -> Result<Json<LeadRecord>, AppError>
where
    R: LeadRepository + 'static,
{
    admin.require(Role::Admin)?;
    Ok(Json(service.record_follow_up(&LeadId(lead_id), Utc::now())?))
}

pub(crate) async fn export_handler<R>(
    State(service): State<Arc<LeadService<R>>>,
    admin: AuthenticatedAdmin,
    query: Result<Query<LeadFilter>, QueryRejection>,
) -> Result<Response, AppError>
where
    R: LeadRepository + 'static,
{
    admin.require(Role::Admin)?;
    let Query(filter) = query?;
    let records = service.repository().list(&filter)?;
    let csv = leads_to_csv(&records).map_err(|err| AppError::Internal(err.to_string()))?;
    let filename = format!("leads-{}.csv", Utc::now().format("%Y%m%d"));

    Ok((
        [
            (CONTENT_TYPE, mime::TEXT_CSV_UTF_8.to_string()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        csv,
    )
        .into_response())
}

pub(crate) async fn demo_bookings_handler<R>(
    State(service): State<Arc<LeadService<R>>>,
    admin: AuthenticatedAdmin,
) -> Result<Json<Vec<DemoBooking>>, AppError>
where
    R: LeadRepository + 'static,
{
    admin.require(Role::Admin)?;
    Ok(Json(service.demo_bookings()?))
}
