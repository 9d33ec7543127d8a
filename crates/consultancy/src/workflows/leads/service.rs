use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tracing::info;
use uuid::Uuid;

use super::domain::{DemoBooking, LeadCategory, LeadId, LeadNote, LeadRecord, LeadStatus};
use super::repository::{LeadFilter, LeadRepository};
use super::scoring::{LeadScorer, MAX_SCORE};
use super::validation::{validate_contact, validate_demo_booking, ContactForm, DemoBookingForm};
use crate::notifications::{DispatchReport, NotificationDispatcher};
use crate::pagination::{Page, PageRequest};
use crate::storage::RepositoryError;
use crate::validation::ValidationErrors;

/// A persisted record plus the detached notification task. Dropping the
/// handle leaves the sends running.
#[derive(Debug)]
pub struct Submitted<T> {
    pub record: T,
    pub notification: JoinHandle<DispatchReport>,
}

/// Admin edits to a lead. Omitted fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadUpdate {
    pub status: Option<LeadStatus>,
    pub lead_score: Option<u8>,
    pub lead_category: Option<LeadCategory>,
}

/// Body returned to the contact form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadReceipt {
    pub success: bool,
    pub message: &'static str,
    pub lead_id: LeadId,
    pub lead_category: LeadCategory,
    pub lead_score: u8,
}

impl LeadReceipt {
    pub fn for_record(record: &LeadRecord) -> Self {
        Self {
            success: true,
            message: "Thank you! We'll be in touch soon.",
            lead_id: record.id.clone(),
            lead_category: record.lead_category,
            lead_score: record.lead_score,
        }
    }
}

/// Service composing validation, scoring, storage, and notification dispatch.
pub struct LeadService<R> {
    repository: Arc<R>,
    dispatcher: NotificationDispatcher,
    scorer: LeadScorer,
}

impl<R> LeadService<R>
where
    R: LeadRepository + 'static,
{
    pub fn new(repository: Arc<R>, dispatcher: NotificationDispatcher) -> Self {
        Self {
            repository,
            dispatcher,
            scorer: LeadScorer,
        }
    }

    pub fn repository(&self) -> &Arc<R> {
        &self.repository
    }

    /// Validate, score, persist, then hand off notifications. Validation and
    /// storage failures abort before anything is sent.
    pub fn submit(&self, form: &ContactForm) -> Result<Submitted<LeadRecord>, LeadServiceError> {
        let submission = validate_contact(form)?;
        let score = self.scorer.score(&submission.scoring_input());
        let now = Utc::now();

        let mut record = LeadRecord {
            id: LeadId::generate(),
            name: submission.name,
            email: submission.email,
            company: submission.company,
            phone: submission.phone,
            project_type: submission.project_type,
            budget: submission.budget,
            timeline: submission.timeline,
            source: submission.source,
            description: submission.description,
            subject: submission.subject,
            message: submission.message,
            submitted_at: submission.submitted_at,
            created_at: now,
            updated_at: now,
            lead_score: 0,
            lead_category: LeadCategory::Unfit,
            lead_priority: LeadCategory::Unfit,
            status: LeadStatus::New,
            follow_up_count: 0,
            last_follow_up_date: None,
            notes: Vec::new(),
        };
        record.classify(score.score, score.category);

        let stored = self.repository.insert(record)?;
        info!(
            lead_id = %stored.id.0,
            lead_score = stored.lead_score,
            lead_category = stored.lead_category.label(),
            "lead captured"
        );

        let notification = self.dispatcher.lead_received(&stored);
        Ok(Submitted {
            record: stored,
            notification,
        })
    }

    pub fn book_demo(
        &self,
        form: &DemoBookingForm,
    ) -> Result<Submitted<DemoBooking>, LeadServiceError> {
        let request = validate_demo_booking(form)?;
        let booking = DemoBooking {
            id: format!("demo-{}", Uuid::new_v4()),
            name: request.name,
            email: request.email,
            company: request.company,
            preferred_date: request.preferred_date,
            message: request.message,
            created_at: Utc::now(),
        };

        let stored = self.repository.insert_demo(booking)?;
        info!(booking_id = %stored.id, "demo booking captured");

        let notification = self.dispatcher.demo_booked(&stored);
        Ok(Submitted {
            record: stored,
            notification,
        })
    }

    pub fn list(
        &self,
        filter: &LeadFilter,
        page: PageRequest,
    ) -> Result<Page<LeadRecord>, LeadServiceError> {
        let records = self.repository.list(filter)?;
        Ok(Page::slice(records, page))
    }

    pub fn get(&self, id: &LeadId) -> Result<LeadRecord, LeadServiceError> {
        let record = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    /// Applies an admin edit. Status may only move forward; a manual score
    /// re-derives the category unless one is supplied alongside it.
    pub fn update(&self, id: &LeadId, update: LeadUpdate) -> Result<LeadRecord, LeadServiceError> {
        if update.lead_score.is_some_and(|score| score > MAX_SCORE) {
            return Err(ValidationErrors::single(
                "leadScore",
                format!("leadScore must be between 0 and {MAX_SCORE}"),
            )
            .into());
        }

        let record = self.repository.modify(id, |record| {
            if let Some(status) = update.status {
                if !record.status.can_advance_to(status) {
                    return Err(LeadServiceError::StatusRegression {
                        from: record.status,
                        to: status,
                    });
                }
                record.status = status;
            }

            match (update.lead_score, update.lead_category) {
                (Some(score), Some(category)) => record.classify(score, category),
                (Some(score), None) => record.classify(score, LeadCategory::for_score(score)),
                (None, Some(category)) => record.classify(record.lead_score, category),
                (None, None) => {}
            }

            record.updated_at = Utc::now();
            Ok(())
        })?;

        info!(
            lead_id = %record.id.0,
            status = record.status.label(),
            lead_category = record.lead_category.label(),
            "lead updated"
        );
        Ok(record)
    }

    pub fn add_note(
        &self,
        id: &LeadId,
        author: &str,
        body: &str,
    ) -> Result<LeadRecord, LeadServiceError> {
        let body = body.trim();
        if body.is_empty() {
            return Err(ValidationErrors::single("body", "body is required").into());
        }
        if body.chars().count() > 2000 {
            return Err(
                ValidationErrors::single("body", "body must be at most 2000 characters").into(),
            );
        }

        self.repository.modify(id, |record| {
            let now = Utc::now();
            record.notes.push(LeadNote {
                author: author.to_string(),
                body: body.to_string(),
                created_at: now,
            });
            record.updated_at = now;
            Ok::<(), LeadServiceError>(())
        })
    }

    /// Counts an outreach attempt; a `new` lead becomes `in-progress`.
    pub fn record_follow_up(
        &self,
        id: &LeadId,
        at: DateTime<Utc>,
    ) -> Result<LeadRecord, LeadServiceError> {
        self.repository.modify(id, |record| {
            record.follow_up_count = record.follow_up_count.saturating_add(1);
            record.last_follow_up_date = Some(at);
            if record.status == LeadStatus::New {
                record.status = LeadStatus::InProgress;
            }
            record.updated_at = at;
            Ok::<(), LeadServiceError>(())
        })
    }

    pub fn demo_bookings(&self) -> Result<Vec<DemoBooking>, LeadServiceError> {
        Ok(self.repository.demo_bookings()?)
    }
}

/// Error raised by the lead service.
#[derive(Debug, thiserror::Error)]
pub enum LeadServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("status cannot move from {} back to {}", .from.label(), .to.label())]
    StatusRegression { from: LeadStatus, to: LeadStatus },
}
