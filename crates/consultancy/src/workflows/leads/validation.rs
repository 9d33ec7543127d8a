use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{Budget, ContactSubmission, LeadSource, ProjectType, Timeline};
use crate::validation::{self, ValidationErrors};

/// Raw contact form body. Every field is optional so that missing or
/// malformed values surface as field-level details instead of a
/// deserializer rejection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub company: Option<String>,
    pub phone: Option<String>,
    pub project_type: Option<String>,
    pub budget: Option<String>,
    pub timeline: Option<String>,
    pub description: Option<String>,
    pub source: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
    pub submitted_at: Option<String>,
}

/// Raw book-demo body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoBookingForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub company: Option<String>,
    pub preferred_date: Option<String>,
    pub message: Option<String>,
}

/// Demo booking fields after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoRequest {
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub preferred_date: Option<String>,
    pub message: Option<String>,
}

/// Checks shape, length, and enum membership of the contact form.
pub fn validate_contact(form: &ContactForm) -> Result<ContactSubmission, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let name = validation::required_text(&mut errors, "name", form.name.as_deref(), 2, 100);
    let email = validation::email(&mut errors, "email", form.email.as_deref());
    let company =
        validation::required_text(&mut errors, "company", form.company.as_deref(), 1, 100);
    let phone = validation::phone(&mut errors, "phone", form.phone.as_deref());
    let project_type = validation::one_of(
        &mut errors,
        "projectType",
        form.project_type.as_deref(),
        &ProjectType::ALL,
        ProjectType::label,
    );
    let budget = validation::one_of(
        &mut errors,
        "budget",
        form.budget.as_deref(),
        &Budget::ALL,
        Budget::label,
    );
    let timeline = validation::one_of(
        &mut errors,
        "timeline",
        form.timeline.as_deref(),
        &Timeline::ALL,
        Timeline::label,
    );
    let source = validation::one_of(
        &mut errors,
        "source",
        form.source.as_deref(),
        &LeadSource::ALL,
        LeadSource::label,
    );
    let description = validation::required_text(
        &mut errors,
        "description",
        form.description.as_deref(),
        10,
        2000,
    );
    let subject = validation::optional_text(&mut errors, "subject", form.subject.as_deref(), 200);
    let message = validation::optional_text(&mut errors, "message", form.message.as_deref(), 5000);
    let submitted_at = parse_submitted_at(&mut errors, form.submitted_at.as_deref());

    match (project_type, budget, timeline, source, submitted_at) {
        (Some(project_type), Some(budget), Some(timeline), Some(source), Some(submitted_at))
            if errors.is_empty() =>
        {
            Ok(ContactSubmission {
                name,
                email,
                company,
                phone,
                project_type,
                budget,
                timeline,
                source,
                description,
                subject,
                message,
                submitted_at,
            })
        }
        _ => Err(errors),
    }
}

fn parse_submitted_at(errors: &mut ValidationErrors, raw: Option<&str>) -> Option<DateTime<Utc>> {
    let raw = raw.map(str::trim).unwrap_or_default();
    if raw.is_empty() {
        errors.push("submittedAt", "submittedAt is required");
        return None;
    }

    match DateTime::parse_from_rfc3339(raw) {
        Ok(timestamp) => Some(timestamp.with_timezone(&Utc)),
        Err(_) => {
            errors.push("submittedAt", "submittedAt must be an RFC 3339 timestamp");
            None
        }
    }
}

pub fn validate_demo_booking(form: &DemoBookingForm) -> Result<DemoRequest, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let name = validation::required_text(&mut errors, "name", form.name.as_deref(), 2, 100);
    let email = validation::email(&mut errors, "email", form.email.as_deref());
    let company = validation::optional_text(&mut errors, "company", form.company.as_deref(), 100);
    let preferred_date = validation::optional_text(
        &mut errors,
        "preferredDate",
        form.preferred_date.as_deref(),
        100,
    );
    let message = validation::optional_text(&mut errors, "message", form.message.as_deref(), 2000);

    errors.finish(|| DemoRequest {
        name,
        email,
        company,
        preferred_date,
        message,
    })
}
