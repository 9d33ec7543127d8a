//! Lead intake: validation, scoring, persistence, and ticket handling.

pub mod domain;
pub mod export;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{
    Budget, ContactSubmission, DemoBooking, LeadCategory, LeadId, LeadNote, LeadRecord,
    LeadSource, LeadStatus, ProjectType, ScoringInput, Timeline,
};
pub use export::{leads_to_csv, ExportError};
pub use repository::{LeadFilter, LeadRepository, MemoryLeadRepository};
pub use router::{contact_router, ticket_router, NoteRequest, TicketQuery};
pub use scoring::{LeadScore, LeadScorer, ScoreComponent, ScoringAxis};
pub use service::{LeadReceipt, LeadService, LeadServiceError, LeadUpdate, Submitted};
pub use validation::{validate_contact, validate_demo_booking, ContactForm, DemoBookingForm};
