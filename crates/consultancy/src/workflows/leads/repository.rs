use serde::Deserialize;

use super::domain::{DemoBooking, LeadCategory, LeadId, LeadRecord, LeadStatus};
use crate::storage::{MemoryTable, RepositoryError};

/// Optional narrowing for admin listings and exports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct LeadFilter {
    pub status: Option<LeadStatus>,
    pub category: Option<LeadCategory>,
}

impl LeadFilter {
    pub fn matches(&self, record: &LeadRecord) -> bool {
        self.status.map_or(true, |status| record.status == status)
            && self
                .category
                .map_or(true, |category| record.lead_category == category)
    }
}

/// Storage abstraction so the service module can be exercised in isolation.
pub trait LeadRepository: Send + Sync {
    fn insert(&self, record: LeadRecord) -> Result<LeadRecord, RepositoryError>;
    fn fetch(&self, id: &LeadId) -> Result<Option<LeadRecord>, RepositoryError>;
    /// Applies `apply` to the stored lead atomically and returns the result.
    /// Nothing is written when `apply` fails.
    fn modify<E, F>(&self, id: &LeadId, apply: F) -> Result<LeadRecord, E>
    where
        Self: Sized,
        E: From<RepositoryError>,
        F: FnOnce(&mut LeadRecord) -> Result<(), E>;
    /// Matching leads, newest first.
    fn list(&self, filter: &LeadFilter) -> Result<Vec<LeadRecord>, RepositoryError>;
    fn insert_demo(&self, booking: DemoBooking) -> Result<DemoBooking, RepositoryError>;
    fn demo_bookings(&self) -> Result<Vec<DemoBooking>, RepositoryError>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryLeadRepository {
    leads: MemoryTable<LeadRecord>,
    demos: MemoryTable<DemoBooking>,
}

impl LeadRepository for MemoryLeadRepository {
    fn insert(&self, record: LeadRecord) -> Result<LeadRecord, RepositoryError> {
        self.leads.insert(record)
    }

    fn fetch(&self, id: &LeadId) -> Result<Option<LeadRecord>, RepositoryError> {
        self.leads.get(&id.0)
    }

    fn modify<E, F>(&self, id: &LeadId, apply: F) -> Result<LeadRecord, E>
    where
        E: From<RepositoryError>,
        F: FnOnce(&mut LeadRecord) -> Result<(), E>,
    {
        self.leads.modify(&id.0, apply)
    }

    fn list(&self, filter: &LeadFilter) -> Result<Vec<LeadRecord>, RepositoryError> {
        let mut records = self.leads.filter(|record| filter.matches(record))?;
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }

    fn insert_demo(&self, booking: DemoBooking) -> Result<DemoBooking, RepositoryError> {
        self.demos.insert(booking)
    }

    fn demo_bookings(&self) -> Result<Vec<DemoBooking>, RepositoryError> {
        let mut bookings = self.demos.all()?;
        bookings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(bookings)
    }
}
