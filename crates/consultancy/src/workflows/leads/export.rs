//! CSV rendering of lead records for the admin export.

use super::domain::LeadRecord;

const HEADER: [&str; 16] = [
    "id",
    "submittedAt",
    "name",
    "email",
    "company",
    "phone",
    "projectType",
    "budget",
    "timeline",
    "source",
    "leadScore",
    "leadCategory",
    "status",
    "followUpCount",
    "lastFollowUpDate",
    "description",
];

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write csv row: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to finish csv export: {0}")]
    Flush(String),
}

/// One header row plus one row per lead, in the order given.
pub fn leads_to_csv(records: &[LeadRecord]) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(HEADER)?;

    for record in records {
        let score = record.lead_score.to_string();
        let follow_ups = record.follow_up_count.to_string();
        let submitted_at = record.submitted_at.to_rfc3339();
        let last_follow_up = record
            .last_follow_up_date
            .map(|at| at.to_rfc3339())
            .unwrap_or_default();

        writer.write_record([
            record.id.0.as_str(),
            submitted_at.as_str(),
            record.name.as_str(),
            record.email.as_str(),
            record.company.as_str(),
            record.phone.as_str(),
            record.project_type.label(),
            record.budget.label(),
            record.timeline.label(),
            record.source.label(),
            score.as_str(),
            record.lead_category.label(),
            record.status.label(),
            follow_ups.as_str(),
            last_follow_up.as_str(),
            record.description.as_str(),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|err| ExportError::Flush(err.to_string()))
}
