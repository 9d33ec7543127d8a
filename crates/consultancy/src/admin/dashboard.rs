use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::content::{CollectionStats, ContentCounts};
use crate::error::AppError;
use crate::subscriptions::SubscriptionService;
use crate::workflows::leads::{
    LeadCategory, LeadFilter, LeadId, LeadRecord, LeadRepository, LeadStatus,
};

const RECENT_LEADS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentLead {
    pub id: LeadId,
    pub name: String,
    pub company: String,
    pub lead_score: u8,
    pub lead_category: LeadCategory,
    pub status: LeadStatus,
    pub created_at: DateTime<Utc>,
}

impl From<&LeadRecord> for RecentLead {
    fn from(record: &LeadRecord) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            company: record.company.clone(),
            lead_score: record.lead_score,
            lead_category: record.lead_category,
            status: record.status,
            created_at: record.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_leads: usize,
    pub leads_by_category: BTreeMap<&'static str, usize>,
    pub leads_by_status: BTreeMap<&'static str, usize>,
    pub average_score: f64,
    pub leads_last_7_days: usize,
    pub leads_last_30_days: usize,
    pub active_subscriptions: usize,
    pub demo_bookings: usize,
    pub content: BTreeMap<&'static str, ContentCounts>,
    pub recent_leads: Vec<RecentLead>,
}

pub struct DashboardService {
    leads: Arc<dyn LeadRepository>,
    subscriptions: Arc<SubscriptionService>,
    content: Vec<Arc<dyn CollectionStats>>,
}

impl DashboardService {
    pub fn new(
        leads: Arc<dyn LeadRepository>,
        subscriptions: Arc<SubscriptionService>,
        content: Vec<Arc<dyn CollectionStats>>,
    ) -> Self {
        Self {
            leads,
            subscriptions,
            content,
        }
    }

    pub fn summary(&self, now: DateTime<Utc>) -> Result<DashboardSummary, AppError> {
        let leads = self.leads.list(&LeadFilter::default())?;

        let mut leads_by_category: BTreeMap<&'static str, usize> = LeadCategory::ALL
            .into_iter()
            .map(|category| (category.label(), 0))
            .collect();
        let mut leads_by_status: BTreeMap<&'static str, usize> = LeadStatus::ALL
            .into_iter()
            .map(|status| (status.label(), 0))
            .collect();
        for lead in &leads {
            *leads_by_category
                .entry(lead.lead_category.label())
                .or_default() += 1;
            *leads_by_status.entry(lead.status.label()).or_default() += 1;
        }

        let average_score = if leads.is_empty() {
            0.0
        } else {
            let total: u32 = leads.iter().map(|lead| u32::from(lead.lead_score)).sum();
            let average = f64::from(total) / leads.len() as f64;
            (average * 10.0).round() / 10.0
        };

        let since = |days: i64| {
            let cutoff = now - Duration::days(days);
            leads.iter().filter(|lead| lead.created_at >= cutoff).count()
        };

        let mut content = BTreeMap::new();
        for stats in &self.content {
            content.insert(stats.collection(), stats.counts()?);
        }

        Ok(DashboardSummary {
            total_leads: leads.len(),
            leads_by_category,
            leads_by_status,
            average_score,
            leads_last_7_days: since(7),
            leads_last_30_days: since(30),
            active_subscriptions: self.subscriptions.active_count()?,
            demo_bookings: self.leads.demo_bookings()?.len(),
            content,
            recent_leads: leads.iter().take(RECENT_LEADS).map(RecentLead::from).collect(),
        })
    }
}
