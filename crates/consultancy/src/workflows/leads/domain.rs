use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::storage::Record;

/// Identifier wrapper for lead submissions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeadId(pub String);

impl LeadId {
    pub fn generate() -> Self {
        Self(format!("lead-{}", Uuid::new_v4()))
    }
}

/// Kind of engagement the prospect is asking about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectType {
    #[serde(rename = "AI Marketplace Platform")]
    AiMarketplacePlatform,
    #[serde(rename = "Custom AI Solution")]
    CustomAiSolution,
    #[serde(rename = "Web Application")]
    WebApplication,
    #[serde(rename = "Mobile Application")]
    MobileApplication,
    #[serde(rename = "Technology Consulting")]
    TechnologyConsulting,
    #[serde(rename = "Other")]
    Other,
}

impl ProjectType {
    pub const ALL: [Self; 6] = [
        Self::AiMarketplacePlatform,
        Self::CustomAiSolution,
        Self::WebApplication,
        Self::MobileApplication,
        Self::TechnologyConsulting,
        Self::Other,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::AiMarketplacePlatform => "AI Marketplace Platform",
            Self::CustomAiSolution => "Custom AI Solution",
            Self::WebApplication => "Web Application",
            Self::MobileApplication => "Mobile Application",
            Self::TechnologyConsulting => "Technology Consulting",
            Self::Other => "Other",
        }
    }
}

/// Declared budget band, in lakh rupees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Budget {
    #[serde(rename = "₹20L+")]
    Above20Lakh,
    #[serde(rename = "₹10L - ₹20L")]
    From10To20Lakh,
    #[serde(rename = "₹3L - ₹10L")]
    From3To10Lakh,
    #[serde(rename = "Under ₹3L")]
    Under3Lakh,
    #[serde(rename = "Not Sure Yet")]
    Undecided,
}

impl Budget {
    pub const ALL: [Self; 5] = [
        Self::Above20Lakh,
        Self::From10To20Lakh,
        Self::From3To10Lakh,
        Self::Under3Lakh,
        Self::Undecided,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Above20Lakh => "₹20L+",
            Self::From10To20Lakh => "₹10L - ₹20L",
            Self::From3To10Lakh => "₹3L - ₹10L",
            Self::Under3Lakh => "Under ₹3L",
            Self::Undecided => "Not Sure Yet",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeline {
    #[serde(rename = "ASAP (< 1 month)")]
    Immediate,
    #[serde(rename = "1-3 months")]
    OneToThreeMonths,
    #[serde(rename = "3-6 months")]
    ThreeToSixMonths,
    #[serde(rename = "Flexible")]
    Flexible,
}

impl Timeline {
    pub const ALL: [Self; 4] = [
        Self::Immediate,
        Self::OneToThreeMonths,
        Self::ThreeToSixMonths,
        Self::Flexible,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Immediate => "ASAP (< 1 month)",
            Self::OneToThreeMonths => "1-3 months",
            Self::ThreeToSixMonths => "3-6 months",
            Self::Flexible => "Flexible",
        }
    }
}

/// Where the prospect heard about the consultancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeadSource {
    #[serde(rename = "Referral")]
    Referral,
    #[serde(rename = "Clutch")]
    ReviewPlatform,
    #[serde(rename = "LinkedIn")]
    Social,
    #[serde(rename = "Google Search")]
    Search,
    #[serde(rename = "Other")]
    Other,
}

impl LeadSource {
    pub const ALL: [Self; 5] = [
        Self::Referral,
        Self::ReviewPlatform,
        Self::Social,
        Self::Search,
        Self::Other,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Referral => "Referral",
            Self::ReviewPlatform => "Clutch",
            Self::Social => "LinkedIn",
            Self::Search => "Google Search",
            Self::Other => "Other",
        }
    }
}

/// Score bucket. Ordered from most to least promising.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LeadCategory {
    Hot,
    Warm,
    Cold,
    Unfit,
}

impl LeadCategory {
    pub const ALL: [Self; 4] = [Self::Hot, Self::Warm, Self::Cold, Self::Unfit];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Hot => "HOT",
            Self::Warm => "WARM",
            Self::Cold => "COLD",
            Self::Unfit => "UNFIT",
        }
    }
}

/// Admin-driven lifecycle of a lead. Only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LeadStatus {
    New,
    InProgress,
    Responded,
    Resolved,
    Closed,
}

impl LeadStatus {
    pub const ALL: [Self; 5] = [
        Self::New,
        Self::InProgress,
        Self::Responded,
        Self::Resolved,
        Self::Closed,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::InProgress => "in-progress",
            Self::Responded => "responded",
            Self::Resolved => "resolved",
            Self::Closed => "closed",
        }
    }

    /// Re-applying the current status is a no-op, not a regression.
    pub fn can_advance_to(self, next: LeadStatus) -> bool {
        next >= self
    }

    pub fn is_settled(self) -> bool {
        matches!(self, Self::Resolved | Self::Closed)
    }
}

/// The four inputs the scorer looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringInput {
    pub budget: Budget,
    pub timeline: Timeline,
    pub source: LeadSource,
    pub project_type: ProjectType,
}

/// Contact form after validation; every field is typed and trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub company: String,
    pub phone: String,
    pub project_type: ProjectType,
    pub budget: Budget,
    pub timeline: Timeline,
    pub source: LeadSource,
    pub description: String,
    pub subject: Option<String>,
    pub message: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

impl ContactSubmission {
    pub fn scoring_input(&self) -> ScoringInput {
        ScoringInput {
            budget: self.budget,
            timeline: self.timeline,
            source: self.source,
            project_type: self.project_type,
        }
    }
}

/// Append-only admin annotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadNote {
    pub author: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// Persisted lead document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadRecord {
    pub id: LeadId,
    pub name: String,
    pub email: String,
    pub company: String,
    pub phone: String,
    pub project_type: ProjectType,
    pub budget: Budget,
    pub timeline: Timeline,
    pub source: LeadSource,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub submitted_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub lead_score: u8,
    pub lead_category: LeadCategory,
    pub lead_priority: LeadCategory,
    pub status: LeadStatus,
    pub follow_up_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_follow_up_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notes: Vec<LeadNote>,
}

impl LeadRecord {
    pub fn scoring_input(&self) -> ScoringInput {
        ScoringInput {
            budget: self.budget,
            timeline: self.timeline,
            source: self.source,
            project_type: self.project_type,
        }
    }

    /// Sets category and keeps priority in lockstep with it.
    pub fn classify(&mut self, score: u8, category: LeadCategory) {
        self.lead_score = score;
        self.lead_category = category;
        self.lead_priority = category;
    }
}

impl Record for LeadRecord {
    fn record_id(&self) -> &str {
        &self.id.0
    }
}

/// Demo booking captured by the lightweight intake form. Not scored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoBooking {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Record for DemoBooking {
    fn record_id(&self) -> &str {
        &self.id
    }
}
