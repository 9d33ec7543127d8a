use super::super::domain::{Budget, LeadSource, ProjectType, Timeline};

/// Weights are tuned so the best answer on every axis sums to exactly this.
pub const MAX_SCORE: u8 = 100;

pub(crate) const fn budget_points(budget: Budget) -> u8 {
    match budget {
        Budget::Above20Lakh => 40,
        Budget::From10To20Lakh => 30,
        Budget::From3To10Lakh => 20,
        Budget::Under3Lakh => 5,
        Budget::Undecided => 0,
    }
}

pub(crate) const fn timeline_points(timeline: Timeline) -> u8 {
    match timeline {
        Timeline::Immediate => 25,
        Timeline::OneToThreeMonths => 20,
        Timeline::ThreeToSixMonths => 10,
        Timeline::Flexible => 5,
    }
}

pub(crate) const fn source_points(source: LeadSource) -> u8 {
    match source {
        LeadSource::Referral => 20,
        LeadSource::ReviewPlatform => 15,
        LeadSource::Social => 10,
        LeadSource::Search => 8,
        LeadSource::Other => 5,
    }
}

pub(crate) const fn project_points(project_type: ProjectType) -> u8 {
    match project_type {
        ProjectType::AiMarketplacePlatform => 15,
        ProjectType::CustomAiSolution => 12,
        ProjectType::WebApplication => 8,
        ProjectType::MobileApplication => 7,
        ProjectType::TechnologyConsulting => 6,
        ProjectType::Other => 5,
    }
}
