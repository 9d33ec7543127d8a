//! Table-driven lead scoring: per-axis points summed, then bucketed.

mod category;
mod weights;

pub use category::{COLD_THRESHOLD, HOT_THRESHOLD, WARM_THRESHOLD};
pub use weights::MAX_SCORE;

use serde::{Deserialize, Serialize};

use super::domain::{LeadCategory, ScoringInput};

/// Axis contributing to the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScoringAxis {
    Budget,
    Timeline,
    Source,
    ProjectType,
}

impl ScoringAxis {
    pub const fn label(self) -> &'static str {
        match self {
            ScoringAxis::Budget => "budget",
            ScoringAxis::Timeline => "timeline",
            ScoringAxis::Source => "source",
            ScoringAxis::ProjectType => "projectType",
        }
    }
}

/// Discrete contribution to a lead score, kept for audits and the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub axis: ScoringAxis,
    pub value: String,
    pub points: u8,
}

/// Scorer output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadScore {
    pub score: u8,
    pub category: LeadCategory,
    pub components: Vec<ScoreComponent>,
}

/// Stateless scorer; the same input always yields the same score.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeadScorer;

impl LeadScorer {
    pub fn score(&self, input: &ScoringInput) -> LeadScore {
        let components = vec![
            ScoreComponent {
                axis: ScoringAxis::Budget,
                value: input.budget.label().to_string(),
                points: weights::budget_points(input.budget),
            },
            ScoreComponent {
                axis: ScoringAxis::Timeline,
                value: input.timeline.label().to_string(),
                points: weights::timeline_points(input.timeline),
            },
            ScoreComponent {
                axis: ScoringAxis::Source,
                value: input.source.label().to_string(),
                points: weights::source_points(input.source),
            },
            ScoreComponent {
                axis: ScoringAxis::ProjectType,
                value: input.project_type.label().to_string(),
                points: weights::project_points(input.project_type),
            },
        ];

        let score = components
            .iter()
            .map(|component| component.points)
            .sum::<u8>()
            .min(MAX_SCORE);

        LeadScore {
            score,
            category: LeadCategory::for_score(score),
            components,
        }
    }
}
