use super::super::domain::LeadCategory;

pub const HOT_THRESHOLD: u8 = 80;
pub const WARM_THRESHOLD: u8 = 50;
pub const COLD_THRESHOLD: u8 = 20;

impl LeadCategory {
    /// Step function over the score; thresholds are inclusive lower bounds.
    pub const fn for_score(score: u8) -> Self {
        if score >= HOT_THRESHOLD {
            LeadCategory::Hot
        } else if score >= WARM_THRESHOLD {
            LeadCategory::Warm
        } else if score >= COLD_THRESHOLD {
            LeadCategory::Cold
        } else {
            LeadCategory::Unfit
        }
    }
}
