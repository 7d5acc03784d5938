//! Composite score calculation.
//!
//! A rating carries three sub-scores in `[0, 5]`; the stored total is their
//! weighted sum. The weights sum to 1.0, so the total stays in `[0, 5]`.

pub const TRUST_WEIGHT: f64 = 0.40;
pub const ENGAGEMENT_WEIGHT: f64 = 0.35;
pub const EXPERIENCE_WEIGHT: f64 = 0.25;

/// Round to 2 decimal places, half away from zero.
///
/// Used for stored totals and for every aggregate statistic, so a rating's
/// total and the aggregate mean derived from it never disagree on rounding.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn compute_total(trust: f64, engagement: f64, experience: f64) -> f64 {
    round2(TRUST_WEIGHT * trust + ENGAGEMENT_WEIGHT * engagement + EXPERIENCE_WEIGHT * experience)
}
