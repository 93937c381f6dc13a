//! Raw-to-canonical stats normalization.

use crate::models::{CanonicalMetricSet, RawPlayerStats};

use super::StatsError;

/// Convert a raw upstream record into a canonical metric set.
///
/// Non-finite floats (NaN, ±inf) become 0 so ratio and axis math further
/// down can never leak NaN into a rendered chart. Game-domain validity
/// (negative deaths, a kd_ratio that disagrees with kills/deaths) is
/// enforced upstream and deliberately not re-checked here; the only
/// rejection is a missing player identifier.
pub fn normalize(raw: &RawPlayerStats) -> Result<CanonicalMetricSet, StatsError> {
    if raw.player_id.is_blank() {
        return Err(StatsError::InvalidInput);
    }

    Ok(CanonicalMetricSet {
        kills: finite_or_zero(raw.kills),
        deaths: finite_or_zero(raw.deaths),
        kd_ratio: finite_or_zero(raw.kd_ratio),
        win_rate: finite_or_zero(raw.win_rate),
        damage_dealt: finite_or_zero(raw.damage_dealt),
        survival_time: finite_or_zero(raw.survival_time),
        top1_count: raw.top1_count,
        matches_played: raw.matches_played,
    })
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
