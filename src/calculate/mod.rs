//! Stats aggregation and comparison engine.
//!
//! Pure transformations over already-fetched player stats:
//! - Raw-to-canonical normalization with guaranteed-finite numerics
//! - Multi-player comparison aggregation in selection order
//! - 0-100 axis projection for radar-style comparison
//! - Leaderboard ranking with stable, deterministic ordering
//!
//! Nothing here is async, caches, or holds state; every function is a
//! plain function of its arguments plus an explicit profile.

mod aggregate;
mod normalize;
mod rank;

pub use aggregate::{aggregate, axis_ceilings, normalized_axes, AxisValues};
pub use normalize::normalize;
pub use rank::rank;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::MetricKey;

/// Engine errors.
#[derive(Debug, Error)]
pub enum StatsError {
    /// The one malformation normalization checks for: a missing or
    /// empty player identifier.
    #[error("player identifier is missing or empty")]
    InvalidInput,

    /// One or more entries of a multi-player request could not be
    /// normalized or fetched. A partial comparison is worse than a clear
    /// failure, so the whole aggregation fails, naming every player.
    #[error("could not aggregate stats for player(s): {}", .players.join(", "))]
    Aggregation { players: Vec<String> },

    /// Ranking was requested on a metric outside the rankable set.
    #[error("unsupported ranking metric: {0}")]
    InvalidMetric(MetricKey),
}

/// Static floors for the comparison-axis ceilings.
///
/// An axis ceiling is `max(floor, observed dataset max)`. The floors
/// keep an all-zero or single-player dataset away from divide-by-zero
/// and keep small values readable on the chart. Win rate has no floor
/// entry: it is already bounded, with its ceiling fixed at 100.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizationProfile {
    #[serde(default = "default_kills_floor")]
    pub kills_floor: f64,

    #[serde(default = "default_damage_floor")]
    pub damage_floor: f64,

    #[serde(default = "default_kd_ratio_floor")]
    pub kd_ratio_floor: f64,

    #[serde(default = "default_survival_floor")]
    pub survival_floor: f64,
}

fn default_kills_floor() -> f64 {
    5.0
}

fn default_damage_floor() -> f64 {
    500.0
}

fn default_kd_ratio_floor() -> f64 {
    3.0
}

fn default_survival_floor() -> f64 {
    1500.0
}

impl Default for NormalizationProfile {
    fn default() -> Self {
        Self {
            kills_floor: default_kills_floor(),
            damage_floor: default_damage_floor(),
            kd_ratio_floor: default_kd_ratio_floor(),
            survival_floor: default_survival_floor(),
        }
    }
}

impl NormalizationProfile {
    /// Ceiling floor for an unbounded axis, `None` for already-bounded
    /// win rate and for metrics that are not comparison axes at all.
    pub fn floor(&self, key: MetricKey) -> Option<f64> {
        match key {
            MetricKey::Kills => Some(self.kills_floor),
            MetricKey::DamageDealt => Some(self.damage_floor),
            MetricKey::KdRatio => Some(self.kd_ratio_floor),
            MetricKey::SurvivalTime => Some(self.survival_floor),
            MetricKey::WinRate
            | MetricKey::Deaths
            | MetricKey::Top1Count
            | MetricKey::MatchesPlayed => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_default_floors() {
        let profile = NormalizationProfile::default();
        assert_eq!(profile.floor(MetricKey::Kills), Some(5.0));
        assert_eq!(profile.floor(MetricKey::DamageDealt), Some(500.0));
        assert_eq!(profile.floor(MetricKey::KdRatio), Some(3.0));
        assert_eq!(profile.floor(MetricKey::SurvivalTime), Some(1500.0));
        assert_eq!(profile.floor(MetricKey::WinRate), None);
    }

    #[test]
    fn test_profile_partial_toml_fills_defaults() {
        let profile: NormalizationProfile = toml::from_str("kills_floor = 8.0").unwrap();
        assert_eq!(profile.kills_floor, 8.0);
        assert_eq!(profile.damage_floor, 500.0);
        assert_eq!(profile.survival_floor, 1500.0);
    }
}
