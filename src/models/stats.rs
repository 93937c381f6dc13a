//! Player statistics models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{MetricKey, Mode, Period, PlayerId, Shard, StatsContext};

/// Raw per-player statistics as supplied by the upstream stats API for
/// one (player, period, mode, shard) tuple.
///
/// Per-match averages for kills/deaths/damage/survival; `kd_ratio` and
/// `win_rate` come pre-computed upstream and are treated as authoritative
/// (the upstream smooths zero-death K/D its own way — recomputing here
/// would make this view disagree with every other consumer).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPlayerStats {
    pub player_id: PlayerId,
    pub period: Period,
    pub mode: Mode,
    pub shard: Shard,

    /// Average kills per match.
    #[serde(default)]
    pub kills: f64,

    /// Average deaths per match.
    #[serde(default)]
    pub deaths: f64,

    /// Pre-computed kills/deaths ratio.
    #[serde(default)]
    pub kd_ratio: f64,

    /// Win rate as a fraction in [0, 1].
    #[serde(default)]
    pub win_rate: f64,

    /// Average damage dealt per match.
    #[serde(default)]
    pub damage_dealt: f64,

    /// Average survival time per match, in seconds.
    #[serde(default)]
    pub survival_time: f64,

    /// Number of first-place finishes.
    #[serde(default)]
    pub top1_count: u32,

    /// Number of matches in the period.
    #[serde(default)]
    pub matches_played: u32,

    pub computed_at: DateTime<Utc>,
}

/// A player's metrics after normalization: every float is finite, and
/// the key vocabulary is fixed to [`MetricKey`].
///
/// Win rate stays a fraction in [0, 1]; converting to a percentage for
/// display is the caller's job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalMetricSet {
    pub kills: f64,
    pub deaths: f64,
    pub kd_ratio: f64,
    pub win_rate: f64,
    pub damage_dealt: f64,
    pub survival_time: f64,
    pub top1_count: u32,
    pub matches_played: u32,
}

impl CanonicalMetricSet {
    /// Look up a metric by key.
    ///
    /// Counting metrics are widened to f64 so sorting and axis math
    /// treat every metric uniformly.
    pub fn metric(&self, key: MetricKey) -> f64 {
        match key {
            MetricKey::Kills => self.kills,
            MetricKey::Deaths => self.deaths,
            MetricKey::KdRatio => self.kd_ratio,
            MetricKey::WinRate => self.win_rate,
            MetricKey::DamageDealt => self.damage_dealt,
            MetricKey::SurvivalTime => self.survival_time,
            MetricKey::Top1Count => f64::from(self.top1_count),
            MetricKey::MatchesPlayed => f64::from(self.matches_played),
        }
    }
}

/// One player's row in a comparison dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonEntry {
    pub player_id: PlayerId,
    pub display_name: String,
    pub metrics: CanonicalMetricSet,
}

/// An ordered multi-player comparison, plus the context it was computed
/// under.
///
/// Entry order is the caller's selection order; it is only reordered by
/// an explicit ranking request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonDataset {
    pub context: StatsContext,
    pub entries: Vec<ComparisonEntry>,
}

impl ComparisonDataset {
    pub fn new(context: StatsContext, entries: Vec<ComparisonEntry>) -> Self {
        Self { context, entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Get an entry by player id.
    pub fn get(&self, player_id: &PlayerId) -> Option<&ComparisonEntry> {
        self.entries.iter().find(|e| &e.player_id == player_id)
    }
}

/// A leaderboard row: display position, not competition ranking — equal
/// metric values get distinct, consecutive ranks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntry {
    /// 1-based, contiguous.
    pub rank: u32,
    pub entry: ComparisonEntry,
}
