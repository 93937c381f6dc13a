//! The closed metric vocabulary.
//!
//! Every metric the engine knows about is a variant here, and every place
//! that dispatches on a metric matches exhaustively. Adding a metric to
//! the data model without teaching ranking and axis normalization about
//! it fails to compile.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A canonical metric key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKey {
    Kills,
    Deaths,
    KdRatio,
    WinRate,
    DamageDealt,
    SurvivalTime,
    Top1Count,
    MatchesPlayed,
}

impl MetricKey {
    /// Axes of the multi-metric (radar-style) comparison, in display order.
    pub const AXES: [MetricKey; 5] = [
        MetricKey::Kills,
        MetricKey::KdRatio,
        MetricKey::WinRate,
        MetricKey::DamageDealt,
        MetricKey::SurvivalTime,
    ];

    /// Metrics the leaderboard can sort by.
    pub const RANKABLE: [MetricKey; 5] = [
        MetricKey::Kills,
        MetricKey::DamageDealt,
        MetricKey::KdRatio,
        MetricKey::WinRate,
        MetricKey::MatchesPlayed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKey::Kills => "kills",
            MetricKey::Deaths => "deaths",
            MetricKey::KdRatio => "kd_ratio",
            MetricKey::WinRate => "win_rate",
            MetricKey::DamageDealt => "damage_dealt",
            MetricKey::SurvivalTime => "survival_time",
            MetricKey::Top1Count => "top1_count",
            MetricKey::MatchesPlayed => "matches_played",
        }
    }

    /// Whether the leaderboard accepts this key as a sort metric.
    pub fn is_rankable(&self) -> bool {
        Self::RANKABLE.contains(self)
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "kills" => Ok(MetricKey::Kills),
            "deaths" => Ok(MetricKey::Deaths),
            "kd_ratio" => Ok(MetricKey::KdRatio),
            "win_rate" => Ok(MetricKey::WinRate),
            "damage_dealt" => Ok(MetricKey::DamageDealt),
            "survival_time" => Ok(MetricKey::SurvivalTime),
            "top1_count" => Ok(MetricKey::Top1Count),
            "matches_played" => Ok(MetricKey::MatchesPlayed),
            other => Err(format!("unknown metric: {other}")),
        }
    }
}

/// Leaderboard sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl Default for SortDirection {
    fn default() -> Self {
        SortDirection::Descending
    }
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "ascending",
            SortDirection::Descending => "descending",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ascending" | "asc" => Ok(SortDirection::Ascending),
            "descending" | "desc" => Ok(SortDirection::Descending),
            other => Err(format!("unknown sort direction: {other}")),
        }
    }
}
