//! Grouping tags for a stats request.
//!
//! Period, mode, and shard identify which slice of upstream data a stats
//! record was computed over. The engine carries them through untouched;
//! only the API/CLI boundary parses and validates them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Time window a stats record covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Last7d,
    Last30d,
    Last90d,
}

impl Default for Period {
    fn default() -> Self {
        Period::Last7d
    }
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Last7d => "last7d",
            Period::Last30d => "last30d",
            Period::Last90d => "last90d",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "last7d" => Ok(Period::Last7d),
            "last30d" => Ok(Period::Last30d),
            "last90d" => Ok(Period::Last90d),
            other => Err(format!("unknown period: {other}")),
        }
    }
}

/// Match queue mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Solo,
    Duo,
    Squad,
}

impl Default for Mode {
    fn default() -> Self {
        Mode::Squad
    }
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Solo => "solo",
            Mode::Duo => "duo",
            Mode::Squad => "squad",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "solo" => Ok(Mode::Solo),
            "duo" => Ok(Mode::Duo),
            "squad" => Ok(Mode::Squad),
            other => Err(format!("unknown mode: {other}")),
        }
    }
}

/// Platform/region partition of upstream game data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shard {
    Steam,
    Xbox,
    Psn,
    Kakao,
    Stadia,
}

impl Default for Shard {
    fn default() -> Self {
        Shard::Steam
    }
}

impl Shard {
    pub fn as_str(&self) -> &'static str {
        match self {
            Shard::Steam => "steam",
            Shard::Xbox => "xbox",
            Shard::Psn => "psn",
            Shard::Kakao => "kakao",
            Shard::Stadia => "stadia",
        }
    }
}

impl fmt::Display for Shard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Shard {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "steam" => Ok(Shard::Steam),
            "xbox" => Ok(Shard::Xbox),
            "psn" => Ok(Shard::Psn),
            "kakao" => Ok(Shard::Kakao),
            "stadia" => Ok(Shard::Stadia),
            other => Err(format!("unknown shard: {other}")),
        }
    }
}

/// The (period, mode, shard) tuple a comparison was computed under.
///
/// All entries of one dataset share a single context; mixing contexts in
/// one aggregation call is a caller error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatsContext {
    pub period: Period,
    pub mode: Mode,
    pub shard: Shard,
}

impl StatsContext {
    pub fn new(period: Period, mode: Mode, shard: Shard) -> Self {
        Self {
            period,
            mode,
            shard,
        }
    }
}

impl fmt::Display for StatsContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.period, self.mode, self.shard)
    }
}
