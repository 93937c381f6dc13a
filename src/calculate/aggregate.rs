//! Multi-player comparison aggregation and axis projection.

use std::collections::BTreeMap;

use crate::models::{
    ComparisonDataset, ComparisonEntry, MetricKey, PlayerId, RawPlayerStats, StatsContext,
};

use super::{normalize, NormalizationProfile, StatsError};

/// Per-axis values keyed by metric.
pub type AxisValues = BTreeMap<MetricKey, f64>;

/// Merge per-player raw stats into one comparison dataset.
///
/// Entries come out in input order — that order is the caller's
/// selection order and is what default displays show before any explicit
/// ranking. An empty input is a valid, empty dataset, not an error. Any
/// entry that fails normalization fails the whole call, naming every
/// offending player.
///
/// The returned dataset owns fresh copies of everything; mutating the
/// caller's inputs afterwards cannot reach into it.
pub fn aggregate(
    context: StatsContext,
    entries: &[(PlayerId, String, RawPlayerStats)],
) -> Result<ComparisonDataset, StatsError> {
    let mut rows = Vec::with_capacity(entries.len());
    let mut failed: Vec<String> = Vec::new();

    for (player_id, display_name, raw) in entries {
        match normalize(raw) {
            Ok(metrics) => rows.push(ComparisonEntry {
                player_id: player_id.clone(),
                display_name: display_name.clone(),
                metrics,
            }),
            // The identifier is the only thing normalization rejects, so
            // fall back to the display name to still point at a player.
            Err(_) => failed.push(if player_id.is_blank() {
                display_name.clone()
            } else {
                player_id.to_string()
            }),
        }
    }

    if !failed.is_empty() {
        return Err(StatsError::Aggregation { players: failed });
    }

    Ok(ComparisonDataset::new(context, rows))
}

/// Resolve the axis ceilings for a dataset.
///
/// Unbounded axes use `max(floor, observed dataset max)`; win rate is
/// fixed at 100. Ceilings are a function of the whole entry set, so they
/// must be recomputed whenever the set changes — never cached per entry.
pub fn axis_ceilings(
    dataset: &ComparisonDataset,
    profile: &NormalizationProfile,
) -> AxisValues {
    let mut ceilings = AxisValues::new();
    for key in MetricKey::AXES {
        let ceiling = match profile.floor(key) {
            Some(floor) => dataset
                .entries
                .iter()
                .map(|e| e.metrics.metric(key))
                .fold(floor, f64::max),
            None => 100.0,
        };
        ceilings.insert(key, ceiling);
    }
    ceilings
}

/// Project every entry onto the 0-100 comparison axes.
///
/// Win rate is a bounded fraction and maps straight to a percentage.
/// Every other axis is scaled by its ceiling and clamped at 100 — the
/// clamp covers a value exceeding a ceiling computed from a stale or
/// partial dataset.
pub fn normalized_axes(
    dataset: &ComparisonDataset,
    profile: &NormalizationProfile,
) -> BTreeMap<PlayerId, AxisValues> {
    let ceilings = axis_ceilings(dataset, profile);

    let mut out = BTreeMap::new();
    for entry in &dataset.entries {
        let mut axes = AxisValues::new();
        for key in MetricKey::AXES {
            let value = match key {
                MetricKey::WinRate => entry.metrics.win_rate * 100.0,
                _ => {
                    let ceiling = ceilings[&key];
                    (entry.metrics.metric(key) / ceiling * 100.0).min(100.0)
                }
            };
            axes.insert(key, value);
        }
        out.insert(entry.player_id.clone(), axes);
    }
    out
}
