//! Leaderboard ranking.

use crate::models::{ComparisonDataset, MetricKey, RankedEntry, SortDirection};

use super::StatsError;

/// Order a dataset by one metric and assign display ranks.
///
/// The sort is stable, so entries with exactly equal values keep their
/// dataset order in either direction; direction flips a single shared
/// comparator rather than running a second, separately-coded sort, which
/// keeps ascending and descending exact mirrors outside of tie groups.
///
/// Ranks are strictly positional (1, 2, 3, …) even on exact ties. That
/// is the display-position semantic, not competition ranking, and it is
/// intentional.
pub fn rank(
    dataset: &ComparisonDataset,
    metric: MetricKey,
    direction: SortDirection,
) -> Result<Vec<RankedEntry>, StatsError> {
    if !metric.is_rankable() {
        return Err(StatsError::InvalidMetric(metric));
    }

    let mut rows = dataset.entries.clone();
    rows.sort_by(|a, b| {
        // Canonical metrics are finite, so total_cmp is a plain numeric
        // order here; it also keeps the comparator total for the sort.
        let ord = a.metrics.metric(metric).total_cmp(&b.metrics.metric(metric));
        match direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });

    Ok(rows
        .into_iter()
        .zip(1u32..)
        .map(|(entry, rank)| RankedEntry { rank, entry })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculate::aggregate;
    use crate::models::{PlayerId, RawPlayerStats, StatsContext};
    use crate::models::{Mode, Period, Shard};
    use chrono::Utc;

    fn entry(name: &str, kd: f64, kills: f64) -> (PlayerId, String, RawPlayerStats) {
        (
            name.into(),
            name.to_string(),
            RawPlayerStats {
                player_id: name.into(),
                period: Period::Last7d,
                mode: Mode::Squad,
                shard: Shard::Steam,
                kills,
                deaths: 1.0,
                kd_ratio: kd,
                win_rate: 0.1,
                damage_dealt: 300.0,
                survival_time: 1000.0,
                top1_count: 1,
                matches_played: 12,
                computed_at: Utc::now(),
            },
        )
    }

    fn dataset(entries: &[(PlayerId, String, RawPlayerStats)]) -> ComparisonDataset {
        aggregate(StatsContext::default(), entries).unwrap()
    }

    fn order(ranked: &[RankedEntry]) -> Vec<&str> {
        ranked.iter().map(|r| r.entry.display_name.as_str()).collect()
    }

    #[test]
    fn test_rank_descending_by_kd() {
        let ds = dataset(&[entry("B", 1.5, 2.0), entry("A", 3.0, 4.0)]);
        let ranked = rank(&ds, MetricKey::KdRatio, SortDirection::Descending).unwrap();

        assert_eq!(ranked[0].rank, 1);
        assert_eq!(ranked[0].entry.display_name, "A");
        assert_eq!(ranked[1].rank, 2);
        assert_eq!(ranked[1].entry.display_name, "B");
    }

    #[test]
    fn test_rank_ascending_mirrors_descending() {
        let ds = dataset(&[
            entry("a", 1.0, 1.0),
            entry("b", 3.0, 3.0),
            entry("c", 2.0, 2.0),
        ]);

        let asc = rank(&ds, MetricKey::Kills, SortDirection::Ascending).unwrap();
        let desc = rank(&ds, MetricKey::Kills, SortDirection::Descending).unwrap();

        let mut desc_reversed = order(&desc);
        desc_reversed.reverse();
        assert_eq!(order(&asc), desc_reversed);
    }

    #[test]
    fn test_tie_break_preserves_input_order_both_directions() {
        // X and Y tie exactly; Z sits below them.
        let ds = dataset(&[entry("X", 2.0, 5.0), entry("Y", 2.0, 5.0), entry("Z", 1.0, 1.0)]);

        let desc = rank(&ds, MetricKey::KdRatio, SortDirection::Descending).unwrap();
        assert_eq!(order(&desc), vec!["X", "Y", "Z"]);
        assert_eq!(desc[0].rank, 1);
        assert_eq!(desc[1].rank, 2);

        let asc = rank(&ds, MetricKey::KdRatio, SortDirection::Ascending).unwrap();
        // The tie group moves as one block; inside it X still precedes Y.
        assert_eq!(order(&asc), vec!["Z", "X", "Y"]);
    }

    #[test]
    fn test_ties_never_share_a_rank() {
        let ds = dataset(&[entry("X", 2.0, 5.0), entry("Y", 2.0, 5.0)]);
        let ranked = rank(&ds, MetricKey::KdRatio, SortDirection::Descending).unwrap();

        let ranks: Vec<u32> = ranked.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 2]);
    }

    #[test]
    fn test_rank_is_idempotent() {
        let ds = dataset(&[
            entry("a", 2.2, 3.0),
            entry("b", 2.2, 1.0),
            entry("c", 0.4, 9.0),
        ]);

        let first = rank(&ds, MetricKey::KdRatio, SortDirection::Descending).unwrap();
        let second = rank(&ds, MetricKey::KdRatio, SortDirection::Descending).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_rank_empty_dataset_is_empty() {
        let ds = dataset(&[]);
        let ranked = rank(&ds, MetricKey::WinRate, SortDirection::Descending).unwrap();
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_rank_rejects_unrankable_metric() {
        let ds = dataset(&[entry("a", 1.0, 1.0)]);
        let err = rank(&ds, MetricKey::Deaths, SortDirection::Descending).unwrap_err();
        assert!(matches!(err, StatsError::InvalidMetric(MetricKey::Deaths)));

        assert!(rank(&ds, MetricKey::SurvivalTime, SortDirection::Ascending).is_err());
        assert!(rank(&ds, MetricKey::Top1Count, SortDirection::Ascending).is_err());
    }

    #[test]
    fn test_rank_leaves_dataset_untouched() {
        let ds = dataset(&[entry("b", 1.0, 1.0), entry("a", 3.0, 3.0)]);
        let _ = rank(&ds, MetricKey::KdRatio, SortDirection::Descending).unwrap();

        // Selection order survives the ranking call.
        let names: Vec<&str> = ds.entries.iter().map(|e| e.display_name.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn test_rank_every_rankable_metric() {
        let ds = dataset(&[entry("a", 2.0, 4.0), entry("b", 1.0, 6.0)]);
        for key in MetricKey::RANKABLE {
            let ranked = rank(&ds, key, SortDirection::Descending).unwrap();
            assert_eq!(ranked.len(), 2);
            assert_eq!(ranked[0].rank, 1);
        }
    }
}
