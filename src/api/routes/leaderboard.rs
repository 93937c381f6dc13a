use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::calculate::rank;
use crate::models::{
    MetricKey, Mode, Period, RankedEntry, Shard, SortDirection, StatsContext,
};

use super::build_dataset;

#[derive(Debug, Deserialize)]
pub struct LeaderboardParams {
    pub players: String,

    #[serde(default)]
    pub period: Period,

    #[serde(default)]
    pub mode: Mode,

    #[serde(default)]
    pub shard: Shard,

    /// Metric to rank by.
    #[serde(default = "default_sort_by")]
    pub sort_by: MetricKey,

    #[serde(default)]
    pub direction: SortDirection,
}

fn default_sort_by() -> MetricKey {
    MetricKey::KdRatio
}

#[derive(Debug, Serialize)]
pub struct LeaderboardResponse {
    pub context: StatsContext,
    pub sort_by: MetricKey,
    pub direction: SortDirection,
    pub rows: Vec<RankedEntry>,
}

// GET /api/leaderboard?players=a,b&sort_by=kd_ratio&direction=descending
pub async fn leaderboard(
    State(state): State<AppState>,
    Query(params): Query<LeaderboardParams>,
) -> Result<Json<LeaderboardResponse>, ApiError> {
    let context = StatsContext::new(params.period, params.mode, params.shard);
    let dataset = build_dataset(&state, &params.players, context).await?;

    let rows = rank(&dataset, params.sort_by, params.direction)?;

    Ok(Json(LeaderboardResponse {
        context: dataset.context,
        sort_by: params.sort_by,
        direction: params.direction,
        rows,
    }))
}

#[cfg(test)]
mod tests {
    use crate::api::build_router;
    use crate::api::state::AppState;
    use crate::calculate::NormalizationProfile;
    use crate::fetch::StaticStatsProvider;
    use crate::models::{Mode, Period, RawPlayerStats, Shard};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use std::sync::Arc;
    use tower::util::ServiceExt;

    fn raw(name: &str, kd: f64) -> RawPlayerStats {
        RawPlayerStats {
            player_id: name.into(),
            period: Period::Last7d,
            mode: Mode::Squad,
            shard: Shard::Steam,
            kills: 4.0,
            deaths: 2.0,
            kd_ratio: kd,
            win_rate: 0.15,
            damage_dealt: 390.0,
            survival_time: 1250.0,
            top1_count: 1,
            matches_played: 18,
            computed_at: chrono::Utc::now(),
        }
    }

    async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, Value) {
        let resp = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
    }

    fn app(provider: StaticStatsProvider) -> axum::Router {
        build_router(AppState::new(
            Arc::new(provider),
            NormalizationProfile::default(),
        ))
    }

    #[tokio::test]
    async fn test_leaderboard_ranks_descending_by_default() {
        let provider = StaticStatsProvider::new()
            .with(raw("B", 1.5))
            .with(raw("A", 3.0));
        let app = app(provider);

        let (status, json) = get_json(app, "/api/leaderboard?players=B,A").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["sort_by"], "kd_ratio");
        assert_eq!(json["direction"], "descending");

        let rows = json["rows"].as_array().unwrap();
        assert_eq!(rows[0]["rank"], 1);
        assert_eq!(rows[0]["entry"]["display_name"], "A");
        assert_eq!(rows[1]["rank"], 2);
        assert_eq!(rows[1]["entry"]["display_name"], "B");
    }

    #[tokio::test]
    async fn test_leaderboard_direction_toggle_reverses() {
        let provider = StaticStatsProvider::new()
            .with(raw("B", 1.5))
            .with(raw("A", 3.0));
        let app1 = app(provider);

        let (_, desc) = get_json(app1, "/api/leaderboard?players=B,A&direction=descending").await;

        let provider = StaticStatsProvider::new()
            .with(raw("B", 1.5))
            .with(raw("A", 3.0));
        let app2 = app(provider);
        let (_, asc) = get_json(app2, "/api/leaderboard?players=B,A&direction=ascending").await;

        let desc_names: Vec<&str> = desc["rows"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["entry"]["display_name"].as_str().unwrap())
            .collect();
        let mut asc_names: Vec<&str> = asc["rows"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["entry"]["display_name"].as_str().unwrap())
            .collect();
        asc_names.reverse();
        assert_eq!(desc_names, asc_names);
    }

    #[tokio::test]
    async fn test_leaderboard_ties_keep_selection_order_and_distinct_ranks() {
        let provider = StaticStatsProvider::new()
            .with(raw("X", 2.0))
            .with(raw("Y", 2.0));
        let app = app(provider);

        let (status, json) =
            get_json(app, "/api/leaderboard?players=X,Y&direction=descending").await;

        assert_eq!(status, StatusCode::OK);
        let rows = json["rows"].as_array().unwrap();
        assert_eq!(rows[0]["entry"]["display_name"], "X");
        assert_eq!(rows[0]["rank"], 1);
        assert_eq!(rows[1]["entry"]["display_name"], "Y");
        assert_eq!(rows[1]["rank"], 2);
    }

    #[tokio::test]
    async fn test_leaderboard_rejects_unrankable_metric() {
        let provider = StaticStatsProvider::new().with(raw("A", 3.0));
        let app = app(provider);

        let (status, json) = get_json(app, "/api/leaderboard?players=A&sort_by=deaths").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"]["message"]
            .as_str()
            .unwrap()
            .contains("deaths"));
    }

    #[tokio::test]
    async fn test_leaderboard_rejects_unknown_metric() {
        let provider = StaticStatsProvider::new().with(raw("A", 3.0));
        let app = app(provider);

        let (status, _) = get_json(app, "/api/leaderboard?players=A&sort_by=headshots").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_leaderboard_sorts_by_other_metrics() {
        let mut low = raw("low", 1.0);
        low.matches_played = 5;
        let mut high = raw("high", 0.5);
        high.matches_played = 50;

        let provider = StaticStatsProvider::new().with(low).with(high);
        let app = app(provider);

        let (status, json) =
            get_json(app, "/api/leaderboard?players=low,high&sort_by=matches_played").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["rows"][0]["entry"]["display_name"], "high");
    }
}
