use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::models::{ComparisonEntry, Mode, Period, Shard, StatsContext};

use super::build_dataset;

#[derive(Debug, Deserialize)]
pub struct DashboardParams {
    /// Comma-separated player names (1 to 10).
    pub players: String,

    #[serde(default)]
    pub period: Period,

    #[serde(default)]
    pub mode: Mode,

    #[serde(default)]
    pub shard: Shard,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub context: StatsContext,
    pub players: Vec<ComparisonEntry>,
}

// GET /api/dashboard?players=a,b,c&period=last7d&mode=squad&shard=steam
pub async fn dashboard_stats(
    State(state): State<AppState>,
    Query(params): Query<DashboardParams>,
) -> Result<Json<DashboardResponse>, ApiError> {
    let context = StatsContext::new(params.period, params.mode, params.shard);
    let dataset = build_dataset(&state, &params.players, context).await?;

    Ok(Json(DashboardResponse {
        context: dataset.context,
        players: dataset.entries,
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
            kills: 3.0,
            deaths: 1.5,
            kd_ratio: kd,
            win_rate: 0.2,
            damage_dealt: 420.0,
            survival_time: 1300.0,
            top1_count: 2,
            matches_played: 15,
            computed_at: chrono::Utc::now(),
        }
    }

    fn test_state(provider: StaticStatsProvider) -> AppState {
        AppState::new(Arc::new(provider), NormalizationProfile::default())
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
        let json: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn test_dashboard_happy_path() {
        let provider = StaticStatsProvider::new()
            .with(raw("shroud", 3.0))
            .with(raw("chocoTaco", 1.5));
        let app = build_router(test_state(provider));

        let (status, json) = get_json(app, "/api/dashboard?players=shroud,chocoTaco").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["context"]["period"], "last7d");
        let players = json["players"].as_array().unwrap();
        assert_eq!(players.len(), 2);
        // Selection order, not metric order.
        assert_eq!(players[0]["display_name"], "shroud");
        assert_eq!(players[1]["display_name"], "chocoTaco");
        assert_eq!(players[0]["metrics"]["kd_ratio"], 3.0);
    }

    #[tokio::test]
    async fn test_dashboard_unknown_player_is_404_naming_them() {
        let provider = StaticStatsProvider::new().with(raw("shroud", 3.0));
        let app = build_router(test_state(provider));

        let (status, json) = get_json(app, "/api/dashboard?players=shroud,ghost").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        let message = json["error"]["message"].as_str().unwrap();
        assert!(message.contains("ghost"));
        assert!(!message.contains("shroud,"));
    }

    #[tokio::test]
    async fn test_dashboard_rejects_empty_player_list() {
        let app = build_router(test_state(StaticStatsProvider::new()));
        let (status, json) = get_json(app, "/api/dashboard?players=").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_dashboard_rejects_more_than_ten_players() {
        let app = build_router(test_state(StaticStatsProvider::new()));
        let players = (0..11).map(|i| format!("p{i}")).collect::<Vec<_>>().join(",");

        let (status, _) = get_json(app, &format!("/api/dashboard?players={players}")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_dashboard_rejects_unknown_tags() {
        let app = build_router(test_state(StaticStatsProvider::new()));

        let (status, _) = get_json(app, "/api/dashboard?players=a&period=lifetime").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let app = build_router(test_state(StaticStatsProvider::new()));
        let (status, _) = get_json(app, "/api/dashboard?players=a&shard=switch").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_dashboard_context_defaults() {
        let provider = StaticStatsProvider::new().with(raw("shroud", 3.0));
        let app = build_router(test_state(provider));

        let (status, json) = get_json(app, "/api/dashboard?players=shroud").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["context"]["mode"], "squad");
        assert_eq!(json["context"]["shard"], "steam");
    }

    #[tokio::test]
    async fn test_health() {
        let app = build_router(test_state(StaticStatsProvider::new()));
        let (status, json) = get_json(app, "/api/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
    }
}
