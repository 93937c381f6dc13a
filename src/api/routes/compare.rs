use std::collections::BTreeMap;

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::calculate::{axis_ceilings, normalized_axes};
use crate::models::{MetricKey, Mode, Period, PlayerId, Shard, StatsContext};

use super::build_dataset;

#[derive(Debug, Deserialize)]
pub struct CompareAxesParams {
    pub players: String,

    #[serde(default)]
    pub period: Period,

    #[serde(default)]
    pub mode: Mode,

    #[serde(default)]
    pub shard: Shard,
}

#[derive(Debug, Serialize)]
pub struct PlayerAxes {
    pub player_id: PlayerId,
    pub display_name: String,
    /// Axis values in [0, 100], keyed by metric.
    pub axes: BTreeMap<MetricKey, f64>,
}

#[derive(Debug, Serialize)]
pub struct CompareAxesResponse {
    pub context: StatsContext,
    /// The resolved scaling denominators, so a client can label rings.
    pub ceilings: BTreeMap<MetricKey, f64>,
    pub players: Vec<PlayerAxes>,
}

// GET /api/compare/axes?players=a,b,c&period=last7d&mode=squad&shard=steam
pub async fn comparison_axes(
    State(state): State<AppState>,
    Query(params): Query<CompareAxesParams>,
) -> Result<Json<CompareAxesResponse>, ApiError> {
    let context = StatsContext::new(params.period, params.mode, params.shard);
    let dataset = build_dataset(&state, &params.players, context).await?;

    let ceilings = axis_ceilings(&dataset, &state.profile);
    let mut axes_by_player = normalized_axes(&dataset, &state.profile);

    // Respond in selection order, not map order.
    let players = dataset
        .entries
        .iter()
        .filter_map(|entry| {
            axes_by_player.remove(&entry.player_id).map(|axes| PlayerAxes {
                player_id: entry.player_id.clone(),
                display_name: entry.display_name.clone(),
                axes,
            })
        })
        .collect();

    Ok(Json(CompareAxesResponse {
        context: dataset.context,
        ceilings,
        players,
    }))
}
