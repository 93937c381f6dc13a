pub mod compare;
pub mod dashboard;
pub mod leaderboard;

use tracing::warn;

use crate::api::state::AppState;
use crate::api::{parse_player_list, ApiError};
use crate::calculate::{aggregate, StatsError};
use crate::fetch::ProviderError;
use crate::models::{ComparisonDataset, StatsContext};

/// Fetch every requested player's raw stats and aggregate them.
///
/// One failed fetch fails the whole request: a comparison silently
/// missing a player is worse than a clear error. Not-found failures map
/// to 404, anything else to 502, both naming every affected player.
pub(crate) async fn build_dataset(
    state: &AppState,
    players_param: &str,
    context: StatsContext,
) -> Result<ComparisonDataset, ApiError> {
    let players = parse_player_list(players_param).map_err(ApiError::BadRequest)?;

    let mut entries = Vec::with_capacity(players.len());
    let mut not_found: Vec<String> = Vec::new();
    let mut unavailable: Vec<String> = Vec::new();

    for (player_id, display_name) in players {
        match state.provider.fetch_raw_stats(&player_id, &context).await {
            Ok(raw) => entries.push((player_id, display_name, raw)),
            Err(ProviderError::NotFound { .. }) => not_found.push(player_id.to_string()),
            Err(ProviderError::Unavailable(reason)) => {
                warn!(player = %player_id, "upstream fetch failed: {reason}");
                unavailable.push(player_id.to_string());
            }
        }
    }

    if !not_found.is_empty() || !unavailable.is_empty() {
        let upstream_broke = !unavailable.is_empty();
        let mut players = not_found;
        players.append(&mut unavailable);
        let err = StatsError::Aggregation { players };
        return Err(if upstream_broke {
            ApiError::Upstream(err.to_string())
        } else {
            ApiError::NotFound(err.to_string())
        });
    }

    aggregate(context, &entries).map_err(ApiError::from)
}
