use std::sync::Arc;

use crate::calculate::NormalizationProfile;
use crate::fetch::StatsProvider;

#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn StatsProvider>,
    pub profile: Arc<NormalizationProfile>,
}

impl AppState {
    pub fn new(provider: Arc<dyn StatsProvider>, profile: NormalizationProfile) -> Self {
        Self {
            provider,
            profile: Arc::new(profile),
        }
    }
}
