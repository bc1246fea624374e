use crate::config::Config;
use crate::predictor::HttpPredictor;
use crate::preview::PreviewStore;

/// Path prefix preview images are served under.
pub const PREVIEW_ROUTE: &str = "/preview";

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub predictor: HttpPredictor,
    pub previews: PreviewStore,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let predictor = HttpPredictor::new(reqwest::Client::new(), config.predict_url.clone());
        let previews = PreviewStore::new(PREVIEW_ROUTE).with_max_entries(config.max_previews);
        Self {
            config,
            predictor,
            previews,
        }
    }
}
