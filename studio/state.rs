use std::sync::Arc;

use viewwear::{GarmentStore, HttpImageEditProvider};

/// Where garment records live, relative to the working directory.
const STORE_PATH: &str = "data/garments.txt";

/// Default model id when VIEWWEAR_PROVIDER_MODEL is unset.
const DEFAULT_MODEL: &str = "Qwen/Qwen-Image-Edit";

/// Application state shared by every handler.
///
/// The store serializes its own writes internally, and the provider client
/// is stateless, so no outer mutex is needed.
pub struct StudioState {
    pub store: GarmentStore,
    /// `None` when no provider endpoint is configured; try-on requests are
    /// then rejected with a clear message instead of failing mid-call.
    pub provider: Option<HttpImageEditProvider>,
}

impl StudioState {
    pub fn from_env() -> Self {
        let store = GarmentStore::open(STORE_PATH);

        let provider = match std::env::var("VIEWWEAR_PROVIDER_URL") {
            Ok(url) if !url.trim().is_empty() => {
                let token = std::env::var("VIEWWEAR_PROVIDER_TOKEN").unwrap_or_default();
                let model = std::env::var("VIEWWEAR_PROVIDER_MODEL")
                    .unwrap_or_else(|_| DEFAULT_MODEL.to_owned());
                match HttpImageEditProvider::new(url, token, model) {
                    Ok(p) => Some(p),
                    Err(e) => {
                        eprintln!("warning: could not build provider client: {}", e);
                        None
                    }
                }
            }
            _ => None,
        };

        StudioState { store, provider }
    }
}

/// Shared state type — an `Arc<StudioState>` passed to every handler.
pub type SharedState = Arc<StudioState>;
