//! Shared handler state

use std::sync::Arc;
use tokio::sync::RwLock;

use rsalab_core::config::RsaLabConfig;
use rsalab_store::CiphertextStore;

use crate::auth::IdentityResolver;
use crate::extract::TextExtractor;
use crate::metrics::ApiMetrics;

/// Shared reference to the saved-ciphertext store
pub type SharedStore = Arc<RwLock<Box<dyn CiphertextStore>>>;

pub fn new_shared(store: Box<dyn CiphertextStore>) -> SharedStore {
    Arc::new(RwLock::new(store))
}

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<RsaLabConfig>,
    pub store: SharedStore,
    pub resolver: Arc<dyn IdentityResolver>,
    pub extractor: Arc<dyn TextExtractor>,
    pub metrics: ApiMetrics,
}
