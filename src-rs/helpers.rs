use std::sync::Arc;

use tracing::{info, warn};

use crate::config::ServiceConfig;
use crate::llm::{AdapterError, GeminiAdapter, GeminiConfig, TipSource};
use crate::tips::{spawn_refresh_worker, TipCache};

pub fn build_tip_source(cfg: &ServiceConfig) -> Result<Arc<dyn TipSource>, AdapterError> {
    if cfg.gemini_api_keys.is_empty() {
        warn!("no GEMINI_API_KEY found, only fallback tips will be served");
    } else {
        info!(
            keys = cfg.gemini_api_keys.len(),
            model = %cfg.gemini_model,
            "gemini tip source configured"
        );
    }
    let adapter = GeminiAdapter::new(GeminiConfig {
        api_keys: cfg.gemini_api_keys.clone(),
        base_url: cfg.gemini_base_url.clone(),
        model: cfg.gemini_model.clone(),
        prompt: cfg.prompt.clone(),
        timeout_secs: cfg.refresh_timeout.as_secs(),
    })?;
    Ok(Arc::new(adapter))
}

/// Builds the cache, starts its refresh worker and queues the startup refresh.
pub fn start_tip_cache(cfg: &ServiceConfig, source: Arc<dyn TipSource>) -> Arc<TipCache> {
    let (cache, refresh_rx) = TipCache::new(source, cfg.refresh_threshold, cfg.refresh_timeout);
    spawn_refresh_worker(cache.clone(), refresh_rx);
    cache.request_refresh();
    cache
}
