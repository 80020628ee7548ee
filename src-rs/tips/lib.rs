pub mod cache;
pub mod fallback;

pub use cache::{
    spawn_refresh_worker, CacheSnapshot, CacheStatus, Dispensed, RefreshReceiver, TipCache,
    DEFAULT_REFRESH_THRESHOLD, DEFAULT_REFRESH_TIMEOUT,
};
pub use fallback::{fallback_tips, FALLBACK_TIPS};
