pub use crate::config::ServiceConfig;
pub use crate::tips::{CacheStatus, TipCache};

pub mod auth;
pub mod error;
pub mod handlers;
pub mod server;

pub use error::ApiError;
pub use handlers::{MoodRequest, TipResponse, SAD_MOOD};
pub use server::{router, AppState, Clock, TipServer};
