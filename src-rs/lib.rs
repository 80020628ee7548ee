pub mod config;
pub mod helpers;

#[path = "llm/lib.rs"]
pub mod llm;
#[path = "tips/lib.rs"]
pub mod tips;
#[path = "api/lib.rs"]
pub mod api;

pub use config::ServiceConfig;
pub use llm::{AdapterError, TipSource};
pub use tips::TipCache;
