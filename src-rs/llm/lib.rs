pub mod gemini_adapter;
pub mod parse;
pub mod rotation;
pub mod types;

pub use gemini_adapter::{GeminiAdapter, GeminiConfig};
pub use parse::parse_tip_list;
pub use rotation::Rotator;
pub use types::{AdapterError, TipList, TipSource};
