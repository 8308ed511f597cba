//! menufind - incremental search suggestions for a food catalog
//!
//! Turns a stream of keystrokes into one debounced, cached, de-duplicated
//! suggestion list covering menus, restaurants, and categories, without ever
//! letting an out-of-date response reach the UI.

pub mod cache;
pub mod config;
pub mod error;
pub mod query;
pub mod search;
pub mod suggestion;

// Re-export commonly used types for convenience
pub use config::{Config, SearchConfig, load_config};
pub use error::SuggestError;
pub use query::QueryKey;
pub use search::{SuggestState, connect};
pub use suggestion::{Suggestion, SuggestionKind};
