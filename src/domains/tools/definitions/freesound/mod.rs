//! Freesound tools.
//!
//! - `client`: HTTP access to the text search endpoint
//! - `model`: API payloads and tool output types
//! - `format`: reshaping a search page into the tool output
//! - `search`: the `search_sounds` MCP tool

pub mod client;
pub mod format;
pub mod model;
pub mod search;

pub use client::{FreesoundClient, SearchError};
pub use model::{ErrorResult, FormattedResult, FormattedSound, SearchOutcome};
pub use search::{SearchSoundsParams, SearchSoundsTool};
