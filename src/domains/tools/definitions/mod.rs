//! Tool definitions module.
//!
//! Each tool is defined in its own module.

pub mod freesound;

pub use freesound::{SearchSoundsParams, SearchSoundsTool};
