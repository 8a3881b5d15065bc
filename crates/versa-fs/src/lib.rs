//! Filesystem layer for VERSA configuration roots
//!
//! Provides forward-slash path handling, the `.ai/` layout constants,
//! format-detecting structured file loading, and atomic writes.

pub mod config;
pub mod constants;
pub mod error;
pub mod io;
pub mod path;

pub use config::ConfigStore;
pub use constants::AiPath;
pub use error::{Error, Result};
pub use path::NormalizedPath;
