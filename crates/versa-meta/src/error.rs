//! Error types for versa-meta

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unknown merge strategy: {strategy}")]
    UnknownMergeStrategy { strategy: String },

    #[error("Unknown priority: {value} (expected low, medium, high or critical)")]
    UnknownPriority { value: String },

    #[error("Unknown schema: {name}")]
    UnknownSchema { name: String },
}
