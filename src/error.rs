use crate::types::ItemId;

/// Out-of-range or missing mining parameters.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("min_support must be in (0, 1], got {0}")]
    MinSupportOutOfRange(f32),

    #[error("min_confidence must be in (0, 1], got {0}")]
    MinConfidenceOutOfRange(f32),

    #[error("min_confidence is required for rule generation")]
    MissingMinConfidence,

    #[error("hash tree max_leaf must be at least 1")]
    ZeroLeafCapacity,

    #[error("hash tree max_child must be at least 1")]
    ZeroBranching,
}

#[derive(Debug, thiserror::Error)]
pub enum AprioriError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("item {0:?} is not in the vocabulary")]
    UnknownItem(String),

    #[error("item id {0} is not in the vocabulary")]
    UnknownItemId(ItemId),
}

pub type Result<T> = std::result::Result<T, AprioriError>;
