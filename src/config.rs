//! Mining parameters.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Shape of the per-level hash tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HashTreeConfig {
    /// Distinct entries a leaf holds before it splits. Default: 5.
    pub max_leaf: usize,
    /// Branching factor, also the hash modulus. Default: 4.
    pub max_child: usize,
}

impl Default for HashTreeConfig {
    fn default() -> Self {
        HashTreeConfig {
            max_leaf: 5,
            max_child: 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinerConfig {
    /// Fraction of transactions an itemset must appear in.
    pub min_support: f32,
    /// Only needed for rule generation.
    #[serde(default)]
    pub min_confidence: Option<f32>,
    #[serde(default)]
    pub hash_tree: HashTreeConfig,
}

impl MinerConfig {
    pub fn new(min_support: f32) -> Self {
        MinerConfig {
            min_support,
            min_confidence: None,
            hash_tree: HashTreeConfig::default(),
        }
    }

    pub fn with_min_confidence(mut self, min_confidence: f32) -> Self {
        self.min_confidence = Some(min_confidence);
        self
    }

    pub fn with_hash_tree(mut self, max_leaf: usize, max_child: usize) -> Self {
        self.hash_tree = HashTreeConfig {
            max_leaf,
            max_child,
        };
        self
    }

    /// Mining itself accepts any thresholds; callers that take parameters
    /// from users should run this first.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.min_support > 0.0 && self.min_support <= 1.0) {
            return Err(ConfigError::MinSupportOutOfRange(self.min_support));
        }
        if let Some(min_confidence) = self.min_confidence {
            if !(min_confidence > 0.0 && min_confidence <= 1.0) {
                return Err(ConfigError::MinConfidenceOutOfRange(min_confidence));
            }
        }
        if self.hash_tree.max_leaf == 0 {
            return Err(ConfigError::ZeroLeafCapacity);
        }
        if self.hash_tree.max_child == 0 {
            return Err(ConfigError::ZeroBranching);
        }
        Ok(())
    }

    pub(crate) fn required_min_confidence(&self) -> Result<f32, ConfigError> {
        self.min_confidence.ok_or(ConfigError::MissingMinConfidence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_classic_tree_shape() {
        let config = MinerConfig::new(0.5);
        assert_eq!(config.hash_tree.max_leaf, 5);
        assert_eq!(config.hash_tree.max_child, 4);
        assert_eq!(config.min_confidence, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_out_of_range_thresholds() {
        assert_eq!(
            MinerConfig::new(0.0).validate(),
            Err(ConfigError::MinSupportOutOfRange(0.0))
        );
        assert_eq!(
            MinerConfig::new(1.5).validate(),
            Err(ConfigError::MinSupportOutOfRange(1.5))
        );
        assert_eq!(
            MinerConfig::new(0.5).with_min_confidence(-0.1).validate(),
            Err(ConfigError::MinConfidenceOutOfRange(-0.1))
        );
        assert!(MinerConfig::new(1.0).with_min_confidence(1.0).validate().is_ok());
    }

    #[test]
    fn validate_rejects_degenerate_tree() {
        assert_eq!(
            MinerConfig::new(0.5).with_hash_tree(0, 4).validate(),
            Err(ConfigError::ZeroLeafCapacity)
        );
        assert_eq!(
            MinerConfig::new(0.5).with_hash_tree(5, 0).validate(),
            Err(ConfigError::ZeroBranching)
        );
    }

    #[test]
    fn deserialize_fills_in_defaults() {
        let config: MinerConfig =
            serde_json::from_str(r#"{ "min_support": 0.25, "hash_tree": { "max_child": 8 } }"#)
                .unwrap();
        assert_eq!(config.min_support, 0.25);
        assert_eq!(config.min_confidence, None);
        assert_eq!(
            config.hash_tree,
            HashTreeConfig {
                max_leaf: 5,
                max_child: 8
            }
        );
    }

    #[test]
    fn missing_min_confidence_is_reported() {
        assert_eq!(
            MinerConfig::new(0.5).required_min_confidence(),
            Err(ConfigError::MissingMinConfidence)
        );
        assert_eq!(
            MinerConfig::new(0.5)
                .with_min_confidence(0.7)
                .required_min_confidence(),
            Ok(0.7)
        );
    }
}
