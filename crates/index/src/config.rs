//! Index tuning knobs.

use std::num::NonZeroUsize;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default half-width at or below which a node gets leaf children.
pub const MIN_LEAF_SIZE: usize = 20;

const DEFAULT_MIN_LEAF_SIZE: NonZeroUsize = NonZeroUsize::MIN.saturating_add(MIN_LEAF_SIZE - 1);

/// Configuration for one interval index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IndexConfig {
	/// Half-width threshold between leaves and inner nodes.
	///
	/// Also the initial covered bound of a fresh root, so every bound is a
	/// power-of-two multiple of it.
	pub min_leaf_size: NonZeroUsize,
}

impl IndexConfig {
	/// Parses a configuration from TOML text.
	pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
		Ok(toml::from_str(text)?)
	}

	/// Reads and parses a TOML configuration file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let path = path.as_ref();
		let text = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		Self::from_toml_str(&text)
	}
}

impl Default for IndexConfig {
	fn default() -> Self {
		Self {
			min_leaf_size: DEFAULT_MIN_LEAF_SIZE,
		}
	}
}

#[cfg(test)]
mod tests {
	use std::io::Write;

	use super::*;

	#[test]
	fn test_default_leaf_size() {
		assert_eq!(IndexConfig::default().min_leaf_size.get(), MIN_LEAF_SIZE);
	}

	#[test]
	fn test_parse_overrides_leaf_size() {
		let config = IndexConfig::from_toml_str("min_leaf_size = 64").unwrap();
		assert_eq!(config.min_leaf_size.get(), 64);
	}

	#[test]
	fn test_parse_empty_uses_defaults() {
		assert_eq!(IndexConfig::from_toml_str("").unwrap(), IndexConfig::default());
	}

	#[test]
	fn test_parse_rejects_zero_leaf_size() {
		assert!(matches!(
			IndexConfig::from_toml_str("min_leaf_size = 0"),
			Err(ConfigError::Toml(_))
		));
	}

	#[test]
	fn test_parse_rejects_unknown_fields() {
		assert!(IndexConfig::from_toml_str("leaf = 3").is_err());
	}

	#[test]
	fn test_load_from_file() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "min_leaf_size = 8").unwrap();
		let config = IndexConfig::load(file.path()).unwrap();
		assert_eq!(config.min_leaf_size.get(), 8);
	}

	#[test]
	fn test_load_missing_file() {
		let err = IndexConfig::load("/nonexistent/spandex.toml").unwrap_err();
		assert!(matches!(err, ConfigError::Io { .. }));
	}
}
