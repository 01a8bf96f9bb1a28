//! Registry configuration.

use std::num::NonZeroUsize;
use std::path::Path;

use serde::{Deserialize, Serialize};
use spandex_index::{ConfigError, IndexConfig};

/// Returns the default number of registry shards.
fn default_shards() -> NonZeroUsize {
	NonZeroUsize::MIN.saturating_add(15)
}

/// Configuration for an [`IndexRegistry`](crate::IndexRegistry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistryConfig {
	/// Number of independently locked map shards.
	#[serde(default = "default_shards")]
	pub shards: NonZeroUsize,
	/// Configuration applied to every index the registry creates.
	pub index: IndexConfig,
}

impl RegistryConfig {
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

impl Default for RegistryConfig {
	fn default() -> Self {
		Self {
			shards: default_shards(),
			index: IndexConfig::default(),
		}
	}
}
