//! Error types for index and configuration operations.

use std::path::PathBuf;

use spandex_primitives::{CharIdx, SpanError};
use thiserror::Error;

/// Usage errors surfaced by index operations.
///
/// Absent annotations and absent documents are not errors; those show up as
/// `false` or `None` results.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndexError {
	/// A query window or annotation interval was malformed.
	#[error(transparent)]
	Span(#[from] SpanError),

	/// `grow` was called on an inner node or leaf instead of the root.
	#[error("growth of an annotation index must go through its root")]
	GrowthOutsideRoot,

	/// Doubling the covered bound would overflow the offset type.
	#[error("cannot grow index bound {bound} far enough to cover offset {requested}")]
	BoundOverflow {
		/// Offset the index was asked to cover.
		requested: CharIdx,
		/// Bound reached before overflowing.
		bound: CharIdx,
	},

	/// The index was cleared and can no longer accept annotations.
	#[error("annotation index has been cleared")]
	Cleared,
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error parsing TOML syntax or shape.
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),

	/// Error reading a configuration file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},
}

/// Result type for index operations.
pub type Result<T, E = IndexError> = std::result::Result<T, E>;
