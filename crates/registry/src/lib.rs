//! Per-document interval indices.
//!
//! The [`IndexRegistry`] maps a [`DocumentId`](spandex_primitives::DocumentId)
//! to that document's [`Root`](spandex_index::Root). A [`DocumentIndexer`]
//! wires document events (annotation added, annotation removed, document
//! released) to the registry and lazily builds an index the first time a
//! document is queried.
//!
//! # Concurrency
//!
//! The registry is safe to share across threads. Each index sits behind its
//! own mutex, so work on one document never blocks another. Callers are
//! expected to keep a single active accessor per document.

/// Registry configuration.
pub mod config;
/// Document abstraction.
pub mod document;
/// Event hooks.
pub mod indexer;
/// In-memory document.
pub mod memory;
/// Id to index mapping.
pub mod registry;

pub use config::RegistryConfig;
pub use document::{Document, resolve_identity};
pub use indexer::DocumentIndexer;
pub use memory::MemoryDocument;
pub use registry::{Acquired, IndexRegistry, SharedIndex};
pub use spandex_index::{IndexError, Result};
