//! Interval index over a document's annotations.
//!
//! The index is a binary tree over the character-offset axis. Inner nodes
//! split their range at a fixed midpoint; leaves hold small, lazily sorted
//! buckets of shared annotation handles. The [`Root`] owns the covered range
//! `[0, bound)` and doubles it whenever an insert reaches past it.
//!
//! Three query relations are supported, each filtered by annotation type:
//!
//! - [`covering`](IntervalIndex::covering): annotations contained by the window
//! - [`covered`](IntervalIndex::covered): annotations containing the window
//! - [`collisions`](IntervalIndex::collisions): annotations overlapping the window
//!
//! # Result order
//!
//! Each leaf reports its matches ordered by `(begin, end)`. Results from
//! several leaves are concatenated left to right with duplicates dropped, so
//! a result spanning more than one leaf is **not** globally sorted.

/// Index configuration.
pub mod config;
/// Error types.
pub mod error;
/// Leaf buckets.
pub mod leaf;
/// Inner nodes.
pub mod node;
/// Query relations.
pub mod query;
/// Tree root.
pub mod root;
/// Linear-scan baseline.
pub mod scan;


use std::sync::Arc;

pub use config::{IndexConfig, MIN_LEAF_SIZE};
pub use error::{ConfigError, IndexError, Result};
pub use leaf::Leaf;
pub use node::{Node, Subtree};
pub use query::Relation;
pub use root::Root;
pub use scan::LinearScan;
use spandex_primitives::{Annotation, AnnotationType, CharIdx, Span};

/// Capability set shared by every part of the tree.
///
/// Queries take `&mut self` because leaves sort themselves on first read
/// after an insert.
pub trait IntervalIndex<A: Annotation + ?Sized> {
	/// Adds an annotation handle. Inserting the same handle twice stores it twice.
	fn insert(&mut self, annotation: Arc<A>) -> Result<()>;

	/// Removes an annotation handle by identity.
	///
	/// Returns false, without error, if the handle was not indexed.
	fn remove(&mut self, annotation: &Arc<A>) -> bool;

	/// Returns annotations of type `ty` (or a subtype) related to `window`.
	fn select(&mut self, relation: Relation, window: Span, ty: &AnnotationType) -> Vec<Arc<A>>;

	/// Extends the covered range until it reaches `size`.
	///
	/// Only the root can grow; inner nodes and leaves return
	/// [`IndexError::GrowthOutsideRoot`].
	fn grow(&mut self, size: CharIdx) -> Result<()>;

	/// Drops every stored handle.
	fn clear(&mut self);

	/// Annotations with `begin >= window.begin` and `end <= window.end`.
	fn covering(&mut self, window: Span, ty: &AnnotationType) -> Vec<Arc<A>> {
		self.select(Relation::Covering, window, ty)
	}

	/// Annotations with `begin <= window.begin` and `end >= window.end`.
	fn covered(&mut self, window: Span, ty: &AnnotationType) -> Vec<Arc<A>> {
		self.select(Relation::Covered, window, ty)
	}

	/// Annotations overlapping `window`.
	fn collisions(&mut self, window: Span, ty: &AnnotationType) -> Vec<Arc<A>> {
		self.select(Relation::Collision, window, ty)
	}
}
