#[cfg(test)]
mod tests;

use std::sync::Arc;

use spandex_primitives::{Annotation, AnnotationType, CharIdx, Span};
use tracing::trace;

use crate::config::IndexConfig;
use crate::leaf::Leaf;
use crate::node::{Node, Subtree};
use crate::query::{Matches, Relation};
use crate::{IndexError, IntervalIndex, Result};

/// Entry point of one document's interval index.
///
/// The root covers the axis range `[0, bound)` and grows rightward only: an
/// insert past the bound doubles it, adopting the current tree as the left
/// half of a new node. Queries never grow the tree; a window past the bound
/// just finds nothing there.
///
/// # Concurrency
///
/// A root is not internally synchronized. Callers serialize access per
/// document; the registry hands roots out behind a per-document mutex.
pub struct Root<A: ?Sized> {
	bound: CharIdx,
	min_leaf_size: usize,
	/// `None` once the index has been cleared.
	child: Option<Subtree<A>>,
	len: usize,
}

impl<A: Annotation + ?Sized> Root<A> {
	/// Creates an empty index with the default configuration.
	pub fn new() -> Self {
		Self::with_config(&IndexConfig::default())
	}

	/// Creates an empty index covering `[0, min_leaf_size)`.
	pub fn with_config(config: &IndexConfig) -> Self {
		let min_leaf_size = config.min_leaf_size.get();
		Self {
			bound: min_leaf_size,
			min_leaf_size,
			child: Some(Subtree::Leaf(Leaf::new())),
			len: 0,
		}
	}

	/// Exclusive upper bound of the currently covered axis range.
	pub fn bound(&self) -> CharIdx {
		self.bound
	}

	/// Number of annotations currently indexed.
	pub fn len(&self) -> usize {
		self.len
	}

	/// Returns true if nothing is indexed.
	pub fn is_empty(&self) -> bool {
		self.len == 0
	}

	/// Returns true once [`IntervalIndex::clear`] has run.
	pub fn is_cleared(&self) -> bool {
		self.child.is_none()
	}

	/// Returns true if this exact handle is indexed.
	pub fn contains(&self, annotation: &Arc<A>) -> bool {
		self.child.as_ref().is_some_and(|child| child.contains(annotation))
	}

	/// Number of tree levels below the root.
	pub fn depth(&self) -> usize {
		self.child.as_ref().map_or(0, Subtree::depth)
	}
}

impl<A: Annotation + ?Sized> Default for Root<A> {
	fn default() -> Self {
		Self::new()
	}
}

impl<A: Annotation + ?Sized> IntervalIndex<A> for Root<A> {
	fn insert(&mut self, annotation: Arc<A>) -> Result<()> {
		let end = annotation.end();
		if end > self.bound {
			self.grow(end)?;
		}
		let child = self.child.as_mut().ok_or(IndexError::Cleared)?;
		child.push(annotation);
		self.len += 1;
		Ok(())
	}

	fn remove(&mut self, annotation: &Arc<A>) -> bool {
		let Some(child) = self.child.as_mut() else {
			return false;
		};
		let removed = child.take(annotation);
		if removed {
			self.len -= 1;
		}
		removed
	}

	fn select(&mut self, relation: Relation, window: Span, ty: &AnnotationType) -> Vec<Arc<A>> {
		let Some(child) = self.child.as_mut() else {
			return Vec::new();
		};
		let mut out = Matches::new();
		child.collect_into(relation, window, ty, &mut out);
		out.into_vec()
	}

	fn grow(&mut self, size: CharIdx) -> Result<()> {
		let child = self.child.as_mut().ok_or(IndexError::Cleared)?;
		// Settle the final bound before building anything so an overflowing
		// request leaves the tree untouched.
		let mut target = self.bound;
		while size > target {
			target = target.checked_mul(2).ok_or(IndexError::BoundOverflow {
				requested: size,
				bound: target,
			})?;
		}
		while self.bound < target {
			let bound = self.bound * 2;
			let left = std::mem::replace(child, Subtree::Leaf(Leaf::new()));
			*child = Subtree::Node(Box::new(Node::grown(left, bound, self.min_leaf_size)));
			trace!(from = self.bound, to = bound, "Grew annotation index");
			self.bound = bound;
		}
		Ok(())
	}

	fn clear(&mut self) {
		if let Some(mut child) = self.child.take() {
			child.release();
		}
		self.len = 0;
	}
}
