use std::sync::Arc;

use spandex_primitives::{Annotation, AnnotationType, CharIdx, Span};

use crate::query::{Relation, identity};
use crate::{IntervalIndex, Result};

/// Unindexed baseline that scans every annotation on each query.
///
/// Results come back globally sorted by `(begin, end)`. Useful as a
/// reference oracle and for measuring what the tree buys.
pub struct LinearScan<A: ?Sized> {
	annotations: Vec<Arc<A>>,
	dirty: bool,
}

impl<A: Annotation + ?Sized> LinearScan<A> {
	/// Creates an empty scan list.
	pub fn new() -> Self {
		Self {
			annotations: Vec::new(),
			dirty: false,
		}
	}

	/// Number of handles stored.
	pub fn len(&self) -> usize {
		self.annotations.len()
	}

	/// Returns true if nothing is stored.
	pub fn is_empty(&self) -> bool {
		self.annotations.is_empty()
	}
}

impl<A: Annotation + ?Sized> Default for LinearScan<A> {
	fn default() -> Self {
		Self::new()
	}
}

impl<A: Annotation + ?Sized> IntervalIndex<A> for LinearScan<A> {
	fn insert(&mut self, annotation: Arc<A>) -> Result<()> {
		self.annotations.push(annotation);
		self.dirty = true;
		Ok(())
	}

	fn remove(&mut self, annotation: &Arc<A>) -> bool {
		let id = identity(annotation);
		match self.annotations.iter().position(|a| identity(a) == id) {
			Some(pos) => {
				self.annotations.remove(pos);
				true
			}
			None => false,
		}
	}

	fn select(&mut self, relation: Relation, window: Span, ty: &AnnotationType) -> Vec<Arc<A>> {
		if self.dirty {
			self.annotations.sort_by_key(|a| a.span());
			self.dirty = false;
		}
		self.annotations
			.iter()
			.filter(|a| relation.matches(a.span(), window) && a.is_a(ty))
			.cloned()
			.collect()
	}

	/// The scan has no bound; growing is a no-op.
	fn grow(&mut self, _size: CharIdx) -> Result<()> {
		Ok(())
	}

	fn clear(&mut self) {
		self.annotations = Vec::new();
		self.dirty = false;
	}
}
