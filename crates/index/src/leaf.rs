use std::sync::Arc;

use spandex_primitives::{Annotation, AnnotationType, CharIdx, Span};

use crate::query::{Matches, Relation, identity};
use crate::{IndexError, IntervalIndex, Result};

/// Bucket of annotation handles at the bottom of the tree.
///
/// Inserts append without ordering; the first query after an insert sorts
/// the bucket by `(begin, end)`.
pub struct Leaf<A: ?Sized> {
	annotations: Vec<Arc<A>>,
	dirty: bool,
}

impl<A: Annotation + ?Sized> Leaf<A> {
	/// Creates an empty leaf.
	pub fn new() -> Self {
		Self {
			annotations: Vec::new(),
			dirty: false,
		}
	}

	/// Number of handles stored here.
	pub fn len(&self) -> usize {
		self.annotations.len()
	}

	/// Returns true if the leaf holds nothing.
	pub fn is_empty(&self) -> bool {
		self.annotations.is_empty()
	}

	/// Returns true if an insert happened since the last sort.
	pub fn is_dirty(&self) -> bool {
		self.dirty
	}

	pub(crate) fn push(&mut self, annotation: Arc<A>) {
		self.annotations.push(annotation);
		self.dirty = true;
	}

	/// Removes the first occurrence of `annotation`, keeping the order of the rest.
	pub(crate) fn take(&mut self, annotation: &Arc<A>) -> bool {
		let id = identity(annotation);
		match self.annotations.iter().position(|a| identity(a) == id) {
			Some(pos) => {
				self.annotations.remove(pos);
				true
			}
			None => false,
		}
	}

	pub(crate) fn contains(&self, annotation: &Arc<A>) -> bool {
		let id = identity(annotation);
		self.annotations.iter().any(|a| identity(a) == id)
	}

	fn sort_if_dirty(&mut self) {
		if self.dirty {
			self.annotations.sort_by_key(|a| a.span());
			self.dirty = false;
		}
	}

	pub(crate) fn collect_into(
		&mut self,
		relation: Relation,
		window: Span,
		ty: &AnnotationType,
		out: &mut Matches<A>,
	) {
		self.sort_if_dirty();
		for annotation in &self.annotations {
			if relation.matches(annotation.span(), window) && annotation.is_a(ty) {
				out.push(annotation);
			}
		}
	}

	pub(crate) fn release(&mut self) {
		self.annotations = Vec::new();
		self.dirty = false;
	}
}

impl<A: Annotation + ?Sized> Default for Leaf<A> {
	fn default() -> Self {
		Self::new()
	}
}

impl<A: Annotation + ?Sized> IntervalIndex<A> for Leaf<A> {
	fn insert(&mut self, annotation: Arc<A>) -> Result<()> {
		self.push(annotation);
		Ok(())
	}

	fn remove(&mut self, annotation: &Arc<A>) -> bool {
		self.take(annotation)
	}

	fn select(&mut self, relation: Relation, window: Span, ty: &AnnotationType) -> Vec<Arc<A>> {
		let mut out = Matches::new();
		self.collect_into(relation, window, ty, &mut out);
		out.into_vec()
	}

	fn grow(&mut self, _size: CharIdx) -> Result<()> {
		Err(IndexError::GrowthOutsideRoot)
	}

	fn clear(&mut self) {
		self.release();
	}
}
