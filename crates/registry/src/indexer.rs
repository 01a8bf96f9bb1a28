use std::sync::Arc;

use spandex_index::{IntervalIndex, Result, Root};
use spandex_primitives::{Annotation, AnnotationType, CharIdx, DocumentId, Span};
use tracing::{debug, warn};

use crate::document::{Document, resolve_identity};
use crate::registry::{Acquired, IndexRegistry, SharedIndex};

/// Glue between a document model and an [`IndexRegistry`].
///
/// Each method corresponds to a document event. The first time a document
/// needs an index it is stamped with a fresh [`DocumentId`], and the new
/// index is backfilled from the annotations already on the document.
///
/// Callers must keep to one active accessor per document; distinct
/// documents may be driven from distinct threads.
pub struct DocumentIndexer<A: ?Sized> {
	registry: Arc<IndexRegistry<A>>,
}

impl<A: ?Sized> Clone for DocumentIndexer<A> {
	fn clone(&self) -> Self {
		Self {
			registry: Arc::clone(&self.registry),
		}
	}
}

impl<A: Annotation + ?Sized> DocumentIndexer<A> {
	/// Creates hooks over a shared registry.
	pub fn new(registry: Arc<IndexRegistry<A>>) -> Self {
		Self { registry }
	}

	/// The registry backing these hooks.
	pub fn registry(&self) -> &Arc<IndexRegistry<A>> {
		&self.registry
	}

	/// Returns the document's index.
	///
	/// With `create`, a missing identity is minted and stamped and a missing
	/// index is built and backfilled. Without it, only an existing index is
	/// returned.
	pub fn index_for<D>(&self, doc: &mut D, create: bool) -> Option<SharedIndex<A>>
	where
		D: Document<Annotation = A> + ?Sized,
	{
		if create {
			Some(self.acquire_for(doc).index)
		} else {
			self.lookup(doc)
		}
	}

	/// Records that `annotation` was added to `doc`.
	///
	/// An annotation already present in the index, typically picked up by
	/// the backfill when it was pushed before this call, is not inserted
	/// twice.
	pub fn annotation_added<D>(&self, doc: &mut D, annotation: &Arc<A>) -> Result<()>
	where
		D: Document<Annotation = A> + ?Sized,
	{
		let index = self.acquire_for(doc).index;
		let mut root = index.lock();
		if root.contains(annotation) {
			return Ok(());
		}
		root.insert(Arc::clone(annotation))
	}

	/// Records that `annotation` was removed from `doc`.
	///
	/// Never creates an index. Returns whether the annotation was indexed.
	pub fn annotation_removed<D>(&self, doc: &D, annotation: &Arc<A>) -> bool
	where
		D: Document<Annotation = A> + ?Sized,
	{
		self.lookup(doc).is_some_and(|index| index.lock().remove(annotation))
	}

	/// Drops the document's index, if any.
	///
	/// Call when the document is reset, flushed, or disposed. The identity
	/// stays on the document; a later access builds a fresh index.
	pub fn release<D>(&self, doc: &D) -> bool
	where
		D: Document + ?Sized,
	{
		resolve_identity(doc).is_some_and(|id| self.registry.remove(id))
	}

	/// Annotations of type `ty` lying within `[start, end)`.
	pub fn covering<D>(&self, doc: &mut D, start: CharIdx, end: CharIdx, ty: &AnnotationType) -> Result<Vec<Arc<A>>>
	where
		D: Document<Annotation = A> + ?Sized,
	{
		let window = Span::new(start, end)?;
		Ok(self.acquire_for(doc).index.lock().covering(window, ty))
	}

	/// Annotations of type `ty` enclosing `[start, end)`.
	pub fn covered<D>(&self, doc: &mut D, start: CharIdx, end: CharIdx, ty: &AnnotationType) -> Result<Vec<Arc<A>>>
	where
		D: Document<Annotation = A> + ?Sized,
	{
		let window = Span::new(start, end)?;
		Ok(self.acquire_for(doc).index.lock().covered(window, ty))
	}

	/// Annotations of type `ty` overlapping `[start, end)`.
	pub fn collisions<D>(&self, doc: &mut D, start: CharIdx, end: CharIdx, ty: &AnnotationType) -> Result<Vec<Arc<A>>>
	where
		D: Document<Annotation = A> + ?Sized,
	{
		let window = Span::new(start, end)?;
		Ok(self.acquire_for(doc).index.lock().collisions(window, ty))
	}

	fn lookup<D>(&self, doc: &D) -> Option<SharedIndex<A>>
	where
		D: Document + ?Sized,
	{
		resolve_identity(doc).and_then(|id| self.registry.get(id))
	}

	fn acquire_for<D>(&self, doc: &mut D) -> Acquired<A>
	where
		D: Document<Annotation = A> + ?Sized,
	{
		let id = match resolve_identity(doc) {
			Some(id) => id,
			None => {
				let id = DocumentId::new_random();
				doc.stamp_identity(id);
				id
			}
		};

		let acquired = self.registry.acquire(id);
		if acquired.created {
			backfill(id, doc, &mut acquired.index.lock());
		}
		acquired
	}
}

fn backfill<D>(id: DocumentId, doc: &D, root: &mut Root<D::Annotation>)
where
	D: Document + ?Sized,
{
	let mut count = 0usize;
	for annotation in doc.annotations() {
		let span = annotation.span();
		match root.insert(annotation) {
			Ok(()) => count += 1,
			Err(error) => warn!(%id, ?span, %error, "Skipped annotation during index backfill"),
		}
	}
	debug!(%id, count, "Backfilled annotation index");
}
