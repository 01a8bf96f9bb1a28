use std::sync::Arc;

use spandex_primitives::{Annotation, DocumentId, Span, TextAnnotation};

use crate::document::Document;

/// In-memory document: text plus an annotation list.
///
/// Offsets are character offsets into `text`. Mutating the annotation list
/// does not notify any index; route changes through
/// [`DocumentIndexer`](crate::DocumentIndexer) to keep them in step.
#[derive(Debug)]
pub struct MemoryDocument<A: ?Sized = TextAnnotation> {
	text: String,
	identities: Vec<DocumentId>,
	annotations: Vec<Arc<A>>,
}

impl<A: Annotation + ?Sized> MemoryDocument<A> {
	/// Creates a document over `text` with no annotations.
	pub fn new(text: impl Into<String>) -> Self {
		Self {
			text: text.into(),
			identities: Vec::new(),
			annotations: Vec::new(),
		}
	}

	/// The document text.
	pub fn text(&self) -> &str {
		&self.text
	}

	/// Returns the text under `span`, or `None` if it runs past the end.
	pub fn covered_text(&self, span: Span) -> Option<&str> {
		let byte_at = |char_idx: usize| {
			self.text
				.char_indices()
				.map(|(byte, _)| byte)
				.chain(std::iter::once(self.text.len()))
				.nth(char_idx)
		};
		let start = byte_at(span.begin())?;
		let end = byte_at(span.end())?;
		self.text.get(start..end)
	}

	/// Appends an annotation without touching any index.
	pub fn push(&mut self, annotation: Arc<A>) {
		self.annotations.push(annotation);
	}

	/// Drops the first entry that is `annotation` by identity.
	pub fn remove(&mut self, annotation: &Arc<A>) -> bool {
		let Some(pos) = self.annotations.iter().position(|a| Arc::ptr_eq(a, annotation)) else {
			return false;
		};
		self.annotations.remove(pos);
		true
	}

	/// Drops every annotation and identity.
	pub fn reset(&mut self) {
		self.identities.clear();
		self.annotations.clear();
	}

	/// Number of annotations on the document.
	pub fn len(&self) -> usize {
		self.annotations.len()
	}

	/// Returns true if the document carries no annotations.
	pub fn is_empty(&self) -> bool {
		self.annotations.is_empty()
	}
}

impl<A: Annotation + ?Sized> Document for MemoryDocument<A> {
	type Annotation = A;

	fn identities(&self) -> impl Iterator<Item = DocumentId> + '_ {
		self.identities.iter().copied()
	}

	fn stamp_identity(&mut self, id: DocumentId) {
		self.identities.push(id);
	}

	fn annotations(&self) -> impl Iterator<Item = Arc<A>> + '_ {
		self.annotations.iter().cloned()
	}
}
