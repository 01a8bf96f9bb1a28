use std::sync::Arc;

use spandex_primitives::{Annotation, DocumentId};
use tracing::error;

/// A container of annotations that can carry a stable index identity.
///
/// Identities are stored on the document itself, the same way any other
/// annotation would be. A document normally carries zero or one identity.
pub trait Document {
	/// Annotation handle type stored in the document.
	type Annotation: Annotation + ?Sized;

	/// Identities attached to this document, in attachment order.
	fn identities(&self) -> impl Iterator<Item = DocumentId> + '_;

	/// Attaches `id` as this document's identity.
	fn stamp_identity(&mut self, id: DocumentId);

	/// Every annotation currently in the document.
	fn annotations(&self) -> impl Iterator<Item = Arc<Self::Annotation>> + '_;
}

/// Returns the document's identity.
///
/// More than one identity is a caller bug; it is logged and the first one
/// wins.
pub fn resolve_identity<D: Document + ?Sized>(doc: &D) -> Option<DocumentId> {
	let mut ids = doc.identities();
	let first = ids.next()?;
	let extra = ids.count();
	if extra > 0 {
		error!(id = %first, extra, "Document carries multiple index identities; using the first");
	}
	Some(first)
}
