//! Query relations and result collection.

use std::sync::Arc;

use rustc_hash::FxHashSet;
use spandex_primitives::Span;

/// Relationship between a stored annotation and a query window.
///
/// The names describe the window's role: a covering query returns what the
/// window covers, a covered query returns what covers the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
	/// Annotations contained by the window.
	Covering,
	/// Annotations that contain the window.
	Covered,
	/// Annotations overlapping the window.
	Collision,
}

impl Relation {
	/// Returns true if an annotation over `span` satisfies this relation.
	#[inline]
	pub fn matches(self, span: Span, window: Span) -> bool {
		match self {
			Self::Covering => window.encloses(&span),
			Self::Covered => span.encloses(&window),
			Self::Collision => {
				(span.begin() <= window.begin() && span.end() > window.begin())
					|| (span.begin() >= window.begin() && span.begin() <= window.end())
			}
		}
	}
}

/// Address-based identity of a shared annotation handle.
#[inline]
pub(crate) fn identity<A: ?Sized>(annotation: &Arc<A>) -> usize {
	Arc::as_ptr(annotation).cast::<()>().addr()
}

/// Query output that keeps first-seen order and drops repeated handles.
///
/// Annotations straddling a split are reachable from both children, so the
/// same handle can surface from several leaves.
pub(crate) struct Matches<A: ?Sized> {
	seen: FxHashSet<usize>,
	found: Vec<Arc<A>>,
}

impl<A: ?Sized> Matches<A> {
	pub(crate) fn new() -> Self {
		Self {
			seen: FxHashSet::default(),
			found: Vec::new(),
		}
	}

	pub(crate) fn push(&mut self, annotation: &Arc<A>) {
		if self.seen.insert(identity(annotation)) {
			self.found.push(Arc::clone(annotation));
		}
	}

	pub(crate) fn into_vec(self) -> Vec<Arc<A>> {
		self.found
	}
}
