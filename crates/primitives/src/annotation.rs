use crate::span::{CharIdx, Span, SpanError};
use crate::types::AnnotationType;

/// A typed span over a document's text.
///
/// Implementors are owned by the document model; indices only hold shared
/// handles to them and never mutate them. The span and type must stay fixed
/// for as long as the annotation is indexed.
pub trait Annotation: Send + Sync {
	/// Character interval covered by this annotation.
	fn span(&self) -> Span;

	/// Runtime type of this annotation.
	fn annotation_type(&self) -> &AnnotationType;

	/// Inclusive start offset.
	#[inline]
	fn begin(&self) -> CharIdx {
		self.span().begin()
	}

	/// Exclusive end offset.
	#[inline]
	fn end(&self) -> CharIdx {
		self.span().end()
	}

	/// Returns true if this annotation is of type `ty` or one of its subtypes.
	#[inline]
	fn is_a(&self, ty: &AnnotationType) -> bool {
		self.annotation_type().is_a(ty)
	}
}

/// Plain annotation carrying only a span and a type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextAnnotation {
	span: Span,
	ty: AnnotationType,
}

impl TextAnnotation {
	/// Creates an annotation over `[begin, end)`.
	pub fn new(begin: CharIdx, end: CharIdx, ty: AnnotationType) -> Result<Self, SpanError> {
		Ok(Self::with_span(Span::new(begin, end)?, ty))
	}

	/// Creates an annotation over an existing span.
	pub const fn with_span(span: Span, ty: AnnotationType) -> Self {
		Self { span, ty }
	}
}

impl Annotation for TextAnnotation {
	fn span(&self) -> Span {
		self.span
	}

	fn annotation_type(&self) -> &AnnotationType {
		&self.ty
	}
}
