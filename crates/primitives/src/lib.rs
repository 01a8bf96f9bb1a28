//! Core types for annotation indexing: spans, annotation types, and document ids.

/// The annotation trait and a plain implementation.
pub mod annotation;
/// Document identity.
pub mod ids;
/// Half-open character intervals.
pub mod span;
/// Annotation type hierarchy.
pub mod types;

pub use annotation::{Annotation, TextAnnotation};
pub use ids::DocumentId;
pub use span::{CharIdx, CharLen, Span, SpanError};
pub use types::{AnnotationType, TOP_TYPE_NAME, TypeError, TypeSystem};
