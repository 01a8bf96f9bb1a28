//! Annotation type hierarchy.
//!
//! Types form a single-inheritance tree. A query for type `T` matches every
//! annotation whose type is `T` or one of its descendants, the same way an
//! instance-of test behaves against a class hierarchy.


use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use rustc_hash::FxHashMap;
use thiserror::Error;

/// Name of the type every [`TypeSystem`] starts with.
pub const TOP_TYPE_NAME: &str = "Annotation";

/// Errors raised while defining annotation types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
	/// A type with this name is already defined.
	#[error("annotation type already defined: {0}")]
	Duplicate(String),
	/// The requested parent was not defined by this type system.
	#[error("parent type {0} does not belong to this type system")]
	ForeignParent(String),
}

struct TypeDef {
	name: Box<str>,
	parent: Option<AnnotationType>,
}

/// Handle to one node of the type hierarchy.
///
/// Handles compare by identity: two types with the same name created
/// independently are distinct.
#[derive(Clone)]
pub struct AnnotationType(Arc<TypeDef>);

impl AnnotationType {
	/// Creates a new hierarchy root with no supertype.
	pub fn root(name: impl Into<Box<str>>) -> Self {
		Self(Arc::new(TypeDef {
			name: name.into(),
			parent: None,
		}))
	}

	/// Creates a new direct subtype of `self`.
	pub fn subtype(&self, name: impl Into<Box<str>>) -> Self {
		Self(Arc::new(TypeDef {
			name: name.into(),
			parent: Some(self.clone()),
		}))
	}

	/// Type name.
	pub fn name(&self) -> &str {
		&self.0.name
	}

	/// Direct supertype, if any.
	pub fn parent(&self) -> Option<&AnnotationType> {
		self.0.parent.as_ref()
	}

	/// Iterates `self` followed by every supertype up to the root.
	pub fn ancestors(&self) -> Ancestors<'_> {
		Ancestors { next: Some(self) }
	}

	/// Returns true if `self` is `other` or a subtype of `other`.
	pub fn is_a(&self, other: &AnnotationType) -> bool {
		self.ancestors().any(|ty| ty == other)
	}

	/// Number of supertypes between `self` and the root.
	pub fn depth(&self) -> usize {
		self.ancestors().count() - 1
	}
}

impl PartialEq for AnnotationType {
	fn eq(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.0, &other.0)
	}
}

impl Eq for AnnotationType {}

impl Hash for AnnotationType {
	fn hash<H: Hasher>(&self, state: &mut H) {
		Arc::as_ptr(&self.0).hash(state);
	}
}

impl fmt::Debug for AnnotationType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("AnnotationType").field(&self.name()).finish()
	}
}

impl fmt::Display for AnnotationType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// Iterator over a type and its supertypes.
pub struct Ancestors<'a> {
	next: Option<&'a AnnotationType>,
}

impl<'a> Iterator for Ancestors<'a> {
	type Item = &'a AnnotationType;

	fn next(&mut self) -> Option<Self::Item> {
		let current = self.next?;
		self.next = current.parent();
		Some(current)
	}
}

/// Interns annotation types by name under a shared top type.
///
/// The type system is built once and then read; it is not meant to be
/// mutated while documents are being indexed.
#[derive(Debug, Clone)]
pub struct TypeSystem {
	top: AnnotationType,
	by_name: FxHashMap<Box<str>, AnnotationType>,
}

impl TypeSystem {
	/// Creates a type system holding only the top type.
	pub fn new() -> Self {
		let top = AnnotationType::root(TOP_TYPE_NAME);
		let mut by_name = FxHashMap::default();
		by_name.insert(Box::from(TOP_TYPE_NAME), top.clone());
		Self { top, by_name }
	}

	/// The type every other type descends from.
	pub fn top(&self) -> &AnnotationType {
		&self.top
	}

	/// Defines `name` as a direct subtype of `parent`.
	pub fn define(&mut self, name: &str, parent: &AnnotationType) -> Result<AnnotationType, TypeError> {
		if self.by_name.contains_key(name) {
			return Err(TypeError::Duplicate(name.to_owned()));
		}
		if self.by_name.get(parent.name()) != Some(parent) {
			return Err(TypeError::ForeignParent(parent.name().to_owned()));
		}
		let ty = parent.subtype(name);
		self.by_name.insert(Box::from(name), ty.clone());
		Ok(ty)
	}

	/// Looks up a type by name.
	pub fn get(&self, name: &str) -> Option<&AnnotationType> {
		self.by_name.get(name)
	}

	/// Number of defined types, the top type included.
	pub fn len(&self) -> usize {
		self.by_name.len()
	}

	/// Always false; the top type is always present.
	pub fn is_empty(&self) -> bool {
		self.by_name.is_empty()
	}
}

impl Default for TypeSystem {
	fn default() -> Self {
		Self::new()
	}
}
