use std::sync::Arc;

use spandex_primitives::{Annotation, AnnotationType, CharIdx, Span};

use crate::leaf::Leaf;
use crate::query::{Matches, Relation};
use crate::{IndexError, IntervalIndex, Result};

/// Inner node splitting its axis range at a fixed midpoint.
///
/// Everything with `begin <= split` is reachable from `left`; everything with
/// `end > split` is reachable from `right`. Annotations straddling the split
/// are stored on both sides.
pub struct Node<A: ?Sized> {
	split: CharIdx,
	left: Subtree<A>,
	right: Subtree<A>,
}

/// Child slot of a node.
pub enum Subtree<A: ?Sized> {
	Leaf(Leaf<A>),
	Node(Box<Node<A>>),
}

fn midpoint(start: CharIdx, end: CharIdx) -> CharIdx {
	start + (end - start) / 2
}

impl<A: Annotation + ?Sized> Node<A> {
	/// Builds an empty node for the axis range `[start, end]`.
	///
	/// Children are inner nodes while the half-width exceeds `min_leaf_size`,
	/// leaves otherwise.
	pub fn build(start: CharIdx, end: CharIdx, min_leaf_size: usize) -> Self {
		let split = midpoint(start, end);
		let branch = split - start > min_leaf_size;
		Self {
			split,
			left: Subtree::empty(start, split, branch, min_leaf_size),
			right: Subtree::empty(split + 1, end, branch, min_leaf_size),
		}
	}

	/// Builds a node for `[0, end]` that adopts `left` as its lower half.
	///
	/// `left` must have been built for `[0, end / 2]`.
	pub(crate) fn grown(left: Subtree<A>, end: CharIdx, min_leaf_size: usize) -> Self {
		let split = midpoint(0, end);
		Self {
			split,
			left,
			right: Subtree::empty(split + 1, end, split > min_leaf_size, min_leaf_size),
		}
	}

	/// Axis offset partitioning the two children.
	pub fn split(&self) -> CharIdx {
		self.split
	}

	pub(crate) fn push(&mut self, annotation: Arc<A>) {
		let span = annotation.span();
		let left = span.begin() <= self.split;
		let right = span.end() > self.split;
		match (left, right) {
			(true, true) => {
				self.left.push(Arc::clone(&annotation));
				self.right.push(annotation);
			}
			(true, false) => self.left.push(annotation),
			_ => self.right.push(annotation),
		}
	}

	pub(crate) fn take(&mut self, annotation: &Arc<A>) -> bool {
		let span = annotation.span();
		let mut removed = false;
		if span.begin() <= self.split {
			removed |= self.left.take(annotation);
		}
		if span.end() > self.split {
			removed |= self.right.take(annotation);
		}
		removed
	}

	pub(crate) fn contains(&self, annotation: &Arc<A>) -> bool {
		if annotation.begin() <= self.split {
			self.left.contains(annotation)
		} else {
			self.right.contains(annotation)
		}
	}

	pub(crate) fn collect_into(
		&mut self,
		relation: Relation,
		window: Span,
		ty: &AnnotationType,
		out: &mut Matches<A>,
	) {
		if window.begin() <= self.split {
			self.left.collect_into(relation, window, ty, out);
		}
		if window.end() > self.split {
			self.right.collect_into(relation, window, ty, out);
		}
	}

	pub(crate) fn release(&mut self) {
		self.left.release();
		self.right.release();
	}
}

impl<A: Annotation + ?Sized> IntervalIndex<A> for Node<A> {
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

impl<A: Annotation + ?Sized> Subtree<A> {
	pub(crate) fn empty(start: CharIdx, end: CharIdx, branch: bool, min_leaf_size: usize) -> Self {
		if branch {
			Self::Node(Box::new(Node::build(start, end, min_leaf_size)))
		} else {
			Self::Leaf(Leaf::new())
		}
	}

	pub(crate) fn push(&mut self, annotation: Arc<A>) {
		match self {
			Self::Leaf(leaf) => leaf.push(annotation),
			Self::Node(node) => node.push(annotation),
		}
	}

	pub(crate) fn take(&mut self, annotation: &Arc<A>) -> bool {
		match self {
			Self::Leaf(leaf) => leaf.take(annotation),
			Self::Node(node) => node.take(annotation),
		}
	}

	pub(crate) fn contains(&self, annotation: &Arc<A>) -> bool {
		match self {
			Self::Leaf(leaf) => leaf.contains(annotation),
			Self::Node(node) => node.contains(annotation),
		}
	}

	pub(crate) fn collect_into(
		&mut self,
		relation: Relation,
		window: Span,
		ty: &AnnotationType,
		out: &mut Matches<A>,
	) {
		match self {
			Self::Leaf(leaf) => leaf.collect_into(relation, window, ty, out),
			Self::Node(node) => node.collect_into(relation, window, ty, out),
		}
	}

	pub(crate) fn release(&mut self) {
		match self {
			Self::Leaf(leaf) => leaf.release(),
			Self::Node(node) => node.release(),
		}
	}

	/// Number of levels below and including this subtree.
	pub(crate) fn depth(&self) -> usize {
		match self {
			Self::Leaf(_) => 1,
			Self::Node(node) => 1 + node.left.depth().max(node.right.depth()),
		}
	}
}
