use std::num::NonZeroUsize;

use pretty_assertions::assert_eq;
use spandex_primitives::{TextAnnotation, TypeSystem};

use super::*;

struct Fixture {
	types: TypeSystem,
	x: AnnotationType,
	y: AnnotationType,
}

impl Fixture {
	fn new() -> Self {
		let mut types = TypeSystem::new();
		let top = types.top().clone();
		let x = types.define("TypeX", &top).unwrap();
		let y = types.define("TypeY", &top).unwrap();
		Self { types, x, y }
	}

	fn ann(&self, begin: usize, end: usize, ty: &AnnotationType) -> Arc<TextAnnotation> {
		Arc::new(TextAnnotation::new(begin, end, ty.clone()).unwrap())
	}
}

fn window(begin: usize, end: usize) -> Span {
	Span::new(begin, end).unwrap()
}

fn same(found: &[Arc<TextAnnotation>], expected: &[&Arc<TextAnnotation>]) -> bool {
	found.len() == expected.len() && found.iter().zip(expected).all(|(a, b)| Arc::ptr_eq(a, b))
}

#[test]
fn test_fresh_root_covers_one_leaf() {
	let root = Root::<TextAnnotation>::new();
	assert_eq!(root.bound(), 20);
	assert_eq!(root.depth(), 1);
	assert!(root.is_empty());
	assert!(!root.is_cleared());
}

#[test]
fn test_covered_returns_containing_spans() {
	let f = Fixture::new();
	let mut root = Root::new();
	let a = f.ann(0, 5, &f.x);
	let b = f.ann(3, 8, &f.x);
	let c = f.ann(0, 10, &f.y);
	for ann in [&a, &b, &c] {
		root.insert(Arc::clone(ann)).unwrap();
	}

	assert!(root.covered(window(2, 6), &f.x).is_empty());
	assert!(same(&root.covered(window(2, 6), &f.y), &[&c]));
	assert!(same(&root.covered(window(2, 6), f.types.top()), &[&c]));
}

#[test]
fn test_covering_orders_by_begin() {
	let f = Fixture::new();
	let mut root = Root::new();
	let a = f.ann(0, 5, &f.x);
	let b = f.ann(3, 8, &f.x);
	let c = f.ann(0, 10, &f.y);
	root.insert(Arc::clone(&b)).unwrap();
	root.insert(Arc::clone(&c)).unwrap();
	root.insert(Arc::clone(&a)).unwrap();

	assert!(same(&root.covering(window(0, 10), &f.x), &[&a, &b]));
}

#[test]
fn test_insert_past_bound_grows() {
	let f = Fixture::new();
	let mut root = Root::new();
	let a = f.ann(0, 5, &f.x);
	root.insert(Arc::clone(&a)).unwrap();
	assert_eq!(root.bound(), 20);

	let d = f.ann(0, 50, &f.x);
	root.insert(Arc::clone(&d)).unwrap();
	assert_eq!(root.bound(), 80);
	assert!(root.depth() > 1);

	assert!(same(&root.collisions(window(25, 30), &f.x), &[&d]));
	assert!(same(&root.covering(window(0, 5), &f.x), &[&a]));
}

#[test]
fn test_remove_then_collide() {
	let f = Fixture::new();
	let mut root = Root::new();
	let a = f.ann(0, 5, &f.x);
	let b = f.ann(3, 8, &f.x);
	let c = f.ann(0, 10, &f.y);
	for ann in [&a, &b, &c] {
		root.insert(Arc::clone(ann)).unwrap();
	}

	assert!(root.remove(&b));
	assert_eq!(root.len(), 2);
	assert!(same(&root.collisions(window(3, 8), &f.x), &[&a]));
}

#[test]
fn test_remove_absent_is_noop() {
	let f = Fixture::new();
	let mut root = Root::new();
	let a = f.ann(0, 5, &f.x);
	assert!(!root.remove(&a));
	root.insert(Arc::clone(&a)).unwrap();
	assert!(root.remove(&a));
	assert!(!root.remove(&a));
	assert!(root.is_empty());
}

#[test]
fn test_query_past_bound_finds_nothing() {
	let f = Fixture::new();
	let mut root = Root::new();
	root.insert(f.ann(0, 5, &f.x)).unwrap();
	assert!(root.collisions(window(500, 900), &f.x).is_empty());
	assert_eq!(root.bound(), 20);
}

#[test]
fn test_bound_stays_power_of_two_multiple() {
	let f = Fixture::new();
	let mut root = Root::new();
	for end in [21, 75, 300, 1_000, 4_097] {
		root.insert(f.ann(end - 1, end, &f.x)).unwrap();
		let bound = root.bound();
		assert!(bound >= end);
		assert_eq!(bound % 20, 0);
		assert!((bound / 20).is_power_of_two());
	}
}

#[test]
fn test_end_equal_to_bound_does_not_grow() {
	let f = Fixture::new();
	let mut root = Root::new();
	root.insert(f.ann(10, 20, &f.x)).unwrap();
	assert_eq!(root.bound(), 20);
	root.insert(f.ann(10, 21, &f.x)).unwrap();
	assert_eq!(root.bound(), 40);
}

#[test]
fn test_explicit_grow() {
	let mut root = Root::<TextAnnotation>::new();
	root.grow(10).unwrap();
	assert_eq!(root.bound(), 20);
	root.grow(161).unwrap();
	assert_eq!(root.bound(), 320);
}

#[test]
fn test_grow_overflow_rejected() {
	let mut root = Root::<TextAnnotation>::new();
	let err = root.grow(usize::MAX).unwrap_err();
	assert!(matches!(err, IndexError::BoundOverflow { requested: usize::MAX, .. }));
	assert_eq!(root.bound(), 20);
	assert_eq!(root.depth(), 1);
}

#[test]
fn test_straddler_found_once_after_growth() {
	let f = Fixture::new();
	let mut root = Root::new();
	let wide = f.ann(5, 300, &f.x);
	root.insert(Arc::clone(&wide)).unwrap();
	for begin in (0..300).step_by(25) {
		root.insert(f.ann(begin, begin + 3, &f.y)).unwrap();
	}

	let found = root.collisions(window(0, 320), &f.x);
	assert!(same(&found, &[&wide]));
	assert!(same(&root.covered(window(100, 200), &f.x), &[&wide]));
}

#[test]
fn test_leaf_local_order_across_leaves() {
	let f = Fixture::new();
	let mut root = Root::new();
	root.grow(160).unwrap();
	let spans = [(120, 125), (3, 9), (60, 70), (3, 4), (150, 151), (61, 62)];
	for (begin, end) in spans {
		root.insert(f.ann(begin, end, &f.x)).unwrap();
	}

	let mut found: Vec<_> = root.covering(window(0, 160), &f.x).iter().map(|a| a.span()).collect();
	assert_eq!(found.len(), spans.len());
	found.sort();
	let mut expected: Vec<_> = spans.iter().map(|&(b, e)| window(b, e)).collect();
	expected.sort();
	assert_eq!(found, expected);
}

#[test]
fn test_subtype_matches_supertype_query() {
	let mut types = TypeSystem::new();
	let top = types.top().clone();
	let token = types.define("Token", &top).unwrap();
	let word = types.define("Word", &token).unwrap();
	let mut root = Root::new();
	let w = Arc::new(TextAnnotation::new(0, 4, word.clone()).unwrap());
	root.insert(Arc::clone(&w)).unwrap();

	assert_eq!(root.covering(window(0, 10), &token).len(), 1);
	assert_eq!(root.covering(window(0, 10), &word).len(), 1);
	assert_eq!(root.covering(window(0, 10), &top).len(), 1);
}

#[test]
fn test_clear_is_terminal() {
	let f = Fixture::new();
	let mut root = Root::new();
	let a = f.ann(0, 5, &f.x);
	root.insert(Arc::clone(&a)).unwrap();
	root.insert(f.ann(0, 60, &f.x)).unwrap();
	root.clear();

	assert!(root.is_cleared());
	assert!(root.is_empty());
	assert_eq!(Arc::strong_count(&a), 1);
	assert!(root.collisions(window(0, 10), &f.x).is_empty());
	assert!(!root.remove(&a));
	assert!(!root.contains(&a));
	assert_eq!(root.insert(Arc::clone(&a)), Err(IndexError::Cleared));
	assert_eq!(root.grow(1_000), Err(IndexError::Cleared));
}

#[test]
fn test_contains_tracks_identity() {
	let f = Fixture::new();
	let mut root = Root::new();
	let a = f.ann(10, 90, &f.x);
	let twin = f.ann(10, 90, &f.x);
	root.insert(Arc::clone(&a)).unwrap();
	assert!(root.contains(&a));
	assert!(!root.contains(&twin));
}

#[test]
fn test_custom_leaf_size() {
	let config = IndexConfig {
		min_leaf_size: NonZeroUsize::new(4).unwrap(),
	};
	let f = Fixture::new();
	let mut root = Root::with_config(&config);
	assert_eq!(root.bound(), 4);
	let a = f.ann(30, 31, &f.x);
	root.insert(Arc::clone(&a)).unwrap();
	assert_eq!(root.bound(), 32);
	assert!(root.depth() >= 3);
	assert!(same(&root.collisions(window(30, 30), &f.x), &[&a]));
}

#[test]
fn test_zero_width_annotation() {
	let f = Fixture::new();
	let mut root = Root::new();
	root.grow(80).unwrap();
	let point = f.ann(40, 40, &f.x);
	root.insert(Arc::clone(&point)).unwrap();
	assert!(same(&root.covering(window(40, 40), &f.x), &[&point]));
	assert!(same(&root.collisions(window(38, 45), &f.x), &[&point]));
	assert!(root.remove(&point));
}
