//! Document id to interval index mapping.


use std::collections::hash_map::Entry;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::{Mutex, RwLock};
use rustc_hash::FxHashMap;
use spandex_index::{IndexConfig, IntervalIndex, Root};
use spandex_primitives::{Annotation, DocumentId};
use tracing::debug;

use crate::config::RegistryConfig;

/// Handle to one document's index.
///
/// The mutex serializes access to a single document's tree and is expected
/// to be uncontended: callers keep to one active accessor per document.
pub type SharedIndex<A> = Arc<Mutex<Root<A>>>;

type Shard<A> = RwLock<FxHashMap<DocumentId, SharedIndex<A>>>;

/// Result of [`IndexRegistry::acquire`].
pub struct Acquired<A: ?Sized> {
	/// The live index for the document.
	pub index: SharedIndex<A>,
	/// True if this call constructed the index.
	pub created: bool,
}

/// Registry of live interval indices keyed by document id.
///
/// Thread-safe for concurrent use across document ids. Entries live in a
/// fixed set of shards, each behind its own `RwLock`, so lookups for
/// unrelated documents rarely contend.
///
/// # Lifecycle
///
/// An entry goes `absent -> live -> removed`. Removing an entry clears its
/// tree; a later [`create_or_get`](Self::create_or_get) for the same id builds
/// a brand-new index.
pub struct IndexRegistry<A: ?Sized> {
	shards: Box<[Shard<A>]>,
	index_config: IndexConfig,
	created: AtomicU64,
}

impl<A: Annotation + ?Sized> IndexRegistry<A> {
	/// Creates an empty registry with the default configuration.
	pub fn new() -> Self {
		Self::with_config(&RegistryConfig::default())
	}

	/// Creates an empty registry.
	pub fn with_config(config: &RegistryConfig) -> Self {
		let shards = (0..config.shards.get()).map(|_| RwLock::new(FxHashMap::default())).collect();
		Self {
			shards,
			index_config: config.index,
			created: AtomicU64::new(0),
		}
	}

	fn shard(&self, id: &DocumentId) -> &Shard<A> {
		let (most, least) = id.as_u64_pair();
		let slot = (most ^ least) % self.shards.len() as u64;
		&self.shards[slot as usize]
	}

	/// Returns the live index for `id`, if any. Never creates.
	pub fn get(&self, id: DocumentId) -> Option<SharedIndex<A>> {
		self.shard(&id).read().get(&id).cloned()
	}

	/// Returns true if `id` has a live index.
	pub fn contains(&self, id: DocumentId) -> bool {
		self.shard(&id).read().contains_key(&id)
	}

	/// Returns the live index for `id`, creating an empty one if needed.
	pub fn create_or_get(&self, id: DocumentId) -> SharedIndex<A> {
		self.acquire(id).index
	}

	/// Like [`create_or_get`](Self::create_or_get), also reporting whether
	/// this call built the index.
	///
	/// Concurrent first calls for one id construct exactly one index; every
	/// caller receives the same handle.
	pub fn acquire(&self, id: DocumentId) -> Acquired<A> {
		let shard = self.shard(&id);
		let existing = shard.read().get(&id).cloned();
		if let Some(index) = existing {
			return Acquired { index, created: false };
		}

		match shard.write().entry(id) {
			Entry::Occupied(entry) => Acquired {
				index: Arc::clone(entry.get()),
				created: false,
			},
			Entry::Vacant(entry) => {
				let index = Arc::new(Mutex::new(Root::with_config(&self.index_config)));
				entry.insert(Arc::clone(&index));
				self.created.fetch_add(1, Ordering::Relaxed);
				debug!(%id, "Created annotation index");
				Acquired { index, created: true }
			}
		}
	}

	/// Detaches the index for `id` and clears it.
	///
	/// Returns false if no index was live; that is not an error.
	pub fn remove(&self, id: DocumentId) -> bool {
		let Some(index) = self.shard(&id).write().remove(&id) else {
			return false;
		};
		index.lock().clear();
		debug!(%id, "Removed annotation index");
		true
	}

	/// Number of live indices.
	pub fn len(&self) -> usize {
		self.shards.iter().map(|shard| shard.read().len()).sum()
	}

	/// Returns true if no index is live.
	pub fn is_empty(&self) -> bool {
		self.shards.iter().all(|shard| shard.read().is_empty())
	}

	/// Total number of indices constructed over the registry's lifetime.
	pub fn created_count(&self) -> u64 {
		self.created.load(Ordering::Relaxed)
	}

	/// Removes and clears every live index. Returns how many were removed.
	pub fn teardown(&self) -> usize {
		let mut removed = 0;
		for shard in self.shards.iter() {
			let drained: Vec<_> = shard.write().drain().collect();
			for (_, index) in drained {
				index.lock().clear();
				removed += 1;
			}
		}
		debug!(removed, "Tore down annotation index registry");
		removed
	}
}

impl<A: Annotation + ?Sized> Default for IndexRegistry<A> {
	fn default() -> Self {
		Self::new()
	}
}
