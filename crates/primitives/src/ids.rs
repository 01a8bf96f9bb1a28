use std::fmt;

use uuid::Uuid;

/// Stable 128-bit identity of one document.
///
/// Minted once per document and stamped onto it; the index registry keys
/// each live interval index by this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(Uuid);

impl DocumentId {
	/// Mints a fresh random identity.
	pub fn new_random() -> Self {
		Self(Uuid::new_v4())
	}

	/// Rebuilds an identity from its 128-bit value.
	pub fn from_u128(value: u128) -> Self {
		Self(Uuid::from_u128(value))
	}

	/// Rebuilds an identity from its most and least significant halves,
	/// the form in which it is usually stored alongside a document.
	pub fn from_u64_pair(most: u64, least: u64) -> Self {
		Self(Uuid::from_u64_pair(most, least))
	}

	/// Returns the 128-bit value.
	pub fn as_u128(&self) -> u128 {
		self.0.as_u128()
	}

	/// Returns the most and least significant halves.
	pub fn as_u64_pair(&self) -> (u64, u64) {
		self.0.as_u64_pair()
	}

	/// Returns the underlying UUID.
	pub const fn as_uuid(&self) -> &Uuid {
		&self.0
	}
}

impl From<Uuid> for DocumentId {
	fn from(uuid: Uuid) -> Self {
		Self(uuid)
	}
}

impl fmt::Display for DocumentId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Display::fmt(&self.0, f)
	}
}
