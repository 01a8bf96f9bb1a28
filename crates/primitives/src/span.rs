use thiserror::Error;

/// A position in document text, measured in characters (not bytes).
pub type CharIdx = usize;

/// A length or count in document text, measured in characters.
///
/// This is distinct from CharIdx to avoid accidentally passing an index
/// where a length is expected or vice versa.
pub type CharLen = usize;

/// Errors raised while building a [`Span`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SpanError {
	/// The end offset lies before the begin offset.
	#[error("inverted span: end {end} is before begin {begin}")]
	Inverted {
		/// Inclusive start offset that was requested.
		begin: CharIdx,
		/// Exclusive end offset that was requested.
		end: CharIdx,
	},
}

/// A half-open character interval `[begin, end)`.
///
/// Spans are always well-formed: [`Span::new`] is the only way to build one
/// from arbitrary offsets and it rejects `end < begin`. The derived ordering
/// sorts by `begin`, then by `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Span {
	begin: CharIdx,
	end: CharIdx,
}

impl Span {
	/// Creates a span from `begin` (inclusive) to `end` (exclusive).
	pub const fn new(begin: CharIdx, end: CharIdx) -> Result<Self, SpanError> {
		if end < begin {
			return Err(SpanError::Inverted { begin, end });
		}
		Ok(Self { begin, end })
	}

	/// Creates a zero-width span at the given position.
	pub const fn point(pos: CharIdx) -> Self {
		Self { begin: pos, end: pos }
	}

	/// Inclusive start offset.
	#[inline]
	pub const fn begin(&self) -> CharIdx {
		self.begin
	}

	/// Exclusive end offset.
	#[inline]
	pub const fn end(&self) -> CharIdx {
		self.end
	}

	/// Returns the length of the span in characters.
	#[inline]
	pub const fn len(&self) -> CharLen {
		self.end - self.begin
	}

	/// Returns true if the span covers no characters.
	#[inline]
	pub const fn is_empty(&self) -> bool {
		self.begin == self.end
	}

	/// Returns true if `other` lies entirely inside this span.
	pub const fn encloses(&self, other: &Span) -> bool {
		self.begin <= other.begin && self.end >= other.end
	}
}

impl TryFrom<std::ops::Range<CharIdx>> for Span {
	type Error = SpanError;

	fn try_from(range: std::ops::Range<CharIdx>) -> Result<Self, Self::Error> {
		Self::new(range.start, range.end)
	}
}

impl From<Span> for std::ops::Range<CharIdx> {
	fn from(span: Span) -> Self {
		span.begin..span.end
	}
}
