use serde::{Deserialize, Serialize};

/// Location inside a translation unit.
///
/// Locations are byte offsets into the preprocessed source; the parser
/// collaborator guarantees they are totally ordered by plain integer order.
pub type SourceLoc = u32;

/// Half-open range of source locations.
///
/// A range with `start == end` is degenerate and contains nothing; tracker
/// slots start out this way until the traversal fills them in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SourceRange {
    /// Start location (inclusive).
    pub start: SourceLoc,

    /// End location (exclusive).
    pub end: SourceLoc,
}

impl SourceRange {
    /// Range covering the whole translation unit.
    pub fn whole_unit() -> Self {
        Self {
            start: 0,
            end: SourceLoc::MAX,
        }
    }

    /// Degenerate empty range anchored at the start of the unit.
    pub fn degenerate() -> Self {
        Self { start: 0, end: 0 }
    }

    /// True if `loc` lies within `[start, end)`.
    pub fn contains(&self, loc: SourceLoc) -> bool {
        self.start <= loc && loc < self.end
    }

    /// True if `other` lies entirely within this range.
    ///
    /// Used for the mutation-window check, where the whole literal must fit.
    pub fn contains_range(&self, other: &SourceRange) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}
