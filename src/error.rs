use core::fmt;

use thiserror::Error;

/// How unsafe it is to keep using a stale cursor.
///
/// Variants are ordered by escalation: `Mild < Moderate < Severe`.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub enum Severity {
    /// The container changed, but its storage block was not replaced and
    /// the cursor's index is still within bounds.
    Mild,
    /// The storage block was replaced. The index is still within bounds,
    /// but it may now name a different logical element.
    Moderate,
    /// The index no longer falls within `0..=len`.
    Severe,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Severity::Mild => "Mild",
            Severity::Moderate => "Moderate",
            Severity::Severe => "Severe",
        };
        f.write_str(name)
    }
}

/// Details of a failed cursor revalidation.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Invalidation {
    /// Classification of the staleness
    pub severity: Severity,
    /// Logical index the cursor was tracking
    pub index: isize,
    /// Length of the container when the staleness was detected
    pub length: usize,
    /// Container version captured by the cursor
    pub captured_version: u64,
    /// Container version at detection time
    pub current_version: u64,
}

impl fmt::Display for Invalidation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} invalidation: cursor at index {} (container length {}) captured version {}, container is at version {}",
            self.severity, self.index, self.length, self.captured_version, self.current_version
        )
    }
}

/// Error types for `TrackedVec` operations
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum TrackedVecError {
    /// Index is beyond the current vector length
    #[error("Index out of bounds: index {index} is beyond vector length {length}")]
    IndexOutOfBounds {
        /// Index that was accessed
        index: usize,
        /// Current length of the vector
        length: usize,
    },
    /// A valid cursor was dereferenced at a position holding no element
    #[error("Cursor out of range: position {index} holds no element in a vector of length {length}")]
    CursorOutOfRange {
        /// Logical position of the cursor
        index: isize,
        /// Current length of the vector
        length: usize,
    },
    /// Removal attempted on an empty vector
    #[error("Operation on empty vector")]
    EmptyVector,
    /// A cursor was used after the vector changed underneath it
    #[error("Invalid cursor: {0}")]
    InvalidCursor(Invalidation),
    /// A cursor was used with a vector other than the one that created it
    #[error("Cursor belongs to a different vector")]
    ForeignCursor,
}

impl TrackedVecError {
    /// Returns the severity for cursor invalidation errors, `None` otherwise.
    #[must_use]
    pub fn severity(&self) -> Option<Severity> {
        match self {
            TrackedVecError::InvalidCursor(invalidation) => Some(invalidation.severity),
            _ => None,
        }
    }
}
