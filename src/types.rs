//! Shared primitive IDs and listing enums.

use serde::{Deserialize, Serialize};

/// Numeric student identifier.
pub type StudentId = u32;
/// Grade value assigned by an assessment.
pub type Grade = i32;
/// Per-test grading sequence number, starting at 0.
pub type GradeSeq = u64;

/// Ordering applied to graded rows of a test listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortBy {
    /// First graded first.
    GradingOrder,
    /// Ascending student identifier.
    StudentId,
    /// Ascending display name.
    Name,
    /// Descending grade.
    Grade,
}

impl SortBy {
    /// Maps the legacy numeric sort codes (0 through 3).
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::GradingOrder),
            1 => Some(Self::StudentId),
            2 => Some(Self::Name),
            3 => Some(Self::Grade),
            _ => None,
        }
    }
}
