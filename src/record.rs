//! Student, card, enrollment, and listing row types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{Grade, GradeSeq, StudentId};

/// Imported student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// Unique student identifier.
    pub id: StudentId,
    /// Display name, kept verbatim from the import line.
    pub name: String,
}

/// Card token with all whitespace removed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(String);

impl CardId {
    /// Strips every whitespace character from `raw`.
    pub fn normalize(raw: &str) -> Self {
        Self(raw.chars().filter(|c| !c.is_whitespace()).collect())
    }

    /// Normalized token text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when nothing is left after normalization.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Grade assigned to an enrollment together with its grading sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grading {
    /// Position in the test's grading order.
    pub seq: GradeSeq,
    /// Assigned grade.
    pub grade: Grade,
}

/// One student's enrollment in one test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrollment {
    /// Enrolled student.
    pub student_id: StudentId,
    /// Set exactly once, when the student is graded.
    pub grading: Option<Grading>,
}

impl Enrollment {
    /// Fresh, ungraded enrollment.
    pub fn new(student_id: StudentId) -> Self {
        Self {
            student_id,
            grading: None,
        }
    }

    /// Returns true once a grade has been assigned.
    pub fn is_graded(&self) -> bool {
        self.grading.is_some()
    }
}

/// Graded row returned by test listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamResult {
    /// Student display name.
    pub name: String,
    /// Student identifier.
    pub student_id: StudentId,
    /// Test name.
    pub test: String,
    /// Assigned grade.
    pub grade: Grade,
}

impl ExamResult {
    /// Builds a row from its parts.
    pub fn new(name: impl Into<String>, student_id: StudentId, test: impl Into<String>, grade: Grade) -> Self {
        Self {
            name: name.into(),
            student_id,
            test: test.into(),
            grade,
        }
    }
}
