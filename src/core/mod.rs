//! In-memory student directory, tests, and the registry tying them together.

/// Student and card directory.
pub mod directory;
/// Batch import parser and validation.
pub mod import;
/// Helper index aliases.
pub mod indices;
/// Exam registry orchestrating enrollment, grading, and listings.
pub mod registry;
/// Ordering of graded listings.
pub mod report;
/// Per-test enrollment and grading state.
pub mod test_record;
