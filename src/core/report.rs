use std::cmp::Ordering;

use crate::{record::Grading, types::{SortBy, StudentId}};

/// Graded enrollment joined with the student's display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GradedRow<'a> {
    /// Student display name.
    pub name: &'a str,
    /// Student identifier.
    pub student_id: StudentId,
    /// Grade and grading sequence.
    pub grading: Grading,
}

/// Sorts `rows` in place. With `tie_break_by_id`, rows equal under
/// `sort_by` are ordered by ascending student id.
pub fn sort_rows(rows: &mut [GradedRow<'_>], sort_by: SortBy, tie_break_by_id: bool) {
    if tie_break_by_id {
        rows.sort_by(|a, b| compare(sort_by, a, b).then_with(|| a.student_id.cmp(&b.student_id)));
    } else {
        rows.sort_unstable_by(|a, b| compare(sort_by, a, b));
    }
}

fn compare(sort_by: SortBy, a: &GradedRow<'_>, b: &GradedRow<'_>) -> Ordering {
    match sort_by {
        SortBy::GradingOrder => a.grading.seq.cmp(&b.grading.seq),
        SortBy::StudentId => a.student_id.cmp(&b.student_id),
        SortBy::Name => a.name.cmp(b.name),
        // highest grade first
        SortBy::Grade => b.grading.grade.cmp(&a.grading.grade),
    }
}
