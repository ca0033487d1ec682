use std::collections::BTreeSet;

use hashbrown::hash_map::Entry;

use crate::{
    record::{Enrollment, Grading},
    types::{Grade, GradeSeq, StudentId},
};

use super::{
    indices::EnrollmentIndex,
    registry::{ExamError, RegistryResult},
};

/// Enrollments of a single test and its grading counter.
#[derive(Debug, Clone)]
pub struct TestRecord {
    name: String,
    enrollments: EnrollmentIndex,
    next_grade_seq: GradeSeq,
}

impl TestRecord {
    /// Empty test named `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            enrollments: EnrollmentIndex::new(),
            next_grade_seq: 0,
        }
    }

    /// Test name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Adds an ungraded enrollment for `student`.
    pub fn enroll(&mut self, student: StudentId) -> RegistryResult<()> {
        match self.enrollments.entry(student) {
            Entry::Occupied(_) => Err(ExamError::AlreadyEnrolled {
                student,
                test: self.name.clone(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(Enrollment::new(student));
                Ok(())
            }
        }
    }

    /// Grades an enrolled, ungraded student and returns the assigned
    /// grading sequence number.
    pub fn grade(&mut self, student: StudentId, grade: Grade) -> RegistryResult<GradeSeq> {
        let enrollment = self
            .enrollments
            .get_mut(&student)
            .ok_or_else(|| ExamError::NotEnrolled {
                student,
                test: self.name.clone(),
            })?;

        if let Some(existing) = enrollment.grading {
            return Err(ExamError::AlreadyGraded {
                student,
                test: self.name.clone(),
                grade: existing.grade,
            });
        }

        let seq = self.next_grade_seq;
        self.next_grade_seq += 1;
        enrollment.grading = Some(Grading { seq, grade });
        Ok(seq)
    }

    /// Enrollment of `student`, graded or not.
    pub fn enrollment(&self, student: StudentId) -> Option<&Enrollment> {
        self.enrollments.get(&student)
    }

    /// Graded enrollments in no particular order.
    pub fn graded(&self) -> impl Iterator<Item = (StudentId, Grading)> + '_ {
        self.enrollments
            .values()
            .filter_map(|e| e.grading.map(|g| (e.student_id, g)))
    }

    /// Enrolled students still waiting for a grade.
    pub fn missing(&self) -> BTreeSet<StudentId> {
        self.enrollments
            .values()
            .filter(|e| !e.is_graded())
            .map(|e| e.student_id)
            .collect()
    }

    /// Number of enrolled students.
    pub fn enrolled_count(&self) -> usize {
        self.enrollments.len()
    }

    /// Number of graded students.
    pub fn graded_count(&self) -> usize {
        // Sequence numbers are handed out once per successful grade.
        self.next_grade_seq as usize
    }
}
