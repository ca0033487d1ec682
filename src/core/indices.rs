use hashbrown::HashMap;

use crate::{
    record::{CardId, Enrollment, Student},
    types::StudentId,
};

/// Students keyed by identifier.
pub type StudentIndex = HashMap<StudentId, Student>;
/// Card to owning student.
pub type CardIndex = HashMap<CardId, StudentId>;
/// Enrollments of one test keyed by student.
pub type EnrollmentIndex = HashMap<StudentId, Enrollment>;
