use std::{
    collections::BTreeSet,
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

use hashbrown::HashMap;
use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::{
    config::RegistryConfig,
    record::{CardId, ExamResult},
    types::{Grade, GradeSeq, SortBy, StudentId},
};

use super::{
    directory::StudentDirectory,
    import::{self, ImportResult, ImportSummary},
    report::{self, GradedRow},
    test_record::TestRecord,
};

/// Rejected enrollment or grading requests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExamError {
    /// No imported card matches.
    #[error("unknown card {0}")]
    UnknownCard(CardId),
    /// No student has ever enrolled in this test.
    #[error("unknown test {0:?}")]
    UnknownTest(String),
    /// Second enrollment of the same student in the same test.
    #[error("student {student} is already enrolled in {test:?}")]
    AlreadyEnrolled {
        /// Student identifier.
        student: StudentId,
        /// Test name.
        test: String,
    },
    /// Grading a student who never enrolled.
    #[error("student {student} is not enrolled in {test:?}")]
    NotEnrolled {
        /// Student identifier.
        student: StudentId,
        /// Test name.
        test: String,
    },
    /// Grades are assigned once.
    #[error("student {student} was already graded {grade} in {test:?}")]
    AlreadyGraded {
        /// Student identifier.
        student: StudentId,
        /// Test name.
        test: String,
        /// Grade kept from the first assessment.
        grade: Grade,
    },
}

/// Result alias for enrollment and grading.
pub type RegistryResult<T> = Result<T, ExamError>;

/// Student directory plus every test students have enrolled in.
#[derive(Debug, Default)]
pub struct ExamRegistry {
    config: RegistryConfig,
    directory: StudentDirectory,
    tests: HashMap<String, TestRecord>,
}

impl ExamRegistry {
    /// Empty registry with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty registry using `config`.
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Imported students and cards.
    pub fn directory(&self) -> &StudentDirectory {
        &self.directory
    }

    /// Imports a batch of `id:name:cards` lines. Nothing is merged unless
    /// every line is valid.
    pub fn import_lines<I, S>(&mut self, lines: I) -> ImportResult<ImportSummary>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.import_batch(lines.into_iter().map(Ok::<S, io::Error>))
    }

    /// Imports newline separated student lines.
    pub fn import_str(&mut self, text: &str) -> ImportResult<ImportSummary> {
        self.import_lines(text.lines())
    }

    /// Read errors reject the whole batch like a bad line would.
    pub fn import_reader<R: BufRead>(&mut self, reader: R) -> ImportResult<ImportSummary> {
        self.import_batch(reader.lines())
    }

    /// Imports a student file from disk.
    pub fn import_file(&mut self, path: impl AsRef<Path>) -> ImportResult<ImportSummary> {
        let file = File::open(path.as_ref())?;
        self.import_reader(BufReader::new(file))
    }

    fn import_batch<I, S>(&mut self, lines: I) -> ImportResult<ImportSummary>
    where
        I: IntoIterator<Item = io::Result<S>>,
        S: AsRef<str>,
    {
        match import::stage_lines(&self.directory, &self.config, lines) {
            Ok(batch) => {
                let summary = self.directory.commit(batch);
                debug!(
                    students = summary.students,
                    cards = summary.cards,
                    "import batch committed"
                );
                Ok(summary)
            }
            Err(err) => {
                warn!(error = %err, "import batch rejected");
                Err(err)
            }
        }
    }

    /// Enrolls the owner of `card` in `test`, creating the test on first use.
    pub fn register(&mut self, card: &str, test: &str) -> RegistryResult<()> {
        let card = CardId::normalize(card);
        let Some(student) = self.directory.resolve(&card) else {
            trace!(%card, test, "register with unknown card");
            return Err(ExamError::UnknownCard(card));
        };

        // first enrollment of a fresh test always succeeds
        self.tests
            .entry_ref(test)
            .or_insert_with(|| TestRecord::new(test))
            .enroll(student)?;

        debug!(student, test, "student enrolled");
        Ok(())
    }

    /// Grades `student` in `test` once and returns the grading sequence number.
    pub fn assess(&mut self, student: StudentId, test: &str, grade: Grade) -> RegistryResult<GradeSeq> {
        let record = self.tests.get_mut(test).ok_or_else(|| {
            trace!(student, test, "assess on unknown test");
            ExamError::UnknownTest(test.to_string())
        })?;

        let seq = record.grade(student, grade)?;
        debug!(student, test, grade, seq, "student graded");
        Ok(seq)
    }

    /// Graded results of `test` ordered by `sort_by`; empty for an unknown test.
    pub fn list_test(&self, test: &str, sort_by: SortBy) -> Vec<ExamResult> {
        let Some(record) = self.tests.get(test) else {
            trace!(test, "listing unknown test");
            return Vec::new();
        };

        let mut rows: Vec<GradedRow<'_>> = record
            .graded()
            .filter_map(|(student_id, grading)| {
                let name = self.directory.student_name(student_id)?;
                Some(GradedRow {
                    name,
                    student_id,
                    grading,
                })
            })
            .collect();

        report::sort_rows(&mut rows, sort_by, self.config.deterministic_ties);

        rows.into_iter()
            .map(|row| ExamResult::new(row.name, row.student_id, test, row.grading.grade))
            .collect()
    }

    /// Enrolled but ungraded students of `test`; empty for an unknown test.
    pub fn list_missing(&self, test: &str) -> BTreeSet<StudentId> {
        self.tests
            .get(test)
            .map(TestRecord::missing)
            .unwrap_or_default()
    }

    /// Test record by name.
    pub fn test(&self, name: &str) -> Option<&TestRecord> {
        self.tests.get(name)
    }

    /// Names of all tests, sorted.
    pub fn test_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tests.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
