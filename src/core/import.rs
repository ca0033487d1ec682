//! Student batch import: line parser and staged validation.
//!
//! Each line has the shape `<id>:<display name>:<card>, <card>, ...`. Lines are
//! staged into an [`ImportBatch`] that is checked against the live directory
//! and against itself; the batch only reaches the directory once every line
//! has passed.

use std::io;

use hashbrown::HashSet;
use thiserror::Error;

use crate::{
    config::RegistryConfig,
    record::{CardId, Student},
    types::StudentId,
};

use super::{
    directory::StudentDirectory,
    indices::{CardIndex, StudentIndex},
};

/// Reasons a batch import is rejected. Line numbers are 1-based.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The line does not follow the `id:name:cards` shape.
    #[error("line {line}: malformed student line: {reason}")]
    Malformed {
        /// Offending line.
        line: usize,
        /// What was wrong with it.
        reason: String,
    },
    /// Student id already known or repeated within the batch.
    #[error("line {line}: duplicate student id {id}")]
    DuplicateStudent {
        /// Offending line.
        line: usize,
        /// Repeated identifier.
        id: StudentId,
    },
    /// Card already known or repeated within the batch.
    #[error("line {line}: duplicate card {card}")]
    DuplicateCard {
        /// Offending line.
        line: usize,
        /// Repeated normalized card.
        card: CardId,
    },
    /// The import source could not be read.
    #[error("failed to read import source: {0}")]
    Io(#[from] io::Error),
}

/// Result alias for import operations.
pub type ImportResult<T> = Result<T, ImportError>;

/// One parsed import line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportLine {
    /// Student identifier.
    pub id: StudentId,
    /// Display name.
    pub name: String,
    /// Normalized, non-empty card tokens in line order.
    pub cards: Vec<CardId>,
}

/// Counts merged into the directory by a committed batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportSummary {
    /// Students added.
    pub students: usize,
    /// Cards added.
    pub cards: usize,
}

/// Parses a single `id:name:cards` line.
pub fn parse_line(line_no: usize, line: &str) -> ImportResult<ImportLine> {
    let mut parts = line.splitn(3, ':');
    let id_text = parts.next().unwrap_or_default().trim();
    let name = parts.next().ok_or_else(|| ImportError::Malformed {
        line: line_no,
        reason: "missing ':' after student id".to_string(),
    })?;
    let id = id_text
        .parse::<StudentId>()
        .map_err(|err| ImportError::Malformed {
            line: line_no,
            reason: format!("invalid student id {id_text:?}: {err}"),
        })?;

    let cards = parts
        .next()
        .unwrap_or_default()
        .split(',')
        .map(CardId::normalize)
        .filter(|card| !card.is_empty())
        .collect();

    Ok(ImportLine {
        id,
        name: name.to_string(),
        cards,
    })
}

/// Students and cards staged for an all-or-nothing merge.
#[derive(Debug, Default)]
pub struct ImportBatch {
    students: StudentIndex,
    cards: CardIndex,
}

impl ImportBatch {
    /// Empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates `parsed` against `directory` and the lines staged so far,
    /// then stages it. A rejected line leaves the batch untouched.
    pub fn stage(
        &mut self,
        directory: &StudentDirectory,
        line_no: usize,
        parsed: ImportLine,
    ) -> ImportResult<()> {
        let id = parsed.id;
        if directory.contains_student(id) || self.students.contains_key(&id) {
            return Err(ImportError::DuplicateStudent { line: line_no, id });
        }

        {
            let mut on_line: HashSet<&CardId> = HashSet::with_capacity(parsed.cards.len());
            for card in &parsed.cards {
                if directory.contains_card(card)
                    || self.cards.contains_key(card)
                    || !on_line.insert(card)
                {
                    return Err(ImportError::DuplicateCard {
                        line: line_no,
                        card: card.clone(),
                    });
                }
            }
        }

        self.students.insert(
            id,
            Student {
                id,
                name: parsed.name,
            },
        );
        for card in parsed.cards {
            self.cards.insert(card, id);
        }
        Ok(())
    }

    /// Number of staged students.
    pub fn student_count(&self) -> usize {
        self.students.len()
    }

    /// Number of staged cards.
    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    /// True when nothing has been staged.
    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    /// Counts this batch would add on commit.
    pub fn summary(&self) -> ImportSummary {
        ImportSummary {
            students: self.student_count(),
            cards: self.card_count(),
        }
    }

    pub(crate) fn into_parts(self) -> (StudentIndex, CardIndex) {
        (self.students, self.cards)
    }
}

/// Parses and stages every line, stopping at the first failure.
pub fn stage_lines<I, S>(
    directory: &StudentDirectory,
    config: &RegistryConfig,
    lines: I,
) -> ImportResult<ImportBatch>
where
    I: IntoIterator<Item = io::Result<S>>,
    S: AsRef<str>,
{
    let mut batch = ImportBatch::new();
    for (idx, line) in lines.into_iter().enumerate() {
        let line_no = idx + 1;
        let line = line?;
        let line = line.as_ref();

        if line.trim().is_empty() {
            if config.skip_blank_lines {
                continue;
            }
            return Err(ImportError::Malformed {
                line: line_no,
                reason: "blank line".to_string(),
            });
        }

        let parsed = parse_line(line_no, line)?;
        batch.stage(directory, line_no, parsed)?;
    }
    Ok(batch)
}
