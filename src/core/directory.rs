use crate::{
    record::{CardId, Student},
    types::StudentId,
};

use super::{
    import::{ImportBatch, ImportSummary},
    indices::{CardIndex, StudentIndex},
};

/// Imported students and the cards that resolve to them.
///
/// Entries are only ever added, by a committed import batch.
#[derive(Debug, Default)]
pub struct StudentDirectory {
    students: StudentIndex,
    cards: CardIndex,
}

impl StudentDirectory {
    /// Empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a student by identifier.
    pub fn student(&self, id: StudentId) -> Option<&Student> {
        self.students.get(&id)
    }

    /// Display name of `id`, if imported.
    pub fn student_name(&self, id: StudentId) -> Option<&str> {
        self.student(id).map(|s| s.name.as_str())
    }

    /// Resolves a raw card token; whitespace in `raw` is ignored.
    pub fn resolve_card(&self, raw: &str) -> Option<StudentId> {
        self.resolve(&CardId::normalize(raw))
    }

    /// Resolves an already normalized card.
    pub fn resolve(&self, card: &CardId) -> Option<StudentId> {
        self.cards.get(card).copied()
    }

    /// True when `id` has been imported.
    pub fn contains_student(&self, id: StudentId) -> bool {
        self.students.contains_key(&id)
    }

    /// True when `card` has been imported.
    pub fn contains_card(&self, card: &CardId) -> bool {
        self.cards.contains_key(card)
    }

    /// Number of imported students.
    pub fn student_count(&self) -> usize {
        self.students.len()
    }

    /// Number of imported cards.
    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    /// Cards owned by `id`, sorted.
    pub fn cards_of(&self, id: StudentId) -> Vec<&CardId> {
        let mut cards: Vec<&CardId> = self
            .cards
            .iter()
            .filter(|(_, owner)| **owner == id)
            .map(|(card, _)| card)
            .collect();
        cards.sort();
        cards
    }

    /// Merges a fully validated batch.
    pub(crate) fn commit(&mut self, batch: ImportBatch) -> ImportSummary {
        let summary = batch.summary();
        let (students, cards) = batch.into_parts();
        self.students.extend(students);
        self.cards.extend(cards);
        summary
    }
}
