//! Prev/next traversal over the result set a view last displayed
//!
//! The snapshot is shared, never re-fetched and never re-sorted. Only the
//! cursor moves.

use marvel_protocol::Character;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Navigation {
    characters: Arc<[Character]>,
    current_id: i64,
}

impl Navigation {
    pub fn new(characters: Arc<[Character]>, current_id: i64) -> Self {
        Self {
            characters,
            current_id,
        }
    }

    pub fn from_vec(characters: Vec<Character>, current_id: i64) -> Self {
        Self::new(characters.into(), current_id)
    }

    pub fn current_id(&self) -> i64 {
        self.current_id
    }

    /// Index of the current record, `None` when it is not in the snapshot
    pub fn position(&self) -> Option<usize> {
        self.characters.iter().position(|c| c.id == self.current_id)
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    pub fn has_previous(&self) -> bool {
        matches!(self.position(), Some(index) if index > 0)
    }

    pub fn has_next(&self) -> bool {
        matches!(self.position(), Some(index) if index + 1 < self.characters.len())
    }

    /// Move to the previous record and return its id
    pub fn move_previous(&mut self) -> Option<i64> {
        let index = self.position().filter(|&i| i > 0)?;
        self.current_id = self.characters[index - 1].id;
        Some(self.current_id)
    }

    /// Move to the next record and return its id
    pub fn move_next(&mut self) -> Option<i64> {
        let index = self
            .position()
            .filter(|&i| i + 1 < self.characters.len())?;
        self.current_id = self.characters[index + 1].id;
        Some(self.current_id)
    }

    /// "3 of 12" style label, when the current record is in the snapshot
    pub fn progress_label(&self) -> Option<String> {
        self.position()
            .map(|index| format!("{} of {}", index + 1, self.characters.len()))
    }
}
