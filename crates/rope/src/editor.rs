//! Cursor-relative text editing over `Rope<char>`.

use crate::error::RopeError;
use crate::rope::Rope;

/// Text buffer with a single cursor.
///
/// The cursor is a position in `[0, len]`; insertions land at the cursor
/// and advance it past the inserted text, deletions and reads cover the
/// characters after it.  Every operation validates its arguments against
/// the current length — nothing is clamped.
pub struct Editor {
    text: Rope<char>,
    cursor: usize,
}

impl Editor {
    pub fn new() -> Self {
        Self {
            text: Rope::new(),
            cursor: 0,
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            text: Rope::with_seed(seed),
            cursor: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Moves the cursor to `pos` (`pos == len` is the end of the buffer).
    pub fn move_cursor(&mut self, pos: usize) -> Result<(), RopeError> {
        if pos > self.len() {
            return Err(RopeError::Position {
                pos,
                len: self.len(),
            });
        }
        self.cursor = pos;
        Ok(())
    }

    /// Inserts `s` at the cursor; the cursor ends up after the insertion.
    pub fn insert(&mut self, s: &str) -> Result<(), RopeError> {
        let count = s.chars().count();
        self.text.insert_at(self.cursor, s.chars())?;
        self.cursor += count;
        Ok(())
    }

    /// Deletes `n` characters after the cursor.
    pub fn delete(&mut self, n: usize) -> Result<(), RopeError> {
        self.text.delete_range(self.cursor, n)
    }

    /// The `n` characters after the cursor.
    pub fn read(&self, n: usize) -> Result<String, RopeError> {
        Ok(self.text.read_range(self.cursor, n)?.into_iter().collect())
    }

    /// The whole buffer as a `String`.
    pub fn text(&self) -> String {
        self.text.iter().collect()
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}
