use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RopeError {
    /// A position argument beyond the current length.
    #[error("position {pos} out of range for length {len}")]
    Position { pos: usize, len: usize },

    /// A `pos + span` range reaching beyond the current length.
    #[error("range {pos}..{pos}+{span} out of range for length {len}")]
    Range { pos: usize, span: usize, len: usize },
}
