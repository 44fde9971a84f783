use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ForestError {
    /// `select(k)` with `k` outside `[1, len]`.  Never silently clamped.
    #[error("rank {rank} out of range 1..={len}")]
    OutOfRange { rank: usize, len: usize },
}
