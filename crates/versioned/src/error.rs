use thiserror::Error;

use crate::store::VersionId;
use split_forest::ForestError;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum VersionError {
    /// The version id was never committed to this store.
    #[error("unknown version {0:?}")]
    UnknownVersion(VersionId),

    #[error(transparent)]
    Forest(#[from] ForestError),
}
