use std::os::raw::c_int;

use vertsync_mesh::ViewError;

#[derive(Debug, thiserror::Error, PartialEq, Eq, Copy, Clone)]
pub enum SyncError {
    #[error("vertex count mismatch: mesh has {expected} vertices but {actual} positions were supplied")]
    VertexCountMismatch { expected: usize, actual: usize },
    #[error("flat coordinate list has length {len}, which is not a multiple of 3")]
    FlatLength { len: usize },
    #[error("position pointer is null but {len} values were promised")]
    NullPositions { len: usize },
    #[error(transparent)]
    View(#[from] ViewError),
}

impl SyncError {
    /// The status code reported across the C ABI. Always negative.
    pub fn code(&self) -> c_int {
        match self {
            SyncError::VertexCountMismatch { .. } => -1,
            SyncError::FlatLength { .. } => -2,
            SyncError::NullPositions { .. } => -3,
            SyncError::View(ViewError::NullHandle) => -4,
            SyncError::View(ViewError::InvalidVertexCount(_)) => -5,
            SyncError::View(ViewError::NullVertexArray(_)) => -6,
        }
    }
}
