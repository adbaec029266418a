//! Driver error classification shared by the repository adapters.

use mongodb::error::{Error as DriverError, ErrorKind};

use crate::domain::ports::StorageError;

/// Fold driver errors into the two port categories: unreachable store versus
/// failed operation.
pub(super) fn map_driver_error(error: DriverError) -> StorageError {
    match *error.kind {
        ErrorKind::Io(_)
        | ErrorKind::ServerSelection { .. }
        | ErrorKind::ConnectionPoolCleared { .. } => StorageError::connection(error.to_string()),
        _ => StorageError::query(error.to_string()),
    }
}
