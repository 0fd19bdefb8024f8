//! Session runner error types.

use thiserror::Error;

/// Errors returned by a [`super::SessionHandle`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    /// The runner has shut down or was dropped.
    #[error("focus session is no longer running")]
    Closed,
}
