//! Store errors.

use thiserror::Error;

/// Why the store could not do what was asked.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// `shutdown()` has been called; new actions are refused
    #[error("Store is shutting down")]
    ShutdownInProgress,

    /// Effects were still running when the shutdown deadline passed
    #[error("Shutdown timed out with {0} effects still running")]
    ShutdownTimeout(usize),

    /// No matching feedback action arrived in time
    #[error("Timeout waiting for action")]
    Timeout,

    /// The feedback broadcast has no sender left
    #[error("Action broadcast channel closed")]
    ChannelClosed,
}
