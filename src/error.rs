//! Error types for the Hermes drive core

/// Result type alias
pub type Result<T> = std::result::Result<T, DriveError>;

/// Drive core error types
#[derive(Debug, thiserror::Error)]
pub enum DriveError {
    /// A motion primitive received parameters that would produce an
    /// undefined or negative hold duration
    #[error("invalid motion parameter: {0}")]
    InvalidParameter(String),

    /// An external stop request arrived during a timed hold. Non-fatal:
    /// the stop command has already been emitted when this surfaces.
    #[error("motion interrupted by stop request")]
    Interrupted,

    /// The command sink rejected an emission. Never retried; a stale or
    /// unreachable sink is a safety condition, not a transient one.
    #[error("command sink unavailable: {0}")]
    SinkUnavailable(String),

    /// Terminal input error
    #[error("key input failed: {0}")]
    Input(#[from] std::io::Error),
}
