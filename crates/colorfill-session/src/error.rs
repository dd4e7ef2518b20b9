//! Error types for the session layer.

/// Errors returned when queueing an outbound command.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// The link is not open; the command was not queued.
    #[error("link is not open (state: {0})")]
    NotOpen(crate::LinkState),

    /// Nothing is draining the outbound queue any more.
    #[error("outbound queue closed")]
    QueueClosed,
}
