//! Error types for the protocol layer.
//!
//! Every variant here describes a malformed inbound frame. They are all
//! recoverable: the consumer logs the error and drops the frame, the
//! connection stays up.

/// Errors that can occur while decoding a frame.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProtocolError {
    /// The frame bytes are not valid UTF-8.
    #[error("frame is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    /// A positional field the tag requires is absent.
    #[error("{tag} frame is missing field `{field}`")]
    MissingField {
        tag: &'static str,
        field: &'static str,
    },

    /// A numeric field did not parse.
    #[error("{tag} frame has invalid {field}: {value:?}")]
    InvalidNumber {
        tag: &'static str,
        field: &'static str,
        value: String,
    },

    /// A level was announced with a width of zero.
    #[error("level width must be greater than zero")]
    ZeroWidth,

    /// A level digit is not one of the three cell codes.
    #[error("invalid cell digit {0:?} at index {1}")]
    InvalidCell(char, usize),

    /// A packed grid byte carried the unused 2-bit code `3`.
    #[error("invalid packed cell code {0}")]
    InvalidPackedCell(u8),
}
