//! Unified error type for the Colorfill client.

use colorfill_session::SessionError;
use colorfill_sim::SimError;
use colorfill_transport::TransportError;

use crate::config::ConfigError;

/// Top-level error that wraps all crate-specific errors.
///
/// The `#[from]` attribute on each variant auto-generates `From` impls,
/// so the `?` operator converts sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum ColorfillError {
    /// A transport-level error (connect, send, recv).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A session-level error (link not open, queue gone).
    #[error(transparent)]
    Session(#[from] SessionError),

    /// The playing field could not be set up.
    #[error(transparent)]
    Sim(#[from] SimError),

    /// The client configuration is unusable.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use colorfill_session::LinkState;

    #[test]
    fn test_from_transport_error() {
        let err = TransportError::ConnectionClosed("gone".into());
        let top: ColorfillError = err.into();
        assert!(matches!(top, ColorfillError::Transport(_)));
        assert!(top.to_string().contains("gone"));
    }

    #[test]
    fn test_from_session_error() {
        let err = SessionError::NotOpen(LinkState::Closed);
        let top: ColorfillError = err.into();
        assert!(matches!(top, ColorfillError::Session(_)));
        assert!(top.to_string().contains("closed"));
    }

    #[test]
    fn test_from_sim_error() {
        let top: ColorfillError = SimError::ZeroWidth.into();
        assert!(matches!(top, ColorfillError::Sim(_)));
    }

    #[test]
    fn test_from_config_error() {
        let top: ColorfillError = ConfigError::Invalid("no name".into()).into();
        assert!(matches!(top, ColorfillError::Config(_)));
    }
}
