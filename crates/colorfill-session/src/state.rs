//! The observable state of the link to the server.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

/// Lifecycle of one link.
///
/// ```text
///   Connecting ──(open)──→ Open ──(close)──→ Closed
/// ```
///
/// Errors are reported but don't change the state; only the transport's
/// close event moves the link to `Closed`. `Closed` is terminal: a new
/// connection gets a new session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum LinkState {
    Connecting = 0,
    Open = 1,
    Closed = 2,
}

impl LinkState {
    fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Self::Connecting,
            1 => Self::Open,
            _ => Self::Closed,
        }
    }
}

impl fmt::Display for LinkState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Connecting => "connecting",
            Self::Open => "open",
            Self::Closed => "closed",
        };
        f.write_str(name)
    }
}

/// `LinkState` shared between the session and its outbox handles.
#[derive(Debug, Clone)]
pub(crate) struct SharedState(Arc<AtomicU8>);

impl SharedState {
    pub(crate) fn new(state: LinkState) -> Self {
        Self(Arc::new(AtomicU8::new(state as u8)))
    }

    pub(crate) fn get(&self) -> LinkState {
        LinkState::from_u8(self.0.load(Ordering::Acquire))
    }

    /// Stores `state` and returns the previous one.
    pub(crate) fn replace(&self, state: LinkState) -> LinkState {
        LinkState::from_u8(self.0.swap(state as u8, Ordering::AcqRel))
    }

    /// Moves `from` to `to`. Returns the actual state when it was not `from`.
    pub(crate) fn transition(&self, from: LinkState, to: LinkState) -> Result<(), LinkState> {
        self.0
            .compare_exchange(from as u8, to as u8, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| ())
            .map_err(LinkState::from_u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_state_is_shared() {
        let a = SharedState::new(LinkState::Connecting);
        let b = a.clone();
        assert_eq!(a.replace(LinkState::Open), LinkState::Connecting);
        assert_eq!(b.get(), LinkState::Open);
    }

    #[test]
    fn test_transition_requires_expected_state() {
        let state = SharedState::new(LinkState::Closed);
        assert_eq!(
            state.transition(LinkState::Connecting, LinkState::Open),
            Err(LinkState::Closed)
        );
        assert_eq!(state.get(), LinkState::Closed);

        let state = SharedState::new(LinkState::Connecting);
        assert_eq!(state.transition(LinkState::Connecting, LinkState::Open), Ok(()));
        assert_eq!(state.get(), LinkState::Open);
    }

    #[test]
    fn test_display() {
        assert_eq!(LinkState::Closed.to_string(), "closed");
    }
}
