//! The session: lifecycle transitions plus inbound frame dispatch.
//!
//! A [`Session`] is driven from one event loop. The transport layer tells
//! it when the connection opens, closes or errors, and hands it every
//! inbound frame; the session decodes the frame and calls the matching
//! subscriber. Nothing here blocks or fails: malformed frames are logged
//! and dropped, unknown tags are ignored.

use colorfill_protocol::{
    Codec, Level, Lobby, Message, OverlayMessage, ServerFrame, TextCodec,
};
use tokio::sync::mpsc;

use crate::outbox::{OutboundQueue, Outbox};
use crate::state::SharedState;
use crate::subscriptions::Subscriptions;
use crate::LinkState;

/// What happened to one inbound frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Decoded and delivered to its subscriber.
    Dispatched,
    /// Decoded, but nobody is subscribed to that event.
    Unsubscribed,
    /// Unknown tag or not a frame at all.
    Ignored,
    /// Known tag with a malformed payload; dropped.
    Dropped,
}

/// Lifecycle and dispatch state for one link to the server.
pub struct Session<C: Codec = TextCodec> {
    codec: C,
    state: SharedState,
    subscriptions: Subscriptions,
    outbox: Outbox,
    outbound: Option<OutboundQueue>,
}

impl Session<TextCodec> {
    /// Creates a session in the `Connecting` state using [`TextCodec`].
    pub fn new() -> Self {
        Self::with_codec(TextCodec)
    }
}

impl Default for Session<TextCodec> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Codec> Session<C> {
    /// Creates a session in the `Connecting` state using `codec`.
    pub fn with_codec(codec: C) -> Self {
        let state = SharedState::new(LinkState::Connecting);
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            codec,
            outbox: Outbox::new(tx, state.clone()),
            state,
            subscriptions: Subscriptions::default(),
            outbound: Some(rx),
        }
    }

    pub fn state(&self) -> LinkState {
        self.state.get()
    }

    pub fn is_open(&self) -> bool {
        self.state() == LinkState::Open
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// A handle for queueing outbound commands.
    pub fn outbox(&self) -> Outbox {
        self.outbox.clone()
    }

    /// Takes the receiving end of the outbound queue. Only the first call
    /// returns `Some`.
    pub fn take_outbound(&mut self) -> Option<OutboundQueue> {
        self.outbound.take()
    }

    // -- Subscriptions --

    pub fn on_connection_established(&mut self, f: impl FnMut() + Send + 'static) {
        self.subscriptions.established = Some(Box::new(f));
    }

    pub fn on_connection_lost(&mut self, f: impl FnMut() + Send + 'static) {
        self.subscriptions.lost = Some(Box::new(f));
    }

    pub fn on_level_received(&mut self, f: impl FnMut(Level) + Send + 'static) {
        self.subscriptions.level = Some(Box::new(f));
    }

    pub fn on_lobby_received(&mut self, f: impl FnMut(Lobby) + Send + 'static) {
        self.subscriptions.lobby = Some(Box::new(f));
    }

    pub fn on_message_received(&mut self, f: impl FnMut(Message) + Send + 'static) {
        self.subscriptions.message = Some(Box::new(f));
    }

    pub fn on_overlay_message_received(
        &mut self,
        f: impl FnMut(OverlayMessage) + Send + 'static,
    ) {
        self.subscriptions.overlay_message = Some(Box::new(f));
    }

    /// Drops the established, message, level and lobby subscribers.
    ///
    /// Overlay-message and connection-lost subscribers stay attached.
    pub fn unsubscribe_all(&mut self) {
        self.subscriptions.clear_round_handlers();
    }

    // -- Lifecycle --

    /// The transport connected. Fires the established callback.
    ///
    /// Only a `Connecting` session can open; a closed one stays closed.
    pub fn connection_opened(&mut self) {
        if let Err(current) = self.state.transition(LinkState::Connecting, LinkState::Open) {
            tracing::debug!(state = %current, "ignoring open on a non-connecting link");
            return;
        }
        tracing::info!("connection established");
        if let Some(f) = self.subscriptions.established.as_mut() {
            f();
        }
    }

    /// The transport closed. Fires the lost callback once.
    pub fn connection_closed(&mut self, code: Option<u16>) {
        let previous = self.state.replace(LinkState::Closed);
        if previous == LinkState::Closed {
            return;
        }
        tracing::info!(?code, "connection closed");
        if let Some(f) = self.subscriptions.lost.as_mut() {
            f();
        }
    }

    /// The transport reported an error. Logged only; the close event
    /// decides whether the link is gone.
    pub fn connection_error(&mut self, error: &dyn std::error::Error) {
        tracing::error!(%error, state = %self.state(), "connection error");
    }

    // -- Inbound --

    /// Decodes one inbound frame and delivers it to its subscriber.
    pub fn handle_frame(&mut self, data: &[u8]) -> FrameOutcome {
        tracing::trace!(len = data.len(), "frame received");
        let frame = match self.codec.decode(data) {
            Ok(Some(frame)) => frame,
            Ok(None) => return FrameOutcome::Ignored,
            Err(e) => {
                tracing::debug!(error = %e, "dropping malformed frame");
                return FrameOutcome::Dropped;
            }
        };

        let tag = frame.tag();
        let delivered = self.dispatch(frame);
        tracing::debug!(tag, delivered, "frame decoded");
        if delivered {
            FrameOutcome::Dispatched
        } else {
            FrameOutcome::Unsubscribed
        }
    }

    fn dispatch(&mut self, frame: ServerFrame) -> bool {
        let subs = &mut self.subscriptions;
        match frame {
            ServerFrame::Level(level) => deliver(&mut subs.level, level),
            ServerFrame::Lobby(lobby) => deliver(&mut subs.lobby, lobby),
            ServerFrame::Message(msg) => deliver(&mut subs.message, msg),
            ServerFrame::OverlayMessage(msg) => {
                deliver(&mut subs.overlay_message, msg)
            }
        }
    }
}

impl<C: Codec> std::fmt::Debug for Session<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("state", &self.state())
            .field("subscriptions", &self.subscriptions)
            .finish_non_exhaustive()
    }
}

fn deliver<T>(slot: &mut Option<Box<dyn FnMut(T) + Send>>, value: T) -> bool {
    match slot.as_mut() {
        Some(f) => {
            f(value);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn counter() -> (Arc<Mutex<u32>>, impl FnMut() + Send + 'static) {
        let count = Arc::new(Mutex::new(0));
        let c = Arc::clone(&count);
        (count, move || *c.lock().unwrap() += 1)
    }

    #[test]
    fn test_new_session_is_connecting() {
        let session = Session::new();
        assert_eq!(session.state(), LinkState::Connecting);
        assert!(!session.is_open());
    }

    #[test]
    fn test_open_fires_established_once() {
        let mut session = Session::new();
        let (count, f) = counter();
        session.on_connection_established(f);
        session.connection_opened();
        session.connection_opened();
        assert_eq!(*count.lock().unwrap(), 1);
        assert!(session.is_open());
    }

    #[test]
    fn test_close_fires_lost_once() {
        let mut session = Session::new();
        let (count, f) = counter();
        session.on_connection_lost(f);
        session.connection_opened();
        session.connection_closed(Some(1000));
        session.connection_closed(None);
        assert_eq!(*count.lock().unwrap(), 1);
        assert_eq!(session.state(), LinkState::Closed);
    }

    #[test]
    fn test_error_does_not_close() {
        let mut session = Session::new();
        let (count, f) = counter();
        session.on_connection_lost(f);
        session.connection_opened();
        let err = std::io::Error::other("boom");
        session.connection_error(&err);
        assert!(session.is_open());
        assert_eq!(*count.lock().unwrap(), 0);
    }

    #[test]
    fn test_take_outbound_only_once() {
        let mut session = Session::new();
        assert!(session.take_outbound().is_some());
        assert!(session.take_outbound().is_none());
    }

    #[test]
    fn test_subscribing_again_replaces_slot() {
        let mut session = Session::new();
        let (first, f1) = counter();
        let (second, f2) = counter();
        session.on_connection_established(f1);
        session.on_connection_established(f2);
        session.connection_opened();
        assert_eq!(*first.lock().unwrap(), 0);
        assert_eq!(*second.lock().unwrap(), 1);
    }
}
