//! Single-slot event subscriptions.
//!
//! Each event kind has at most one subscriber; subscribing again replaces
//! the previous callback.

use colorfill_protocol::{Level, Lobby, Message, OverlayMessage};

pub(crate) type Callback = Box<dyn FnMut() + Send>;
pub(crate) type Handler<T> = Box<dyn FnMut(T) + Send>;

#[derive(Default)]
pub(crate) struct Subscriptions {
    pub(crate) established: Option<Callback>,
    pub(crate) lost: Option<Callback>,
    pub(crate) level: Option<Handler<Level>>,
    pub(crate) lobby: Option<Handler<Lobby>>,
    pub(crate) message: Option<Handler<Message>>,
    pub(crate) overlay_message: Option<Handler<OverlayMessage>>,
}

impl Subscriptions {
    /// Clears the established, message, level and lobby slots.
    ///
    /// The overlay-message and lost slots are left attached.
    pub(crate) fn clear_round_handlers(&mut self) {
        self.established = None;
        self.message = None;
        self.level = None;
        self.lobby = None;
    }
}

impl std::fmt::Debug for Subscriptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscriptions")
            .field("established", &self.established.is_some())
            .field("lost", &self.lost.is_some())
            .field("level", &self.level.is_some())
            .field("lobby", &self.lobby.is_some())
            .field("message", &self.message.is_some())
            .field("overlay_message", &self.overlay_message.is_some())
            .finish()
    }
}
