//! Typed event channel on top of the session's callback slots.

use colorfill_protocol::{Codec, Level, Lobby, Message, OverlayMessage, ServerFrame};
use colorfill_session::Session;
use tokio::sync::mpsc;

/// Everything a session can report, as one enum.
#[derive(Debug, Clone, PartialEq)]
pub enum ClientEvent {
    Established,
    Lost,
    Level(Level),
    Lobby(Lobby),
    Message(Message),
    OverlayMessage(OverlayMessage),
}

impl ClientEvent {
    /// The inbound frame this event carries, if any.
    pub fn into_frame(self) -> Option<ServerFrame> {
        match self {
            Self::Level(level) => Some(ServerFrame::Level(level)),
            Self::Lobby(lobby) => Some(ServerFrame::Lobby(lobby)),
            Self::Message(msg) => Some(ServerFrame::Message(msg)),
            Self::OverlayMessage(msg) => Some(ServerFrame::OverlayMessage(msg)),
            Self::Established | Self::Lost => None,
        }
    }
}

/// Subscribes every slot of `session` and forwards into a channel.
///
/// Replaces any callbacks already registered.
pub fn forward_events<C: Codec>(
    session: &mut Session<C>,
) -> mpsc::UnboundedReceiver<ClientEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    let t = tx.clone();
    session.on_connection_established(move || {
        let _ = t.send(ClientEvent::Established);
    });
    let t = tx.clone();
    session.on_connection_lost(move || {
        let _ = t.send(ClientEvent::Lost);
    });
    let t = tx.clone();
    session.on_level_received(move |level| {
        let _ = t.send(ClientEvent::Level(level));
    });
    let t = tx.clone();
    session.on_lobby_received(move |lobby| {
        let _ = t.send(ClientEvent::Lobby(lobby));
    });
    let t = tx.clone();
    session.on_message_received(move |msg| {
        let _ = t.send(ClientEvent::Message(msg));
    });
    session.on_overlay_message_received(move |msg| {
        let _ = tx.send(ClientEvent::OverlayMessage(msg));
    });

    rx
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forwards_lifecycle_and_frames_in_order() {
        let mut session = Session::new();
        let mut events = forward_events(&mut session);

        session.connection_opened();
        session.handle_frame(b"lobby:a+");
        session.handle_frame(b"overlay_message:1;none;#fff;go");
        session.connection_closed(None);

        assert_eq!(events.try_recv().unwrap(), ClientEvent::Established);
        assert!(matches!(events.try_recv().unwrap(), ClientEvent::Lobby(l) if l.players.len() == 1));
        assert!(matches!(events.try_recv().unwrap(), ClientEvent::OverlayMessage(_)));
        assert_eq!(events.try_recv().unwrap(), ClientEvent::Lost);
        assert!(events.try_recv().is_err());
    }

    #[test]
    fn test_into_frame() {
        assert_eq!(ClientEvent::Lost.into_frame(), None);
        assert_eq!(
            ClientEvent::Lobby(Lobby::default()).into_frame(),
            Some(ServerFrame::Lobby(Lobby::default()))
        );
    }
}
