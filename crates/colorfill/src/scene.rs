//! Which screen the client is showing.

use colorfill_protocol::{Level, Lobby, Message, ServerFrame};

/// The scene the rendering layer should draw.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Scene {
    /// Waiting for the connection.
    #[default]
    Connecting,
    Lobby(Lobby),
    Game(Level),
    Message(Message),
}

impl Scene {
    /// The scene that follows this one once `frame` arrives.
    ///
    /// Overlay messages are drawn on top of the current scene and leave
    /// it unchanged.
    pub fn after(self, frame: ServerFrame) -> Self {
        match frame {
            ServerFrame::Level(level) => Self::Game(level),
            ServerFrame::Lobby(lobby) => Self::Lobby(lobby),
            ServerFrame::Message(msg) => Self::Message(msg),
            ServerFrame::OverlayMessage(_) => self,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Connecting => "connecting",
            Self::Lobby(_) => "lobby",
            Self::Game(_) => "game",
            Self::Message(_) => "message",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use colorfill_protocol::OverlayMessage;

    #[test]
    fn test_frames_switch_scene() {
        let scene = Scene::default().after(ServerFrame::Lobby(Lobby::default()));
        assert_eq!(scene.name(), "lobby");

        let msg = Message {
            bg_fill_style: "#000".into(),
            fg_fill_style: "#fff".into(),
            text: "3".into(),
        };
        let scene = scene.after(ServerFrame::Message(msg.clone()));
        assert_eq!(scene, Scene::Message(msg));
    }

    #[test]
    fn test_overlay_keeps_scene() {
        let scene = Scene::Lobby(Lobby::default());
        let overlay = OverlayMessage {
            duration: 1.0,
            animation: "none".into(),
            fill_style: "#fff".into(),
            text: "hi".into(),
        };
        assert_eq!(
            scene.clone().after(ServerFrame::OverlayMessage(overlay)),
            scene
        );
    }
}
