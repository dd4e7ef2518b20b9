//! Core protocol types for Colorfill's wire format.
//!
//! Inbound frames ([`ServerFrame`]) carry levels, lobby rosters and
//! transient messages; outbound frames ([`ClientCommand`]) register the
//! player and report progress. The text representation of both lives in
//! [`codec`](crate::codec).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ProtocolError;

// ---------------------------------------------------------------------------
// CellState
// ---------------------------------------------------------------------------

/// The state of one grid cell.
///
/// The discriminants are the wire codes: one decimal digit per cell in
/// `level` frames, two bits per cell in packed progress reports.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[repr(u8)]
pub enum CellState {
    /// Not claimed yet.
    #[default]
    Empty = 0,
    /// Immovable obstacle. Never changes state.
    Solid = 1,
    /// Claimed by the player.
    Filled = 2,
}

impl CellState {
    /// The wire code of this state.
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for CellState {
    type Error = ProtocolError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Empty),
            1 => Ok(Self::Solid),
            2 => Ok(Self::Filled),
            other => Err(ProtocolError::InvalidPackedCell(other)),
        }
    }
}

// ---------------------------------------------------------------------------
// Level
// ---------------------------------------------------------------------------

/// One playable level as sent by the server.
///
/// `blocks` is row-major with `width` cells per row. The last row may be
/// short; the simulation pads the grid with solid cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub id: i64,
    pub name: String,
    pub blocks: Vec<CellState>,
    pub width: usize,
    pub brightness: f64,
}

// ---------------------------------------------------------------------------
// Lobby
// ---------------------------------------------------------------------------

/// One entry of the lobby roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LobbyPlayer {
    pub name: String,
    pub is_ready: bool,
}

/// The full lobby roster, in the order the server sent it.
///
/// Each `lobby` frame replaces the previous roster wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Lobby {
    pub players: Vec<LobbyPlayer>,
}

impl Lobby {
    /// Number of players that announced they are ready.
    pub fn ready_count(&self) -> usize {
        self.players.iter().filter(|p| p.is_ready).count()
    }
}

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

/// A full-screen text message (countdowns, results, waiting notices).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub bg_fill_style: String,
    pub fg_fill_style: String,
    pub text: String,
}

/// A short-lived message drawn over the current scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayMessage {
    /// Display time in seconds.
    pub duration: f64,
    pub animation: String,
    pub fill_style: String,
    pub text: String,
}

// ---------------------------------------------------------------------------
// ServerFrame — inbound
// ---------------------------------------------------------------------------

/// A decoded inbound frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ServerFrame {
    Level(Level),
    Lobby(Lobby),
    Message(Message),
    OverlayMessage(OverlayMessage),
}

impl ServerFrame {
    /// The wire tag this frame was decoded from.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Level(_) => "level",
            Self::Lobby(_) => "lobby",
            Self::Message(_) => "message",
            Self::OverlayMessage(_) => "overlay_message",
        }
    }
}

// ---------------------------------------------------------------------------
// ClientCommand — outbound
// ---------------------------------------------------------------------------

/// A command the client sends to the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ClientCommand {
    /// Join the game. `level_size_ratio` (playable height / width) lets
    /// the server size levels for this screen; `None` sends the
    /// name-only form.
    RegisterPlayer {
        name: String,
        level_size_ratio: Option<f64>,
    },

    /// "I'm ready to start."
    AnnounceReady,

    /// "I filled the whole level."
    AnnounceDone,

    /// Snapshot of the player's grid.
    AnnounceProgress { width: usize, cells: Vec<CellState> },
}

impl ClientCommand {
    /// The wire tag of this command.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::RegisterPlayer { .. } => "RegisterPlayer",
            Self::AnnounceReady => "AnnounceReady",
            Self::AnnounceDone => "AnnounceDone",
            Self::AnnounceProgress { .. } => "AnnounceProgress",
        }
    }
}

impl fmt::Display for ClientCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_codes_match_wire_digits() {
        assert_eq!(CellState::Empty.code(), 0);
        assert_eq!(CellState::Solid.code(), 1);
        assert_eq!(CellState::Filled.code(), 2);
    }

    #[test]
    fn test_cell_try_from_rejects_three() {
        assert_eq!(CellState::try_from(2), Ok(CellState::Filled));
        assert_eq!(
            CellState::try_from(3),
            Err(ProtocolError::InvalidPackedCell(3))
        );
    }

    #[test]
    fn test_lobby_ready_count() {
        let lobby = Lobby {
            players: vec![
                LobbyPlayer { name: "alice".into(), is_ready: true },
                LobbyPlayer { name: "bob".into(), is_ready: false },
                LobbyPlayer { name: "carol".into(), is_ready: true },
            ],
        };
        assert_eq!(lobby.ready_count(), 2);
    }

    #[test]
    fn test_frame_tags() {
        let frame = ServerFrame::Lobby(Lobby::default());
        assert_eq!(frame.tag(), "lobby");
        assert_eq!(ClientCommand::AnnounceDone.to_string(), "AnnounceDone");
    }

    #[test]
    fn test_level_serializes_with_serde() {
        let level = Level {
            id: 3,
            name: "spiral".into(),
            blocks: vec![CellState::Empty, CellState::Solid],
            width: 2,
            brightness: 0.5,
        };
        let json = serde_json::to_string(&level).unwrap();
        let back: Level = serde_json::from_str(&json).unwrap();
        assert_eq!(level, back);
    }
}
