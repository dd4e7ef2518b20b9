//! # Colorfill
//!
//! Client core for Colorfill, a real-time multiplayer grid-claim game.
//!
//! This crate ties the layers together: a WebSocket transport, the text
//! protocol, the session that routes decoded frames to subscribers, and
//! the per-frame simulation the player's moves run through.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use colorfill::prelude::*;
//!
//! # async fn demo() -> Result<(), ColorfillError> {
//! let mut session = Session::new();
//! let mut events = forward_events(&mut session);
//! let client = ColorfillClient::connect("ws://127.0.0.1:8000/ws", session).await?;
//! client.outbox().register_player("alice", 1.5)?;
//! tokio::spawn(client.run());
//!
//! while let Some(event) = events.recv().await {
//!     println!("{event:?}");
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod error;
mod events;
mod scene;
mod telemetry;

pub use client::ColorfillClient;
pub use config::{ClientConfig, ConfigError};
pub use error::ColorfillError;
pub use events::{ClientEvent, forward_events};
pub use scene::Scene;
pub use telemetry::init_tracing;

pub mod prelude {
    pub use crate::{
        ClientConfig, ClientEvent, ColorfillClient, ColorfillError, Scene,
        forward_events, init_tracing,
    };
    pub use colorfill_frame::{FrameClock, FrameConfig, FrameInfo};
    pub use colorfill_protocol::{
        CellState, ClientCommand, Codec, Level, Lobby, LobbyPlayer, Message,
        OverlayMessage, ServerFrame, TextCodec,
    };
    pub use colorfill_session::{FrameOutcome, LinkState, Outbox, Session, SessionError};
    pub use colorfill_sim::{Grid, Player, PlayingField, SimError, sizing};
    pub use colorfill_transport::{Connection, Connector, TransportError};
}
