//! Wire protocol for Colorfill.
//!
//! This crate defines what the game client and server say to each other:
//!
//! - **Types** ([`ServerFrame`], [`ClientCommand`], [`Level`], [`Lobby`],
//!   etc.) — the frames that travel on the wire.
//! - **Codec** ([`Codec`] trait, [`TextCodec`]) — how frames are turned
//!   into text and back.
//! - **Packing** ([`pack_cells`], [`unpack_cells`]) — the 2-bit-per-cell
//!   grid encoding used by progress reports.
//! - **Errors** ([`ProtocolError`]) — what can be wrong with an inbound
//!   frame.
//!
//! ```text
//! Transport (bytes) → Protocol (ServerFrame) → Session (subscribers)
//! ```

mod codec;
mod error;
mod packing;
mod types;

pub use codec::{Codec, TextCodec};
pub use error::ProtocolError;
pub use packing::{CELLS_PER_BYTE, encode_packed, pack_cells, unpack_cells};
pub use types::{
    CellState, ClientCommand, Level, Lobby, LobbyPlayer, Message,
    OverlayMessage, ServerFrame,
};
