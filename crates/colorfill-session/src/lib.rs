//! Connection lifecycle and event routing for Colorfill.
//!
//! The session layer sits between the transport (raw frames, open/close
//! notifications) and the game (typed events):
//!
//! ```text
//! Transport (bytes) → Session (decode + dispatch) → subscribers
//! game → Outbox (ClientCommand) → client driver → Transport
//! ```
//!
//! - [`Session`] — tracks [`LinkState`], decodes frames, calls subscribers.
//! - [`Outbox`] — cloneable fire-and-forget command handle.

mod error;
mod outbox;
mod session;
mod state;
mod subscriptions;

pub use error::SessionError;
pub use outbox::{OutboundQueue, Outbox};
pub use session::{FrameOutcome, Session};
pub use state::LinkState;
