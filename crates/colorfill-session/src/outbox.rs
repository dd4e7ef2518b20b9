//! Fire-and-forget outbound commands.

use colorfill_protocol::{CellState, ClientCommand};
use tokio::sync::mpsc;

use crate::state::SharedState;
use crate::{LinkState, SessionError};

/// Receiving end of the outbound queue, drained by the client driver.
pub type OutboundQueue = mpsc::UnboundedReceiver<ClientCommand>;

/// Cloneable handle for queueing commands to the server.
///
/// Commands are only queued while the link is open. Nothing is
/// acknowledged: once queued, a command is the transport's problem.
#[derive(Debug, Clone)]
pub struct Outbox {
    tx: mpsc::UnboundedSender<ClientCommand>,
    state: SharedState,
}

impl Outbox {
    pub(crate) fn new(
        tx: mpsc::UnboundedSender<ClientCommand>,
        state: SharedState,
    ) -> Self {
        Self { tx, state }
    }

    /// Whether the link is currently open.
    pub fn is_open(&self) -> bool {
        self.state.get() == LinkState::Open
    }

    /// Queues any command.
    pub fn send(&self, command: ClientCommand) -> Result<(), SessionError> {
        let state = self.state.get();
        if state != LinkState::Open {
            tracing::warn!(%command, %state, "dropping command, link not open");
            return Err(SessionError::NotOpen(state));
        }
        tracing::debug!(%command, "queueing command");
        self.tx.send(command).map_err(|_| SessionError::QueueClosed)
    }

    /// Registers with a level sizing hint (playable height / width).
    pub fn register_player(
        &self,
        name: impl Into<String>,
        level_size_ratio: f64,
    ) -> Result<(), SessionError> {
        self.send(ClientCommand::RegisterPlayer {
            name: name.into(),
            level_size_ratio: Some(level_size_ratio),
        })
    }

    /// Registers without a sizing hint.
    pub fn register_player_name_only(
        &self,
        name: impl Into<String>,
    ) -> Result<(), SessionError> {
        self.send(ClientCommand::RegisterPlayer {
            name: name.into(),
            level_size_ratio: None,
        })
    }

    pub fn announce_ready(&self) -> Result<(), SessionError> {
        self.send(ClientCommand::AnnounceReady)
    }

    pub fn announce_done(&self) -> Result<(), SessionError> {
        self.send(ClientCommand::AnnounceDone)
    }

    /// Reports the current grid.
    pub fn announce_progress(
        &self,
        width: usize,
        cells: &[CellState],
    ) -> Result<(), SessionError> {
        self.send(ClientCommand::AnnounceProgress {
            width,
            cells: cells.to_vec(),
        })
    }
}
