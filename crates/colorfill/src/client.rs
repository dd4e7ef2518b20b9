//! The client driver: one connection, one session, one event loop.
//!
//! [`ColorfillClient::run`] pumps inbound frames into the [`Session`]
//! (which decodes them and calls subscribers) and drains the session's
//! outbound queue onto the socket, until the transport closes. Everything
//! runs on the calling task; there is no parallel decoding.

use colorfill_protocol::{Codec, TextCodec};
use colorfill_session::{OutboundQueue, Outbox, Session, SessionError};
use colorfill_transport::{
    Connection, ConnectionId, Connector, TransportError, WebSocketConnection,
    WebSocketConnector,
};

use crate::ColorfillError;

/// A connected client.
pub struct ColorfillClient<T: Connection, C: Codec = TextCodec> {
    conn: T,
    session: Session<C>,
    outbound: OutboundQueue,
}

impl<C: Codec> ColorfillClient<WebSocketConnection, C> {
    /// Connects to `url` over WebSocket.
    ///
    /// If the connection can't be opened the session's lost callback
    /// fires before the error is returned.
    pub async fn connect(
        url: &str,
        session: Session<C>,
    ) -> Result<Self, ColorfillError> {
        Self::connect_with(&WebSocketConnector, url, session).await
    }
}

impl<T: Connection, C: Codec> ColorfillClient<T, C> {
    /// Connects to `url` with any connector whose errors are transport
    /// errors.
    pub async fn connect_with<K>(
        connector: &K,
        url: &str,
        mut session: Session<C>,
    ) -> Result<Self, ColorfillError>
    where
        K: Connector<Connection = T, Error = TransportError>,
    {
        tracing::info!(url, "connecting");
        match connector.connect(url).await {
            Ok(conn) => Self::from_connection(conn, session),
            Err(e) => {
                session.connection_error(&e);
                session.connection_closed(None);
                Err(e.into())
            }
        }
    }

    /// Wraps an already open connection and marks the session open.
    pub fn from_connection(
        conn: T,
        mut session: Session<C>,
    ) -> Result<Self, ColorfillError> {
        let outbound = session
            .take_outbound()
            .ok_or(SessionError::QueueClosed)?;
        session.connection_opened();
        Ok(Self {
            conn,
            session,
            outbound,
        })
    }

    pub fn connection_id(&self) -> ConnectionId {
        self.conn.id()
    }

    /// A handle for queueing commands from other tasks.
    pub fn outbox(&self) -> Outbox {
        self.session.outbox()
    }

    pub fn session(&self) -> &Session<C> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session<C> {
        &mut self.session
    }

    /// Runs until the transport closes, then returns the closed session.
    ///
    /// Transport errors are reported to the session and end the loop as a
    /// close; they are not returned. Dropping the future cancels the loop.
    pub async fn run(mut self) -> Session<C> {
        let id = self.conn.id();
        tracing::debug!(%id, "client loop started");

        loop {
            tokio::select! {
                inbound = self.conn.recv() => match inbound {
                    Ok(Some(data)) => {
                        self.session.handle_frame(&data);
                    }
                    Ok(None) => {
                        self.session.connection_closed(None);
                        break;
                    }
                    Err(e) => {
                        self.session.connection_error(&e);
                        self.session.connection_closed(None);
                        break;
                    }
                },
                Some(command) = self.outbound.recv() => {
                    let text = self.session.codec().encode(&command);
                    tracing::debug!(%id, %command, "sending command");
                    if let Err(e) = self.conn.send_text(&text).await {
                        self.session.connection_error(&e);
                    }
                }
            }
        }

        tracing::debug!(%id, "client loop finished");
        self.session
    }

    /// Closes the connection without waiting for the server.
    pub async fn close(self) -> Result<Session<C>, ColorfillError>
    where
        ColorfillError: From<T::Error>,
    {
        let Self {
            conn, mut session, ..
        } = self;
        let result = conn.close().await;
        session.connection_closed(Some(1000));
        result?;
        Ok(session)
    }
}
