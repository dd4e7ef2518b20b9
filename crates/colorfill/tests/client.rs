//! Integration tests for the client driver against a scripted server.
//!
//! The "server" is a bare `tokio-tungstenite` acceptor on an OS-assigned
//! port; each test scripts what it sends and checks what it receives.

use std::time::Duration;

use colorfill::prelude::*;
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio_tungstenite::tungstenite::Message as WsMessage;

type ServerWs = tokio_tungstenite::WebSocketStream<tokio::net::TcpStream>;

// =========================================================================
// Helpers
// =========================================================================

async fn spawn_server() -> (String, tokio::task::JoinHandle<ServerWs>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        tokio_tungstenite::accept_async(stream).await.unwrap()
    });
    (format!("ws://{addr}"), handle)
}

async fn next_text(ws: &mut ServerWs) -> String {
    let msg = tokio::time::timeout(Duration::from_secs(5), ws.next())
        .await
        .expect("server should receive a frame")
        .unwrap()
        .unwrap();
    msg.into_text().unwrap().as_str().to_owned()
}

async fn next_event(events: &mut UnboundedReceiver<ClientEvent>) -> ClientEvent {
    tokio::time::timeout(Duration::from_secs(5), events.recv())
        .await
        .expect("event should arrive")
        .expect("channel open")
}

// =========================================================================
// Tests
// =========================================================================

#[tokio::test]
async fn test_register_and_receive_lobby() {
    let (url, server) = spawn_server().await;

    let mut session = Session::new();
    let mut events = forward_events(&mut session);
    let client = ColorfillClient::connect(&url, session).await.unwrap();
    let outbox = client.outbox();
    let mut server_ws = server.await.unwrap();
    let run = tokio::spawn(client.run());

    assert_eq!(next_event(&mut events).await, ClientEvent::Established);

    outbox.register_player("alice", 1.5).unwrap();
    assert_eq!(
        next_text(&mut server_ws).await,
        "RegisterPlayer:alice{levelSizeRatio=1.5}"
    );

    server_ws
        .send(WsMessage::Text("lobby:alice-\nbob+".into()))
        .await
        .unwrap();
    let ClientEvent::Lobby(lobby) = next_event(&mut events).await else {
        panic!("expected lobby");
    };
    assert_eq!(lobby.players.len(), 2);
    assert!(lobby.players[1].is_ready);

    outbox.announce_ready().unwrap();
    assert_eq!(next_text(&mut server_ws).await, "AnnounceReady:");

    server_ws.send(WsMessage::Close(None)).await.unwrap();
    assert_eq!(next_event(&mut events).await, ClientEvent::Lost);

    let session = run.await.unwrap();
    assert_eq!(session.state(), LinkState::Closed);
    assert!(outbox.announce_done().is_err());
}

#[tokio::test]
async fn test_malformed_and_unknown_frames_keep_connection() {
    let (url, server) = spawn_server().await;

    let mut session = Session::new();
    let mut events = forward_events(&mut session);
    let client = ColorfillClient::connect(&url, session).await.unwrap();
    let mut server_ws = server.await.unwrap();
    let _run = tokio::spawn(client.run());
    assert_eq!(next_event(&mut events).await, ClientEvent::Established);

    for frame in ["level:1;broken", "leaderboard:{}", "garbage", "message:#000;#fff;ok"] {
        server_ws.send(WsMessage::Text(frame.into())).await.unwrap();
    }

    let ClientEvent::Message(msg) = next_event(&mut events).await else {
        panic!("expected message");
    };
    assert_eq!(msg.text, "ok");
}

#[tokio::test]
async fn test_play_level_and_report_progress() {
    let (url, server) = spawn_server().await;

    let mut session = Session::new();
    let mut events = forward_events(&mut session);
    let client = ColorfillClient::connect(&url, session).await.unwrap();
    let outbox = client.outbox();
    let mut server_ws = server.await.unwrap();
    let _run = tokio::spawn(client.run());
    assert_eq!(next_event(&mut events).await, ClientEvent::Established);

    // 4×3: solid border around a two-cell corridor.
    server_ws
        .send(WsMessage::Text("level:5;Hall;4;0.6;111110011111".into()))
        .await
        .unwrap();
    let ClientEvent::Level(level) = next_event(&mut events).await else {
        panic!("expected level");
    };

    let height = sizing::level_rows(&level);
    let mut field = PlayingField::new(&level, height, (1, 1)).unwrap();
    assert!(!field.is_complete());

    field.set_speed(10.0, 0.0);
    field.advance(1.0);
    assert!(field.is_complete());

    let grid = field.grid();
    outbox.announce_progress(grid.width(), grid.cells()).unwrap();
    outbox.announce_done().unwrap();

    // 12 cells: 1111 1221 1111 → bytes 0x55, 0x69, 0x55.
    assert_eq!(next_text(&mut server_ws).await, "AnnounceProgress:4;3;VWlV");
    assert_eq!(next_text(&mut server_ws).await, "AnnounceDone:");
}

#[tokio::test]
async fn test_connect_failure_fires_lost() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut session = Session::new();
    let mut events = forward_events(&mut session);
    let result = ColorfillClient::connect(&format!("ws://{addr}"), session).await;

    assert!(matches!(result, Err(ColorfillError::Transport(_))));
    assert_eq!(next_event(&mut events).await, ClientEvent::Lost);
}

#[tokio::test]
async fn test_close_from_client_side() {
    let (url, server) = spawn_server().await;
    let mut session = Session::new();
    let mut events = forward_events(&mut session);
    let client = ColorfillClient::connect(&url, session).await.unwrap();
    let _server_ws = server.await.unwrap();
    assert_eq!(next_event(&mut events).await, ClientEvent::Established);

    let session = client.close().await.unwrap();
    assert_eq!(session.state(), LinkState::Closed);
    assert_eq!(next_event(&mut events).await, ClientEvent::Lost);
}
