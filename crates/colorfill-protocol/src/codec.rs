//! Codec trait and the text codec spoken by the game server.
//!
//! Inbound frames look like `<tag>:<payload>`. The tag is made of ASCII
//! letters, digits and `_` and ends at the first `:`; the payload is
//! everything after it. Frames that don't have this shape, and tags this
//! client doesn't know, decode to `Ok(None)` — they are not errors.
//!
//! Outbound commands are single text frames with the same shape and no
//! trailing newline.

use crate::packing::encode_packed;
use crate::{
    CellState, ClientCommand, Level, Lobby, LobbyPlayer, Message,
    OverlayMessage, ProtocolError, ServerFrame,
};

/// Converts between frames and their wire representation.
///
/// `Send + Sync + 'static` so a codec can live inside the client task.
pub trait Codec: Send + Sync + 'static {
    /// Renders a command as one text frame.
    fn encode(&self, command: &ClientCommand) -> String;

    /// Parses one inbound frame.
    ///
    /// # Errors
    /// Returns a [`ProtocolError`] when a known tag carries a malformed
    /// payload. The caller drops the frame and keeps the connection.
    fn decode(&self, data: &[u8]) -> Result<Option<ServerFrame>, ProtocolError>;
}

// ---------------------------------------------------------------------------
// TextCodec
// ---------------------------------------------------------------------------

/// The line-oriented text codec of the Colorfill server.
///
/// ## Example
///
/// ```rust
/// use colorfill_protocol::{ClientCommand, Codec, ServerFrame, TextCodec};
///
/// let codec = TextCodec;
///
/// let frame = codec.decode(b"message:#000;#fff;hello;world").unwrap();
/// match frame {
///     Some(ServerFrame::Message(m)) => assert_eq!(m.text, "hello;world"),
///     other => panic!("unexpected frame: {other:?}"),
/// }
///
/// assert_eq!(codec.encode(&ClientCommand::AnnounceReady), "AnnounceReady:");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TextCodec;

impl Codec for TextCodec {
    fn encode(&self, command: &ClientCommand) -> String {
        let tag = command.tag();
        match command {
            ClientCommand::RegisterPlayer {
                name,
                level_size_ratio: Some(ratio),
            } => format!("{tag}:{name}{{levelSizeRatio={ratio}}}"),
            ClientCommand::RegisterPlayer {
                name,
                level_size_ratio: None,
            } => format!("{tag}:{name}"),
            ClientCommand::AnnounceReady | ClientCommand::AnnounceDone => {
                format!("{tag}:")
            }
            ClientCommand::AnnounceProgress { width, cells } => {
                format!(
                    "{tag}:{width};{};{}",
                    progress_height(cells.len(), *width),
                    encode_packed(cells)
                )
            }
        }
    }

    fn decode(&self, data: &[u8]) -> Result<Option<ServerFrame>, ProtocolError> {
        let text = std::str::from_utf8(data)?;
        let Some((tag, payload)) = split_tag(text) else {
            return Ok(None);
        };

        let frame = match tag {
            "level" => ServerFrame::Level(decode_level(payload)?),
            "lobby" => ServerFrame::Lobby(decode_lobby(payload)),
            "message" => ServerFrame::Message(decode_message(payload)?),
            "overlay_message" => {
                ServerFrame::OverlayMessage(decode_overlay_message(payload)?)
            }
            _ => return Ok(None),
        };
        Ok(Some(frame))
    }
}

/// Height field of a progress report.
///
/// Derived from the unpadded cell count by real division, exactly as the
/// server expects it. The packed bytes may cover up to three more cells.
fn progress_height(cell_count: usize, width: usize) -> f64 {
    cell_count as f64 / width as f64
}

fn split_tag(text: &str) -> Option<(&str, &str)> {
    let (tag, payload) = text.split_once(':')?;
    tag.bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'_')
        .then_some((tag, payload))
}

// ---------------------------------------------------------------------------
// Per-tag decoders
// ---------------------------------------------------------------------------

fn decode_level(payload: &str) -> Result<Level, ProtocolError> {
    const TAG: &str = "level";
    let mut parts = payload.split(';');
    let mut field = |name: &'static str| {
        parts
            .next()
            .ok_or(ProtocolError::MissingField { tag: TAG, field: name })
    };

    let id = field("id")?;
    let name = field("name")?;
    let width = field("width")?;
    let brightness = field("brightness")?;
    let digits = field("cells")?;

    let id = parse_number(TAG, "id", id)?;
    let width: usize = parse_number(TAG, "width", width)?;
    if width == 0 {
        return Err(ProtocolError::ZeroWidth);
    }
    let brightness = parse_number(TAG, "brightness", brightness)?;

    let blocks = digits
        .chars()
        .enumerate()
        .map(|(index, c)| {
            c.to_digit(10)
                .and_then(|d| CellState::try_from(d as u8).ok())
                .ok_or(ProtocolError::InvalidCell(c, index))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Level {
        id,
        name: name.to_owned(),
        blocks,
        width,
        brightness,
    })
}

fn decode_lobby(payload: &str) -> Lobby {
    if payload.is_empty() {
        return Lobby::default();
    }

    let players = payload
        .split('\n')
        .map(|entry| {
            let mut chars = entry.chars();
            let flag = chars.next_back();
            LobbyPlayer {
                name: chars.as_str().to_owned(),
                is_ready: flag == Some('+'),
            }
        })
        .collect();

    Lobby { players }
}

fn decode_message(payload: &str) -> Result<Message, ProtocolError> {
    const TAG: &str = "message";
    let mut parts = payload.splitn(3, ';');
    let mut field = |name: &'static str| {
        parts
            .next()
            .ok_or(ProtocolError::MissingField { tag: TAG, field: name })
    };

    Ok(Message {
        bg_fill_style: field("bgFillStyle")?.to_owned(),
        fg_fill_style: field("fgFillStyle")?.to_owned(),
        text: field("str")?.to_owned(),
    })
}

fn decode_overlay_message(
    payload: &str,
) -> Result<OverlayMessage, ProtocolError> {
    const TAG: &str = "overlay_message";
    let mut parts = payload.splitn(4, ';');
    let mut field = |name: &'static str| {
        parts
            .next()
            .ok_or(ProtocolError::MissingField { tag: TAG, field: name })
    };

    let duration = field("duration")?;
    let animation = field("animation")?;
    let fill_style = field("fillStyle")?;
    let text = field("str")?;

    Ok(OverlayMessage {
        duration: parse_number(TAG, "duration", duration)?,
        animation: animation.to_owned(),
        fill_style: fill_style.to_owned(),
        text: text.to_owned(),
    })
}

fn parse_number<T: std::str::FromStr>(
    tag: &'static str,
    field: &'static str,
    value: &str,
) -> Result<T, ProtocolError> {
    value.trim().parse().map_err(|_| ProtocolError::InvalidNumber {
        tag,
        field,
        value: value.to_owned(),
    })
}
