use colorfill::prelude::*;

/// Cells per second.
const SPEED: f64 = 12.0;

const DIRECTIONS: [(i64, i64); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];

// ---------------------------------------------------------------------------
// Strategy
// ---------------------------------------------------------------------------

/// Picks a direction whenever the player is idle: the first direction
/// (rotating from the last one used) whose neighbour is still empty, or
/// failing that any direction that isn't blocked.
#[derive(Default)]
struct Strategy {
    next: usize,
}

impl Strategy {
    fn choose(&mut self, field: &PlayingField) -> Option<(f64, f64)> {
        let (x, y) = field.player_position();
        let (x, y) = (x.round() as i64, y.round() as i64);
        let neighbour = |(dx, dy): (i64, i64)| -> Option<CellState> {
            let (nx, ny) = (x + dx, y + dy);
            if nx < 0 || ny < 0 {
                return None;
            }
            field.cell_at(nx as usize, ny as usize)
        };

        let order: Vec<usize> = (0..DIRECTIONS.len())
            .map(|i| (self.next + i) % DIRECTIONS.len())
            .collect();
        let pick = order
            .iter()
            .copied()
            .find(|&i| neighbour(DIRECTIONS[i]) == Some(CellState::Empty))
            .or_else(|| {
                order.iter().copied().find(|&i| {
                    matches!(neighbour(DIRECTIONS[i]), Some(c) if c != CellState::Solid)
                })
            })?;

        self.next = pick + 1;
        let (dx, dy) = DIRECTIONS[pick];
        Some((dx as f64 * SPEED, dy as f64 * SPEED))
    }
}

// ---------------------------------------------------------------------------
// Round
// ---------------------------------------------------------------------------

struct Round {
    field: PlayingField,
    strategy: Strategy,
    done_sent: bool,
}

impl Round {
    /// Steers, moves and reports for one frame. Returns `true` on the frame
    /// the level is completed.
    fn tick(&mut self, frame: &FrameInfo, progress_every: u32, outbox: &Outbox) -> bool {
        if self.field.player().is_idle() {
            if let Some((sx, sy)) = self.strategy.choose(&self.field) {
                self.field.set_speed(sx, sy);
            }
        }
        self.field.advance(frame.dt.as_secs_f64());

        let complete = self.field.is_complete();
        if complete || frame.frame % u64::from(progress_every.max(1)) == 0 {
            let grid = self.field.grid();
            sent("progress", outbox.announce_progress(grid.width(), grid.cells()));
        }
        if complete && !self.done_sent {
            sent("done", outbox.announce_done());
            self.done_sent = true;
            tracing::info!(level = self.field.level_id(), "level complete");
            return true;
        }
        false
    }
}

/// Sends are fire-and-forget: a link that closed under us shows up as a
/// `Lost` event, not as an error here.
fn sent(what: &str, result: Result<(), SessionError>) {
    if let Err(e) = result {
        tracing::debug!(command = what, error = %e, "command not sent");
    }
}

fn start_round(level: &Level) -> Result<Round, ColorfillError> {
    let height = sizing::level_rows(level);
    let grid = Grid::from_level(level, height)?;
    let start = grid.first_empty().unwrap_or((0, 0));
    let field = PlayingField::new(level, height, start)?;
    tracing::info!(level = level.id, name = %level.name, ?start, "round started");
    Ok(Round {
        field,
        strategy: Strategy::default(),
        done_sent: false,
    })
}

// ---------------------------------------------------------------------------
// Main loop
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config = match std::env::args().nth(1) {
        Some(path) => ClientConfig::load(path)?,
        None => ClientConfig::default(),
    };

    let mut session = Session::new();
    let mut events = forward_events(&mut session);
    let client = ColorfillClient::connect(&config.server_url, session).await?;
    let outbox = client.outbox();
    let driver = tokio::spawn(client.run());

    let mut clock = FrameClock::with_rate(config.frame_rate_hz);
    clock.pause();
    let mut scene = Scene::Connecting;
    let mut round: Option<Round> = None;

    loop {
        tokio::select! {
            event = events.recv() => {
                let Some(event) = event else { break };
                match &event {
                    ClientEvent::Established => {
                        let result = match config.level_size_ratio {
                            Some(ratio) => outbox.register_player(&config.player_name, ratio),
                            None => outbox.register_player_name_only(&config.player_name),
                        };
                        sent("register", result);
                    }
                    ClientEvent::Lost => {
                        tracing::info!("server went away");
                        break;
                    }
                    ClientEvent::Lobby(lobby) => {
                        let me = lobby.players.iter().find(|p| p.name == config.player_name);
                        if me.is_some_and(|p| !p.is_ready) {
                            sent("ready", outbox.announce_ready());
                        }
                    }
                    ClientEvent::Level(level) => {
                        match start_round(level) {
                            Ok(r) => {
                                round = Some(r);
                                clock.resume();
                            }
                            Err(e) => tracing::warn!(error = %e, "cannot play level"),
                        }
                    }
                    ClientEvent::Message(msg) => {
                        tracing::info!(text = %msg.text, "message");
                        round = None;
                        clock.pause();
                    }
                    ClientEvent::OverlayMessage(msg) => {
                        tracing::info!(text = %msg.text, "overlay");
                    }
                }
                if let Some(frame) = event.into_frame() {
                    scene = scene.after(frame);
                    tracing::debug!(scene = scene.name(), "scene changed");
                }
            }
            frame = clock.wait_for_frame() => {
                let Some(r) = round.as_mut() else {
                    clock.pause();
                    continue;
                };
                if r.tick(&frame, config.progress_interval_frames, &outbox) {
                    clock.pause();
                }
            }
        }
    }

    let session = driver.await?;
    tracing::info!(state = %session.state(), "client stopped");
    Ok(())
}
