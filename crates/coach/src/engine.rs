//! Single-flight bridge to an external UCI engine (async I/O).
//!
//! At most one request is outstanding per bridge. Responses are matched
//! to requests by order alone, so a second request while one is in flight
//! is refused instead of queued.

use std::fmt;
use std::process::Stdio;
use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chess_core::board_utils::{parse_promotion, parse_square};
use chess_core::{MoveDescriptor, Piece, Position, Square};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::process::{Child, Command};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::CoachError;

/// `bestmove <from><to>[promotion]`, anything after is ignored
const BESTMOVE_PATTERN: &str = r"^bestmove\s+([a-h][1-8])([a-h][1-8])([qrbn])?";

/// Difficulty tier; each one maps to a fixed set of engine settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Beginner,
    Easy,
    Medium,
    Hard,
    Expert,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineSettings {
    pub skill: u8,
    /// Aggressiveness bias, sent as the engine's contempt
    pub bias: i32,
    pub depth: u32,
}

impl Difficulty {
    pub fn settings(self) -> EngineSettings {
        let (skill, bias, depth) = match self {
            Difficulty::Beginner => (0, 100, 5),
            Difficulty::Easy => (1, 50, 10),
            Difficulty::Medium => (5, 0, 15),
            Difficulty::Hard => (10, -50, 20),
            Difficulty::Expert => (20, -100, 25),
        };
        EngineSettings { skill, bias, depth }
    }
}

impl FromStr for Difficulty {
    type Err = CoachError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "beginner" => Ok(Difficulty::Beginner),
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            "expert" => Ok(Difficulty::Expert),
            other => Err(CoachError::Config(format!("unknown difficulty: {other}"))),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Expert => "expert",
        };
        f.write_str(name)
    }
}

type Reply = oneshot::Sender<Result<MoveDescriptor, CoachError>>;

enum BridgeState {
    Idle,
    Awaiting { position: Position, reply: Reply },
    Closed,
}

struct Shared {
    state: Mutex<BridgeState>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, BridgeState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Hand a `bestmove` to the pending request, if any, and go back to Idle
    fn resolve(&self, from: Square, to: Square, promotion: Option<Piece>) {
        let mut state = self.lock();
        let (position, reply) = match std::mem::replace(&mut *state, BridgeState::Idle) {
            BridgeState::Awaiting { position, reply } => (position, reply),
            other => {
                *state = other;
                debug!("Ignoring bestmove with no request in flight");
                return;
            }
        };
        drop(state);

        let result = MoveDescriptor::from_position(&position, from, to, promotion).ok_or_else(|| {
            CoachError::Engine(format!(
                "engine proposed a move from an empty square in {position}"
            ))
        });
        if reply.send(result).is_err() {
            debug!("Late bestmove discarded, requester gave up");
        }
    }

    fn close(&self) {
        let mut state = self.lock();
        if let BridgeState::Awaiting { reply, .. } =
            std::mem::replace(&mut *state, BridgeState::Closed)
        {
            let _ = reply.send(Err(CoachError::EngineClosed));
        }
    }
}

/// Parse a `bestmove` line into (from, to, promotion)
pub fn parse_bestmove(pattern: &Regex, line: &str) -> Option<(Square, Square, Option<Piece>)> {
    let caps = pattern.captures(line)?;
    let from = parse_square(caps.get(1)?.as_str()).ok()?;
    let to = parse_square(caps.get(2)?.as_str()).ok()?;
    let promotion = caps
        .get(3)
        .and_then(|m| m.as_str().chars().next())
        .and_then(parse_promotion);
    Some((from, to, promotion))
}

/// Bridge to one engine process, bound to one difficulty tier for its
/// whole life. Build a new bridge to change tier or to recover from a
/// stalled engine.
pub struct EngineBridge {
    difficulty: Difficulty,
    outbound: mpsc::UnboundedSender<String>,
    shared: Arc<Shared>,
    response_timeout: Option<Duration>,
    reader: JoinHandle<()>,
    writer: JoinHandle<()>,
    process: Option<Child>,
}

impl EngineBridge {
    /// Wire a bridge to an engine speaking over `writer`/`reader`.
    /// Must be called inside a Tokio runtime.
    pub fn new<W, R>(writer: W, reader: R, difficulty: Difficulty) -> Result<Self, CoachError>
    where
        W: AsyncWrite + Unpin + Send + 'static,
        R: AsyncBufRead + Unpin + Send + 'static,
    {
        let pattern = Regex::new(BESTMOVE_PATTERN)
            .map_err(|e| CoachError::Engine(format!("Bad bestmove pattern: {e}")))?;

        let shared = Arc::new(Shared {
            state: Mutex::new(BridgeState::Idle),
        });
        let (outbound, commands) = mpsc::unbounded_channel();

        let reader = tokio::spawn(read_responses(reader, pattern, shared.clone()));
        let writer = tokio::spawn(write_commands(writer, commands));

        Ok(Self {
            difficulty,
            outbound,
            shared,
            response_timeout: None,
            reader,
            writer,
            process: None,
        })
    }

    /// Spawn an engine process and run the UCI handshake
    pub async fn spawn(
        path: &str,
        difficulty: Difficulty,
        response_timeout: Option<Duration>,
    ) -> Result<Self, CoachError> {
        let mut process = Command::new(path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| CoachError::Engine(format!("Failed to spawn engine {path}: {e}")))?;

        let mut stdin = process
            .stdin
            .take()
            .ok_or_else(|| CoachError::Engine("Engine stdin unavailable".into()))?;
        let mut stdout = BufReader::new(
            process
                .stdout
                .take()
                .ok_or_else(|| CoachError::Engine("Engine stdout unavailable".into()))?,
        );

        let handshake = async {
            write_line(&mut stdin, "uci").await?;
            wait_for(&mut stdout, "uciok").await?;
            write_line(&mut stdin, "isready").await?;
            wait_for(&mut stdout, "readyok").await
        };
        match response_timeout {
            Some(limit) => tokio::time::timeout(limit, handshake)
                .await
                .map_err(|_| CoachError::UnresponsiveEngine(limit))??,
            None => handshake.await?,
        }
        info!(path, %difficulty, "Engine ready");

        let mut bridge =
            Self::new(stdin, stdout, difficulty)?.with_response_timeout(response_timeout);
        bridge.process = Some(process);
        Ok(bridge)
    }

    /// Default limit applied by [`PendingMove::response`]; `None` waits forever
    pub fn with_response_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.response_timeout = timeout;
        self
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// True while a request is in flight (including one whose caller
    /// already gave up waiting)
    pub fn is_awaiting(&self) -> bool {
        matches!(*self.shared.lock(), BridgeState::Awaiting { .. })
    }

    /// Lines sent for one request, in order
    pub fn command_lines(&self, position: &Position) -> Vec<String> {
        let settings = self.difficulty.settings();
        vec![
            format!("position fen {}", position.to_fen()),
            format!("setoption name Skill Level value {}", settings.skill),
            format!("setoption name Contempt value {}", settings.bias),
            format!("go depth {}", settings.depth),
        ]
    }

    /// Ask the engine for a move. Fails right away with
    /// [`CoachError::BridgeBusy`] if a request is already in flight.
    pub fn request_move(&self, position: &Position) -> Result<PendingMove, CoachError> {
        let mut state = self.shared.lock();
        match *state {
            BridgeState::Idle => {}
            BridgeState::Awaiting { .. } => return Err(CoachError::BridgeBusy),
            BridgeState::Closed => return Err(CoachError::EngineClosed),
        }

        for line in self.command_lines(position) {
            if self.outbound.send(line).is_err() {
                *state = BridgeState::Closed;
                return Err(CoachError::EngineClosed);
            }
        }

        let (reply, receiver) = oneshot::channel();
        *state = BridgeState::Awaiting {
            position: *position,
            reply,
        };
        debug!(fen = %position, difficulty = %self.difficulty, "Move requested");

        Ok(PendingMove {
            receiver,
            timeout: self.response_timeout,
        })
    }

    /// Send `quit` and wait for the process to exit
    pub async fn quit(mut self) {
        let _ = self.outbound.send("quit".to_string());
        if let Some(mut process) = self.process.take() {
            let _ = tokio::time::timeout(Duration::from_secs(2), process.wait()).await;
        }
    }
}

impl Drop for EngineBridge {
    fn drop(&mut self) {
        self.reader.abort();
        self.writer.abort();
        if let Some(process) = self.process.as_mut() {
            let _ = process.start_kill();
        }
    }
}

/// The answer to one [`EngineBridge::request_move`] call
#[derive(Debug)]
pub struct PendingMove {
    receiver: oneshot::Receiver<Result<MoveDescriptor, CoachError>>,
    timeout: Option<Duration>,
}

impl PendingMove {
    /// Wait using the bridge's default timeout
    pub async fn response(self) -> Result<MoveDescriptor, CoachError> {
        match self.timeout {
            Some(limit) => self.response_within(limit).await,
            None => self.receiver.await.map_err(|_| CoachError::EngineClosed)?,
        }
    }

    /// Wait at most `limit`. On timeout the bridge stays busy until the
    /// engine answers; that late answer is dropped.
    pub async fn response_within(self, limit: Duration) -> Result<MoveDescriptor, CoachError> {
        match tokio::time::timeout(limit, self.receiver).await {
            Ok(result) => result.map_err(|_| CoachError::EngineClosed)?,
            Err(_) => {
                warn!(?limit, "Engine did not answer in time");
                Err(CoachError::UnresponsiveEngine(limit))
            }
        }
    }
}

async fn write_line<W: AsyncWrite + Unpin>(writer: &mut W, cmd: &str) -> Result<(), CoachError> {
    debug!(cmd, "engine <");
    writer.write_all(format!("{cmd}\n").as_bytes()).await?;
    writer.flush().await?;
    Ok(())
}

/// Read until a line equal to `expected`
async fn wait_for<R: AsyncBufRead + Unpin>(
    reader: &mut R,
    expected: &str,
) -> Result<(), CoachError> {
    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line).await? == 0 {
            return Err(CoachError::EngineClosed);
        }
        let trimmed = line.trim();
        debug!(line = trimmed, "engine >");
        if trimmed == expected {
            return Ok(());
        }
    }
}

async fn write_commands<W: AsyncWrite + Unpin>(
    mut writer: W,
    mut commands: mpsc::UnboundedReceiver<String>,
) {
    while let Some(cmd) = commands.recv().await {
        if let Err(e) = write_line(&mut writer, &cmd).await {
            warn!(error = %e, "Failed to write to engine");
            break;
        }
    }
}

async fn read_responses<R: AsyncBufRead + Unpin>(
    mut reader: R,
    pattern: Regex,
    shared: Arc<Shared>,
) {
    let mut line = String::new();
    loop {
        line.clear();
        match reader.read_line(&mut line).await {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                warn!(error = %e, "Failed to read from engine");
                break;
            }
        }
        let trimmed = line.trim();
        debug!(line = trimmed, "engine >");

        if let Some((from, to, promotion)) = parse_bestmove(&pattern, trimmed) {
            shared.resolve(from, to, promotion);
        }
    }
    info!("Engine output closed");
    shared.close();
}
