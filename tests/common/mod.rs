#![allow(dead_code)]

use chess_core::Position;
use coach::{Difficulty, EngineBridge};
use tokio::io::{
    AsyncBufReadExt, AsyncWriteExt, BufReader, DuplexStream, Lines, ReadHalf, WriteHalf,
};

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Parse a FEN that the test knows is valid.
pub fn pos(fen: &str) -> Position {
    Position::from_fen(fen).unwrap_or_else(|e| panic!("bad test FEN {fen}: {e}"))
}

/// Mirror a FEN top-to-bottom and swap piece colors, side to move and
/// castling rights. En passant is dropped.
pub fn color_swapped(fen: &str) -> String {
    let fields: Vec<&str> = fen.split_whitespace().collect();
    let swap_case = |s: &str| -> String {
        s.chars()
            .map(|c| {
                if c.is_ascii_uppercase() {
                    c.to_ascii_lowercase()
                } else {
                    c.to_ascii_uppercase()
                }
            })
            .collect()
    };

    let placement: Vec<String> = fields[0].split('/').rev().map(swap_case).collect();
    let side = if fields[1] == "w" { "b" } else { "w" };
    let castling = if fields[2] == "-" {
        "-".to_string()
    } else {
        let swapped = swap_case(fields[2]);
        let mut ordered: Vec<char> = swapped.chars().collect();
        ordered.sort_by_key(|c| "KQkq".find(*c).unwrap_or(4));
        ordered.into_iter().collect()
    };
    format!("{} {} {} - 0 1", placement.join("/"), side, castling)
}

/// The engine end of an in-memory pipe
pub struct FakeEngine {
    pub lines: Lines<BufReader<ReadHalf<DuplexStream>>>,
    pub out: WriteHalf<DuplexStream>,
}

impl FakeEngine {
    /// Next command the bridge sent
    pub async fn recv(&mut self) -> String {
        self.lines
            .next_line()
            .await
            .expect("read from bridge")
            .expect("bridge closed its side")
    }

    /// Read one full request (position, two options, go)
    pub async fn recv_request(&mut self) -> Vec<String> {
        let mut request = Vec::new();
        for _ in 0..4 {
            request.push(self.recv().await);
        }
        request
    }

    pub async fn send(&mut self, line: &str) {
        self.out
            .write_all(format!("{line}\n").as_bytes())
            .await
            .expect("write to bridge");
        self.out.flush().await.expect("flush to bridge");
    }
}

/// A bridge wired to a fake engine over `tokio::io::duplex`
pub fn bridge_pair(difficulty: Difficulty) -> (EngineBridge, FakeEngine) {
    let (bridge_side, engine_side) = tokio::io::duplex(16 * 1024);

    let (bridge_read, bridge_write) = tokio::io::split(bridge_side);
    let bridge = EngineBridge::new(bridge_write, BufReader::new(bridge_read), difficulty)
        .expect("bridge setup");

    let (engine_read, engine_write) = tokio::io::split(engine_side);
    let engine = FakeEngine {
        lines: BufReader::new(engine_read).lines(),
        out: engine_write,
    };
    (bridge, engine)
}
