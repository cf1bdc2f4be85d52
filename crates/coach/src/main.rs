//! Chess coach CLI
//!
//! Reviews moves, describes positions, and asks an external UCI engine for
//! bot moves and hints.

use anyhow::Context;
use chess_core::{MoveDescriptor, Position};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use coach::config::CoachConfig;
use coach::{
    build_context, Coach, CoachError, Difficulty, EngineBridge, FeedbackSelector, MoveFeedback,
    Perspective,
};

#[derive(Parser, Debug)]
#[command(name = "chess-coach", about = "Natural-language feedback on chess moves")]
struct Cli {
    /// Seed for reproducible messages (overrides COACH_SEED)
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Print JSON instead of plain text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Comment on a move played from a position
    Review {
        #[arg(long)]
        fen: String,
        /// Move in coordinate notation, e.g. e2e4 or e7e8q
        #[arg(long = "move")]
        mv: String,
        /// player, engine or hint
        #[arg(long, default_value = "player")]
        voice: Perspective,
    },
    /// Describe the strategic context of a position
    Analyze {
        #[arg(long)]
        fen: String,
    },
    /// Let the engine play a move and comment on it
    Bot {
        #[arg(long)]
        fen: String,
        /// beginner, easy, medium, hard or expert (overrides COACH_DIFFICULTY)
        #[arg(long)]
        difficulty: Option<Difficulty>,
    },
    /// Ask the engine for a suggestion
    Hint {
        #[arg(long)]
        fen: String,
        #[arg(long)]
        difficulty: Option<Difficulty>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    // Load .env file for local dev
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let mut config = CoachConfig::load()?;
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    let selector = match config.seed {
        Some(seed) => FeedbackSelector::seeded(seed),
        None => FeedbackSelector::new(),
    };
    let mut coach = Coach::new(selector);

    match cli.command {
        Command::Review { fen, mv, voice } => {
            let position = parse_position(&fen)?;
            let descriptor = MoveDescriptor::parse_uci(&position, &mv)?;
            match coach.review(&position, descriptor, voice) {
                Ok(feedback) => print_feedback(&feedback, cli.json)?,
                Err(e @ CoachError::IllegalMove { .. }) => {
                    warn!(%mv, "Move rejected");
                    anyhow::bail!(e);
                }
                Err(e) => return Err(e.into()),
            }
        }
        Command::Analyze { fen } => {
            let position = parse_position(&fen)?;
            let context = build_context(&position);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&context)?);
            } else {
                let a = &context.analysis;
                println!("Phase:      {:?}", context.phase);
                println!("Initiative: {:?}", context.initiative);
                println!(
                    "Material:   white {} / black {} ({:+})",
                    a.material.white, a.material.black, a.material.diff
                );
                println!(
                    "Center:     white {:.1} / black {:.1}",
                    a.center_control.white, a.center_control.black
                );
                println!("Mobility:   {} legal moves", a.piece_activity);
                println!("Forks:      {}", a.tactical_patterns.forks);
                for threat in &context.threats {
                    println!("Threat:     {threat}");
                }
            }
        }
        Command::Bot { fen, difficulty } => {
            let position = parse_position(&fen)?;
            let feedback =
                engine_move(&mut coach, &config, &position, difficulty, Perspective::Engine).await?;
            print_feedback(&feedback, cli.json)?;
        }
        Command::Hint { fen, difficulty } => {
            let position = parse_position(&fen)?;
            let feedback =
                engine_move(&mut coach, &config, &position, difficulty, Perspective::Hint).await?;
            print_feedback(&feedback, cli.json)?;
        }
    }

    Ok(())
}

/// Start a bridge for this one request and shut it down afterwards
async fn engine_move(
    coach: &mut Coach,
    config: &CoachConfig,
    position: &Position,
    difficulty: Option<Difficulty>,
    voice: Perspective,
) -> anyhow::Result<MoveFeedback> {
    let difficulty = difficulty.unwrap_or(config.difficulty);
    let bridge = EngineBridge::spawn(&config.stockfish_path, difficulty, config.engine_timeout)
        .await
        .with_context(|| format!("starting engine at {}", config.stockfish_path))?;
    info!(%difficulty, %voice, "Asking engine for a move");

    let result = match voice {
        Perspective::Hint => coach.hint(position, &bridge).await,
        _ => coach.bot_move(position, &bridge).await,
    };
    bridge.quit().await;
    Ok(result?)
}

fn parse_position(fen: &str) -> anyhow::Result<Position> {
    Position::from_fen(fen).with_context(|| format!("parsing FEN {fen:?}"))
}

fn print_feedback(feedback: &MoveFeedback, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(feedback)?);
    } else {
        println!("{} ({:?})", feedback.uci, feedback.quality);
        println!("{}", feedback.message);
    }
    Ok(())
}
