//! `moveset`: replay a scripted controller session through keystroke
//! combination and move recognition, printing every recognized move.

mod script;

use anyhow::{Context, Result};
use clap::Parser;
use core_input::{AssertedKeystrokes, EngineTimings, PlayerInput};
use core_moves::MoveList;
use script::Script;
use std::cell::Cell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Once;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;

const LOG_FILE_NAME: &str = "moveset.log";

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(
    name = "moveset",
    version,
    about = "Replay scripted controller input through move recognition"
)]
struct Args {
    /// Script of timed controller frames (TOML `[[frame]]` tables).
    pub script: PathBuf,
    /// Optional configuration file path (overrides discovery of `moveset.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
    /// Extra move-list file registered after the configured moves.
    #[arg(long = "moves")]
    pub moves: Option<PathBuf>,
}

/// A move recognized during replay, stamped with the frame that produced it.
#[derive(Debug, Clone, PartialEq)]
struct Recognized {
    time: f64,
    name: String,
}

fn configure_logging() -> Option<WorkerGuard> {
    let log_dir = Path::new(".");
    let log_path = log_dir.join(LOG_FILE_NAME);
    if log_path.exists() {
        let _ = std::fs::remove_file(&log_path);
    }

    let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE_NAME);
    let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(nb_writer)
        .try_init()
        .ok()
        .map(|_| guard)
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            tracing::error!(target: "runtime.panic", ?info, "panic");
            default_panic(info);
        }));
    });
}

fn build_move_list(config: &core_config::Config, extra: Option<&Path>) -> Result<MoveList> {
    let mut moves = MoveList::from_definitions(&config.move_definitions()?)
        .context("registering configured moves")?;
    if let Some(path) = extra {
        let definitions = core_config::load_move_list(path)?;
        moves
            .add_moves(&definitions)
            .with_context(|| format!("registering moves from {}", path.display()))?;
    }
    Ok(moves)
}

fn replay(script: &Script, moves: MoveList, timings: EngineTimings) -> Vec<Recognized> {
    let time = Rc::new(Cell::new(0.0));
    let clock = time.clone();
    let mut player =
        PlayerInput::with_timings(AssertedKeystrokes::new(), move || clock.get(), timings);
    player.set_moves(moves);

    let mut recognized = Vec::new();
    for frame in &script.frames {
        time.set(frame.time);
        player
            .controller_mut()
            .set(frame.asserted.iter().copied());
        player.update_flipped(frame.flipped);
        while let Some(name) = player.get_next_move() {
            recognized.push(Recognized {
                time: frame.time,
                name: name.to_string(),
            });
        }
    }
    info!(
        target: "runtime",
        frames = script.frames.len(),
        recognized = recognized.len(),
        leftover = %player,
        "replay_finished"
    );
    recognized
}

fn main() -> Result<()> {
    let args = Args::parse();
    let _log_guard = configure_logging();
    install_panic_hook();

    let config = core_config::load_from(args.config.clone())?;
    let moves = build_move_list(&config, args.moves.as_deref())?;
    if moves.is_empty() {
        warn!(target: "runtime", "no_moves_registered");
    }
    let script = Script::load(&args.script)?;
    let timings = EngineTimings {
        buffered_input_expire: config.file.input.buffered_input_expire,
        queued_input_expire: config.file.input.queued_input_expire,
    };
    info!(
        target: "runtime",
        script = %args.script.display(),
        roots = moves.len(),
        buffered_input_expire = timings.buffered_input_expire,
        queued_input_expire = timings.queued_input_expire,
        "replay_started"
    );

    for Recognized { time, name } in replay(&script, moves, timings) {
        println!("{time:.3}\t{name}");
    }
    Ok(())
}
