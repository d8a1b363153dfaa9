mod app;
mod field;
mod game;
mod snake;
mod term;

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use app::{App, AppCommand};
use term::TermManager;

pub type TermInt = u16;
pub type Coords = (TermInt, TermInt);

pub const WIDTH: TermInt = 40;
pub const HEIGHT: TermInt = 20;

const FPS: u64 = 15;
const FRAME_LENGTH: Duration = Duration::from_nanos(1_000_000_000 / FPS);
const CLEAR_EVERY_FRAMES: u64 = 200;

#[derive(Parser, Debug)]
#[command(name = "snake", about = "Snake on a wrapping 40x20 field, drawn as text")]
struct Args {
    /// Seed for apple placement; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Show the frame counter in the header
    #[arg(long)]
    test_mode: bool,

    /// Write logs to this file (filtered by RUST_LOG, default info)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;

    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed, test_mode = args.test_mode, "Starting snake");

    let mut term = TermManager::new();
    let mut app = App::new(seed, args.test_mode);

    let res = term.setup().and_then(|_| run_app(&mut term, &mut app));

    // Restore the terminal even if the game loop failed
    term.restore()?;

    if let Err(err) = &res {
        error!("Game loop failed: {:?}", err);
    }

    res
}

fn init_logging(path: Option<&Path>) -> Result<()> {
    // The terminal belongs to the game, so logs only ever go to a file
    let path = match path {
        Some(path) => path,
        None => return Ok(()),
    };

    let file = File::create(path)
        .with_context(|| format!("Error creating log file {}", path.display()))?;
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();

    Ok(())
}

fn run_app(term: &mut TermManager, app: &mut App) -> Result<()> {
    term.clear()?;
    term.print_frame(&app.render())?;

    let mut next_frame = Instant::now() + FRAME_LENGTH;

    loop {
        let now = Instant::now();

        if now >= next_frame {
            next_frame = now + FRAME_LENGTH;

            if app.game().is_running() {
                app.update();
                term.print_frame(&app.render())?;

                if app.game().is_running() && app.game().frame_id() % CLEAR_EVERY_FRAMES == 0 {
                    term.clear()?;
                    term.print_frame(&app.redraw())?;
                }
            }
            continue;
        }

        if let Some(key) = term.poll_key(next_frame - now)? {
            match App::handle_input(&key) {
                Some(AppCommand::Quit) => return Ok(()),
                Some(command) => {
                    if app.handle_command(command) {
                        term.print_frame(&app.render())?;
                    }
                },
                None => {},
            }
        }
    }
}
