//! Terminal match-3 runner (default binary).
//!
//! Uses crossterm for input and the framebuffer renderer from `match3-term`.
//! Logs go to a file since the terminal is taken over by the game.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::info;

use match3::app::{App, AppOptions};
use match3::core::WorldConfig;
use match3::highscores::DEFAULT_SCORES_FILE;
use match3::term::{FrameBuffer, TerminalRenderer, Viewport};
use match3::types::{GameModeKind, DEFAULT_COLS, DEFAULT_ROWS, DEFAULT_TILE_KINDS, FRAME_MS, TILE_SIZE};

#[derive(Parser, Debug)]
#[command(name = "match3", version, about = "Match-3 puzzle in the terminal")]
struct Args {
    /// Board columns (3 to 32)
    #[arg(long, default_value_t = DEFAULT_COLS)]
    cols: u16,

    /// Board rows (3 to 32)
    #[arg(long, default_value_t = DEFAULT_ROWS)]
    rows: u16,

    /// Number of tile kinds (at least 3)
    #[arg(long, default_value_t = DEFAULT_TILE_KINDS)]
    kinds: u8,

    /// RNG seed; defaults to the current time
    #[arg(long)]
    seed: Option<u32>,

    /// Start this mode immediately (classic, quick-death)
    #[arg(long, value_parser = parse_mode)]
    mode: Option<GameModeKind>,

    /// Skip the menu: play one game (classic unless --mode is given) and exit
    #[arg(long)]
    no_menu: bool,

    /// High-score file
    #[arg(long, value_name = "FILE", default_value = DEFAULT_SCORES_FILE)]
    scores: PathBuf,

    /// Log file (RUST_LOG controls the level)
    #[arg(long, value_name = "FILE", default_value = "match3.log")]
    log_file: PathBuf,

    /// Start with background music off
    #[arg(long)]
    no_music: bool,

    /// Do not ring the terminal bell for sound effects
    #[arg(long)]
    no_bell: bool,
}

fn parse_mode(s: &str) -> Result<GameModeKind, String> {
    GameModeKind::from_str(s).ok_or_else(|| format!("unknown mode '{s}' (classic, quick-death)"))
}

fn time_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

fn init_logging(path: &Path) -> Result<()> {
    let log_file = OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_file)?;

    let seed = args.seed.unwrap_or_else(time_seed);
    let options = AppOptions {
        world: WorldConfig {
            cols: args.cols,
            rows: args.rows,
            tile_kinds: args.kinds,
            tile_size: TILE_SIZE,
            seed,
        },
        start_mode: match (args.mode, args.no_menu) {
            (Some(mode), _) => Some(mode),
            (None, true) => Some(GameModeKind::Classic),
            (None, false) => None,
        },
        exit_after_game: args.no_menu,
        scores_path: Some(args.scores),
        music: !args.no_music,
        bell: !args.no_bell,
    };
    info!(seed, cols = args.cols, rows = args.rows, kinds = args.kinds, "starting");

    // Validate before touching the terminal so config errors print normally.
    let mut app = App::new(options)?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut app);

    // Always try to restore terminal state.
    let _ = term.exit();
    info!("exiting");
    result
}

fn run(term: &mut TerminalRenderer, app: &mut App) -> Result<()> {
    let mut fb = FrameBuffer::new(0, 0);
    let frame = Duration::from_millis(FRAME_MS);
    let mut last_tick = Instant::now();

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        app.render_into(Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;
        term.bell(app.take_bell())?;

        let timeout = frame.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }
        if app.should_quit() {
            return Ok(());
        }

        let elapsed = last_tick.elapsed();
        if elapsed >= frame {
            last_tick = Instant::now();
            app.tick(elapsed.as_millis() as u64);
        }
    }
}
