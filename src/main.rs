use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use board_tree::config::AppConfig;
use board_tree::engine::{GameInterface, Rules};
use board_tree::ui::App;
use clap::{Parser, ValueEnum};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum GameKind {
    /// 3×3 tic-tac-toe
    Ttt,
    /// Gravity four in a row
    Fiar,
}

/// Play tic-tac-toe or four in a row against an incremental tree search.
#[derive(Parser)]
#[command(name = "board-tree", about = "Play against an incremental game-tree engine")]
struct Cli {
    /// Game variant to play
    #[arg(long, value_enum, default_value = "ttt")]
    game: GameKind,

    /// Path to TOML configuration file
    #[arg(long, default_value = "board_tree.toml")]
    config: PathBuf,

    /// Write logs to this file (the terminal is taken by the UI)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print the default configuration and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_config {
        print!("{}", AppConfig::default_toml());
        return Ok(());
    }

    if let Some(path) = &cli.log_file {
        let file = File::create(path)
            .with_context(|| format!("creating log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .init();
    }

    let config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    let idle_poll = Duration::from_millis(config.host.idle_poll_ms);

    match cli.game {
        GameKind::Ttt => {
            let game_config = &config.tic_tac_toe;
            let game =
                GameInterface::with_max_depth(game_config.grid_rules(), game_config.max_depth);
            play(App::new(game, config.host.requests_per_step, idle_poll))
        }
        GameKind::Fiar => {
            let game_config = &config.four_in_a_row;
            let game =
                GameInterface::with_max_depth(game_config.gravity_rules(), game_config.max_depth);
            play(App::new(game, config.host.requests_per_step, idle_poll))
        }
    }
}

fn play<R: Rules>(mut app: App<R>) -> Result<()> {
    // Setup terminal
    enable_raw_mode().context("enabling raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("creating terminal")?;

    let res = app.run(&mut terminal);

    // Restore the terminal even if the app failed
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    res.context("running terminal UI")
}
