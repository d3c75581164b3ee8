use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, TryRecvError};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use board_tree::config::AppConfig;
use board_tree::engine::{GameInterface, Rules};
use board_tree::host::{Scheduler, StepOutcome};
use board_tree::protocol::{Request, Response};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum GameKind {
    Ttt,
    Fiar,
}

/// Engine worker speaking JSON lines: requests on stdin, replies on stdout.
#[derive(Parser)]
#[command(name = "worker", about = "Incremental game-tree engine over JSON lines")]
struct Cli {
    /// Game variant to serve
    #[arg(long, value_enum, default_value = "ttt")]
    game: GameKind,

    /// Path to TOML configuration file
    #[arg(long, default_value = "board_tree.toml")]
    config: PathBuf,
}

/// Messages from the stdin reader thread.
enum Inbound {
    Line(String),
    Closed,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // stdout carries protocol messages, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(Inbound::Line(line)).is_err() {
                        return;
                    }
                }
                Err(e) => {
                    warn!(error = %e, "failed to read stdin");
                    break;
                }
            }
        }
        let _ = tx.send(Inbound::Closed);
    });

    let idle_poll = Duration::from_millis(config.host.idle_poll_ms);
    let per_step = config.host.requests_per_step;
    match cli.game {
        GameKind::Ttt => {
            let game_config = &config.tic_tac_toe;
            let game =
                GameInterface::with_max_depth(game_config.grid_rules(), game_config.max_depth);
            serve(Scheduler::new(game, per_step), &rx, &mut io::stdout().lock(), idle_poll)
        }
        GameKind::Fiar => {
            let game_config = &config.four_in_a_row;
            let game =
                GameInterface::with_max_depth(game_config.gravity_rules(), game_config.max_depth);
            serve(Scheduler::new(game, per_step), &rx, &mut io::stdout().lock(), idle_poll)
        }
    }
}

/// Queue a raw line as a request. Malformed lines are dropped here.
fn enqueue<R: Rules>(scheduler: &mut Scheduler<R>, line: &str) {
    let line = line.trim();
    if line.is_empty() {
        return;
    }
    match Request::from_json(line) {
        Ok(request) => scheduler.push(request),
        Err(e) => warn!(error = %e, line, "rejected message"),
    }
}

fn write_responses<W: Write>(out: &mut W, responses: Vec<Response>) -> Result<()> {
    for response in responses {
        let text = response.to_json().context("encoding response")?;
        writeln!(out, "{text}").context("writing response")?;
    }
    out.flush().context("flushing output")
}

/// Answer every request still queued once input has closed. Expansion is not
/// resumed.
fn finish<R: Rules, W: Write>(scheduler: &mut Scheduler<R>, out: &mut W) -> Result<()> {
    info!(pending = scheduler.pending(), "input closed, draining queued requests");
    while scheduler.pending() > 0 {
        if let StepOutcome::Serviced(responses) = scheduler.step() {
            write_responses(out, responses)?;
        }
    }
    info!("shutting down");
    Ok(())
}

fn serve<R: Rules, W: Write>(
    mut scheduler: Scheduler<R>,
    rx: &Receiver<Inbound>,
    out: &mut W,
    idle_poll: Duration,
) -> Result<()> {
    info!(variant = scheduler.game().rules().name(), "worker ready");

    loop {
        // Drain everything that arrived during the last step
        loop {
            match rx.try_recv() {
                Ok(Inbound::Line(line)) => enqueue(&mut scheduler, &line),
                Ok(Inbound::Closed) | Err(TryRecvError::Disconnected) => {
                    return finish(&mut scheduler, out);
                }
                Err(TryRecvError::Empty) => break,
            }
        }

        match scheduler.step() {
            StepOutcome::Serviced(responses) => write_responses(out, responses)?,
            StepOutcome::Expanded(result) => {
                debug!(?result, stats = ?scheduler.game().stats(), "expansion step");
            }
            // Nothing to expand: block until the host sends something
            StepOutcome::Idle => match rx.recv_timeout(idle_poll) {
                Ok(Inbound::Line(line)) => enqueue(&mut scheduler, &line),
                Ok(Inbound::Closed) | Err(RecvTimeoutError::Disconnected) => {
                    return finish(&mut scheduler, out);
                }
                Err(RecvTimeoutError::Timeout) => {}
            },
        }
    }
}
