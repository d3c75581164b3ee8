use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

use super::game_view::{self, GameView};
use crate::engine::{GameInterface, Rules};
use crate::game::{BoardMove, Coords, Outcome};
use crate::host::{Scheduler, StepOutcome};
use crate::protocol::{Request, Response};

/// Interactive play screen. The engine keeps expanding between key presses
/// through the same cooperative scheduler the worker uses.
pub struct App<R: Rules> {
    scheduler: Scheduler<R>,
    cursor: Coords,
    should_quit: bool,
    message: Option<String>,
    idle_poll: Duration,
}

impl<R: Rules> App<R> {
    pub fn new(game: GameInterface<R>, requests_per_step: usize, idle_poll: Duration) -> Self {
        let cursor = Coords::new(0, game.board().width() / 2);
        App {
            scheduler: Scheduler::new(game, requests_per_step),
            cursor,
            should_quit: false,
            message: None,
            idle_poll,
        }
    }

    pub fn scheduler(&self) -> &Scheduler<R> {
        &self.scheduler
    }

    pub fn cursor(&self) -> Coords {
        self.cursor
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Main application loop
    pub fn run<W: io::Write>(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<W>>,
    ) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            // Only block on input once there is nothing left to compute
            let busy = self.scheduler.pending() > 0 || !self.scheduler.is_expansion_done();
            let timeout = if busy { Duration::ZERO } else { self.idle_poll };
            self.handle_events(timeout)?;
            self.step();
        }
        Ok(())
    }

    fn handle_events(&mut self, timeout: Duration) -> io::Result<()> {
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    /// Run one scheduler step and surface any engine reply.
    pub fn step(&mut self) {
        if let StepOutcome::Serviced(responses) = self.scheduler.step() {
            for Response::BestMove(mv) in responses {
                self.message = Some(format!("Engine played {mv}"));
            }
            self.announce_outcome();
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        let game = self.scheduler.game();
        let (height, width) = (game.board().height(), game.board().width());

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left => self.cursor.col = self.cursor.col.saturating_sub(1),
            KeyCode::Right => self.cursor.col = (self.cursor.col + 1).min(width.saturating_sub(1)),
            KeyCode::Up => self.cursor.row = self.cursor.row.saturating_sub(1),
            KeyCode::Down => self.cursor.row = (self.cursor.row + 1).min(height.saturating_sub(1)),
            KeyCode::Enter | KeyCode::Char(' ') => self.place_mark(),
            KeyCode::Char('a') => self.request_engine_move(),
            KeyCode::Char('r') => {
                self.scheduler.push(Request::Reset);
                self.message = Some("New game started!".to_string());
            }
            _ => {}
        }
    }

    fn target(&self) -> Coords {
        let game = self.scheduler.game();
        game.rules().resolve_target(game.board(), self.cursor)
    }

    fn place_mark(&mut self) {
        let game = self.scheduler.game();
        let mv = BoardMove {
            coords: self.target(),
            side: game.side_to_move(),
        };

        // Refuse here so the player sees why; the engine would only log it
        match game.rules().apply(game.state(), mv) {
            Ok(_) => {
                info!(%mv, "player move");
                self.scheduler.push(Request::TrackMove(mv));
                self.message = None;
            }
            Err(e) => self.message = Some(format!("Illegal move: {e}")),
        }
    }

    fn request_engine_move(&mut self) {
        if self.scheduler.game().is_game_over() {
            self.message = Some("Game over! Press 'r' to restart.".to_string());
            return;
        }
        self.scheduler.push(Request::GetBestMove);
        self.message = Some("Engine is thinking...".to_string());
    }

    fn announce_outcome(&mut self) {
        match self.scheduler.game().outcome() {
            Some(Outcome::Winner(side)) => {
                self.message = Some(format!("{} wins! Press 'r' to restart.", side.name()));
            }
            Some(Outcome::Draw) => {
                self.message = Some("It's a draw! Press 'r' to restart.".to_string());
            }
            None => {}
        }
    }

    fn render(&self, frame: &mut ratatui::Frame) {
        let game = self.scheduler.game();
        let view = GameView {
            title: game.rules().name(),
            board: game.board(),
            cursor: self.target(),
            side_to_move: game.side_to_move(),
            outcome: game.outcome(),
            stats: game.stats(),
            expanding: !self.scheduler.is_expansion_done(),
            message: self.message.as_deref(),
        };
        game_view::render(frame, &view);
    }
}
