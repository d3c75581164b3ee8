use std::collections::VecDeque;

use tracing::{debug, warn};

use crate::engine::{GameInterface, Rules};
use crate::protocol::{Request, Response};
use crate::tree::ExpandResult;

/// What a single [`Scheduler::step`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// Pending requests were handled; holds any replies in request order.
    Serviced(Vec<Response>),
    /// One ply was expanded.
    Expanded(ExpandResult),
    /// Nothing is pending and the tree is fully expanded.
    Idle,
}

/// Single-threaded cooperative host around one engine.
///
/// Expansion runs one ply per step. Requests queued with [`Scheduler::push`]
/// are serviced between expansion steps, never during one.
pub struct Scheduler<R: Rules> {
    game: GameInterface<R>,
    pending: VecDeque<Request>,
    requests_per_step: usize,
    expansion_done: bool,
}

impl<R: Rules> Scheduler<R> {
    pub fn new(game: GameInterface<R>, requests_per_step: usize) -> Self {
        Scheduler {
            game,
            pending: VecDeque::new(),
            requests_per_step: requests_per_step.max(1),
            expansion_done: false,
        }
    }

    pub fn game(&self) -> &GameInterface<R> {
        &self.game
    }

    pub fn push(&mut self, request: Request) {
        self.pending.push_back(request);
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// True once expansion reported `Done` and no request has arrived since.
    pub fn is_expansion_done(&self) -> bool {
        self.expansion_done
    }

    pub fn step(&mut self) -> StepOutcome {
        if !self.pending.is_empty() {
            let mut responses = Vec::new();
            for _ in 0..self.requests_per_step {
                let Some(request) = self.pending.pop_front() else {
                    break;
                };
                if let Some(response) = self.service(request) {
                    responses.push(response);
                }
            }
            // The tree may have changed shape, so expansion resumes
            self.expansion_done = false;
            return StepOutcome::Serviced(responses);
        }

        if self.expansion_done {
            return StepOutcome::Idle;
        }

        let result = self.game.expand_one_level();
        self.expansion_done = result == ExpandResult::Done;
        StepOutcome::Expanded(result)
    }

    /// Step until idle and collect every reply. Only terminates when the
    /// expansion is finite, i.e. uncapped on a small board or depth capped.
    pub fn run_until_idle(&mut self) -> Vec<Response> {
        let mut responses = Vec::new();
        loop {
            match self.step() {
                StepOutcome::Serviced(mut replies) => responses.append(&mut replies),
                StepOutcome::Expanded(_) => {}
                StepOutcome::Idle => return responses,
            }
        }
    }

    fn service(&mut self, request: Request) -> Option<Response> {
        debug!(?request, "servicing request");
        match request {
            Request::TrackMove(mv) => {
                self.game.track_move(mv);
                None
            }
            Request::Reset => {
                self.game.reset();
                None
            }
            // The host applies the returned move without echoing it back
            Request::GetBestMove => match self.game.play_best_move() {
                Ok(mv) => Some(Response::BestMove(mv)),
                Err(e) => {
                    warn!(error = %e, "no best move available");
                    None
                }
            },
        }
    }
}
