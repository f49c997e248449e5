use std::ops::ControlFlow;
use std::sync::mpsc::{Receiver, Sender};
use std::sync::Arc;
use std::thread;

use tracing::{debug, info, warn};

use crate::engine::error::SubmissionFault;
use crate::engine::feedback_codec;
use crate::engine::ledger::HistoryLedger;
use crate::engine::protocol::{EngineCommand, EngineResponse};
use crate::engine::scoring_client::ScoringService;
use crate::engine::session::PuzzleSession;
use crate::model::feedback::FeedbackResult;
use crate::model::history::LedgerRow;
use crate::model::submission::{GuessSubmission, SubmissionState};

/// Owns the puzzle session and the guess history.
///
/// Every change to either happens on the thread running `run`. Guess
/// workers only post `GuessCompleted` back through `loopback`, so
/// completions arriving in any order are applied one at a time.
pub struct Engine {
    rx: Receiver<EngineCommand>,
    loopback: Sender<EngineCommand>,
    tx: Sender<EngineResponse>,
    session: PuzzleSession,
    ledger: HistoryLedger,
    scorer: Arc<dyn ScoringService>,
    detached: bool,
}

impl Engine {
    pub fn new(
        rx: Receiver<EngineCommand>,
        loopback: Sender<EngineCommand>,
        tx: Sender<EngineResponse>,
        session: PuzzleSession,
        scorer: Arc<dyn ScoringService>,
    ) -> Self {
        Self {
            rx,
            loopback,
            tx,
            session,
            ledger: HistoryLedger::new(),
            scorer,
            detached: false,
        }
    }

    pub fn run(&mut self) {
        let puzzle = self.session.current();
        self.emit(EngineResponse::PuzzleNumber(puzzle));

        while let Ok(cmd) = self.rx.recv() {
            if self.handle(cmd).is_break() {
                break;
            }
        }
        debug!(rows = self.ledger.len(), "engine stopped");
    }

    pub fn handle(&mut self, cmd: EngineCommand) -> ControlFlow<()> {
        match cmd {
            EngineCommand::SubmitGuess(raw) => {
                self.submit_guess(&raw);
            }

            EngineCommand::ChangePuzzle(input) => {
                self.change_puzzle(input.as_deref());
            }

            EngineCommand::GuessCompleted {
                submission,
                outcome,
            } => {
                self.complete(submission, outcome);
            }

            EngineCommand::Shutdown => return ControlFlow::Break(()),
        }

        // Nobody is listening for ledger updates any more.
        if self.detached {
            return ControlFlow::Break(());
        }
        ControlFlow::Continue(())
    }

    /// Reserve a row for the guess and start its worker.
    ///
    /// The row is appended and announced before the worker exists, so it is
    /// visible (with blank feedback) for the whole exchange.
    pub fn submit_guess(&mut self, raw: &str) -> GuessSubmission {
        let guess = raw.trim().to_string();
        let ticket = self.session.ticket();
        let row = self.ledger.append(guess.clone());
        self.emit(EngineResponse::RowAppended {
            index: row,
            guess: guess.clone(),
        });

        let submission = GuessSubmission { guess, ticket, row };
        debug!(row, puzzle = ticket.puzzle, guess = %submission.guess, "guess pending");

        let scorer = Arc::clone(&self.scorer);
        let loopback = self.loopback.clone();
        let owned = submission.clone();
        let spawned = thread::Builder::new()
            .name(format!("guess-{row}"))
            .spawn(move || {
                let outcome = scorer.submit(owned.ticket.puzzle, &owned.guess);
                let _ = loopback.send(EngineCommand::GuessCompleted {
                    submission: owned,
                    outcome,
                });
            });

        if let Err(err) = spawned {
            self.complete(submission.clone(), Err(SubmissionFault::connection(err)));
        }
        submission
    }

    /// Apply a finished exchange to the history, unless the puzzle has
    /// changed since the guess was sent.
    pub fn complete(
        &mut self,
        submission: GuessSubmission,
        outcome: Result<FeedbackResult, SubmissionFault>,
    ) -> SubmissionState {
        let GuessSubmission { guess, ticket, row } = submission;

        let result = match outcome {
            Ok(result) => result,
            Err(fault) => {
                warn!(row, puzzle = ticket.puzzle, %guess, error = %fault, "guess failed");
                // A failure from an earlier puzzle has no row left to report on.
                if self.session.is_current(&ticket) {
                    self.emit(EngineResponse::Fault {
                        row: Some(row),
                        message: format!("{guess}: {fault}"),
                    });
                }
                return SubmissionState::Failed;
            }
        };

        if !self.session.is_current(&ticket) {
            debug!(
                row,
                puzzle = ticket.puzzle,
                current = self.session.current(),
                "discarding stale feedback"
            );
            return SubmissionState::Stale;
        }

        if result.is_victory() {
            info!(puzzle = ticket.puzzle, %guess, "puzzle solved");
        }

        let updated = LedgerRow::with_columns(guess, feedback_codec::to_columns(&result));
        if self.ledger.replace(row, updated.clone()) {
            info!(row, puzzle = ticket.puzzle, ?result, "guess scored");
            self.emit(EngineResponse::RowReplaced {
                index: row,
                row: updated,
            });
        }
        SubmissionState::Completed
    }

    /// Switch to the requested puzzle and clear the history. In-flight
    /// guesses keep running; their results are dropped when they land.
    pub fn change_puzzle(&mut self, input: Option<&str>) -> Option<i32> {
        let id = match self.session.resolve_requested_id(input) {
            Ok(id) => id,
            Err(err) => {
                warn!(input = ?input, error = %err, "puzzle change rejected");
                self.emit(EngineResponse::Fault {
                    row: None,
                    message: err.to_string(),
                });
                return None;
            }
        };

        self.session.set_current(id);
        self.ledger.reset_all();
        info!(puzzle = id, "new puzzle");

        self.emit(EngineResponse::TableReset);
        self.emit(EngineResponse::PuzzleNumber(id));
        Some(id)
    }

    #[cfg(test)]
    fn ledger(&self) -> &HistoryLedger {
        &self.ledger
    }

    #[cfg(test)]
    fn session(&self) -> &PuzzleSession {
        &self.session
    }

    /// Block until the next command arrives. Used by tests to step the
    /// engine by hand.
    #[cfg(test)]
    fn step(&mut self) -> ControlFlow<()> {
        match self.rx.recv() {
            Ok(cmd) => self.handle(cmd),
            Err(_) => ControlFlow::Break(()),
        }
    }

    fn emit(&mut self, response: EngineResponse) {
        if self.tx.send(response).is_err() {
            self.detached = true;
        }
    }
}
