use std::collections::BTreeSet;
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use eframe::egui;
use tracing::warn;

use crate::engine::engine::Engine;
use crate::engine::ledger::HistoryLedger;
use crate::engine::protocol::{EngineCommand, EngineResponse};
use crate::engine::scoring_client::ScoringClient;
use crate::engine::session::PuzzleSession;
use crate::ui::history_panel::draw_history_panel;
use crate::ui::puzzle_panel::draw_puzzle_panel;
use crate::ui::settings::ClientSettings;
use crate::ui::settings_io::save_settings;

/* =========================
   UI State
   ========================= */

#[derive(Default)]
pub struct UiState {
    pub guess_input: String,
    pub puzzle_input: String,

    pub puzzle_number: i32,

    /// Mirror of the engine's ledger, rebuilt from `EngineResponse`s.
    pub history: HistoryLedger,
    pub last_fault: Option<String>,

    /// Rows still waiting on the service.
    pub pending_rows: BTreeSet<usize>,

    pub should_auto_scroll: bool,
}

impl UiState {
    pub fn apply(&mut self, resp: EngineResponse) {
        match resp {
            EngineResponse::RowAppended { index, guess } => {
                let mirrored = self.history.append(guess);
                if mirrored != index {
                    warn!(index, mirrored, "history mirror out of step");
                }
                self.pending_rows.insert(index);
                self.should_auto_scroll = true;
            }
            EngineResponse::RowReplaced { index, row } => {
                self.history.replace(index, row);
                self.pending_rows.remove(&index);
            }
            EngineResponse::TableReset => {
                self.history.reset_all();
                self.pending_rows.clear();
                self.last_fault = None;
            }
            EngineResponse::PuzzleNumber(id) => {
                self.puzzle_number = id;
            }
            EngineResponse::Fault { row, message } => {
                if let Some(index) = row {
                    self.pending_rows.remove(&index);
                }
                self.last_fault = Some(message);
            }
        }
    }

    /// True while some row is still waiting on the service.
    pub fn has_pending_rows(&self) -> bool {
        !self.pending_rows.is_empty()
    }
}

/* =========================
   App
   ========================= */

pub struct JottoApp {
    pub ui: UiState,
    pub settings: ClientSettings,

    cmd_tx: mpsc::Sender<EngineCommand>,
    resp_rx: mpsc::Receiver<EngineResponse>,
}

impl JottoApp {
    pub fn new(settings: ClientSettings) -> anyhow::Result<Self> {
        let scorer = ScoringClient::new(settings.service_url.clone())
            .context("failed to build scoring service client")?;
        let session = PuzzleSession::new(settings.starting_puzzle);

        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, resp_rx) = mpsc::channel();

        let loopback = cmd_tx.clone();
        thread::Builder::new()
            .name("jotto-engine".to_string())
            .spawn(move || {
                let mut engine = Engine::new(cmd_rx, loopback, resp_tx, session, Arc::new(scorer));
                engine.run();
            })
            .context("failed to start engine thread")?;

        Ok(Self {
            ui: UiState {
                puzzle_number: settings.starting_puzzle,
                ..Default::default()
            },
            settings,
            cmd_tx,
            resp_rx,
        })
    }

    pub fn send_command(&self, cmd: EngineCommand) {
        if self.cmd_tx.send(cmd).is_err() {
            warn!("engine thread is gone");
        }
    }

    pub fn read_guess_input(&self) -> String {
        self.ui.guess_input.trim().to_string()
    }

    pub fn clear_guess_input(&mut self) {
        self.ui.guess_input.clear();
    }

    /// `None` when the field is blank.
    pub fn read_puzzle_number_input(&self) -> Option<String> {
        let text = self.ui.puzzle_input.trim();
        (!text.is_empty()).then(|| text.to_string())
    }

    pub fn submit_guess(&mut self) {
        let guess = self.read_guess_input();
        self.clear_guess_input();
        self.send_command(EngineCommand::SubmitGuess(guess));
    }

    pub fn request_new_puzzle(&mut self) {
        let input = self.read_puzzle_number_input();
        self.send_command(EngineCommand::ChangePuzzle(input));
    }
}

/* =========================
   egui App
   ========================= */

impl eframe::App for JottoApp {
    fn update(&mut self, ctx: &egui::Context, _: &mut eframe::Frame) {
        ctx.set_pixels_per_point(self.settings.ui_scale);

        while let Ok(resp) = self.resp_rx.try_recv() {
            self.ui.apply(resp);
        }

        draw_puzzle_panel(ctx, self);
        draw_history_panel(ctx, self);

        self.ui.should_auto_scroll = false;

        // Worker results arrive without any input event to wake us.
        if self.ui.has_pending_rows() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}

impl Drop for JottoApp {
    fn drop(&mut self) {
        let _ = self.cmd_tx.send(EngineCommand::Shutdown);
        save_settings(&self.settings);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::history::LedgerRow;

    #[test]
    fn mirror_follows_engine_responses() {
        let mut state = UiState::default();
        state.apply(EngineResponse::PuzzleNumber(16952));
        state.apply(EngineResponse::RowAppended {
            index: 0,
            guess: "crazy".into(),
        });
        assert!(state.has_pending_rows());

        let row = LedgerRow::with_columns("crazy", ("3".into(), "1".into()));
        state.apply(EngineResponse::RowReplaced {
            index: 0,
            row: row.clone(),
        });

        assert_eq!(state.puzzle_number, 16952);
        assert_eq!(state.history.rows(), &[row]);
        assert!(!state.has_pending_rows());
    }

    #[test]
    fn reset_clears_rows_and_fault() {
        let mut state = UiState::default();
        state.apply(EngineResponse::RowAppended {
            index: 0,
            guess: "boom".into(),
        });
        state.apply(EngineResponse::Fault {
            row: Some(0),
            message: "boom: connection refused".into(),
        });
        assert!(state.last_fault.is_some());

        state.apply(EngineResponse::TableReset);
        assert!(state.history.is_empty());
        assert!(state.last_fault.is_none());
    }

    #[test]
    fn failed_row_stops_waiting() {
        let mut state = UiState::default();
        state.apply(EngineResponse::RowAppended {
            index: 0,
            guess: "boom".into(),
        });
        state.apply(EngineResponse::RowAppended {
            index: 1,
            guess: "crazy".into(),
        });
        state.apply(EngineResponse::Fault {
            row: Some(0),
            message: "boom: connection refused".into(),
        });
        assert_eq!(state.pending_rows, BTreeSet::from([1]));
        assert_eq!(state.history.rows()[0], LedgerRow::pending("boom"));
    }

    #[test]
    fn blank_error_report_still_settles_the_row() {
        let mut state = UiState::default();
        state.apply(EngineResponse::RowAppended {
            index: 0,
            guess: "!!!!".into(),
        });
        state.apply(EngineResponse::RowReplaced {
            index: 0,
            row: LedgerRow::pending("!!!!"),
        });
        assert!(!state.has_pending_rows());
    }

    #[test]
    fn puzzle_fault_leaves_pending_rows_alone() {
        let mut state = UiState::default();
        state.apply(EngineResponse::RowAppended {
            index: 0,
            guess: "crazy".into(),
        });
        state.apply(EngineResponse::Fault {
            row: None,
            message: "puzzle number 0 is not a valid puzzle".into(),
        });
        assert!(state.has_pending_rows());
    }

    #[test]
    fn late_replace_after_reset_is_ignored() {
        let mut state = UiState::default();
        state.apply(EngineResponse::TableReset);
        state.apply(EngineResponse::RowReplaced {
            index: 3,
            row: LedgerRow::pending("ghost"),
        });
        assert!(state.history.is_empty());
    }
}
