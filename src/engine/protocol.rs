use crate::engine::error::SubmissionFault;
use crate::model::feedback::FeedbackResult;
use crate::model::history::LedgerRow;
use crate::model::submission::GuessSubmission;

pub enum EngineCommand {
    /// Raw contents of the guess field.
    SubmitGuess(String),

    /// Contents of the puzzle-number field; `None` when it was empty.
    ChangePuzzle(Option<String>),

    /// Posted by a worker thread once its exchange with the service ends.
    GuessCompleted {
        submission: GuessSubmission,
        outcome: Result<FeedbackResult, SubmissionFault>,
    },

    Shutdown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineResponse {
    RowAppended { index: usize, guess: String },
    RowReplaced { index: usize, row: LedgerRow },
    TableReset,
    PuzzleNumber(i32),
    /// `row` is the guess that failed, if the fault belongs to one.
    Fault { row: Option<usize>, message: String },
}
