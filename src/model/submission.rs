/// Snapshot of the active puzzle taken when a guess is dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionTicket {
    pub puzzle: i32,

    /// Bumped on every puzzle change, including re-selecting the same number.
    pub epoch: u64,
}

/// A guess in flight. Owned by its worker thread until the engine
/// receives it back with the outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessSubmission {
    pub guess: String,
    pub ticket: SessionTicket,
    pub row: usize,
}

/// Terminal states a submission can reach once its response is processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Completed,
    Stale,
    Failed,
}
