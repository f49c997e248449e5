/// A well-formed answer from the scoring service.
///
/// `ErrorReport` is a normal result: the service understood the request and
/// rejected the guess content. Transport and grammar failures live in
/// `SubmissionFault` instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedbackResult {
    Victory,
    ExactMatch {
        correct_chars: u8,
        correct_positions: u8,
    },
    ErrorReport {
        category: u8,
        message: String,
    },
}

impl FeedbackResult {
    pub fn is_victory(&self) -> bool {
        matches!(self, FeedbackResult::Victory)
    }
}
