use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::engine::error::InvalidPuzzleNumber;
use crate::model::submission::SessionTicket;

/// Random puzzle numbers are drawn from `1..RANDOM_PUZZLE_END`.
pub const RANDOM_PUZZLE_END: i32 = 100_000;

/// The puzzle currently being played, plus the generator used when the
/// player asks for a new puzzle without naming one.
pub struct PuzzleSession {
    current: i32,
    epoch: u64,
    rng: StdRng,
}

impl PuzzleSession {
    pub fn new(initial: i32) -> Self {
        Self::with_rng(initial, StdRng::from_entropy())
    }

    pub fn with_rng(initial: i32, rng: StdRng) -> Self {
        Self {
            current: initial,
            epoch: 0,
            rng,
        }
    }

    pub fn current(&self) -> i32 {
        self.current
    }

    pub fn ticket(&self) -> SessionTicket {
        SessionTicket {
            puzzle: self.current,
            epoch: self.epoch,
        }
    }

    /// True while no puzzle change has happened since `ticket` was taken.
    pub fn is_current(&self, ticket: &SessionTicket) -> bool {
        self.ticket() == *ticket
    }

    /// Turn the puzzle-number field into a puzzle id.
    ///
    /// Anything that parses as an integer is used as-is, negative numbers
    /// included; the service decides whether it is a real puzzle. Absent or
    /// non-numeric input picks a random puzzle.
    pub fn resolve_requested_id(
        &mut self,
        user_input: Option<&str>,
    ) -> Result<i32, InvalidPuzzleNumber> {
        let id = match user_input.and_then(|s| s.trim().parse::<i32>().ok()) {
            Some(id) => id,
            None => {
                let id = self.rng.gen_range(1..RANDOM_PUZZLE_END);
                debug!(puzzle = id, "picked random puzzle");
                id
            }
        };

        if id == 0 {
            return Err(InvalidPuzzleNumber);
        }
        Ok(id)
    }

    /// Switch puzzles. Any ticket taken before this call is now stale.
    pub fn set_current(&mut self, id: i32) {
        self.current = id;
        self.epoch += 1;
    }
}
