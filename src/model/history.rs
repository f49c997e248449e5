/// One line of the guess history table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerRow {
    pub guess: String,
    pub letters_in_common: String,
    pub letters_in_position: String,
}

impl LedgerRow {
    /// A freshly reserved row: the guess is known, feedback is not.
    pub fn pending(guess: impl Into<String>) -> Self {
        Self {
            guess: guess.into(),
            ..Default::default()
        }
    }

    pub fn with_columns(guess: impl Into<String>, columns: (String, String)) -> Self {
        let (letters_in_common, letters_in_position) = columns;
        Self {
            guess: guess.into(),
            letters_in_common,
            letters_in_position,
        }
    }
}
