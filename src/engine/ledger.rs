use crate::model::history::LedgerRow;

/// Ordered guess history. Rows keep their index for life; the only way a
/// row disappears is `reset_all`.
#[derive(Debug, Clone, Default)]
pub struct HistoryLedger {
    rows: Vec<LedgerRow>,
}

impl HistoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve the next row with blank feedback and return its index.
    pub fn append(&mut self, guess: impl Into<String>) -> usize {
        self.rows.push(LedgerRow::pending(guess));
        self.rows.len() - 1
    }

    /// Overwrite a row as a unit. Returns `false` (and changes nothing) when
    /// the row no longer exists because the ledger was reset.
    pub fn replace(&mut self, index: usize, row: LedgerRow) -> bool {
        match self.rows.get_mut(index) {
            Some(slot) => {
                *slot = row;
                true
            }
            None => false,
        }
    }

    pub fn reset_all(&mut self) {
        self.rows.clear();
    }

    pub fn rows(&self) -> &[LedgerRow] {
        &self.rows
    }

    #[cfg(test)]
    pub fn get(&self, index: usize) -> Option<&LedgerRow> {
        self.rows.get(index)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_returns_sequential_indices() {
        let mut ledger = HistoryLedger::new();
        assert_eq!(ledger.append("alpha"), 0);
        assert_eq!(ledger.append("bravo"), 1);
        assert_eq!(ledger.get(1), Some(&LedgerRow::pending("bravo")));
    }

    #[test]
    fn replace_keeps_count_and_position() {
        let mut ledger = HistoryLedger::new();
        ledger.append("alpha");
        let row = ledger.append("bravo");
        ledger.append("charm");

        let scored = LedgerRow::with_columns("bravo", ("3".into(), "1".into()));
        assert!(ledger.replace(row, scored.clone()));

        assert_eq!(ledger.len(), 3);
        assert_eq!(ledger.rows()[1], scored);
        assert_eq!(ledger.rows()[0].guess, "alpha");
        assert_eq!(ledger.rows()[2].guess, "charm");
    }

    #[test]
    fn replace_after_reset_is_a_no_op() {
        let mut ledger = HistoryLedger::new();
        let row = ledger.append("alpha");
        ledger.reset_all();

        let applied = ledger.replace(row, LedgerRow::with_columns("alpha", ("2".into(), "1".into())));
        assert!(!applied);
        assert!(ledger.is_empty());
    }
}
