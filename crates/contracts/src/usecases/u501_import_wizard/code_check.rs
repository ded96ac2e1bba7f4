//! Latest-request-wins sequencing for the debounced code-existence check

/// Existence check to send: `codes` go to `check-codes`, `seq` comes back
/// with the answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeCheckRequest {
    pub seq: u64,
    pub codes: Vec<String>,
}

/// Hands out increasing sequence numbers; only the answer to the most
/// recently issued one may touch the batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeCheckSequencer {
    latest: u64,
    pending: bool,
    /// Коды изменены после последней выданной проверки
    due: bool,
}

impl CodeCheckSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self) -> u64 {
        self.latest += 1;
        self.pending = true;
        self.due = false;
        self.latest
    }

    /// Коды отредактированы, проверка будет выдана после паузы
    pub fn mark_due(&mut self) {
        self.due = true;
    }

    pub fn is_latest(&self, seq: u64) -> bool {
        seq == self.latest
    }

    /// Mark `seq` as answered (success or failure). Returns whether the
    /// answer is current.
    pub fn settle(&mut self, seq: u64) -> bool {
        if !self.is_latest(seq) {
            return false;
        }
        self.pending = false;
        true
    }

    /// Сбросить текущую проверку (например, при замене пакета)
    pub fn invalidate(&mut self) {
        self.latest += 1;
        self.pending = false;
        self.due = false;
    }

    /// Проверка выполняется или ожидается
    pub fn is_pending(&self) -> bool {
        self.pending || self.due
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_latest_settles() {
        let mut seq = CodeCheckSequencer::new();
        let first = seq.issue();
        let second = seq.issue();
        assert!(second > first);
        assert!(!seq.settle(first));
        assert!(seq.is_pending());
        assert!(seq.settle(second));
        assert!(!seq.is_pending());
    }

    #[test]
    fn test_invalidate_discards_in_flight() {
        let mut seq = CodeCheckSequencer::new();
        let issued = seq.issue();
        seq.invalidate();
        assert!(!seq.is_pending());
        assert!(!seq.settle(issued));
    }

    #[test]
    fn test_due_check_counts_as_pending() {
        let mut seq = CodeCheckSequencer::new();
        seq.mark_due();
        assert!(seq.is_pending());
        let issued = seq.issue();
        assert!(seq.is_pending());
        assert!(seq.settle(issued));
        assert!(!seq.is_pending());

        seq.mark_due();
        seq.invalidate();
        assert!(!seq.is_pending());
    }
}
