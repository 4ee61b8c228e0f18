use serde::{Deserialize, Serialize};

/// Question progress as shown next to the question text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Progress {
    /// 1-based number of the question being displayed (0 before the first question)
    pub current: usize,
    /// Total questions in the session (0 until the session has started)
    pub total: usize,
    /// Completion percentage, 0-100
    pub percent: u8,
}

impl Progress {
    /// Recompute progress for the question at `index` out of `total`
    ///
    /// `percent = round(100 * (index + 1) / total)`, clamped to 100.
    pub fn update(&mut self, index: usize, total: usize) {
        self.current = index + 1;
        self.total = total;
        self.percent = Self::percent_for(index, total);
    }

    pub fn percent_for(index: usize, total: usize) -> u8 {
        if total == 0 {
            return 0;
        }
        let ratio = 100.0 * (index + 1) as f64 / total as f64;
        ratio.round().min(100.0) as u8
    }
}
