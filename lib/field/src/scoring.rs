//! Score keeping for cleared rows.

/// Clearing `n` rows at once awards `10 * (1 + 2 + ... + n)` points, up to `max_lines` rows.
/// Totals saturate instead of wrapping.
#[derive(Clone, Debug)]
pub struct ScoreSystem {
    max_lines: u32,
    score: u64,
    lines: u32,
}

impl ScoreSystem {
    pub fn new(max_lines: u32) -> Self {
        Self {
            max_lines,
            score: 0,
            lines: 0,
        }
    }

    /// Points for clearing `lines` rows in one lock.
    pub fn points(&self, lines: u32) -> u64 {
        if lines == 0 || lines > self.max_lines {
            return 0;
        }
        let n = u64::from(lines);
        // 10 * n * (n + 1) / 2
        (n * (n + 1)).saturating_mul(5)
    }

    /// Returns the points awarded.
    pub fn add_lines(&mut self, lines: u32) -> u64 {
        let points = self.points(lines);
        self.score = self.score.saturating_add(points);
        self.lines = self.lines.saturating_add(lines);
        points
    }

    pub fn reset(&mut self) {
        self.score = 0;
        self.lines = 0;
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }
}
