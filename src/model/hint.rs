use super::Round;

/// Partial disclosure about the answer, at most one per round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hint {
    Even,
    Odd,
    /// Inclusive window around the answer, clamped to the round range.
    Window { low: i64, high: i64 },
}

impl Hint {
    /// Early in a round only parity is revealed; from the second attempt on,
    /// a window of radius `max(2, round((max - min) / 8))`.
    pub fn for_round(round: &Round) -> Hint {
        if round.attempts < 2 {
            if round.answer % 2 == 0 {
                Hint::Even
            } else {
                Hint::Odd
            }
        } else {
            let radius = Self::window_radius(round.min, round.max);
            Hint::Window {
                low: (round.answer - radius).max(round.min),
                high: (round.answer + radius).min(round.max),
            }
        }
    }

    pub fn window_radius(min: i64, max: i64) -> i64 {
        let span = ((max - min) as f64 / 8.0).round() as i64;
        span.max(2)
    }
}
