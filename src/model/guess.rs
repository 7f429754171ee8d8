use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GuessError {
    #[error("not a number")]
    NotANumber,
    #[error("{value} is outside {min}..={max}")]
    OutOfRange { value: f64, min: i64, max: i64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GuessOutcome {
    /// Input was rejected without consuming an attempt.
    Rejected(GuessError),
    TooLow,
    TooHigh,
    Won { attempts: u32 },
    Lost { answer: i64 },
    /// The round had already ended.
    RoundClosed,
}

impl GuessOutcome {
    pub fn counted(&self) -> bool {
        matches!(
            self,
            GuessOutcome::TooLow
                | GuessOutcome::TooHigh
                | GuessOutcome::Won { .. }
                | GuessOutcome::Lost { .. }
        )
    }
}

/// Parses raw guess text the way a browser's `Number()` does: decimal with an
/// optional exponent, `0x`/`0b`/`0o` integer literals, and `Infinity`.
/// Infinite results are returned as-is and fail the range check later.
pub fn parse_guess(raw: &str) -> Result<f64, GuessError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(GuessError::NotANumber);
    }

    if let Some(value) = parse_radix_literal(trimmed) {
        return value;
    }

    let unsigned = trimmed.trim_start_matches(['+', '-']);
    if unsigned.len() + 1 < trimmed.len() {
        return Err(GuessError::NotANumber);
    }
    if unsigned == "Infinity" {
        let sign = if trimmed.starts_with('-') { -1.0 } else { 1.0 };
        return Ok(sign * f64::INFINITY);
    }
    // Rust also accepts spellings like "inf" and "NaN"; Number() does not.
    if unsigned
        .chars()
        .any(|c| c.is_ascii_alphabetic() && !matches!(c, 'e' | 'E'))
    {
        return Err(GuessError::NotANumber);
    }
    trimmed.parse::<f64>().map_err(|_| GuessError::NotANumber)
}

/// `Some` when `text` carries a `0x`/`0b`/`0o` prefix. Signs are not allowed there.
fn parse_radix_literal(text: &str) -> Option<Result<f64, GuessError>> {
    let lowered = text.to_ascii_lowercase();
    let (radix, digits) = if let Some(digits) = lowered.strip_prefix("0x") {
        (16, digits)
    } else if let Some(digits) = lowered.strip_prefix("0b") {
        (2, digits)
    } else if let Some(digits) = lowered.strip_prefix("0o") {
        (8, digits)
    } else {
        return None;
    };
    if digits.is_empty() {
        return Some(Err(GuessError::NotANumber));
    }
    let value = digits.chars().try_fold(0f64, |acc, c| {
        c.to_digit(radix).map(|d| acc * radix as f64 + d as f64)
    });
    Some(value.ok_or(GuessError::NotANumber))
}
