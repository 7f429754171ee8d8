use crate::model::{Feedback, Hint, MessageKind, Round};

pub fn range_text(min: i64, max: i64) -> String {
    format!("{} and {}", min, max)
}

pub fn placeholder_text(min: i64, max: i64) -> String {
    format!("Enter a number ({}-{})", min, max)
}

pub fn attempts_text(round: &Round) -> String {
    format!("Attempts: {} / {}", round.attempts, round.max_attempts)
}

pub fn best_score_text(best: Option<u32>) -> String {
    match best {
        Some(best) => format!("Best: {} attempts", best),
        None => "Best: —".to_string(),
    }
}

pub fn not_a_number(round: &Round) -> Feedback {
    Feedback::new(
        format!("Please enter a valid number between {} and {}", round.min, round.max),
        MessageKind::Error,
    )
}

pub fn out_of_range(round: &Round) -> Feedback {
    Feedback::new(
        format!("Please enter a number between {} and {}", round.min, round.max),
        MessageKind::Error,
    )
}

pub fn won(round: &Round) -> Feedback {
    Feedback::new(
        format!(
            "🎉 Congratulations! {} is correct! You took {} attempts.",
            round.answer, round.attempts
        ),
        MessageKind::Success,
    )
}

pub fn lost(round: &Round) -> Feedback {
    Feedback::new(
        format!(
            "Game over — you've used {} attempts. The answer was {}.",
            round.attempts, round.answer
        ),
        MessageKind::Error,
    )
}

pub fn too_low() -> Feedback {
    Feedback::new("Too low — try a higher number.", MessageKind::Hint)
}

pub fn too_high() -> Feedback {
    Feedback::new("Too high — try a lower number.", MessageKind::Hint)
}

pub fn hint(hint: &Hint) -> Feedback {
    let text = match hint {
        Hint::Even => "The number is even.".to_string(),
        Hint::Odd => "The number is odd.".to_string(),
        Hint::Window { low, high } => format!("The number is between {} and {}.", low, high),
    };
    Feedback::new(text, MessageKind::Hint)
}

pub fn hint_already_used() -> Feedback {
    Feedback::new("You already used the hint for this round.", MessageKind::Info)
}

pub fn round_closed() -> Feedback {
    Feedback::new("This round is over. Restart to play again.", MessageKind::Info)
}
