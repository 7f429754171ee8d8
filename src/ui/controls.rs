use crate::model::{Difficulty, GameActionEvent};

/// Widgets of a graphical front end that produce game actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Enter pressed in the guess entry.
    GuessEntryActivated,
    SubmitButton,
    HintButton,
    RestartButton,
}

impl Control {
    pub fn action(&self) -> GameActionEvent {
        match self {
            Control::GuessEntryActivated | Control::SubmitButton => GameActionEvent::SubmitGuess,
            Control::HintButton => GameActionEvent::RequestHint,
            Control::RestartButton => GameActionEvent::Restart,
        }
    }
}

/// Action for a new selector position. Positions follow [`Difficulty::all`].
pub fn difficulty_selected(index: u32) -> GameActionEvent {
    let difficulty = Difficulty::from_index(index as usize);
    GameActionEvent::ChangeDifficulty(difficulty.name().to_string())
}

/// Labels for the selector, in position order.
pub fn difficulty_labels() -> Vec<String> {
    use crate::helpers::Capitalize;

    Difficulty::all()
        .iter()
        .map(|d| d.name().capitalize())
        .collect()
}
