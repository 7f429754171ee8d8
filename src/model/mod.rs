mod difficulty;
mod feedback;
mod game_action_event;
mod guess;
mod hint;
mod round;

pub use difficulty::{Difficulty, DifficultyProfile};
pub use feedback::{Feedback, MessageKind};
pub use game_action_event::GameActionEvent;
pub use guess::{parse_guess, GuessError, GuessOutcome};
pub use hint::Hint;
pub use round::{Round, RoundState};
