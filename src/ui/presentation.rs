use crate::model::{Difficulty, Feedback};

/// Everything the game session needs from a front end: text outputs,
/// control enablement, and the two inputs (guess text and tier selector).
pub trait Presentation {
    fn set_range_text(&mut self, text: &str);
    fn set_input_placeholder(&mut self, _text: &str) {}
    fn set_message(&mut self, feedback: &Feedback);
    fn clear_message(&mut self);
    fn set_attempts(&mut self, text: &str);
    fn set_best_score(&mut self, text: &str);
    fn set_input_enabled(&mut self, enabled: bool);
    fn set_hint_enabled(&mut self, enabled: bool);
    fn read_guess_input(&self) -> String;
    fn clear_guess_input(&mut self);
    fn focus_input(&mut self);
    fn read_selected_difficulty(&self) -> Option<String>;
    /// Keeps the selector in sync with the tier actually in play.
    fn show_difficulty(&mut self, _difficulty: Difficulty) {}
}
