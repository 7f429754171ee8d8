/// User commands routed from a front end into the game session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameActionEvent {
    /// The difficulty selector changed; restarts with the named tier.
    ChangeDifficulty(String),
    /// Restart with whatever tier the selector currently shows.
    Restart,
    /// Submit the text currently in the guess input.
    SubmitGuess,
    RequestHint,
}
