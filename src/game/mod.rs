pub mod game_session;
pub mod messages;
pub mod score_store;
pub mod settings;

pub use game_session::GameSession;
pub use score_store::{BestScores, FileScoreStore, MemoryScoreStore, ScoreStore, StoreError};
pub use settings::Settings;
