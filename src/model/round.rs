use uuid::Uuid;

use super::{Difficulty, DifficultyProfile};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundState {
    Open,
    Won,
    Lost,
}

/// One play-through: a fixed answer plus the attempt and hint counters.
#[derive(Debug, Clone)]
pub struct Round {
    pub id: Uuid,
    pub difficulty: Difficulty,
    pub min: i64,
    pub max: i64,
    pub answer: i64,
    pub attempts: u32,
    pub max_attempts: u32,
    pub hint_used: bool,
    pub state: RoundState,
}

impl Round {
    pub fn new(profile: &DifficultyProfile, answer: i64) -> Self {
        debug_assert!(profile.min <= answer && answer <= profile.max);
        Self {
            id: Uuid::new_v4(),
            difficulty: profile.difficulty,
            min: profile.min,
            max: profile.max,
            answer,
            attempts: 0,
            max_attempts: profile.max_attempts,
            hint_used: false,
            state: RoundState::Open,
        }
    }

    pub fn is_open(&self) -> bool {
        self.state == RoundState::Open
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min as f64 && value <= self.max as f64
    }

    pub fn attempts_exhausted(&self) -> bool {
        self.attempts >= self.max_attempts
    }
}
