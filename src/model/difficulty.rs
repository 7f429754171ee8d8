/// Range and attempt cap of a tier. Fields are readable but only built by
/// [`Difficulty::profile`].
#[readonly::make]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DifficultyProfile {
    pub difficulty: Difficulty,
    pub min: i64,
    pub max: i64,
    pub max_attempts: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty::Medium
    }
}

impl Difficulty {
    pub fn all() -> Vec<Difficulty> {
        vec![Difficulty::Easy, Difficulty::Medium, Difficulty::Hard]
    }

    pub fn index(&self) -> usize {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Medium => 1,
            Difficulty::Hard => 2,
        }
    }

    pub fn from_index(index: usize) -> Difficulty {
        match index {
            0 => Difficulty::Easy,
            1 => Difficulty::Medium,
            2 => Difficulty::Hard,
            _ => Difficulty::default(),
        }
    }

    /// Looks a tier up by name, ignoring case and surrounding whitespace.
    /// Missing or unknown names select the default tier.
    pub fn from_name(name: Option<&str>) -> Difficulty {
        match name.map(|n| n.trim().to_ascii_lowercase()).as_deref() {
            Some("easy") => Difficulty::Easy,
            Some("medium") => Difficulty::Medium,
            Some("hard") => Difficulty::Hard,
            other => {
                if let Some(other) = other {
                    log::debug!(target: "difficulty", "Unknown difficulty {:?}, using default", other);
                }
                Difficulty::default()
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn profile(&self) -> DifficultyProfile {
        let (min, max, max_attempts) = match self {
            Difficulty::Easy => (1, 50, 15),
            Difficulty::Medium => (1, 100, 10),
            Difficulty::Hard => (1, 500, 7),
        };
        DifficultyProfile {
            difficulty: *self,
            min,
            max,
            max_attempts,
        }
    }

    /// Key under which the best score of this tier is persisted.
    pub fn best_score_key(&self) -> String {
        format!("best_{}", self.name())
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profiles() {
        let easy = Difficulty::Easy.profile();
        assert_eq!((easy.min, easy.max, easy.max_attempts), (1, 50, 15));
        let medium = Difficulty::Medium.profile();
        assert_eq!((medium.min, medium.max, medium.max_attempts), (1, 100, 10));
        let hard = Difficulty::Hard.profile();
        assert_eq!((hard.min, hard.max, hard.max_attempts), (1, 500, 7));
    }

    #[test]
    fn test_from_name_falls_back_to_medium() {
        assert_eq!(Difficulty::from_name(Some("hard")), Difficulty::Hard);
        assert_eq!(Difficulty::from_name(Some("  Easy ")), Difficulty::Easy);
        assert_eq!(Difficulty::from_name(Some("impossible")), Difficulty::Medium);
        assert_eq!(Difficulty::from_name(Some("")), Difficulty::Medium);
        assert_eq!(Difficulty::from_name(None), Difficulty::Medium);
    }

    #[test]
    fn test_index_round_trip_and_fallback() {
        for difficulty in Difficulty::all() {
            assert_eq!(Difficulty::from_index(difficulty.index()), difficulty);
        }
        assert_eq!(Difficulty::from_index(7), Difficulty::Medium);
    }

    #[test]
    fn test_best_score_key() {
        assert_eq!(Difficulty::Hard.best_score_key(), "best_hard");
    }

    #[test]
    fn test_names_round_trip_into_keys() {
        for difficulty in Difficulty::all() {
            assert_eq!(Difficulty::from_name(Some(difficulty.name())), difficulty);
            assert_eq!(difficulty.to_string(), difficulty.name());
            assert_eq!(
                difficulty.best_score_key(),
                format!("best_{}", difficulty)
            );
        }
    }
}
