use std::path::PathBuf;

use crate::model::Difficulty;

const DATA_DIR_NAME: &str = "numguess";

/// Runtime configuration, read from the environment. Nothing here is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub seed: Option<u64>,
    pub debug_mode: bool,
    pub difficulty: Difficulty,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            data_dir: PathBuf::from(".").join(format!(".{DATA_DIR_NAME}")),
            seed: None,
            debug_mode: false,
            difficulty: Difficulty::default(),
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let data_dir = non_empty("NUMGUESS_DATA_DIR")
            .map(PathBuf::from)
            .or_else(|| non_empty("XDG_DATA_HOME").map(|d| PathBuf::from(d).join(DATA_DIR_NAME)))
            .or_else(|| {
                non_empty("HOME").map(|h| PathBuf::from(h).join(".local/share").join(DATA_DIR_NAME))
            })
            .unwrap_or_else(|| Settings::default().data_dir);

        let seed = non_empty("SEED").and_then(|v| match v.trim().parse::<u64>() {
            Ok(seed) => Some(seed),
            Err(e) => {
                log::warn!(target: "settings", "Ignoring SEED={:?}: {}", v, e);
                None
            }
        });

        Settings {
            data_dir,
            seed,
            debug_mode: lookup("DEBUG").map(|v| v == "1").unwrap_or(false),
            difficulty: Difficulty::from_name(non_empty("NUMGUESS_DIFFICULTY").as_deref()),
        }
    }

    pub fn scores_path(&self) -> PathBuf {
        self.data_dir.join("best_scores.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_explicit_data_dir_wins() {
        let settings = Settings::from_lookup(lookup_from(&[
            ("NUMGUESS_DATA_DIR", "/tmp/ng"),
            ("XDG_DATA_HOME", "/xdg"),
            ("HOME", "/home/u"),
        ]));
        assert_eq!(settings.data_dir, PathBuf::from("/tmp/ng"));
        assert_eq!(settings.scores_path(), PathBuf::from("/tmp/ng/best_scores.json"));
    }

    #[test]
    fn test_data_dir_fallbacks() {
        let xdg = Settings::from_lookup(lookup_from(&[("XDG_DATA_HOME", "/xdg"), ("HOME", "/h")]));
        assert_eq!(xdg.data_dir, PathBuf::from("/xdg/numguess"));

        let home = Settings::from_lookup(lookup_from(&[("HOME", "/h")]));
        assert_eq!(home.data_dir, PathBuf::from("/h/.local/share/numguess"));

        let none = Settings::from_lookup(lookup_from(&[]));
        assert_eq!(none.data_dir, Settings::default().data_dir);
    }

    #[test]
    fn test_seed_debug_and_difficulty() {
        let settings = Settings::from_lookup(lookup_from(&[
            ("SEED", "1234"),
            ("DEBUG", "1"),
            ("NUMGUESS_DIFFICULTY", "Hard"),
        ]));
        assert_eq!(settings.seed, Some(1234));
        assert!(settings.debug_mode);
        assert_eq!(settings.difficulty, Difficulty::Hard);

        let bad = Settings::from_lookup(lookup_from(&[("SEED", "abc"), ("DEBUG", "yes")]));
        assert_eq!(bad.seed, None);
        assert!(!bad.debug_mode);
        assert_eq!(bad.difficulty, Difficulty::Medium);
    }

    #[test]
    #[serial]
    fn test_from_env_reads_process_environment() {
        std::env::set_var("NUMGUESS_DATA_DIR", "/tmp/numguess-env-test");
        std::env::set_var("SEED", "99");
        let settings = Settings::from_env();
        std::env::remove_var("NUMGUESS_DATA_DIR");
        std::env::remove_var("SEED");

        assert_eq!(settings.data_dir, PathBuf::from("/tmp/numguess-env-test"));
        assert_eq!(settings.seed, Some(99));
    }
}
