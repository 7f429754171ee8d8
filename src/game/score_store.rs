use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::model::Difficulty;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("score file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("score file could not be encoded: {0}")]
    Json(#[from] serde_json::Error),
}

/// String key-value persistence for best scores.
pub trait ScoreStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryScoreStore {
    values: HashMap<String, String>,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStore for MemoryScoreStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// JSON object on disk, rewritten in full on every `set`.
#[derive(Debug)]
pub struct FileScoreStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileScoreStore {
    /// Opens the store at `path`. A missing or unreadable file yields an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = Self::load(&path);
        log::debug!(target: "score_store", "Opened {} with {} entries", path.display(), values.len());
        Self { path, values }
    }

    fn load(path: &Path) -> BTreeMap<String, String> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return BTreeMap::new(),
            Err(e) => {
                log::warn!(target: "score_store", "Could not read {}: {}", path.display(), e);
                return BTreeMap::new();
            }
        };
        match serde_json::from_str(&contents) {
            Ok(values) => values,
            Err(e) => {
                log::warn!(target: "score_store", "Ignoring corrupt {}: {}", path.display(), e);
                BTreeMap::new()
            }
        }
    }

    fn save(&self) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        let contents = serde_json::to_string_pretty(&self.values)?;
        fs::write(&self.path, contents)?;
        Ok(())
    }
}

impl ScoreStore for FileScoreStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        self.save()
    }
}

/// Best-score bookkeeping on top of any [`ScoreStore`].
pub struct BestScores;

impl BestScores {
    /// Stored best for a tier. Values that are not positive integers count as no
    /// record, including fractions like `"2.5"`. Only [`BestScores::record_win`]
    /// writes these keys and it always writes a whole attempt count.
    pub fn get(store: &dyn ScoreStore, difficulty: Difficulty) -> Option<u32> {
        store
            .get(&difficulty.best_score_key())
            .and_then(|v| v.trim().parse::<u32>().ok())
            .filter(|v| *v > 0)
    }

    /// Records a win. Returns true when `attempts` became the new best.
    pub fn record_win(
        store: &mut dyn ScoreStore,
        difficulty: Difficulty,
        attempts: u32,
    ) -> Result<bool, StoreError> {
        match Self::get(store, difficulty) {
            Some(best) if attempts >= best => Ok(false),
            _ => {
                store.set(&difficulty.best_score_key(), &attempts.to_string())?;
                Ok(true)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn temp_path() -> PathBuf {
        std::env::temp_dir()
            .join(format!("numguess-test-{}", Uuid::new_v4()))
            .join("best_scores.json")
    }

    #[test]
    fn test_best_only_decreases() {
        let mut store = MemoryScoreStore::new();
        assert_eq!(BestScores::get(&store, Difficulty::Easy), None);

        assert!(BestScores::record_win(&mut store, Difficulty::Easy, 6).unwrap());
        assert!(!BestScores::record_win(&mut store, Difficulty::Easy, 9).unwrap());
        assert!(!BestScores::record_win(&mut store, Difficulty::Easy, 6).unwrap());
        assert!(BestScores::record_win(&mut store, Difficulty::Easy, 4).unwrap());

        assert_eq!(BestScores::get(&store, Difficulty::Easy), Some(4));
        assert_eq!(store.get("best_easy").as_deref(), Some("4"));
        assert_eq!(BestScores::get(&store, Difficulty::Hard), None);
    }

    #[test]
    fn test_garbage_value_counts_as_no_record() {
        let mut store = MemoryScoreStore::new();
        store.set("best_medium", "lots").unwrap();
        assert_eq!(BestScores::get(&store, Difficulty::Medium), None);
        store.set("best_medium", "0").unwrap();
        assert_eq!(BestScores::get(&store, Difficulty::Medium), None);
        store.set("best_medium", "2.5").unwrap();
        assert_eq!(BestScores::get(&store, Difficulty::Medium), None);

        assert!(BestScores::record_win(&mut store, Difficulty::Medium, 8).unwrap());
        assert_eq!(BestScores::get(&store, Difficulty::Medium), Some(8));
    }

    #[test]
    fn test_file_store_persists_across_reopen() {
        let path = temp_path();
        {
            let mut store = FileScoreStore::open(&path);
            assert_eq!(store.get("best_hard"), None);
            store.set("best_hard", "5").unwrap();
        }
        let reopened = FileScoreStore::open(&path);
        assert_eq!(reopened.get("best_hard").as_deref(), Some("5"));
        assert_eq!(BestScores::get(&reopened, Difficulty::Hard), Some(5));

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_file_store_ignores_corrupt_file() {
        let path = temp_path();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{not json").unwrap();

        let mut store = FileScoreStore::open(&path);
        assert_eq!(store.get("best_easy"), None);
        store.set("best_easy", "3").unwrap();
        assert_eq!(FileScoreStore::open(&path).get("best_easy").as_deref(), Some("3"));

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
