//! Best-effort persistence for the high score, statistics and session marker.
//!
//! Backends implement [`KeyValueStore`] and report failures as
//! [`StorageError`]. [`Storage`] sits in front of a durable and a transient
//! store and swallows every failure after logging it, so callers only ever
//! see values or defaults.

pub mod keys;
mod memory;
pub mod records;
pub mod sqlite;

pub use memory::MemoryStore;
#[cfg(test)]
pub(crate) use memory::FailingStore;
pub use records::QuizData;
pub use sqlite::SqliteStore;

use thiserror::Error;
use tracing::{error, warn};

use records::{deserialize_quiz_data, serialize_quiz_data};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("corrupt value under {key}: {reason}")]
    Corrupt { key: String, reason: String },
}

impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        StorageError::Unavailable(err.to_string())
    }
}

/// Minimal string key-value port.
pub trait KeyValueStore: Send {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn delete(&self, key: &str) -> Result<(), StorageError>;
}

/// Persistence adapter over a durable and a transient store.
pub struct Storage {
    durable: Box<dyn KeyValueStore>,
    transient: Box<dyn KeyValueStore>,
}

impl Storage {
    pub fn new(durable: Box<dyn KeyValueStore>, transient: Box<dyn KeyValueStore>) -> Self {
        Self { durable, transient }
    }

    /// Both stores in memory; nothing outlives the process.
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStore::new()), Box::new(MemoryStore::new()))
    }

    pub fn get_high_score(&self) -> u64 {
        match read_parsed::<u64>(self.durable.as_ref(), keys::HIGH_SCORE) {
            Ok(score) => score.unwrap_or(0),
            Err(e) => {
                error!("Error reading high score: {}", e);
                0
            }
        }
    }

    pub fn save_high_score(&self, score: u64) {
        if let Err(e) = self.durable.set(keys::HIGH_SCORE, &score.to_string()) {
            error!("Error saving high score: {}", e);
        }
    }

    pub fn get_quiz_data(&self) -> QuizData {
        let read = self.durable.get(keys::QUIZ_DATA).and_then(|value| match value {
            Some(json) => deserialize_quiz_data(&json)
                .map(Some)
                .map_err(|e| StorageError::Corrupt {
                    key: keys::QUIZ_DATA.to_string(),
                    reason: e.to_string(),
                }),
            None => Ok(None),
        });

        match read {
            Ok(data) => data.unwrap_or_default(),
            Err(e) => {
                error!("Error reading quiz data: {}", e);
                QuizData::default()
            }
        }
    }

    pub fn save_quiz_data(&self, data: &QuizData) {
        let json = match serialize_quiz_data(data) {
            Ok(json) => json,
            Err(e) => {
                error!("Error serializing quiz data: {}", e);
                return;
            }
        };

        if let Err(e) = self.durable.set(keys::QUIZ_DATA, &json) {
            error!("Error saving quiz data: {}", e);
        }
    }

    /// Write a new best score and fold the session into the statistics.
    ///
    /// The two keys are written separately; a failure between them leaves
    /// the first write in place.
    pub fn record_completion(&self, final_score: u64, time_taken: u64) -> QuizData {
        self.save_high_score(final_score);
        let data = self.get_quiz_data().with_completion(final_score, time_taken);
        self.save_quiz_data(&data);
        data
    }

    pub fn set_session_start(&self, timestamp_ms: i64) {
        if let Err(e) = self.transient.set(keys::SESSION_START, &timestamp_ms.to_string()) {
            error!("Error saving session start: {}", e);
        }
    }

    pub fn get_session_start(&self) -> Option<i64> {
        match read_parsed::<i64>(self.transient.as_ref(), keys::SESSION_START) {
            Ok(ts) => ts,
            Err(e) => {
                warn!("Error reading session start: {}", e);
                None
            }
        }
    }

    pub fn clear_session(&self) {
        if let Err(e) = self.transient.delete(keys::SESSION_START) {
            error!("Error clearing session storage: {}", e);
        }
    }
}

fn read_parsed<T: std::str::FromStr>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, StorageError>
where
    T::Err: std::fmt::Display,
{
    match store.get(key)? {
        Some(text) => text
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| StorageError::Corrupt {
                key: key.to_string(),
                reason: e.to_string(),
            }),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shared_storage() -> (Storage, MemoryStore, MemoryStore) {
        let durable = MemoryStore::new();
        let transient = MemoryStore::new();
        let storage = Storage::new(Box::new(durable.clone()), Box::new(transient.clone()));
        (storage, durable, transient)
    }

    #[test]
    fn test_defaults_when_empty() {
        let storage = Storage::in_memory();
        assert_eq!(storage.get_high_score(), 0);
        assert_eq!(storage.get_quiz_data(), QuizData::default());
        assert_eq!(storage.get_session_start(), None);
    }

    #[test]
    fn test_high_score_stored_as_text() {
        let (storage, durable, _) = shared_storage();
        storage.save_high_score(1005);

        assert_eq!(durable.get(keys::HIGH_SCORE).unwrap().as_deref(), Some("1005"));
        assert_eq!(storage.get_high_score(), 1005);
    }

    #[test]
    fn test_failing_store_falls_back_to_defaults() {
        let storage = Storage::new(Box::new(FailingStore), Box::new(FailingStore));

        assert_eq!(storage.get_high_score(), 0);
        assert_eq!(storage.get_quiz_data(), QuizData::default());
        assert_eq!(storage.get_session_start(), None);

        // Writes are dropped without panicking
        storage.save_high_score(10);
        storage.set_session_start(1);
        storage.clear_session();
        let data = storage.record_completion(10, 3);
        assert_eq!(data.total_quizzes_completed, 1);
    }

    #[test]
    fn test_corrupt_values_fall_back_to_defaults() {
        let (storage, durable, transient) = shared_storage();
        durable.set(keys::HIGH_SCORE, "lots").unwrap();
        durable.set(keys::QUIZ_DATA, "{broken").unwrap();
        transient.set(keys::SESSION_START, "yesterday").unwrap();

        assert_eq!(storage.get_high_score(), 0);
        assert_eq!(storage.get_quiz_data(), QuizData::default());
        assert_eq!(storage.get_session_start(), None);
    }

    #[test]
    fn test_session_marker_lifecycle() {
        let (storage, durable, transient) = shared_storage();

        storage.set_session_start(1_700_000_000_000);
        assert_eq!(storage.get_session_start(), Some(1_700_000_000_000));
        assert!(durable.is_empty());

        storage.clear_session();
        assert_eq!(storage.get_session_start(), None);
        assert!(transient.is_empty());
    }

    #[test]
    fn test_record_completion_writes_both_keys() {
        let (storage, durable, _) = shared_storage();

        storage.record_completion(202, 10);
        let data = storage.record_completion(1005, 5);

        assert_eq!(storage.get_high_score(), 1005);
        assert_eq!(data.total_quizzes_completed, 2);
        // (10 + 5) / 2 = 7.5
        assert_eq!(data.average_time, 8);
        assert_eq!(
            durable.get(keys::QUIZ_DATA).unwrap().as_deref(),
            Some(r#"{"highScore":1005,"totalQuizzesCompleted":2,"averageTime":8}"#)
        );
    }
}
