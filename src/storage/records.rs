use serde::{Deserialize, Serialize};

/// Aggregate statistics kept alongside the high score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizData {
    pub high_score: u64,
    pub total_quizzes_completed: u64,
    /// Running mean of completion times, whole seconds.
    pub average_time: u64,
}

impl QuizData {
    /// Fold one recorded session into the statistics.
    pub fn with_completion(self, final_score: u64, time_taken: u64) -> Self {
        let completed = self.total_quizzes_completed;
        let average_time = if completed == 0 {
            time_taken
        } else {
            let total = self.average_time as f64 * completed as f64 + time_taken as f64;
            (total / (completed + 1) as f64).round() as u64
        };

        Self {
            high_score: final_score,
            total_quizzes_completed: completed + 1,
            average_time,
        }
    }
}

/// Serialize statistics for the durable store.
pub fn serialize_quiz_data(data: &QuizData) -> Result<String, serde_json::Error> {
    serde_json::to_string(data)
}

/// Parse statistics read back from the durable store.
pub fn deserialize_quiz_data(json: &str) -> Result<QuizData, serde_json::Error> {
    serde_json::from_str(json)
}
