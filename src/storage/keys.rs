//! Storage keys shared by every backend.

/// Durable: best final score, stored as decimal text.
pub const HIGH_SCORE: &str = "quiz_high_score";

/// Durable: aggregate statistics, stored as JSON.
pub const QUIZ_DATA: &str = "quiz_app_data";

/// Transient: start timestamp (ms since epoch) of the running session.
pub const SESSION_START: &str = "quiz_session_start";
