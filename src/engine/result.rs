//! Scoring of a completed session.

use crate::questions::Question;

use super::state::{Phase, SessionState};

/// Bonus points per correct answer per second saved.
pub const BONUS_FACTOR: u64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuizResult {
    pub base_score: u64,
    pub bonus_score: u64,
    pub final_score: u64,
    pub time_taken_seconds: u64,
    pub percentage: f64,
    pub is_new_high_score: bool,
}

/// Score a completed session against the previous best.
///
/// Returns `None` unless the session is completed with both timestamps.
pub fn calculate_result(state: &SessionState, high_score: u64) -> Option<QuizResult> {
    if state.phase != Phase::Completed {
        return None;
    }
    let (start, end) = (state.start_time?, state.end_time?);

    let time_taken_seconds = end.saturating_sub(start).max(0) as u64 / 1000;
    let base_score = state.score;
    let bonus_score = base_score * BONUS_FACTOR / time_taken_seconds.max(1);
    let final_score = base_score + bonus_score;

    let percentage = if state.question_count() == 0 {
        0.0
    } else {
        base_score as f64 / state.question_count() as f64 * 100.0
    };

    Some(QuizResult {
        base_score,
        bonus_score,
        final_score,
        time_taken_seconds,
        percentage,
        is_new_high_score: final_score > high_score,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Performance {
    Outstanding,
    Great,
    GoodEffort,
}

impl Performance {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 80.0 {
            Performance::Outstanding
        } else if percentage >= 60.0 {
            Performance::Great
        } else {
            Performance::GoodEffort
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Performance::Outstanding => "Outstanding! You're a quiz master!",
            Performance::Great => "Great job! Well done!",
            Performance::GoodEffort => "Good effort! Keep practicing!",
        }
    }
}

impl QuizResult {
    pub fn performance(&self) -> Performance {
        Performance::from_percentage(self.percentage)
    }

    pub fn seconds_per_question(&self, question_count: usize) -> f64 {
        if question_count == 0 {
            return 0.0;
        }
        self.time_taken_seconds as f64 / question_count as f64
    }
}

/// Running clock display, `MM:SS`.
pub fn format_clock(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Result screen duration, `Xm Ys`.
pub fn format_duration(seconds: u64) -> String {
    format!("{}m {}s", seconds / 60, seconds % 60)
}

/// One row of the post-quiz answer review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewItem {
    pub question_id: u32,
    pub prompt: String,
    pub chosen: Option<String>,
    pub correct: String,
    pub is_correct: bool,
}

pub fn review(state: &SessionState, questions: &[Question]) -> Vec<ReviewItem> {
    questions
        .iter()
        .zip(&state.answers)
        .map(|(q, answer)| ReviewItem {
            question_id: q.id,
            prompt: q.prompt.clone(),
            chosen: answer.and_then(|a| q.options.get(a).cloned()),
            correct: q.correct_option().to_string(),
            is_correct: answer.is_some_and(|a| q.is_correct(a)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::questions::QuestionBank;

    fn completed(score: u64, elapsed_ms: i64) -> SessionState {
        let mut state = SessionState::started(5, 10_000);
        state.score = score;
        state.end_time = Some(10_000 + elapsed_ms);
        state.current_index = 5;
        state.phase = Phase::Completed;
        state
    }

    #[test]
    fn test_all_correct_in_five_seconds() {
        let result = calculate_result(&completed(5, 5_000), 0).unwrap();
        assert_eq!(result.base_score, 5);
        assert_eq!(result.bonus_score, 1000);
        assert_eq!(result.final_score, 1005);
        assert_eq!(result.time_taken_seconds, 5);
        assert_eq!(result.percentage, 100.0);
        assert!(result.is_new_high_score);
    }

    #[test]
    fn test_two_correct_in_ten_seconds() {
        let result = calculate_result(&completed(2, 10_999), 5000).unwrap();
        assert_eq!(result.time_taken_seconds, 10);
        assert_eq!(result.bonus_score, 200);
        assert_eq!(result.final_score, 202);
        assert_eq!(result.percentage, 40.0);
        assert!(!result.is_new_high_score);
    }

    #[test]
    fn test_zero_correct_never_beats_zero() {
        let result = calculate_result(&completed(0, 7_000), 0).unwrap();
        assert_eq!(result.bonus_score, 0);
        assert_eq!(result.final_score, 0);
        assert_eq!(result.percentage, 0.0);
        assert!(!result.is_new_high_score);
    }

    #[test]
    fn test_sub_second_completion_clamps_denominator() {
        let result = calculate_result(&completed(3, 400), 0).unwrap();
        assert_eq!(result.time_taken_seconds, 0);
        assert_eq!(result.bonus_score, 3000);
        assert_eq!(result.final_score, 3003);
    }

    #[test]
    fn test_clock_skew_counts_as_zero_seconds() {
        let result = calculate_result(&completed(1, -2_000), 0).unwrap();
        assert_eq!(result.time_taken_seconds, 0);
        assert_eq!(result.bonus_score, 1000);
    }

    #[test]
    fn test_equal_score_is_not_a_new_high() {
        let result = calculate_result(&completed(5, 5_000), 1005).unwrap();
        assert!(!result.is_new_high_score);
    }

    #[test]
    fn test_incomplete_session_has_no_result() {
        let state = SessionState::started(5, 0);
        assert!(calculate_result(&state, 0).is_none());
    }

    #[test]
    fn test_performance_tiers() {
        assert_eq!(Performance::from_percentage(100.0), Performance::Outstanding);
        assert_eq!(Performance::from_percentage(80.0), Performance::Outstanding);
        assert_eq!(Performance::from_percentage(60.0), Performance::Great);
        assert_eq!(Performance::from_percentage(40.0), Performance::GoodEffort);
    }

    #[test]
    fn test_formatting() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(75), "01:15");
        assert_eq!(format_duration(125), "2m 5s");

        let result = calculate_result(&completed(2, 10_000), 0).unwrap();
        assert_eq!(result.seconds_per_question(5), 2.0);
    }

    #[test]
    fn test_review_lists_choices() {
        let bank = QuestionBank::builtin();
        let mut state = SessionState::new(bank.len());
        state.answers = vec![Some(2), Some(0), None, Some(2), Some(3)];

        let items = review(&state, bank.questions());
        assert_eq!(items.len(), 5);
        assert!(items[0].is_correct);
        assert_eq!(items[1].chosen.as_deref(), Some("Venus"));
        assert_eq!(items[1].correct, "Mars");
        assert!(!items[1].is_correct);
        assert!(items[2].chosen.is_none());
        assert!(!items[2].is_correct);
    }
}
