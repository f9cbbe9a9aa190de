use crate::questions::Question;

/// Where a session is in its lifecycle. Indices refer to the question bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    Answering(usize),
    Feedback(usize),
    Completed,
}

impl Phase {
    /// Answering or showing feedback.
    pub fn is_active(&self) -> bool {
        matches!(self, Phase::Answering(_) | Phase::Feedback(_))
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::NotStarted => write!(f, "not started"),
            Phase::Answering(i) => write!(f, "answering question {}", i + 1),
            Phase::Feedback(i) => write!(f, "feedback for question {}", i + 1),
            Phase::Completed => write!(f, "completed"),
        }
    }
}

/// Mutable state of one play-through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    /// Equals the question count once completed.
    pub current_index: usize,
    /// Only set while showing feedback.
    pub selected_answer: Option<usize>,
    pub score: u64,
    pub answers: Vec<Option<usize>>,
    pub start_time: Option<i64>,
    pub end_time: Option<i64>,
    pub phase: Phase,
}

impl SessionState {
    pub fn new(question_count: usize) -> Self {
        Self {
            current_index: 0,
            selected_answer: None,
            score: 0,
            answers: vec![None; question_count],
            start_time: None,
            end_time: None,
            phase: Phase::NotStarted,
        }
    }

    pub fn started(question_count: usize, start_time: i64) -> Self {
        Self {
            start_time: Some(start_time),
            phase: Phase::Answering(0),
            ..Self::new(question_count)
        }
    }

    pub fn question_count(&self) -> usize {
        self.answers.len()
    }

    /// Number of recorded answers matching the question's correct option.
    pub fn correct_answers(&self, questions: &[Question]) -> u64 {
        self.answers
            .iter()
            .zip(questions)
            .filter(|(answer, q)| answer.is_some_and(|a| q.is_correct(a)))
            .count() as u64
    }

    pub fn answered_count(&self) -> usize {
        self.answers.iter().filter(|a| a.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::questions::QuestionBank;

    #[test]
    fn test_new_session_is_blank() {
        let state = SessionState::new(5);
        assert_eq!(state.phase, Phase::NotStarted);
        assert_eq!(state.answers, vec![None; 5]);
        assert_eq!(state.question_count(), 5);
        assert!(state.start_time.is_none());
    }

    #[test]
    fn test_started_session() {
        let state = SessionState::started(3, 1_000);
        assert_eq!(state.phase, Phase::Answering(0));
        assert_eq!(state.start_time, Some(1_000));
        assert!(state.phase.is_active());
    }

    #[test]
    fn test_correct_answers_counts_matches() {
        let bank = QuestionBank::builtin();
        let mut state = SessionState::new(bank.len());
        state.answers = vec![Some(2), Some(0), Some(1), None, Some(3)];
        assert_eq!(state.correct_answers(bank.questions()), 3);
        assert_eq!(state.answered_count(), 4);
    }
}
