//! Quiz session state machine.
//!
//! `NotStarted -> Answering(i) -> Feedback(i) -> Answering(i + 1) ... -> Completed`.
//! Moving out of `Feedback` happens only through the auto-advance timer,
//! which the owner drives by calling [`QuizEngine::poll`].

pub mod clock;
pub mod result;
pub mod state;
pub mod timer;

pub use clock::{Clock, ManualClock, SystemClock};
pub use result::{BONUS_FACTOR, Performance, QuizResult, ReviewItem};
pub use state::{Phase, SessionState};

use tracing::{debug, info};

use crate::{
    config::QuizConfig,
    questions::{Question, QuestionBank},
    storage::{QuizData, Storage},
};

use timer::{TimerHandle, TimerKind, TimerQueue};

/// Something the presentation layer should react to after [`QuizEngine::poll`].
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    Tick { elapsed_seconds: u64 },
    Advanced { index: usize },
    Completed(QuizResult),
}

/// Configured durations are unsigned; anything past `i64::MAX` saturates.
fn millis(ms: u64) -> i64 {
    i64::try_from(ms).unwrap_or(i64::MAX)
}

pub struct QuizEngine {
    bank: QuestionBank,
    storage: Storage,
    clock: Box<dyn Clock>,
    config: QuizConfig,
    state: SessionState,
    result: Option<QuizResult>,
    high_score: u64,
    /// Statistics as of startup or the last new best.
    quiz_data: QuizData,
    /// Bumped on every reset; timers from older sessions are ignored.
    generation: u64,
    timers: TimerQueue,
    advance_timer: Option<TimerHandle>,
    tick_timer: Option<TimerHandle>,
}

impl QuizEngine {
    pub fn new(
        bank: QuestionBank,
        storage: Storage,
        clock: Box<dyn Clock>,
        config: QuizConfig,
    ) -> Self {
        let high_score = storage.get_high_score();
        let quiz_data = storage.get_quiz_data();

        // In-progress sessions are not resumed
        if let Some(started) = storage.get_session_start() {
            info!("Discarding interrupted session started at {}", started);
            storage.clear_session();
        }

        let state = SessionState::new(bank.len());

        Self {
            bank,
            storage,
            clock,
            config,
            state,
            result: None,
            high_score,
            quiz_data,
            generation: 0,
            timers: TimerQueue::new(),
            advance_timer: None,
            tick_timer: None,
        }
    }

    /// Begin a fresh session at the first question, replacing any current one.
    pub fn start(&mut self) {
        self.reset_timers();

        let now = self.clock.now_ms();
        self.storage.set_session_start(now);
        self.state = SessionState::started(self.bank.len(), now);
        self.result = None;

        self.tick_timer = Some(self.timers.schedule_repeating(
            TimerKind::ClockTick,
            now,
            millis(self.config.tick_interval_ms),
            self.generation,
        ));

        info!("Quiz started with {} questions", self.bank.len());
    }

    /// Answer the current question. Returns false when ignored.
    pub fn select_answer(&mut self, choice: usize) -> bool {
        match self.state.phase {
            Phase::Answering(index) => self.select_answer_for(index, choice),
            phase => {
                debug!("Ignoring answer {} while {}", choice, phase);
                false
            }
        }
    }

    /// Answer question `index`; ignored unless that question is awaiting an answer
    /// and `choice` is one of its options.
    pub fn select_answer_for(&mut self, index: usize, choice: usize) -> bool {
        if self.state.phase != Phase::Answering(index) {
            debug!(
                "Ignoring answer {} for question {} while {}",
                choice,
                index + 1,
                self.state.phase
            );
            return false;
        }

        let Some(question) = self.bank.get(index) else {
            return false;
        };
        if choice >= question.options.len() {
            debug!(
                "Ignoring out-of-range choice {} for question {}",
                choice,
                index + 1
            );
            return false;
        }
        let correct = question.is_correct(choice);

        self.state.answers[index] = Some(choice);
        self.state.selected_answer = Some(choice);
        if correct {
            self.state.score += 1;
        }
        self.state.phase = Phase::Feedback(index);

        let due = self
            .clock
            .now_ms()
            .saturating_add(millis(self.config.feedback_delay_ms));
        self.advance_timer = Some(self.timers.schedule_once(
            TimerKind::AutoAdvance,
            due,
            self.generation,
        ));

        info!(
            "Question {} answered: option {} ({})",
            index + 1,
            choice + 1,
            if correct { "correct" } else { "incorrect" }
        );
        true
    }

    /// Back to the start screen after a completed session.
    pub fn play_again(&mut self) -> bool {
        if self.state.phase != Phase::Completed {
            debug!("Ignoring play again while {}", self.state.phase);
            return false;
        }

        self.storage.clear_session();
        self.reset_timers();
        self.state = SessionState::new(self.bank.len());
        self.result = None;

        info!("Quiz reset for another round");
        true
    }

    /// Fire every timer that is due and apply its transition.
    pub fn poll(&mut self) -> Vec<EngineEvent> {
        let now = self.clock.now_ms();
        let mut events = Vec::new();

        for fired in self.timers.pop_due(now) {
            if fired.handle.generation != self.generation {
                debug!("Discarding {:?} timer from an earlier session", fired.kind);
                continue;
            }

            match fired.kind {
                TimerKind::ClockTick => {
                    if self.state.phase.is_active() {
                        events.push(EngineEvent::Tick {
                            elapsed_seconds: self.elapsed_seconds(),
                        });
                    }
                }
                TimerKind::AutoAdvance => {
                    self.advance_timer = None;
                    if let Some(event) = self.advance(now) {
                        events.push(event);
                    }
                }
            }
        }

        events
    }

    /// Earliest pending timer, in clock milliseconds.
    pub fn next_deadline(&self) -> Option<i64> {
        self.timers.next_due()
    }

    pub fn now_ms(&self) -> i64 {
        self.clock.now_ms()
    }

    fn advance(&mut self, now: i64) -> Option<EngineEvent> {
        let Phase::Feedback(index) = self.state.phase else {
            return None;
        };

        let next = index + 1;
        if next < self.bank.len() {
            self.state.current_index = next;
            self.state.selected_answer = None;
            self.state.phase = Phase::Answering(next);
            Some(EngineEvent::Advanced { index: next })
        } else {
            self.complete(now).map(EngineEvent::Completed)
        }
    }

    fn complete(&mut self, now: i64) -> Option<QuizResult> {
        self.state.end_time = Some(now);
        self.state.current_index = self.bank.len();
        self.state.selected_answer = None;
        self.state.phase = Phase::Completed;

        if let Some(tick) = self.tick_timer.take() {
            self.timers.cancel(tick);
        }

        let result = result::calculate_result(&self.state, self.high_score)?;

        info!(
            "Quiz completed: {}/{} correct in {}s, final score {}",
            result.base_score,
            self.bank.len(),
            result.time_taken_seconds,
            result.final_score
        );

        if result.is_new_high_score {
            info!(
                "New high score {} (previous {})",
                result.final_score, self.high_score
            );
            self.high_score = result.final_score;
            self.quiz_data = self
                .storage
                .record_completion(result.final_score, result.time_taken_seconds);
        }

        self.result = Some(result);
        Some(result)
    }

    fn reset_timers(&mut self) {
        self.timers.cancel_all();
        self.advance_timer = None;
        self.tick_timer = None;
        self.generation += 1;
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    pub fn config(&self) -> &QuizConfig {
        &self.config
    }

    pub fn question_count(&self) -> usize {
        self.bank.len()
    }

    /// Question being answered or reviewed, if a session is active.
    pub fn current_question(&self) -> Option<&Question> {
        match self.state.phase {
            Phase::Answering(i) | Phase::Feedback(i) => self.bank.get(i),
            _ => None,
        }
    }

    pub fn high_score(&self) -> u64 {
        self.high_score
    }

    pub fn result(&self) -> Option<&QuizResult> {
        self.result.as_ref()
    }

    pub fn quiz_data(&self) -> &QuizData {
        &self.quiz_data
    }

    /// Whole seconds since the session started, frozen at completion.
    pub fn elapsed_seconds(&self) -> u64 {
        let Some(start) = self.state.start_time else {
            return 0;
        };
        let end = self.state.end_time.unwrap_or_else(|| self.clock.now_ms());
        end.saturating_sub(start).max(0) as u64 / 1000
    }

    /// Whether the recorded answer to question `index` was right.
    pub fn is_correct(&self, index: usize) -> Option<bool> {
        let answer = (*self.state.answers.get(index)?)?;
        Some(self.bank.get(index)?.is_correct(answer))
    }

    pub fn review(&self) -> Vec<ReviewItem> {
        result::review(&self.state, self.bank.questions())
    }

    pub fn is_auto_advance_pending(&self) -> bool {
        self.advance_timer
            .is_some_and(|handle| self.timers.is_scheduled(handle))
    }
}
