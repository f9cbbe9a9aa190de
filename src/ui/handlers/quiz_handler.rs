//! Quiz session transitions driven from the UI.

use crate::engine::{EngineEvent, Phase};

use super::super::app::App;

/// Helper struct that forwards user actions to the engine and logs the outcome.
pub struct QuizHandler<'a> {
    app: &'a mut App,
}

impl<'a> QuizHandler<'a> {
    pub fn new(app: &'a mut App) -> Self {
        Self { app }
    }

    pub fn start(&mut self) {
        self.app.engine.start();
        self.app.log(format!(
            "Quiz started ({} questions)",
            self.app.engine.question_count()
        ));
    }

    /// `choice` is zero-based.
    pub fn answer(&mut self, choice: usize) {
        let Phase::Answering(index) = self.app.engine.phase() else {
            return;
        };

        if !self.app.engine.select_answer(choice) {
            return;
        }

        match self.app.engine.is_correct(index) {
            Some(true) => self.app.log(format!("Question {}: correct", index + 1)),
            _ => self.app.log(format!("Question {}: incorrect", index + 1)),
        }
    }

    pub fn play_again(&mut self) {
        if self.app.engine.play_again() {
            self.app.log("Ready for another round");
        }
    }

    /// Let due timers run and report what happened.
    pub fn fire_timers(&mut self) {
        for event in self.app.engine.poll() {
            match event {
                EngineEvent::Tick { .. } => {}
                EngineEvent::Advanced { index } => {
                    self.app.log(format!(
                        "Question {} of {}",
                        index + 1,
                        self.app.engine.question_count()
                    ));
                }
                EngineEvent::Completed(result) => {
                    self.app.log(format!(
                        "Quiz complete: {} points ({} + {} bonus) in {}s",
                        result.final_score,
                        result.base_score,
                        result.bonus_score,
                        result.time_taken_seconds
                    ));
                    if result.is_new_high_score {
                        self.app.log("New high score!");
                    }
                    self.app.log(result.performance().message());
                }
            }
        }
    }
}
