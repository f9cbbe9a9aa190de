//! Keyboard input handling.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::engine::Phase;

use super::super::app::App;
use super::QuizHandler;

/// Helper struct for managing keyboard input and user interactions.
pub struct InputHandler<'a> {
    app: &'a mut App,
}

impl<'a> InputHandler<'a> {
    pub fn new(app: &'a mut App) -> Self {
        Self { app }
    }

    /// Returns true when the user asked to quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match (key.code, key.modifiers) {
            (KeyCode::Char('q' | 'Q'), KeyModifiers::CONTROL) | (KeyCode::Esc, _) => {
                self.app.log("Exit requested");
                return true;
            }

            (KeyCode::Char('l' | 'L'), KeyModifiers::CONTROL) => {
                self.app.show_logs = !self.app.show_logs;
            }

            _ => match self.app.engine.phase() {
                Phase::NotStarted => self.handle_start_key(key),
                Phase::Answering(_) => self.handle_answer_key(key),
                // Options are locked until the quiz moves on
                Phase::Feedback(_) => {}
                Phase::Completed => self.handle_result_key(key),
            },
        }
        false
    }

    fn handle_start_key(&mut self, key: KeyEvent) {
        if matches!(key.code, KeyCode::Enter | KeyCode::Char('s' | 'S')) {
            QuizHandler::new(self.app).start();
        }
    }

    fn handle_answer_key(&mut self, key: KeyEvent) {
        if let KeyCode::Char(c @ '1'..='9') = key.code
            && let Some(digit) = c.to_digit(10)
        {
            QuizHandler::new(self.app).answer(digit as usize - 1);
        }
    }

    fn handle_result_key(&mut self, key: KeyEvent) {
        if matches!(key.code, KeyCode::Enter | KeyCode::Char('r' | 'R')) {
            QuizHandler::new(self.app).play_again();
        }
    }
}
