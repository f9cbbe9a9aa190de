use std::{fmt::Display, io::Stdout, time::Duration};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::info;

use crate::engine::QuizEngine;

use super::{
    handlers::{InputHandler, QuizHandler},
    types::LogBuffer,
};

/// Longest the loop waits for input before checking timers again.
const MAX_POLL_WAIT: Duration = Duration::from_millis(250);

/// Main application state container.
pub struct App {
    pub(in crate::ui) engine: QuizEngine,
    pub(in crate::ui) logs: LogBuffer,
    pub(in crate::ui) show_logs: bool,
}

impl App {
    pub fn new(engine: QuizEngine, logs: LogBuffer) -> Self {
        Self {
            engine,
            logs,
            show_logs: false,
        }
    }

    pub fn run(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        info!("UI started");
        self.log("UI started");

        loop {
            terminal.draw(|f| self.draw(f))?;

            if event::poll(self.poll_timeout())?
                && let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press
                && InputHandler::new(self).handle_key(key)
            {
                return Ok(());
            }

            QuizHandler::new(self).fire_timers();
        }
    }

    /// Time until the next engine timer, capped so the screen stays fresh.
    pub(in crate::ui) fn poll_timeout(&self) -> Duration {
        match self.engine.next_deadline() {
            Some(due) => {
                let wait = due.saturating_sub(self.engine.now_ms()).max(0) as u64;
                Duration::from_millis(wait).min(MAX_POLL_WAIT)
            }
            None => MAX_POLL_WAIT,
        }
    }

    pub(in crate::ui) fn log(&self, msg: impl Into<String> + Display) {
        tracing::info!("{}", &msg);
        self.logs.push(msg);
    }
}
