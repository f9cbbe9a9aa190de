mod logs;
mod question;
mod results;
mod start;
mod status;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use crate::{engine::Phase, ui::app::App};

impl App {
    pub(in crate::ui) fn draw(&self, f: &mut Frame) {
        let (main_area, log_area) = if self.show_logs {
            let layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Min(10),   // Quiz content
                    Constraint::Length(8), // Log panel
                ])
                .split(f.area());
            (layout[0], Some(layout[1]))
        } else {
            (f.area(), None)
        };

        match self.engine.phase() {
            Phase::NotStarted => self.draw_start_screen(f, main_area),
            Phase::Answering(_) | Phase::Feedback(_) => {
                let layout = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([
                        Constraint::Length(3), // Status bar
                        Constraint::Length(3), // Progress
                        Constraint::Min(8),    // Question
                    ])
                    .split(main_area);

                self.draw_status(f, layout[0]);
                self.draw_progress(f, layout[1]);
                self.draw_question(f, layout[2]);
            }
            Phase::Completed => self.draw_results(f, main_area),
        }

        if let Some(area) = log_area {
            self.draw_logs(f, area);
        }
    }
}
