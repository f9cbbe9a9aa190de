use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Gauge, Paragraph},
};

use crate::{engine::result::format_clock, ui::app::App};

impl App {
    pub(in crate::ui) fn draw_status(&self, f: &mut Frame, area: Rect) {
        let state = self.engine.state();
        let status_text = format!(
            "Question {} of {} | Score: {} | Time: {} | Esc: Quit",
            state.current_index + 1,
            self.engine.question_count(),
            state.score,
            format_clock(self.engine.elapsed_seconds())
        );

        f.render_widget(
            Paragraph::new(status_text)
                .block(Block::default().borders(Borders::ALL).title("Quiz Master")),
            area,
        );
    }

    pub(in crate::ui) fn draw_progress(&self, f: &mut Frame, area: Rect) {
        let total = self.engine.question_count().max(1);
        let answered = self.engine.state().answered_count();

        f.render_widget(
            Gauge::default()
                .block(Block::default().borders(Borders::ALL).title("Progress"))
                .gauge_style(Style::default().fg(Color::Magenta))
                .ratio(answered as f64 / total as f64)
                .label(format!("{}/{}", answered, total)),
            area,
        );
    }
}
