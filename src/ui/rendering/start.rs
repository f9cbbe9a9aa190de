use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::{engine::result::format_duration, ui::app::App};

impl App {
    pub(in crate::ui) fn draw_start_screen(&self, f: &mut Frame, area: Rect) {
        let mut lines = vec![
            Line::from(Span::styled(
                "Quiz Master",
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(format!(
                "Test your knowledge with {} questions.",
                self.engine.question_count()
            )),
            Line::from("Your score is based on accuracy and speed!"),
            Line::from(""),
        ];

        let high_score = self.engine.high_score();
        if high_score > 0 {
            lines.push(Line::from(Span::styled(
                format!("High Score: {} points", high_score),
                Style::default().fg(Color::Yellow),
            )));

            let data = self.engine.quiz_data();
            if data.total_quizzes_completed > 0 {
                lines.push(Line::from(format!(
                    "Record runs: {} | Average time: {}",
                    data.total_quizzes_completed,
                    format_duration(data.average_time)
                )));
            }
            lines.push(Line::from(""));
        }

        lines.push(Line::from(format!(
            "Questions: {} | Format: Multiple Choice",
            self.engine.question_count()
        )));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Press Enter to start | Esc to quit",
            Style::default().add_modifier(Modifier::BOLD),
        )));

        f.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .block(Block::default().borders(Borders::ALL).title("Welcome")),
            area,
        );
    }
}
