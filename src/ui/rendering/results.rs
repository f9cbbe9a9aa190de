//! Result screen.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

use crate::{
    engine::{
        BONUS_FACTOR, Performance,
        result::format_duration,
    },
    ui::app::App,
};

impl App {
    pub(in crate::ui) fn draw_results(&self, f: &mut Frame, area: Rect) {
        let Some(result) = self.engine.result() else {
            return;
        };
        let total = self.engine.question_count();

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(11),
                Constraint::Min(4),
                Constraint::Length(3),
            ])
            .split(area);

        let performance = result.performance();
        let color = match performance {
            Performance::Outstanding => Color::Green,
            Performance::Great => Color::Blue,
            Performance::GoodEffort => Color::Magenta,
        };

        let mut lines = Vec::new();
        if result.is_new_high_score {
            lines.push(Line::from(Span::styled(
                "New High Score!",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )));
        }
        lines.extend([
            Line::from(Span::styled(
                performance.message(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(format!(
                "Correct: {}/{} ({:.1}% accuracy)",
                result.base_score, total, result.percentage
            )),
            Line::from(format!(
                "Time: {} ({:.1}s per question)",
                format_duration(result.time_taken_seconds),
                result.seconds_per_question(total)
            )),
            Line::from(format!("Base score: {}", result.base_score)),
            Line::from(format!(
                "Speed bonus: {} (correct x {} / seconds)",
                result.bonus_score, BONUS_FACTOR
            )),
            Line::from(Span::styled(
                format!("Final score: {}", result.final_score),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(format!("High score: {}", self.engine.high_score())),
        ]);

        f.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title("Quiz Complete!")),
            layout[0],
        );

        let items: Vec<ListItem> = self
            .engine
            .review()
            .into_iter()
            .enumerate()
            .map(|(i, item)| {
                let (mark, style) = if item.is_correct {
                    ("+", Style::default().fg(Color::Green))
                } else {
                    ("-", Style::default().fg(Color::Red))
                };
                let chosen = item.chosen.as_deref().unwrap_or("no answer");
                let text = if item.is_correct {
                    format!("{} {}. {} -> {}", mark, i + 1, item.prompt, chosen)
                } else {
                    format!(
                        "{} {}. {} -> {} (answer: {})",
                        mark,
                        i + 1,
                        item.prompt,
                        chosen,
                        item.correct
                    )
                };
                ListItem::new(Line::from(Span::styled(text, style)))
            })
            .collect();

        f.render_widget(
            List::new(items).block(Block::default().borders(Borders::ALL).title("Review")),
            layout[1],
        );

        f.render_widget(
            Paragraph::new("Press R to play again | Esc to quit")
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL)),
            layout[2],
        );
    }
}
