//! Current question, its options and answer feedback.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};

use crate::{engine::Phase, ui::app::App};

impl App {
    pub(in crate::ui) fn draw_question(&self, f: &mut Frame, area: Rect) {
        let Some(question) = self.engine.current_question() else {
            return;
        };
        let feedback = matches!(self.engine.phase(), Phase::Feedback(_));
        let selected = self.engine.state().selected_answer;

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(question.options.len() as u16 + 2),
                Constraint::Min(3),
            ])
            .split(area);

        f.render_widget(
            Paragraph::new(question.prompt.as_str())
                .style(Style::default().add_modifier(Modifier::BOLD))
                .wrap(Wrap { trim: true })
                .block(Block::default().borders(Borders::ALL).title("Question")),
            layout[0],
        );

        let items: Vec<ListItem> = question
            .options
            .iter()
            .enumerate()
            .map(|(i, option)| {
                let style = if !feedback {
                    Style::default()
                } else if question.is_correct(i) {
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
                } else if selected == Some(i) {
                    Style::default().fg(Color::Red)
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                ListItem::new(Line::from(Span::styled(format!("{}. {}", i + 1, option), style)))
            })
            .collect();

        let options_title = if feedback {
            "Options (locked)"
        } else {
            "Options (press 1-9)"
        };
        f.render_widget(
            List::new(items).block(Block::default().borders(Borders::ALL).title(options_title)),
            layout[1],
        );

        if feedback {
            self.draw_feedback(f, layout[2]);
        }
    }

    fn draw_feedback(&self, f: &mut Frame, area: Rect) {
        let Phase::Feedback(index) = self.engine.phase() else {
            return;
        };
        let Some(question) = self.engine.current_question() else {
            return;
        };

        let (verdict, color) = if self.engine.is_correct(index) == Some(true) {
            ("Correct!".to_string(), Color::Green)
        } else {
            (
                format!("Incorrect. The answer is {}.", question.correct_option()),
                Color::Red,
            )
        };

        let mut lines = vec![Line::from(Span::styled(
            verdict,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))];
        if let Some(explanation) = &question.explanation {
            lines.push(Line::from(explanation.as_str()));
        }

        f.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: true })
                .block(Block::default().borders(Borders::ALL).title("Feedback")),
            area,
        );
    }
}
