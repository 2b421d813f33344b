//! Button rendering utilities

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

pub struct Button<'a> {
    pub label: &'a str,
    pub shortcut: &'a str,
    pub selected: bool,
}

impl<'a> Button<'a> {
    pub fn new(label: &'a str, shortcut: &'a str, selected: bool) -> Self {
        Self {
            label,
            shortcut,
            selected,
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        let style = if self.selected {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Black).bg(Color::Gray)
        };

        let text = format!(" [{}] {} ", self.shortcut, self.label);
        let button = Paragraph::new(text)
            .style(style)
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded),
            );

        f.render_widget(button, area);
    }
}

/// Lay out `buttons` side by side, each `width` wide, centred in `area`.
/// Returns the area of every button in order.
pub fn render_button_row(
    f: &mut Frame,
    area: Rect,
    buttons: &[Button],
    width: u16,
    spacing: u16,
) -> Vec<Rect> {
    if buttons.is_empty() {
        return Vec::new();
    }

    let mut constraints = Vec::new();
    for i in 0..buttons.len() {
        constraints.push(Constraint::Length(width));
        if i < buttons.len() - 1 && spacing > 0 {
            constraints.push(Constraint::Length(spacing));
        }
    }

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .flex(ratatui::layout::Flex::Center)
        .constraints(constraints)
        .split(area);

    let step = if spacing > 0 { 2 } else { 1 };
    let areas: Vec<Rect> = buttons
        .iter()
        .enumerate()
        .map(|(i, _)| chunks[i * step])
        .collect();

    for (button, button_area) in buttons.iter().zip(&areas) {
        button.render(f, *button_area);
    }

    areas
}
