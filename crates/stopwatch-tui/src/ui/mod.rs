pub mod big_text;
mod buttons;
pub mod helpers;

use crate::app::{App, ControlButton};
use big_text::{text_width, BigText, SlidingText, GLYPH_HEIGHT};
use buttons::{render_button_row, Button};
use helpers::build_hint_line;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use stopwatch_core::{FieldTransition, TimerState};

const BUTTON_WIDTH: u16 = 20;
const COLON_GAP: u16 = 2;

pub fn draw(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    draw_title_bar(f, app, chunks[0]);
    draw_body(f, app, chunks[1]);
    draw_status_bar(f, app, chunks[2]);
}

fn state_style(state: TimerState) -> Style {
    match state {
        TimerState::Running => Style::default().fg(Color::Green),
        TimerState::Paused => Style::default().fg(Color::Yellow),
        TimerState::Idle => Style::default().fg(Color::Gray),
    }
}

fn draw_title_bar(f: &mut Frame, app: &App, area: Rect) {
    let state = app.engine.state();
    let title = Line::from(vec![
        Span::styled(
            "⏱ Stopwatch ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("[{}]", state.as_str()),
            state_style(state).add_modifier(Modifier::BOLD),
        ),
    ]);

    let paragraph = Paragraph::new(title).block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

fn draw_body(f: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(GLYPH_HEIGHT),
            Constraint::Fill(1),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(area);

    draw_readout(f, app, chunks[1]);

    let buttons = [
        Button::new(
            app.play_pause_label(),
            "Space",
            app.hovered_button == Some(ControlButton::PlayPause),
        ),
        Button::new(
            "Stop",
            "s",
            app.hovered_button == Some(ControlButton::Stop),
        ),
    ];
    let areas = render_button_row(f, chunks[3], &buttons, BUTTON_WIDTH, 2);
    app.play_pause_area = areas.first().copied().unwrap_or_default();
    app.stop_area = areas.get(1).copied().unwrap_or_default();
}

fn field_width(field: &FieldTransition) -> u16 {
    let previous = field.previous().map(text_width).unwrap_or(0);
    text_width(field.current()).max(previous)
}

fn draw_readout(f: &mut Frame, app: &App, area: Rect) {
    let display = &app.display;
    let colon = text_width(":");
    let constraints = [
        Constraint::Length(field_width(&display.hours)),
        Constraint::Length(COLON_GAP),
        Constraint::Length(colon),
        Constraint::Length(COLON_GAP),
        Constraint::Length(field_width(&display.minutes)),
        Constraint::Length(COLON_GAP),
        Constraint::Length(colon),
        Constraint::Length(COLON_GAP),
        Constraint::Length(field_width(&display.seconds)),
    ];

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .flex(Flex::Center)
        .constraints(constraints)
        .split(area);

    let style = state_style(app.engine.state()).add_modifier(Modifier::BOLD);

    f.render_widget(SlidingText::new(&display.hours).style(style), chunks[0]);
    f.render_widget(BigText::new(":").style(style), chunks[2]);
    f.render_widget(SlidingText::new(&display.minutes).style(style), chunks[4]);
    f.render_widget(BigText::new(":").style(style), chunks[6]);
    f.render_widget(SlidingText::new(&display.seconds).style(style), chunks[8]);
}

fn draw_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", app.status_message))
        .border_style(Style::default().fg(Color::DarkGray));

    let hints = build_hint_line(&[("Space", "Play/Pause"), ("s", "Stop"), ("q", "Quit")]);
    let paragraph = Paragraph::new(hints)
        .alignment(Alignment::Center)
        .block(block);

    f.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};
    use stopwatch_core::{Clock, ManualClock, TimerEngine};

    fn render(app: &mut App) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        terminal.backend().buffer().clone()
    }

    fn screen(app: &mut App) -> String {
        let buf = render(app);
        buf.content().iter().map(|cell| cell.symbol()).collect()
    }

    /// Columns holding a glyph cell on row `y`.
    fn glyph_columns(buf: &Buffer, y: u16) -> Vec<u16> {
        (0..buf.area.width)
            .filter(|&x| buf[(x, y)].symbol() == "█")
            .collect()
    }

    fn app() -> (App, ManualClock) {
        let clock = ManualClock::new();
        let engine = TimerEngine::with_clock(Box::new(clock.clone()) as Box<dyn Clock + Send>);
        (App::with_engine(engine, 0), clock)
    }

    #[test]
    fn test_idle_screen() {
        let (mut app, _) = app();
        let content = screen(&mut app);

        assert!(content.contains("Stopwatch"));
        assert!(content.contains("[Idle]"));
        assert!(content.contains("[Space] Play"));
        assert!(content.contains("[s] Stop"));
        assert!(content.contains("█"));
    }

    #[test]
    fn test_running_screen_shows_pause() {
        let (mut app, _) = app();
        app.toggle();
        let content = screen(&mut app);

        assert!(content.contains("[Running]"));
        assert!(content.contains("[Space] Pause"));
    }

    #[test]
    fn test_draw_records_button_areas() {
        let (mut app, _) = app();
        screen(&mut app);

        assert_eq!(app.play_pause_area.width, BUTTON_WIDTH);
        assert_eq!(app.stop_area.width, BUTTON_WIDTH);
        assert!(app.stop_area.x > app.play_pause_area.x);

        let (x, y) = (app.stop_area.x + 1, app.stop_area.y + 1);
        assert_eq!(app.button_at(x, y), Some(ControlButton::Stop));
    }

    #[test]
    fn test_wide_hours_fit_on_screen() {
        let (mut app, clock) = app();
        app.toggle();
        clock.advance(100 * 3_600_000);
        app.on_tick();
        assert_eq!(app.display.digits().to_string(), "100:00:00");

        let buf = render(&mut app);
        let rows: Vec<Vec<u16>> = (0..buf.area.height)
            .map(|y| glyph_columns(&buf, y))
            .filter(|cols| !cols.is_empty())
            .collect();
        assert_eq!(rows.len(), GLYPH_HEIGHT as usize);

        let left = rows.iter().filter_map(|cols| cols.first()).min().copied().unwrap();
        let right = rows.iter().filter_map(|cols| cols.last()).max().copied().unwrap();
        let colon = text_width(":");
        let expected = text_width("100") + 2 * (2 * COLON_GAP + colon) + 2 * text_width("00");
        assert_eq!(right - left + 1, expected);

        // All three hour digits are drawn before the first colon
        let first_colon = left + text_width("100") + COLON_GAP;
        let bottom = rows.last().unwrap();
        let hours: Vec<u16> = bottom.iter().copied().filter(|&x| x < first_colon).collect();
        assert_eq!(hours.first().copied(), Some(left));
        assert_eq!(hours.last().copied(), Some(left + text_width("100") - 1));
        assert!(rows[1].contains(&first_colon));
    }
}
