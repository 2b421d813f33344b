use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};

pub fn build_hint_line(hints: &[(&'static str, &'static str)]) -> Line<'static> {
    let mut spans = Vec::new();
    for (key, action) in hints {
        spans.push(Span::styled(
            format!("[{}]", key),
            Style::default().fg(Color::Yellow),
        ));
        spans.push(Span::raw(format!("{} ", action)));
    }
    Line::from(spans)
}
