use ratatui::prelude::*;
use ratatui::widgets::Widget;
use stopwatch_core::FieldTransition;

pub const GLYPH_HEIGHT: u16 = 5;
const CHAR_SPACING: u16 = 1;

/// Width in cells of `text` rendered as big glyphs.
pub fn text_width(text: &str) -> u16 {
    let glyphs: u16 = text.chars().map(|ch| get_char_bitmap(ch).0 as u16).sum();
    let gaps = (text.chars().count() as u16).saturating_sub(1) * CHAR_SPACING;
    glyphs + gaps
}

pub struct BigText<'a> {
    text: &'a str,
    style: Style,
}

impl<'a> BigText<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            style: Style::default(),
        }
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }
}

impl Widget for BigText<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        draw_glyphs(self.text, 0, self.style, area, buf);
    }
}

/// Big text for one animated field. The outgoing value slides up and dims,
/// the incoming value rises from below.
pub struct SlidingText<'a> {
    field: &'a FieldTransition,
    style: Style,
}

impl<'a> SlidingText<'a> {
    pub fn new(field: &'a FieldTransition) -> Self {
        Self {
            field,
            style: Style::default(),
        }
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }
}

impl Widget for SlidingText<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some(previous) = self.field.previous() else {
            draw_glyphs(self.field.current(), 0, self.style, area, buf);
            return;
        };

        let (outgoing, incoming) = self.field.offsets(GLYPH_HEIGHT);
        let incoming_style = if self.field.progress() < 0.5 {
            self.style.add_modifier(Modifier::DIM)
        } else {
            self.style
        };

        draw_glyphs(
            previous,
            outgoing,
            self.style.add_modifier(Modifier::DIM),
            area,
            buf,
        );
        draw_glyphs(self.field.current(), incoming, incoming_style, area, buf);
    }
}

fn draw_glyphs(text: &str, y_offset: i32, style: Style, area: Rect, buf: &mut Buffer) {
    let mut x_offset = 0;

    for ch in text.chars() {
        let (width, lines) = get_char_bitmap(ch);

        if x_offset + width as u16 > area.width {
            break;
        }

        for (y, line) in lines.iter().enumerate() {
            let row = y as i32 + y_offset;
            if row < 0 || row >= i32::from(area.height) {
                continue;
            }

            for (x, active) in line.iter().enumerate() {
                if *active {
                    let gx = area.left() + x_offset + x as u16;
                    let gy = area.top() + row as u16;

                    if let Some(cell) = buf.cell_mut((gx, gy)) {
                        cell.set_style(style).set_symbol("█");
                    }
                }
            }
        }
        x_offset += width as u16 + CHAR_SPACING;
    }
}

fn get_char_bitmap(ch: char) -> (usize, Vec<Vec<bool>>) {
    match ch {
        '0' => (3, vec![
            vec![true, true, true],
            vec![true, false, true],
            vec![true, false, true],
            vec![true, false, true],
            vec![true, true, true],
        ]),
        '1' => (3, vec![
            vec![false, true, false],
            vec![true, true, false],
            vec![false, true, false],
            vec![false, true, false],
            vec![true, true, true],
        ]),
        '2' => (3, vec![
            vec![true, true, true],
            vec![false, false, true],
            vec![true, true, true],
            vec![true, false, false],
            vec![true, true, true],
        ]),
        '3' => (3, vec![
            vec![true, true, true],
            vec![false, false, true],
            vec![true, true, true],
            vec![false, false, true],
            vec![true, true, true],
        ]),
        '4' => (3, vec![
            vec![true, false, true],
            vec![true, false, true],
            vec![true, true, true],
            vec![false, false, true],
            vec![false, false, true],
        ]),
        '5' => (3, vec![
            vec![true, true, true],
            vec![true, false, false],
            vec![true, true, true],
            vec![false, false, true],
            vec![true, true, true],
        ]),
        '6' => (3, vec![
            vec![true, true, true],
            vec![true, false, false],
            vec![true, true, true],
            vec![true, false, true],
            vec![true, true, true],
        ]),
        '7' => (3, vec![
            vec![true, true, true],
            vec![false, false, true],
            vec![false, false, true],
            vec![false, false, true],
            vec![false, false, true],
        ]),
        '8' => (3, vec![
            vec![true, true, true],
            vec![true, false, true],
            vec![true, true, true],
            vec![true, false, true],
            vec![true, true, true],
        ]),
        '9' => (3, vec![
            vec![true, true, true],
            vec![true, false, true],
            vec![true, true, true],
            vec![false, false, true],
            vec![true, true, true],
        ]),
        ':' => (1, vec![
            vec![false],
            vec![true],
            vec![false],
            vec![true],
            vec![false],
        ]),
        _ => (3, vec![vec![false, false, false]; 5]),
    }
}
