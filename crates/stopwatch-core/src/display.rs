//! Time readout and per-field digit transitions

use std::fmt;

/// Elapsed time split into zero padded fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeDigits {
    pub hours: String,
    pub minutes: String,
    pub seconds: String,
}

/// Split elapsed milliseconds into `hh`, `mm`, `ss`.
///
/// Seconds and minutes wrap at 60. Hours are never capped and widen past two
/// digits. Sub-second remainders are truncated.
pub fn format(elapsed_millis: u64) -> TimeDigits {
    let total_seconds = elapsed_millis / 1000;
    TimeDigits {
        hours: format!("{:02}", total_seconds / 3600),
        minutes: format!("{:02}", (total_seconds % 3600) / 60),
        seconds: format!("{:02}", total_seconds % 60),
    }
}

impl Default for TimeDigits {
    fn default() -> Self {
        format(0)
    }
}

impl fmt::Display for TimeDigits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.hours, self.minutes, self.seconds)
    }
}

fn ease_in_out_cubic(x: f64) -> f64 {
    if x < 0.5 {
        4.0 * x * x * x
    } else {
        1.0 - (-2.0 * x + 2.0).powi(3) / 2.0
    }
}

/// One animated field. When the value changes the old value slides up and
/// out while the new one slides in from below.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldTransition {
    current: String,
    previous: Option<String>,
    frame: u16,
    frames: u16,
}

impl FieldTransition {
    pub fn new(value: impl Into<String>, frames: u16) -> Self {
        Self {
            current: value.into(),
            previous: None,
            frame: 0,
            frames,
        }
    }

    /// Returns true when the value changed.
    pub fn set(&mut self, value: &str) -> bool {
        if self.current == value {
            return false;
        }

        let old = std::mem::replace(&mut self.current, value.to_string());
        if self.frames > 0 {
            self.previous = Some(old);
        }
        self.frame = 0;
        true
    }

    pub fn advance(&mut self) {
        if self.previous.is_none() {
            return;
        }

        self.frame += 1;
        if self.frame >= self.frames {
            self.previous = None;
            self.frame = 0;
        }
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    pub fn previous(&self) -> Option<&str> {
        self.previous.as_deref()
    }

    pub fn is_animating(&self) -> bool {
        self.previous.is_some()
    }

    /// Eased progress in `[0, 1]`, 1 when idle.
    pub fn progress(&self) -> f64 {
        if !self.is_animating() {
            return 1.0;
        }
        ease_in_out_cubic(f64::from(self.frame) / f64::from(self.frames))
    }

    /// Row offsets of the outgoing and incoming values for a glyph `height`
    /// rows tall. Outgoing runs from 0 up to `-height`, incoming from
    /// `height` up to 0.
    pub fn offsets(&self, height: u16) -> (i32, i32) {
        let height = i32::from(height);
        let shift = (self.progress() * f64::from(height)).round() as i32;
        (-shift, height - shift)
    }
}

/// The three animated fields of the readout.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeDisplay {
    pub hours: FieldTransition,
    pub minutes: FieldTransition,
    pub seconds: FieldTransition,
}

impl TimeDisplay {
    pub fn new(frames: u16) -> Self {
        let digits = TimeDigits::default();
        Self {
            hours: FieldTransition::new(digits.hours, frames),
            minutes: FieldTransition::new(digits.minutes, frames),
            seconds: FieldTransition::new(digits.seconds, frames),
        }
    }

    /// Returns true when any field changed.
    pub fn update(&mut self, digits: &TimeDigits) -> bool {
        let hours = self.hours.set(&digits.hours);
        let minutes = self.minutes.set(&digits.minutes);
        let seconds = self.seconds.set(&digits.seconds);
        hours || minutes || seconds
    }

    pub fn advance(&mut self) {
        self.hours.advance();
        self.minutes.advance();
        self.seconds.advance();
    }

    pub fn is_animating(&self) -> bool {
        self.fields().iter().any(|field| field.is_animating())
    }

    pub fn fields(&self) -> [&FieldTransition; 3] {
        [&self.hours, &self.minutes, &self.seconds]
    }

    pub fn digits(&self) -> TimeDigits {
        TimeDigits {
            hours: self.hours.current().to_string(),
            minutes: self.minutes.current().to_string(),
            seconds: self.seconds.current().to_string(),
        }
    }
}
