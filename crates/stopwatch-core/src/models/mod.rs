pub mod config;
pub mod events;
pub mod timer;

pub use config::{ClockKind, StopwatchConfig};
pub use events::{TimerEvent, TimerEventType};
pub use timer::{TimerEngine, TimerState};
