pub mod clock;
pub mod display;
pub mod error;
pub mod models;
pub mod storage;

pub use clock::{Clock, ManualClock, MonotonicClock, WallClock};
pub use display::{format, FieldTransition, TimeDigits, TimeDisplay};
pub use error::{Error, Result};
pub use models::{ClockKind, StopwatchConfig, TimerEngine, TimerEvent, TimerEventType, TimerState};
