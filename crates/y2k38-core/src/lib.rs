//! Countdown arithmetic for the signed 32-bit Unix time rollover.
//!
//! Splits the time remaining until a fixed target instant into labelled
//! segments under one of two policies, and drives a one-second sampling
//! state machine that stops once the target is reached.
//!
//! Zero I/O apart from reading the system clock.

pub mod constants;
pub mod countdown;
pub mod error;
pub mod format;
pub mod ticker;
pub mod time;

pub use constants::{TICK_INTERVAL_MILLIS, Y2K38_EPOCH_MILLIS};
pub use countdown::{
    Countdown, Policy, Segment, SegmentedDuration, TargetInstant, Unit, decompose, split_millis,
};
pub use error::ParseError;
pub use format::{inline_summary, terminal_lines};
pub use ticker::{FirstSample, TickState, Ticker};
pub use time::{UtcDateTime, now_unix_millis};
