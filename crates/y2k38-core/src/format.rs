//! Text rendering of segments for the terminal and log output.

use std::fmt;

use crate::countdown::{Countdown, Segment, SegmentedDuration};

/// Column width for terminal labels. The longest label is "SECONDS".
pub const TERMINAL_LABEL_WIDTH: usize = 8;

impl Segment {
    /// Value text: hours, minutes and seconds are two-digit zero-padded,
    /// years and days keep their natural width.
    pub fn display_value(&self) -> String {
        if self.unit.is_padded() {
            format!("{:02}", self.value)
        } else {
            self.value.to_string()
        }
    }
}

/// One `LABEL   : value` line per segment, each terminated by `\n`.
pub fn terminal_lines(duration: &SegmentedDuration) -> String {
    let mut out = String::new();
    for segment in duration.iter() {
        let label = segment.unit.label().to_ascii_uppercase();
        out.push_str(&format!(
            "{label:<width$}: {}\n",
            segment.display_value(),
            width = TERMINAL_LABEL_WIDTH
        ));
    }
    out
}

/// Single-line form, e.g. `1 Days 01 Hours 01 Minutes 01 Seconds`.
pub fn inline_summary(duration: &SegmentedDuration) -> String {
    duration
        .iter()
        .map(|s| format!("{} {}", s.display_value(), s.unit.label()))
        .collect::<Vec<_>>()
        .join(" ")
}

impl fmt::Display for SegmentedDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&inline_summary(self))
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Countdown::Remaining(d) => write!(f, "{d}"),
            Countdown::Reached => f.write_str("reached"),
        }
    }
}
