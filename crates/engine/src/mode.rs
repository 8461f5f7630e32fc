//! Operating-mode selection.
//!
//! Every schedule decision runs on Beijing wall-clock time (UTC+8),
//! regardless of where the process or the scheduler lives.

use chrono::{DateTime, FixedOffset, NaiveDate, Timelike, Utc};

const UTC_OFFSET_HOURS: i32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Morning,
    Evening,
}

impl Mode {
    /// Select the mode for an instant. Hours 16..=22 (UTC+8, both ends
    /// inclusive) are the evening window; every other hour, including 23,
    /// is morning.
    pub fn at(now: DateTime<Utc>) -> Self {
        let hour = now.with_timezone(&local_offset()).hour();
        if (16..=22).contains(&hour) {
            Mode::Evening
        } else {
            Mode::Morning
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Mode::Morning => "morning",
            Mode::Evening => "evening",
        }
    }
}

/// The fixed UTC+8 offset shared by mode selection and countdown dates.
pub fn local_offset() -> FixedOffset {
    FixedOffset::east_opt(UTC_OFFSET_HOURS * 3600).expect("static offset is in range")
}

/// The calendar date "today" as subscribers experience it.
pub fn local_today(now: DateTime<Utc>) -> NaiveDate {
    now.with_timezone(&local_offset()).date_naive()
}
