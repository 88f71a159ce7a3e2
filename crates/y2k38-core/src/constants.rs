/// Signed 32-bit Unix time rollover: 2038-01-19T03:14:08Z in epoch milliseconds.
pub const Y2K38_EPOCH_MILLIS: i64 = 2_147_483_648_000;

/// Client and CLI sampling cadence.
pub const TICK_INTERVAL_MILLIS: u64 = 1000;

pub const MILLIS_PER_SECOND: u64 = 1000;
pub const MILLIS_PER_MINUTE: u64 = 60 * MILLIS_PER_SECOND;
pub const MILLIS_PER_HOUR: u64 = 60 * MILLIS_PER_MINUTE;
pub const MILLIS_PER_DAY: u64 = 24 * MILLIS_PER_HOUR;

/// Year length used by the years policy. Leap years are ignored.
pub const DAYS_PER_YEAR: u64 = 365;
