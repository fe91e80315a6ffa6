//! Day boundaries for the calendar's per-day event query.

use chrono::{Days, NaiveDate, TimeZone};

/// Epoch-millisecond `[start, end)` covering `date` in `tz`.
///
/// Uses the earliest valid local midnight, so days starting inside a DST gap
/// still get a usable range. `None` only for dates chrono cannot represent.
pub fn day_bounds<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> Option<(i64, i64)> {
  let next = date.checked_add_days(Days::new(1))?;
  let start = local_midnight_millis(date, tz)?;
  let end = local_midnight_millis(next, tz)?;
  Some((start, end))
}

fn local_midnight_millis<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> Option<i64> {
  let midnight = date.and_hms_opt(0, 0, 0)?;
  tz.from_local_datetime(&midnight)
    .earliest()
    .map(|dt| dt.timestamp_millis())
}
