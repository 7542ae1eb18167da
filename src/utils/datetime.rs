use jiff::Timestamp;
use jiff::tz::TimeZone;

const MINUTE_MS: i64 = 60_000;
const HOUR_MS: i64 = 3_600_000;
const DAY_MS: i64 = 86_400_000;
const WEEK_MS: i64 = 604_800_000;

/// Format how long ago `published` was, relative to `now`.
///
/// Under a week this is "just now", "15m ago", "3h ago" or "2d ago"
/// (lower bound inclusive, upper exclusive, counts floored). From a week on
/// it is the calendar date in the local time zone. Future timestamps are
/// "just now".
pub fn format_relative(published: Timestamp, now: Timestamp) -> String {
    format_relative_in(published, now, &TimeZone::system())
}

/// Same as [`format_relative`] with an explicit zone for the absolute date.
pub fn format_relative_in(published: Timestamp, now: Timestamp, tz: &TimeZone) -> String {
    let diff_ms = now.as_millisecond() - published.as_millisecond();

    match diff_ms {
        d if d < MINUTE_MS => "just now".to_string(),
        d if d < HOUR_MS => format!("{}m ago", d / MINUTE_MS),
        d if d < DAY_MS => format!("{}h ago", d / HOUR_MS),
        d if d < WEEK_MS => format!("{}d ago", d / DAY_MS),
        _ => format_date(published, tz),
    }
}

/// Calendar date (`YYYY-MM-DD`) of `ts` in `tz`.
pub fn format_date(ts: Timestamp, tz: &TimeZone) -> String {
    ts.to_zoned(tz.clone()).strftime("%Y-%m-%d").to_string()
}
