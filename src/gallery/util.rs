use std::fmt::Display;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

const SIZE_UNITS: [&'static str; 5] = ["B", "KB", "MB", "GB", "TB"];
const DATE_FORMAT: &'static str = "%Y/%m/%d %H:%M:%S";
const INVALID_DATE: &'static str = "Invalid Date";

/// Human readable size: the largest binary unit that keeps the value at
/// least one, with at most two decimals and no trailing zeros. Ties round
/// away from zero.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_owned();
    }
    let mut unit = 0;
    while unit + 1 < SIZE_UNITS.len() && bytes >> (10 * (unit + 1)) > 0 {
        unit += 1;
    }
    let divisor = 1u128 << (10 * unit);
    let hundredths = (bytes as u128 * 200 + divisor) / (2 * divisor);
    let rounded = format!("{}.{:02}", hundredths / 100, hundredths % 100);
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, SIZE_UNITS[unit])
}

/// Upload time in the local timezone, `YYYY/MM/DD HH:MM:SS`.
pub fn format_date(iso: &str) -> String {
    format_date_in(iso, &Local)
}

/// Same as [`format_date`] against an explicit timezone.
///
/// Offsets in the input are honoured. A date-time without one is wall time in
/// `tz`, and a bare date is midnight UTC.
pub fn format_date_in<Tz>(iso: &str, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let iso = iso.trim();
    let parsed: Option<DateTime<Tz>> = if let Ok(date) = DateTime::parse_from_rfc3339(iso) {
        Some(date.with_timezone(tz))
    } else if let Ok(naive) = NaiveDateTime::parse_from_str(iso, "%Y-%m-%dT%H:%M:%S%.f") {
        tz.from_local_datetime(&naive).earliest()
    } else if let Ok(naive) = NaiveDateTime::parse_from_str(iso, "%Y-%m-%dT%H:%M") {
        tz.from_local_datetime(&naive).earliest()
    } else if let Ok(day) = NaiveDate::parse_from_str(iso, "%Y-%m-%d") {
        day.and_hms_opt(0, 0, 0)
            .map(|midnight| Utc.from_utc_datetime(&midnight).with_timezone(tz))
    } else {
        None
    };
    match parsed {
        Some(date) => date.format(DATE_FORMAT).to_string(),
        None => INVALID_DATE.to_owned(),
    }
}
