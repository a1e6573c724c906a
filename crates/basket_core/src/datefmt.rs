//! Short timestamp rendering for message and list views.
//!
//! Output carries day, abbreviated month and 12-hour time. Formatting uses
//! the offset stored in the timestamp itself and never consults the clock
//! or host time zone, so equal inputs always render equally.

use chrono::{DateTime, Datelike, FixedOffset, TimeZone, Timelike};
use thiserror::Error;

const MONTHS_AR: [&str; 12] = [
    "يناير", "فبراير", "مارس", "أبريل", "مايو", "يونيو", "يوليو", "أغسطس", "سبتمبر", "أكتوبر",
    "نوفمبر", "ديسمبر",
];
const MONTHS_EN: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Rendering locale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateLocale {
    /// Arabic-Indic digits, Arabic month names, `ص`/`م` day period.
    #[default]
    Arabic,
    /// `Oct 18, 9:05 PM` style.
    English,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DateFormatError {
    #[error("invalid timestamp `{input}`: {message}")]
    InvalidTimestamp { input: String, message: String },
}

/// Formats a timestamp as a short display string.
pub fn format_short<Tz: TimeZone>(timestamp: &DateTime<Tz>, locale: DateLocale) -> String {
    let month_index = timestamp.month0() as usize;
    let (is_pm, hour12) = timestamp.hour12();
    let day = timestamp.day();
    let minute = timestamp.minute();

    match locale {
        DateLocale::English => format!(
            "{} {day}, {hour12}:{minute:02} {}",
            MONTHS_EN[month_index],
            if is_pm { "PM" } else { "AM" }
        ),
        DateLocale::Arabic => format!(
            "{} {}، {}:{} {}",
            arabic_digits(&day.to_string()),
            MONTHS_AR[month_index],
            arabic_digits(&hour12.to_string()),
            arabic_digits(&format!("{minute:02}")),
            if is_pm { "م" } else { "ص" }
        ),
    }
}

/// Formats epoch milliseconds at the given offset.
///
/// Returns `None` when the value is outside the representable range.
pub fn format_epoch_ms(epoch_ms: i64, offset: FixedOffset, locale: DateLocale) -> Option<String> {
    let utc = DateTime::from_timestamp_millis(epoch_ms)?;
    Some(format_short(&utc.with_timezone(&offset), locale))
}

/// Parses an RFC 3339 string and formats it in its own offset.
pub fn format_rfc3339(input: &str, locale: DateLocale) -> Result<String, DateFormatError> {
    let parsed = DateTime::parse_from_rfc3339(input.trim()).map_err(|err| {
        DateFormatError::InvalidTimestamp {
            input: input.to_string(),
            message: err.to_string(),
        }
    })?;
    Ok(format_short(&parsed, locale))
}

fn arabic_digits(ascii: &str) -> String {
    ascii
        .chars()
        .map(|ch| match ch.to_digit(10) {
            Some(digit) => char::from_u32(0x0660 + digit).unwrap_or(ch),
            None => ch,
        })
        .collect()
}
