//! Date and time utility functions
//!
//! The bakery operates in Colombia, so business days are computed in a fixed
//! UTC-5 offset (America/Bogota has no daylight saving). Formatting helpers
//! produce the Spanish (es-CO) forms shown on screen.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, Offset, TimeZone, Timelike, Utc};

/// Date format used for API query parameters and file names
pub const API_DATE_FORMAT: &str = "%Y-%m-%d";

/// Offset of America/Bogota from UTC, in hours
pub const APP_UTC_OFFSET_HOURS: i32 = -5;

const MONTHS_LONG: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

const MONTHS_SHORT: [&str; 12] = [
    "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sept", "oct", "nov", "dic",
];

/// Build the application timezone from an hour offset.
///
/// Offsets outside of the valid range fall back to UTC.
pub fn app_timezone(utc_offset_hours: i32) -> FixedOffset {
    FixedOffset::east_opt(utc_offset_hours * 3600).unwrap_or_else(|| Utc.fix())
}

/// The default application timezone (UTC-5)
pub fn default_timezone() -> FixedOffset {
    app_timezone(APP_UTC_OFFSET_HOURS)
}

/// Parse a date string in YYYY-MM-DD format to NaiveDate
pub fn parse_date(date_str: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(date_str, API_DATE_FORMAT)
}

/// Format a NaiveDate to YYYY-MM-DD string
pub fn format_ymd(d: NaiveDate) -> String {
    d.format(API_DATE_FORMAT).to_string()
}

/// Today's calendar date in the given timezone
pub fn today_in(tz: FixedOffset) -> NaiveDate {
    Utc::now().with_timezone(&tz).date_naive()
}

/// Whether `date` is today in the given timezone
pub fn is_today(date: NaiveDate, tz: FixedOffset) -> bool {
    date == today_in(tz)
}

/// Calendar date of an instant as seen in the given timezone
pub fn local_date(dt: &DateTime<Utc>, tz: FixedOffset) -> NaiveDate {
    dt.with_timezone(&tz).date_naive()
}

/// Midnight of a calendar date, interpreted as UTC.
///
/// Expense dates are stored this way by the backend.
pub fn utc_midnight(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(chrono::NaiveTime::MIN))
}

/// Strict ordering between two instants (`a` happens after `b`)
pub fn is_after(a: &DateTime<Utc>, b: &DateTime<Utc>) -> bool {
    a > b
}

/// Parse an API timestamp.
///
/// Accepts RFC 3339 and naive `YYYY-MM-DDTHH:MM:SS[.fff]` strings (treated as UTC).
pub fn parse_api_datetime(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// "19 de octubre de 2026"
pub fn format_date_long(date: NaiveDate) -> String {
    format!(
        "{} de {} de {}",
        date.day(),
        MONTHS_LONG[date.month0() as usize],
        date.year()
    )
}

/// "19 oct 2026"
pub fn format_date_short(dt: &DateTime<Utc>, tz: FixedOffset) -> String {
    let local = dt.with_timezone(&tz);
    format!(
        "{} {} {}",
        local.day(),
        MONTHS_SHORT[local.month0() as usize],
        local.year()
    )
}

/// "19 oct", used by the request stepper
pub fn format_day_month(dt: &DateTime<Utc>, tz: FixedOffset) -> String {
    let local = dt.with_timezone(&tz);
    format!("{} {}", local.day(), MONTHS_SHORT[local.month0() as usize])
}

/// "19/10/2026", used by table date columns
pub fn format_dd_mm_yyyy(dt: &DateTime<Utc>, tz: FixedOffset) -> String {
    dt.with_timezone(&tz).format("%d/%m/%Y").to_string()
}

/// 12-hour clock with the Colombian meridiem marker: "02:30 p. m."
pub fn format_time_12h(dt: &DateTime<Utc>, tz: FixedOffset) -> String {
    let local = dt.with_timezone(&tz);
    let (is_pm, hour) = local.hour12();
    let meridiem = if is_pm { "p. m." } else { "a. m." };
    format!("{:02}:{:02} {}", hour, local.minute(), meridiem)
}

/// "19 de octubre de 2026, 02:30 p. m."
pub fn format_datetime_long(dt: &DateTime<Utc>, tz: FixedOffset) -> String {
    format!(
        "{}, {}",
        format_date_long(local_date(dt, tz)),
        format_time_12h(dt, tz)
    )
}
