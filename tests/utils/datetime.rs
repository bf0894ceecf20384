use chrono::{NaiveDate, TimeZone, Utc};
use novabites::utils::datetime::*;

#[test]
fn test_format_ymd() {
    let date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
    assert_eq!(format_ymd(date), "2025-01-15");
    assert_eq!(parse_date("2025-01-15").unwrap(), date);
    assert!(parse_date("15/01/2025").is_err());
}

#[test]
fn test_app_timezone() {
    assert_eq!(default_timezone().local_minus_utc(), -5 * 3600);
    // Out of range offsets fall back to UTC
    assert_eq!(app_timezone(30).local_minus_utc(), 0);
}

#[test]
fn test_local_date_crosses_midnight() {
    let tz = default_timezone();
    // 03:00 UTC is still the previous evening in Bogotá
    let dt = Utc.with_ymd_and_hms(2025, 3, 10, 3, 0, 0).unwrap();
    assert_eq!(local_date(&dt, tz), NaiveDate::from_ymd_opt(2025, 3, 9).unwrap());

    let dt = Utc.with_ymd_and_hms(2025, 3, 10, 5, 0, 0).unwrap();
    assert_eq!(local_date(&dt, tz), NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());
}

#[test]
fn test_utc_midnight() {
    let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
    assert_eq!(utc_midnight(date).to_rfc3339(), "2025-06-01T00:00:00+00:00");
}

#[test]
fn test_is_today() {
    let tz = default_timezone();
    assert!(is_today(today_in(tz), tz));
    assert!(!is_today(NaiveDate::from_ymd_opt(2001, 1, 1).unwrap(), tz));
}

#[test]
fn test_is_after_is_strict() {
    let a = Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();
    let b = Utc.with_ymd_and_hms(2025, 1, 1, 11, 59, 59).unwrap();
    assert!(is_after(&a, &b));
    assert!(!is_after(&a, &a));
}

#[test]
fn test_parse_api_datetime() {
    let expected = Utc.with_ymd_and_hms(2025, 2, 3, 14, 30, 0).unwrap();
    assert_eq!(parse_api_datetime("2025-02-03T14:30:00Z"), Some(expected));
    assert_eq!(parse_api_datetime("2025-02-03T09:30:00-05:00"), Some(expected));
    assert_eq!(parse_api_datetime("2025-02-03T14:30:00.000"), Some(expected));
    assert_eq!(parse_api_datetime("ayer"), None);
}

#[test]
fn test_spanish_formats() {
    let tz = default_timezone();
    let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
    assert_eq!(format_date_long(date), "19 de octubre de 2026");

    let dt = Utc.with_ymd_and_hms(2026, 10, 19, 19, 30, 0).unwrap();
    assert_eq!(format_date_short(&dt, tz), "19 oct 2026");
    assert_eq!(format_day_month(&dt, tz), "19 oct");
    assert_eq!(format_dd_mm_yyyy(&dt, tz), "19/10/2026");
    assert_eq!(format_time_12h(&dt, tz), "02:30 p. m.");
    assert_eq!(format_datetime_long(&dt, tz), "19 de octubre de 2026, 02:30 p. m.");

    let morning = Utc.with_ymd_and_hms(2026, 9, 2, 13, 5, 0).unwrap();
    assert_eq!(format_time_12h(&morning, tz), "08:05 a. m.");
    assert_eq!(format_date_short(&morning, tz), "2 sept 2026");
}
