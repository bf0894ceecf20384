use novabites::utils::money::*;
use rust_decimal::Decimal;
use std::str::FromStr;

fn d(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

#[test]
fn test_format_cop() {
    assert_eq!(format_cop(d("0")), "$ 0");
    assert_eq!(format_cop(d("950")), "$ 950");
    assert_eq!(format_cop(d("12500")), "$ 12.500");
    assert_eq!(format_cop(d("1234567")), "$ 1.234.567");
    assert_eq!(format_cop(d("12500.5")), "$ 12.500,5");
    assert_eq!(format_cop(d("12500.25")), "$ 12.500,25");
    assert_eq!(format_cop(d("-1500")), "-$ 1.500");
}

#[test]
fn test_parse_amount_lenient() {
    assert_eq!(parse_amount("12500"), Some(d("12500")));
    assert_eq!(parse_amount("  12.5kg"), Some(d("12.5")));
    assert_eq!(parse_amount("7."), Some(d("7")));
    assert_eq!(parse_amount("1.2.3"), Some(d("1.2")));
    assert_eq!(parse_amount("abc"), None);
    assert_eq!(parse_amount(""), None);
}

#[test]
fn test_parse_amount_or_zero() {
    assert_eq!(parse_amount_or_zero("pesos"), Decimal::ZERO);
    assert_eq!(parse_amount_or_zero("3000"), d("3000"));
}

#[test]
fn test_to_plain_string() {
    assert_eq!(to_plain_string(d("12500.00")), "12500");
    assert_eq!(to_plain_string(d("12500.50")), "12500.5");
}
