//! Money helpers using rust_decimal for precision
//!
//! Prices travel over the wire as numbers or strings; everything on the
//! client side is a `Decimal` and only becomes text at the edges.

use rust_decimal::prelude::*;

/// Colombian peso amounts are shown with at most two decimals
const DECIMAL_PLACES: u32 = 2;

/// Format an amount the way es-CO displays COP: `$ 12.500` or `$ 12.500,5`.
pub fn format_cop(amount: Decimal) -> String {
    let rounded = amount.round_dp(DECIMAL_PLACES);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let abs = rounded.abs();

    let integral = abs.trunc().to_string();
    let integral = integral.split('.').next().unwrap_or("0");
    let cents = ((abs - abs.trunc()) * Decimal::ONE_HUNDRED)
        .round()
        .to_u32()
        .unwrap_or(0);

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str("$ ");
    out.push_str(&group_thousands(integral));
    if cents > 0 {
        let frac = format!("{:02}", cents);
        out.push(',');
        out.push_str(frac.trim_end_matches('0'));
    }
    out
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

/// Parse a user-entered amount leniently.
///
/// Leading whitespace is skipped and the longest numeric prefix is used, so
/// `"12.5kg"` parses as `12.5`. Returns `None` when no digits are present.
pub fn parse_amount(input: &str) -> Option<Decimal> {
    let trimmed = input.trim_start();
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;

    for (i, ch) in trimmed.char_indices() {
        match ch {
            '+' | '-' if i == 0 => {}
            '0'..='9' => seen_digit = true,
            '.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end = i + ch.len_utf8();
    }

    if !seen_digit {
        return None;
    }
    let numeric = trimmed[..end].trim_end_matches('.');
    Decimal::from_str(numeric).ok()
}

/// Same as [`parse_amount`] but unparseable input counts as zero
pub fn parse_amount_or_zero(input: &str) -> Decimal {
    parse_amount(input).unwrap_or(Decimal::ZERO)
}

/// Plain representation used in request payloads ("12500", "12500.5")
pub fn to_plain_string(amount: Decimal) -> String {
    amount.normalize().to_string()
}
