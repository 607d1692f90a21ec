//! Locale-aware (pt-BR) cell normalization.
//!
//! Every function here is fail-soft: a malformed cell must never abort a
//! batch load, so amounts fall back to `0.0` and dates to `None`.

use chrono::NaiveDate;

use crate::constants::format::CURRENCY_PREFIX;

/// Parse a BRL amount such as `R$ 1.234,56` into `1234.56`.
///
/// Strips `R`, `$`, whitespace and `.` thousands separators, then reads the
/// decimal comma as a point. Anything that still fails to parse, or parses to
/// a non-finite value, yields `0.0`.
pub fn parse_amount(text: &str) -> f64 {
    let cleaned: String = text
        .trim()
        .chars()
        .filter(|ch| !matches!(ch, 'R' | '$' | '.') && !ch.is_whitespace())
        .map(|ch| if ch == ',' { '.' } else { ch })
        .collect();
    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// Parse a day-first date cell (`DD/MM/YYYY`, `DD/MM/YY`, `DD-MM-YYYY`,
/// `DD.MM.YYYY` or ISO `YYYY-MM-DD`). A trailing time component is ignored.
///
/// Returns `None` when the text is not a valid calendar date.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let core = text
        .trim()
        .split(|ch: char| ch.is_whitespace() || ch == 'T')
        .next()?;
    let parts: Vec<&str> = core.split(['/', '-', '.']).collect();
    if parts.len() != 3 || parts.iter().any(|part| !is_digits(part)) {
        return None;
    }
    if parts[0].len() == 4 {
        let year = parts[0].parse::<i32>().ok()?;
        let month = parts[1].parse::<u32>().ok()?;
        let day = parts[2].parse::<u32>().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }
    if parts[0].len() > 2 || parts[1].len() > 2 {
        return None;
    }
    let day = parts[0].parse::<u32>().ok()?;
    let month = parts[1].parse::<u32>().ok()?;
    let year = match parts[2].len() {
        4 => parts[2].parse::<i32>().ok()?,
        2 => expand_two_digit_year(parts[2].parse::<i32>().ok()?),
        _ => return None,
    };
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Render an amount as `R$ #.###,##`. Missing, zero and non-finite values
/// render as `R$ 0,00`.
pub fn format_amount(value: Option<f64>) -> String {
    let value = match value {
        Some(value) if value.is_finite() => value,
        _ => 0.0,
    };
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let grouped = group_thousands(int_part);
    // rounding may turn a tiny negative into zero; never print `-0,00`.
    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{CURRENCY_PREFIX}{sign}{grouped},{frac_part}")
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (len - idx) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

fn is_digits(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|ch| ch.is_ascii_digit())
}

/// POSIX `%y` pivot: 69-99 map to the 1900s, 00-68 to the 2000s.
fn expand_two_digit_year(year: i32) -> i32 {
    if year >= 69 { 1900 + year } else { 2000 + year }
}
