//! Text formatting helpers shared by the report builders

use chrono::{DateTime, FixedOffset, Utc};
use serde_json::Value;

/// Placeholder for missing values
pub const NA: &str = "N/A";

const IST_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

/// Current time in India Standard Time, e.g. `16 Oct 2026, 03:04:05 pm`
pub fn ist_now() -> String {
    format_ist(Utc::now())
}

/// Render a UTC instant in India Standard Time
pub fn format_ist(at: DateTime<Utc>) -> String {
    match FixedOffset::east_opt(IST_OFFSET_SECS) {
        Some(ist) => at
            .with_timezone(&ist)
            .format("%-d %b %Y, %I:%M:%S %P")
            .to_string(),
        None => at.format("%-d %b %Y, %I:%M:%S %P UTC").to_string(),
    }
}

/// Rupee amount with Indian digit grouping, e.g. `₹12,34,567.89`
///
/// Non-finite values render as `N/A`.
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return NA.to_string();
    }

    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };

    format!("₹{sign}{}.{frac_part}", group_indian(int_part))
}

/// Currency for a loosely typed upstream value
pub fn format_currency_value(value: Option<&Value>) -> String {
    value
        .and_then(parse_number)
        .map_or_else(|| NA.to_string(), format_currency)
}

/// Indian grouping: last three digits, then pairs
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let mut rest = head;
    while rest.len() > 2 {
        let (left, right) = rest.split_at(rest.len() - 2);
        groups.push(right);
        rest = left;
    }
    groups.push(rest);
    groups.reverse();
    format!("{},{tail}", groups.join(","))
}

/// Western thousands grouping with up to three decimals, e.g. `1,234,567`
pub fn group_thousands(value: f64) -> String {
    if !value.is_finite() {
        return NA.to_string();
    }

    let fixed = format!("{:.3}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac = frac_part.trim_end_matches('0');

    let mut grouped = String::new();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    if frac.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{frac}")
    }
}

/// Lenient numeric read of an upstream value
///
/// Numbers pass through; strings yield their leading numeric prefix
/// (`"12.5%"` is 12.5). Anything else is `None`.
pub fn parse_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_leading_number(s),
        _ => None,
    }
}

fn parse_leading_number(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
        end += 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
    }
    if end == digits_start || &s[digits_start..end] == "." {
        return None;
    }
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits {
            end = exp_end;
        }
    }

    s[..end].parse().ok()
}

/// Shortest decimal rendering of a number (`100`, `12.5`)
pub fn number(value: f64) -> String {
    if value.is_finite() {
        format!("{value}")
    } else {
        NA.to_string()
    }
}

/// Render an upstream value as it would appear in text
///
/// Missing, null, empty-string, zero and `false` values read as `N/A`.
pub fn display_or_na(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => NA.to_string(),
        Some(Value::Bool(false)) => NA.to_string(),
        Some(Value::Bool(true)) => "true".to_string(),
        Some(Value::String(s)) if s.is_empty() => NA.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => match n.as_f64() {
            Some(v) if v == 0.0 || v.is_nan() => NA.to_string(),
            Some(v) => number(v),
            None => n.to_string(),
        },
        Some(other) => other.to_string(),
    }
}

/// Render an upstream value verbatim; only missing or null values read as `N/A`
pub fn plain(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => NA.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.as_f64().map_or_else(|| n.to_string(), number),
        Some(other) => other.to_string(),
    }
}

/// `+` prefix for positive values
pub fn sign_prefix(value: f64) -> &'static str {
    if value > 0.0 { "+" } else { "" }
}

/// `snake_case` metric key as a title, e.g. `pe_ratio` to `Pe Ratio`
pub fn title_case_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut at_word_start = true;
    for ch in key.chars() {
        if ch == '_' {
            out.push(' ');
            at_word_start = true;
        } else if ch.is_alphanumeric() {
            if at_word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.push(ch);
            }
            at_word_start = false;
        } else {
            out.push(ch);
            at_word_start = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_format_currency_indian_grouping() {
        assert_eq!(format_currency(1_234_567.891), "₹12,34,567.89");
        assert_eq!(format_currency(999.0), "₹999.00");
        assert_eq!(format_currency(1000.0), "₹1,000.00");
        assert_eq!(format_currency(100_000.0), "₹1,00,000.00");
        assert_eq!(format_currency(0.0), "₹0.00");
        assert_eq!(format_currency(-2500.5), "₹-2,500.50");
        assert_eq!(format_currency(f64::NAN), "N/A");
    }

    #[test]
    fn test_format_currency_value() {
        assert_eq!(format_currency_value(Some(&json!("2450.5"))), "₹2,450.50");
        assert_eq!(format_currency_value(Some(&json!(12))), "₹12.00");
        assert_eq!(format_currency_value(Some(&json!("abc"))), "N/A");
        assert_eq!(format_currency_value(None), "N/A");
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number(&json!(" 12.5%")), Some(12.5));
        assert_eq!(parse_number(&json!("-3")), Some(-3.0));
        assert_eq!(parse_number(&json!("1e3x")), Some(1000.0));
        assert_eq!(parse_number(&json!(".")), None);
        assert_eq!(parse_number(&json!("N/A")), None);
        assert_eq!(parse_number(&json!(null)), None);
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(1_234_567.0), "1,234,567");
        assert_eq!(group_thousands(999.0), "999");
        assert_eq!(group_thousands(1234.5), "1,234.5");
    }

    #[test]
    fn test_display_or_na() {
        assert_eq!(display_or_na(Some(&json!("3.2"))), "3.2");
        assert_eq!(display_or_na(Some(&json!(4.5))), "4.5");
        assert_eq!(display_or_na(Some(&json!(100.0))), "100");
        assert_eq!(display_or_na(Some(&json!(0))), "N/A");
        assert_eq!(display_or_na(Some(&json!(""))), "N/A");
        assert_eq!(display_or_na(None), "N/A");
    }

    #[test]
    fn test_plain() {
        assert_eq!(plain(Some(&json!(0))), "0");
        assert_eq!(plain(Some(&json!("2.45"))), "2.45");
        assert_eq!(plain(Some(&json!(52.1))), "52.1");
        assert_eq!(plain(Some(&json!(null))), "N/A");
        assert_eq!(plain(None), "N/A");
    }

    #[test]
    fn test_title_case_key() {
        assert_eq!(title_case_key("current_price"), "Current Price");
        assert_eq!(title_case_key("dma_50"), "Dma 50");
        assert_eq!(title_case_key("pe_ratio"), "Pe Ratio");
    }

    #[test]
    fn test_format_ist() {
        let at = Utc.with_ymd_and_hms(2026, 10, 16, 9, 34, 5).unwrap();
        assert_eq!(format_ist(at), "16 Oct 2026, 03:04:05 pm");

        let morning = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(format_ist(morning), "1 Jan 2026, 05:30:00 am");
    }
}
