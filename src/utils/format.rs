//! Format - Formatting Utilities

use chrono::{DateTime, Utc};

use crate::i18n::Locale;

/// Format a date for display in the given locale
pub fn format_date(dt: &DateTime<Utc>, locale: Locale) -> String {
    match locale {
        Locale::EnUS => dt.format("%m/%d/%Y").to_string(),
        Locale::EsES => dt.format("%d/%m/%Y").to_string(),
    }
}

/// Format a number with up to three fraction digits and locale separators
pub fn format_decimal(n: f64, locale: Locale) -> String {
    if !n.is_finite() {
        return n.to_string();
    }
    let fixed = format!("{n:.3}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    let plain = if trimmed == "-0" { "0" } else { trimmed };
    localize(plain, locale)
}

/// Format a monetary amount with two fraction digits and locale separators
pub fn format_currency(n: f64, locale: Locale) -> String {
    if !n.is_finite() {
        return n.to_string();
    }
    let fixed = format!("{n:.2}");
    let plain = if fixed == "-0.00" { "0.00" } else { fixed.as_str() };
    localize(plain, locale)
}

/// Apply locale separators to a plain `-1234.5` style number
fn localize(plain: &str, locale: Locale) -> String {
    let (thousands, decimal) = locale.separators();
    let (sign, digits) = match plain.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", plain),
    };
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (digits, None),
    };

    let mut result = String::from(sign);
    result.push_str(&group_thousands(int_part, thousands));
    if let Some(frac) = frac_part {
        result.push(decimal);
        result.push_str(frac);
    }
    result
}

/// Insert a separator every three digits, counting from the right
pub fn group_thousands(digits: &str, separator: char) -> String {
    let chars: Vec<char> = digits.chars().collect();
    let len = chars.len();
    let mut result = String::with_capacity(len + len / 3);

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push(separator);
        }
        result.push(*c);
    }

    result
}

/// Truncate a string to max characters with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    let count = s.chars().count();
    if count <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let mut out: String = s.chars().take(max_len - 3).collect();
        out.push_str("...");
        out
    }
}
