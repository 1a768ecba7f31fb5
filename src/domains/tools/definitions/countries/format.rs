//! Text rendering helpers shared by the country tools.

/// Placeholder used for every field the upstream did not provide.
pub const NOT_AVAILABLE: &str = "N/A";

/// Render `value`, or `default` when it is absent or empty.
pub fn or_default<T: AsRef<str>>(value: Option<T>, default: &str) -> String {
    match value {
        Some(v) if !v.as_ref().is_empty() => v.as_ref().to_string(),
        _ => default.to_string(),
    }
}

/// Render `value`, or `"N/A"` when it is absent or empty.
pub fn or_na<T: AsRef<str>>(value: Option<T>) -> String {
    or_default(value, NOT_AVAILABLE)
}

/// Format an integer with en-US thousands separators (`1234567` -> `1,234,567`).
pub fn group_thousands(n: u64) -> String {
    group_digits(&n.to_string())
}

/// Format a float the way an en-US locale would: grouped integer part and
/// at most three fraction digits, trailing zeros dropped.
pub fn format_number(n: f64) -> String {
    if !n.is_finite() {
        return n.to_string();
    }

    // Ties round away from zero; `{:.3}` alone would round them to even.
    let rounded = (n.abs() * 1000.0).round() / 1000.0;
    let fixed = format!("{:.3}", rounded);
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut out = String::with_capacity(fixed.len() + fixed.len() / 3 + 1);
    if n < 0.0 && (int_part != "0" || !frac_part.is_empty()) {
        out.push('-');
    }
    out.push_str(&group_digits(int_part));
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

fn group_digits(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Join `items` with `", "`, or return `fallback` when nothing is left.
pub fn join_or<I, S>(items: I, fallback: &str) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let joined = items
        .into_iter()
        .map(|s| s.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(", ");
    or_default(Some(joined), fallback)
}
