use regex::Regex;
use std::sync::LazyLock;

static LEADING_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?").expect("valid number pattern")
});

/// Reads the leading decimal number out of free text, falling back to `default`.
///
/// Leading whitespace is skipped and anything after the number is ignored, so
/// `"12abc"` reads as 12. Empty text, text without a numeric prefix and values
/// that overflow to infinity all yield `default`.
pub fn parse_number_or_default(text: &str, default: f64) -> f64 {
    let trimmed = text.trim_start();
    let Some(found) = LEADING_NUMBER.find(trimmed) else {
        return default;
    };

    match found.as_str().parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => default,
    }
}
