//! Motorcycle series conversion
//!
//! The normalizer turns series letters into digits ("29G1" becomes "2961"),
//! so a numeric head has to be mapped back to its letter-and-digit series
//! code. Three shapes are tried in order; the first that fits wins. The
//! mapping is a fixed table with a derived default, kept as enumerated cases
//! so each one can be tested on its own.

use once_cell::sync::Lazy;
use regex::Regex;

static STANDARD_HEAD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{2})([A-Z]{1,2})(\d*)$").expect("static regex"));
static NUMERIC_HEAD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{2})(\d{1,2})$").expect("static regex"));

/// Remove the separator characters a head may carry
pub fn strip_separators(text: &str) -> String {
    text.chars().filter(|c| !matches!(c, '-' | '*' | ':')).collect()
}

/// Exact series translations observed in the field
fn lookup_series(series: &str) -> Option<&'static str> {
    match series {
        "61" => Some("G1"),
        "51" => Some("H1"),
        "71" => Some("B1"),
        _ => None,
    }
}

/// Derive a series code from a 1-2 digit number: the first digit selects the
/// letter, the second digit carries over (defaulting to '1')
fn derive_series(series: &str) -> String {
    let mut digits = series.chars();
    let letter = match digits.next().and_then(|c| c.to_digit(10)) {
        Some(1) => 'A',
        Some(2) => 'B',
        Some(3) => 'C',
        Some(4) => 'D',
        Some(5) => 'E',
        Some(6) => 'F',
        Some(7) => 'G',
        Some(8) => 'H',
        Some(9) => 'K',
        _ => 'G',
    };
    let second = digits.next().unwrap_or('1');
    format!("{letter}{second}")
}

/// Convert a head reading to the canonical `"<province>-<series>"` form
///
/// Returns `None` when the text fits none of the known head shapes; the
/// caller must withhold its candidate in that case.
pub fn convert_head(text: &str) -> Option<String> {
    let clean = strip_separators(text);

    // Shape 1: province + letters already present, e.g. "29A1" or "18AB"
    if let Some(caps) = STANDARD_HEAD_RE.captures(&clean) {
        let province = &caps[1];
        let letters = &caps[2];
        let numbers = if caps[3].is_empty() { "1" } else { &caps[3] };
        return Some(format!("{province}-{letters}{numbers}"));
    }

    // Shape 2: all digits, e.g. "2961" read off a "29-G1" plate
    if let Some(caps) = NUMERIC_HEAD_RE.captures(&clean) {
        let province = &caps[1];
        let series = &caps[2];
        let converted = match lookup_series(series) {
            Some(exact) => exact.to_string(),
            None => derive_series(series),
        };
        return Some(format!("{province}-{converted}"));
    }

    // Shape 3: explicit separator with a longer or alphabetic series
    if text.contains(['-', '*', ':']) {
        let parts: Vec<&str> = text.split(['-', '*', ':']).collect();
        if parts.len() == 2 {
            let province = parts[0];
            let series = parts[1];
            if province.len() == 2 && province.chars().all(|c| c.is_ascii_digit()) && !series.is_empty() {
                if series.chars().all(|c| c.is_ascii_digit()) {
                    let converted = match lookup_series(series) {
                        Some(exact) => exact.to_string(),
                        // No table entry: keep the last digit, letter falls back to G
                        None => format!("G{}", series.chars().last().unwrap_or('1')),
                    };
                    return Some(format!("{province}-{converted}"));
                }
                return Some(format!("{province}-{series}"));
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_head_passthrough() {
        assert_eq!(convert_head("29A1").as_deref(), Some("29-A1"));
        assert_eq!(convert_head("18AB123").as_deref(), Some("18-AB123"));
    }

    #[test]
    fn test_standard_head_defaults_number_to_one() {
        assert_eq!(convert_head("18A").as_deref(), Some("18-A1"));
    }

    #[test]
    fn test_exact_series_lookup() {
        assert_eq!(convert_head("29-61").as_deref(), Some("29-G1"));
        assert_eq!(convert_head("18-51").as_deref(), Some("18-H1"));
        assert_eq!(convert_head("43-71").as_deref(), Some("43-B1"));
    }

    #[test]
    fn test_lookup_applies_without_separator() {
        assert_eq!(convert_head("2961").as_deref(), Some("29-G1"));
        assert_eq!(convert_head("1851").as_deref(), Some("18-H1"));
    }

    #[test]
    fn test_derived_series_from_first_digit() {
        // 2 -> B, second digit carried over
        assert_eq!(convert_head("2923").as_deref(), Some("29-B3"));
        // 9 -> K
        assert_eq!(convert_head("5992").as_deref(), Some("59-K2"));
        // Single series digit defaults the second position to 1
        assert_eq!(convert_head("293").as_deref(), Some("29-C1"));
    }

    #[test]
    fn test_separator_with_long_numeric_series() {
        // Too many digits for shape 2; last digit keyed with the G fallback
        assert_eq!(convert_head("29-612").as_deref(), Some("29-G2"));
    }

    #[test]
    fn test_separator_with_alphabetic_series() {
        assert_eq!(convert_head("29-F1A").as_deref(), Some("29-F1A"));
    }

    #[test]
    fn test_unconvertible_heads() {
        assert_eq!(convert_head(""), None);
        assert_eq!(convert_head("ABCDE"), None);
        assert_eq!(convert_head("2-9"), None);
        assert_eq!(convert_head("123-45"), None);
        assert_eq!(convert_head("29-"), None);
    }
}
