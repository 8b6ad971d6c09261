//! Number helpers shared by the metrics service and the chat handlers.
//!
//! Every ratio goes through [`ratio`] so a zero denominator yields 0, never NaN or infinity.

pub use crate::shared::numeric::round_to;

/// `num / den`, or 0 when `den` is zero.
pub fn ratio(num: f64, den: f64) -> f64 {
    if den == 0.0 { 0.0 } else { num / den }
}

/// Percent change from `previous` to `current`; `None` when `previous` is zero.
pub fn percent_change(current: f64, previous: f64) -> Option<f64> {
    if previous == 0.0 {
        None
    } else {
        Some((current - previous) / previous * 100.0)
    }
}

pub fn mean(values: &[f64]) -> f64 {
    ratio(values.iter().sum(), values.len() as f64)
}

/// Median; mean of the two middle values for even lengths, 0 for an empty slice.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// `12345` -> `"12,345"`.
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Whole dollars with separators: `48000.4` -> `"$48,000"`.
pub fn format_currency(v: f64) -> String {
    format!("${}", format_count(v.max(0.0).round() as u64))
}

/// Signed change for display: `Some(12.5)` -> `"+12.5%"`, `None` -> `"n/a"`.
pub fn format_change(change: Option<f64>) -> String {
    match change {
        Some(c) if c > 0.0 => format!("+{:.1}%", c),
        Some(c) => format!("{:.1}%", c),
        None => "n/a".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_get_thousands_separators() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(1234567), "1,234,567");
        assert_eq!(format_currency(48000.4), "$48,000");
    }

    #[test]
    fn median_handles_even_and_empty() {
        assert_eq!(median(&[]), 0.0);
        assert_eq!(median(&[3.0, 1.0, 2.0]), 2.0);
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), 2.5);
    }

    #[test]
    fn zero_denominators_never_leak() {
        assert_eq!(ratio(5.0, 0.0), 0.0);
        assert_eq!(percent_change(10.0, 0.0), None);
        assert_eq!(percent_change(15.0, 10.0), Some(50.0));
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(format_change(None), "n/a");
        assert_eq!(format_change(Some(-3.24)), "-3.2%");
    }
}
