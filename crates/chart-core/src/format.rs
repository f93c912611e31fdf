// File: crates/chart-core/src/format.rs
// Summary: Number formatting for axis ticks, value labels and the text backend.
// Notes:
// - Thousands are grouped with `.` and decimals use `,`.

/// Format `value` with `decimals` fraction digits, `.` thousands and `,` decimal separator.
pub fn thousands(value: f64, decimals: usize) -> String {
    let rendered = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match rendered.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (rendered.as_str(), None),
    };

    let digits = int_part.as_bytes();
    let mut out = String::with_capacity(rendered.len() + digits.len() / 3 + 1);
    let negative = value < 0.0 && rendered.bytes().any(|b| b.is_ascii_digit() && b != b'0');
    if negative {
        out.push('-');
    }
    for (i, d) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(*d as char);
    }
    if let Some(f) = frac_part {
        out.push(',');
        out.push_str(f);
    }
    out
}

/// Integer label as drawn on grids and bars.
pub fn integer(value: f64) -> String {
    thousands(value.round(), 0)
}

/// Percentage rounded to one decimal, dropping a trailing `.0` (`25`, `33.3`).
pub fn percentage(part: f64, total: f64) -> String {
    let pct = (part / total * 1000.0).round() / 10.0;
    if pct.fract() == 0.0 {
        format!("{pct:.0}")
    } else {
        format!("{pct:.1}")
    }
}

const SHORT_UNITS: [(f64, &str); 4] = [(1.0e9, "B"), (1.0e6, "M"), (1.0e3, "K"), (1.0e2, "C")];

/// Compact number with a magnitude suffix: B, M, K, or C (hundreds).
pub fn short(value: f64, decimals: usize) -> String {
    for (divisor, suffix) in SHORT_UNITS {
        if value.abs() >= divisor {
            let p = 10f64.powi(decimals as i32);
            let scaled = (value / divisor * p).round() / p;
            return format!("{}{}", thousands(scaled, decimals), suffix);
        }
    }
    thousands(value, decimals)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands_with_dots() {
        assert_eq!(thousands(0.0, 0), "0");
        assert_eq!(thousands(999.0, 0), "999");
        assert_eq!(thousands(1000.0, 0), "1.000");
        assert_eq!(thousands(15000.0, 0), "15.000");
        assert_eq!(thousands(1234567.0, 0), "1.234.567");
        assert_eq!(thousands(-1234.5, 1), "-1.234,5");
    }

    #[test]
    fn negative_zero_has_no_sign() {
        assert_eq!(thousands(-0.2, 0), "0");
        assert_eq!(integer(-0.4), "0");
    }

    #[test]
    fn percentage_keeps_one_decimal() {
        assert_eq!(percentage(1.0, 4.0), "25");
        assert_eq!(percentage(1.0, 3.0), "33.3");
    }

    #[test]
    fn short_numbers_use_suffixes() {
        assert_eq!(short(0.0, 0), "0");
        assert_eq!(short(50.0, 0), "50");
        assert_eq!(short(300.0, 0), "3C");
        assert_eq!(short(3000.0, 0), "3K");
        assert_eq!(short(15_000.0, 0), "15K");
        assert_eq!(short(2_500_000.0, 1), "2,5M");
        assert_eq!(short(4.0e9, 0), "4B");
    }
}
