//! Number formatting for labels and markup

/// Format `value` with exactly `places` decimals.
///
/// Rounds to the nearest representable decimal using the exact binary value;
/// an exact tie rounds away from zero (`0.5` → `"1"`, `0.125` → `"0.13"`), and
/// negative zero prints as `"0"`.
pub fn to_fixed(value: f64, places: u32) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let places = places.min(20);
    let magnitude = value.abs();

    if let Some(units) = exact_tie_units(magnitude, places) {
        let scale = 10u64.pow(places);
        let sign = if value < 0.0 { "-" } else { "" };
        let whole = units / scale;
        if places == 0 {
            return format!("{sign}{whole}");
        }
        let frac = units % scale;
        return format!("{sign}{whole}.{frac:0width$}", width = places as usize);
    }

    let text = format!("{:.*}", places as usize, value);
    // Values that round to zero must not keep a sign
    if text.starts_with('-') && text[1..].chars().all(|c| c == '0' || c == '.') {
        text[1..].to_string()
    } else {
        text
    }
}

/// If `magnitude` sits exactly halfway between two `places`-decimal values,
/// return the upper one in units of `10^-places`.
///
/// `magnitude * 2 * 10^places` must be an odd integer N. That product is only
/// trustworthy when `N / (2 * 10^places)` reproduces `magnitude` exactly, which
/// requires `5^places` to divide N (leaving a power-of-two denominator).
fn exact_tie_units(magnitude: f64, places: u32) -> Option<u64> {
    if places > 15 {
        return None;
    }
    let doubled = magnitude * 2.0 * 10f64.powi(places as i32);
    if doubled.fract() != 0.0 || doubled >= 9_007_199_254_740_992.0 {
        return None;
    }
    let n = doubled as u64;
    let five_pow = 5u64.pow(places);
    if n % 2 == 0 || n % five_pow != 0 {
        return None;
    }
    let reconstructed = (n / five_pow) as f64 / 2f64.powi(places as i32 + 1);
    (reconstructed == magnitude).then_some(n / 2 + 1)
}

/// Label text for a percentage: `to_fixed(value, places)` followed by `%`
pub fn format_percentage(value: f64, decimal_places: u32) -> String {
    format!("{}%", to_fixed(value, decimal_places))
}

/// Compact number for markup: at most three decimals, no trailing zeros
pub fn format_number(value: f64) -> String {
    let text = format!("{value:.3}");
    let text = if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    };
    if text == "-0" {
        "0".to_string()
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(33.333, 0), "33%");
        assert_eq!(format_percentage(33.333, 2), "33.33%");
        assert_eq!(format_percentage(66.6, 1), "66.6%");
        assert_eq!(format_percentage(100.0, 0), "100%");
        assert_eq!(format_percentage(0.0, 2), "0.00%");
    }

    #[test]
    fn test_ties_round_away_from_zero() {
        assert_eq!(to_fixed(0.5, 0), "1");
        assert_eq!(to_fixed(2.5, 0), "3");
        assert_eq!(to_fixed(12.5, 0), "13");
        assert_eq!(to_fixed(0.125, 2), "0.13");
        assert_eq!(to_fixed(-2.5, 0), "-3");
    }

    #[test]
    fn test_near_ties_use_exact_value() {
        // 1.005 is stored as 1.00499999999999989...
        assert_eq!(to_fixed(1.005, 2), "1.00");
        assert_eq!(to_fixed(1.45, 1), "1.4");
    }

    #[test]
    fn test_negative_zero() {
        assert_eq!(to_fixed(-0.0, 0), "0");
        assert_eq!(to_fixed(-0.001, 2), "0.00");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(100.0), "100");
        assert_eq!(format_number(565.4866776461628), "565.487");
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(-0.0001), "0");
    }
}
