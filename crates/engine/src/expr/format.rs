// Display formatting for evaluation results

/// Round to 8 decimal places to suppress binary floating-point artifacts
/// (0.1 + 0.2 displays as 0.3, not 0.30000000000000004).
pub fn round_display(value: f64) -> f64 {
    let scaled = value * 1e8;
    if scaled.is_finite() {
        scaled.round() / 1e8
    } else {
        // Magnitudes past ~1e300 overflow the scale factor; rounding is
        // meaningless there anyway.
        value
    }
}

/// Format as a plain decimal string. Integral values within i64 range print
/// without a fractional part.
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_suppresses_noise() {
        assert_eq!(round_display(0.1 + 0.2), 0.3);
        assert_eq!(round_display(0.30000000000000004), 0.3);
    }

    #[test]
    fn test_round_keeps_eight_places() {
        assert_eq!(round_display(0.123456789), 0.12345679);
        assert_eq!(round_display(-0.123456789), -0.12345679);
    }

    #[test]
    fn test_round_large_magnitude_passthrough() {
        let big = 1e305;
        assert_eq!(round_display(big), big);
    }

    #[test]
    fn test_format_integral() {
        assert_eq!(format_number(4.0), "4");
        assert_eq!(format_number(-3.0), "-3");
        assert_eq!(format_number(0.0), "0");
    }

    #[test]
    fn test_format_fractional() {
        assert_eq!(format_number(0.3), "0.3");
        assert_eq!(format_number(4.5), "4.5");
        assert_eq!(format_number(-0.25), "-0.25");
    }
}
