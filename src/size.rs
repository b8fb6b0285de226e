//! Human-readable rendering of byte counts.
//!
//! Units step by powers of 1024 and are always spelled `Bytes`, `KB`,
//! `MB`, `GB` and `TB`. Anything below one kilobyte is printed as-is,
//! everything above with exactly two decimals, ties rounded away from zero.

use crate::{LansendError, Result};

pub const KILOBYTE: u64 = 1024;
pub const MEGABYTE: u64 = 1024 * KILOBYTE;
pub const GIGABYTE: u64 = 1024 * MEGABYTE;
pub const TERABYTE: u64 = 1024 * GIGABYTE;

/// Formats a byte count, e.g. `1536` becomes `"1.50 KB"`.
///
/// Thresholds are exclusive and checked from the smallest unit up, so
/// `1023` stays in `Bytes` and `1024^2 - 1` is still reported in `KB`
/// (as `"1024.00 KB"`). Sizes of a petabyte and more remain in `TB`.
pub fn format_size(size: u64) -> String {
    if size < KILOBYTE {
        format!("{} Bytes", size)
    } else if size < MEGABYTE {
        format!("{:.2} KB", two_decimals(size as f64 / KILOBYTE as f64))
    } else if size < GIGABYTE {
        format!("{:.2} MB", two_decimals(size as f64 / MEGABYTE as f64))
    } else if size < TERABYTE {
        format!("{:.2} GB", two_decimals(size as f64 / GIGABYTE as f64))
    } else {
        format!("{:.2} TB", two_decimals(size as f64 / TERABYTE as f64))
    }
}

/// Rounds to two decimals with ties away from zero, so `1.125` is `1.13`.
fn two_decimals(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Same as [`format_size`] for fractional amounts such as averaged rates.
///
/// Values below one kilobyte are printed in their shortest form, so
/// `512.0` gives `"512 Bytes"` and `512.5` gives `"512.5 Bytes"`.
///
/// Errors:
/// - `InvalidArgument` for negative, NaN or infinite input.
pub fn try_format_size(size: f64) -> Result<String> {
    if !size.is_finite() || size < 0.0 {
        return Err(LansendError::InvalidArgument(format!(
            "size must be a finite, non-negative number, got {}",
            size
        )));
    }

    // -0.0 would otherwise print as "-0 Bytes"
    let size = if size == 0.0 { 0.0 } else { size };
    let formatted = if size < KILOBYTE as f64 {
        format!("{} Bytes", size)
    } else if size < MEGABYTE as f64 {
        format!("{:.2} KB", two_decimals(size / KILOBYTE as f64))
    } else if size < GIGABYTE as f64 {
        format!("{:.2} MB", two_decimals(size / MEGABYTE as f64))
    } else if size < TERABYTE as f64 {
        format!("{:.2} GB", two_decimals(size / GIGABYTE as f64))
    } else {
        format!("{:.2} TB", two_decimals(size / TERABYTE as f64))
    };
    Ok(formatted)
}

/// Formats a transfer rate as `"<size>/s"`.
pub fn format_speed(bytes_per_sec: f64) -> Result<String> {
    Ok(format!("{}/s", try_format_size(bytes_per_sec)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, "0 Bytes")]
    #[case(1, "1 Bytes")]
    #[case(1023, "1023 Bytes")]
    #[case(1024, "1.00 KB")]
    #[case(1536, "1.50 KB")]
    #[case(MEGABYTE - 1, "1024.00 KB")]
    #[case(MEGABYTE, "1.00 MB")]
    #[case(5 * MEGABYTE + MEGABYTE / 4, "5.25 MB")]
    #[case(GIGABYTE, "1.00 GB")]
    #[case(TERABYTE, "1.00 TB")]
    #[case(1024 * TERABYTE, "1024.00 TB")]
    fn formats_at_unit_boundaries(#[case] size: u64, #[case] expected: &str) {
        assert_eq!(format_size(size), expected);
    }

    #[rstest]
    #[case(1152, "1.13 KB")]
    #[case(1664, "1.63 KB")]
    #[case(MEGABYTE + MEGABYTE / 8, "1.13 MB")]
    fn ties_round_away_from_zero(#[case] size: u64, #[case] expected: &str) {
        assert_eq!(format_size(size), expected);
        assert_eq!(try_format_size(size as f64).unwrap(), expected);
    }

    #[test]
    fn bytes_have_no_decimal_point() {
        for size in 0..KILOBYTE {
            let formatted = format_size(size);
            assert_eq!(formatted, format!("{} Bytes", size));
            assert!(!formatted.contains('.'));
        }
    }

    #[test]
    fn largest_count_stays_in_terabytes() {
        assert_eq!(format_size(u64::MAX), "16777216.00 TB");
    }

    fn to_bytes(formatted: &str) -> f64 {
        let (value, unit) = formatted.split_once(' ').unwrap();
        let value: f64 = value.parse().unwrap();
        let factor = match unit {
            "Bytes" => 1,
            "KB" => KILOBYTE,
            "MB" => MEGABYTE,
            "GB" => GIGABYTE,
            "TB" => TERABYTE,
            other => panic!("unexpected unit {}", other),
        };
        value * factor as f64
    }

    #[test]
    fn round_trip_preserves_order() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let mut samples: Vec<u64> = (0..2000)
            .map(|_| {
                let magnitude = rng.gen_range(0..48);
                rng.gen_range(0..=(1u64 << magnitude))
            })
            .collect();
        samples.extend([
            KILOBYTE - 1,
            KILOBYTE,
            MEGABYTE - 1,
            MEGABYTE,
            GIGABYTE - 1,
            GIGABYTE,
            TERABYTE - 1,
            TERABYTE,
        ]);
        samples.sort_unstable();

        for pair in samples.windows(2) {
            let smaller = to_bytes(&format_size(pair[0]));
            let larger = to_bytes(&format_size(pair[1]));
            assert!(
                smaller <= larger,
                "{} -> {} but {} -> {}",
                pair[0],
                smaller,
                pair[1],
                larger
            );
        }
    }

    #[rstest]
    #[case(0.0, "0 Bytes")]
    #[case(-0.0, "0 Bytes")]
    #[case(512.0, "512 Bytes")]
    #[case(512.5, "512.5 Bytes")]
    #[case(1536.0, "1.50 KB")]
    #[case(3.0 * GIGABYTE as f64, "3.00 GB")]
    fn formats_fractional_sizes(#[case] size: f64, #[case] expected: &str) {
        assert_eq!(try_format_size(size).unwrap(), expected);
    }

    #[test]
    fn fractional_matches_integer_formatting() {
        for size in [0, 1023, 1024, 123_456_789, TERABYTE + 1] {
            assert_eq!(try_format_size(size as f64).unwrap(), format_size(size));
        }
    }

    #[rstest]
    #[case(-1.0)]
    #[case(-0.5)]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    #[case(f64::NEG_INFINITY)]
    fn rejects_out_of_domain_sizes(#[case] size: f64) {
        assert!(matches!(
            try_format_size(size),
            Err(LansendError::InvalidArgument(_))
        ));
    }

    #[test]
    fn speed_is_per_second() {
        assert_eq!(format_speed(2.5 * MEGABYTE as f64).unwrap(), "2.50 MB/s");
        assert!(format_speed(-1.0).is_err());
    }
}
