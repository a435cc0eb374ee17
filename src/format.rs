use std::fmt;

use crate::precision::Real;

/// Most fractional digits worth printing for a [`Real`].
pub const MAX_DIGITS: u8 = Real::DIGITS as u8 + 1;

/// Renders `value` for display.
///
/// `decimals` fractional digits are printed, capped at [`MAX_DIGITS`];
/// `0` prints every digit needed to round-trip the value. Non-negative values
/// get a leading space so they line up with negative ones.
pub fn real_to_string(value: Real, decimals: u8) -> String {
    let sign = if value.is_sign_negative() && !value.is_nan() {
        ""
    } else {
        " "
    };

    if decimals == 0 {
        format!("{}{}", sign, value)
    } else {
        let decimals = decimals.min(MAX_DIGITS) as usize;
        format!("{}{:.*}", sign, decimals, value)
    }
}

/// Display adapter for [`real_to_string`].
#[derive(Debug, Clone, Copy)]
pub struct Fixed(pub Real, pub u8);

impl fmt::Display for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&real_to_string(self.0, self.1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_decimals() {
        assert_eq!(real_to_string(2., 8), " 2.00000000");
        assert_eq!(real_to_string(-0.126, 2), "-0.13");
        assert_eq!(real_to_string(1. / 3., 4), " 0.3333");
    }

    #[test]
    fn test_decimals_capped() {
        let text = real_to_string(1. / 3., 40);
        let fraction = text.split('.').nth(1).unwrap();

        assert_eq!(fraction.len(), MAX_DIGITS as usize);
    }

    #[test]
    fn test_all_digits() {
        assert_eq!(real_to_string(0.1, 0), " 0.1");
        assert_eq!(real_to_string(-63., 0), "-63");
        assert_eq!(real_to_string(0.1 + 0.2, 0), " 0.30000000000000004");
    }

    #[test]
    fn test_nan() {
        assert_eq!(real_to_string(Real::NAN, 3), " NaN");
        assert_eq!(Fixed(Real::NAN, 0).to_string(), " NaN");
    }

    #[test]
    fn test_display_adapter() {
        assert_eq!(format!("[{}]", Fixed(13.5, 1)), "[ 13.5]");
    }
}
