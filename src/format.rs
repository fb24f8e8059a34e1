use crate::Error;

/// Significant digits shown for non-integral results unless configured
/// otherwise.
pub const DEFAULT_SIGNIFICANT_DIGITS: usize = 6;

/// Format a calculation result for the display.
///
/// Integral values are shown without a fractional part, other values keep
/// `significant_digits` significant digits with trailing zeros removed,
/// switching to an exponent when the value is very small or very large.
///
/// # Examples
///
/// ```
/// # use deskcalc::format_number;
/// assert_eq!(format_number(42.0, 6), Ok("42".to_string()));
/// assert_eq!(format_number(0.5, 6), Ok("0.5".to_string()));
/// assert_eq!(format_number(1.0 / 3.0, 6), Ok("0.333333".to_string()));
/// assert_eq!(format_number(0.000_015, 6), Ok("1.5e-05".to_string()));
/// assert!(format_number(f64::INFINITY, 6).is_err());
/// ```
pub fn format_number(value: f64, significant_digits: usize) -> Result<String, Error> {
    if !value.is_finite() {
        return Err(Error::Overflow);
    }
    if value == 0.0 {
        return Ok("0".into());
    }
    if value == value.trunc() {
        return Ok(format!("{:.0}", value));
    }
    Ok(general(value, significant_digits.max(1)))
}

/// `%g` style formatting with `precision` significant digits
fn general(value: f64, precision: usize) -> String {
    let scientific = format!("{:.*e}", precision - 1, value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0),
    };

    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    let precision = precision as i32;
    if exponent < -4 || exponent >= precision {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{}{:02}",
            trim_fraction(mantissa),
            sign,
            exponent.abs()
        )
    } else {
        #[allow(clippy::cast_sign_loss)]
        let decimals = (precision - 1 - exponent) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

/// Remove trailing zeros after a decimal point, and the point itself if
/// nothing is left after it
fn trim_fraction(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}
