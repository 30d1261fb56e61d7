use std::fmt::{Display, LowerExp};

use num::Float;

/// Formats `x` with at most `precision` significant digits.
///
/// Mirrors the `%g` conversion of C's `printf`: the scientific form (`1.5e+07`) is used when the
/// decimal exponent is below -4 or at least `precision`, the fixed form otherwise. Trailing zeros
/// of the fraction are dropped, and so is a trailing decimal point. A precision of zero is
/// treated as one.
pub fn fmt_general<T>(x: T, precision: usize) -> String
where
    T: Float + Display + LowerExp,
{
    if x.is_nan() {
        return "nan".to_string();
    }
    if x.is_infinite() {
        return if x.is_sign_negative() { "-inf" } else { "inf" }.to_string();
    }
    if x == T::zero() {
        return if x.is_sign_negative() { "-0" } else { "0" }.to_string();
    }
    let precision = precision.max(1);
    // the exponent must be taken after rounding: 9999999 becomes 1e+07
    let sci = format!("{:.*e}", precision - 1, x);
    let (mantissa, exp) = match sci.split_once('e') {
        Some((mantissa, exp)) => (mantissa, exp.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };
    if exp < -4 || exp >= precision as i32 {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_fraction(mantissa), sign, exp.unsigned_abs())
    } else {
        let decimals = (precision as i32 - 1 - exp) as usize;
        trim_fraction(&format!("{:.*}", decimals, x)).to_string()
    }
}

fn trim_fraction(digits: &str) -> &str {
    if digits.contains('.') {
        digits.trim_end_matches('0').trim_end_matches('.')
    } else {
        digits
    }
}
