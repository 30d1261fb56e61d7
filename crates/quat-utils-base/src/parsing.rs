use std::{ops::Neg, str::FromStr};

use anyhow::{Context, bail};
use num::One;

const SIGNS: [char; 2] = ['-', '+'];

/// Splits an algebraic sum such as `1.5-2i+3e-2k` into signed terms.
///
/// Every sign starts a new term, except one that directly follows an `e` or `E`, which belongs
/// to the exponent of a float.
pub fn split_signed_terms(src: &str) -> Result<Vec<&str>, anyhow::Error> {
    if src.is_empty() {
        bail!("Empty input.");
    }
    let mut terms = Vec::new();
    let mut start = 0;
    let mut prev: Option<char> = None;
    for (idx, ch) in src.char_indices() {
        if idx > start && SIGNS.contains(&ch) && !matches!(prev, Some('e') | Some('E')) {
            terms.push(&src[start..idx]);
            start = idx;
        }
        prev = Some(ch);
    }
    terms.push(&src[start..]);
    Ok(terms)
}

/// Resolves a signed term into its unit symbol, if it ends with one of `units`, and its
/// coefficient. A unit without digits (`k`, `-i`) has a coefficient of one.
pub fn parse_term<T>(term: &str, units: &[char]) -> Result<(Option<char>, T), anyhow::Error>
where
    T: FromStr + One + Neg<Output = T>,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let (body, unit) = match term.chars().last() {
        Some(ch) if units.contains(&ch) => (&term[..term.len() - ch.len_utf8()], Some(ch)),
        Some(_) => (term, None),
        None => bail!("Empty term."),
    };
    let coefficient = match (body, unit) {
        ("" | "+", Some(_)) => T::one(),
        ("-", Some(_)) => -T::one(),
        ("" | "+" | "-", None) => bail!("Dangling sign in `{term}`."),
        _ => body
            .parse::<T>()
            .with_context(|| format!("Invalid coefficient `{body}` in term `{term}`."))?,
    };
    Ok((unit, coefficient))
}

pub fn parse_terms<T>(src: &str, units: &[char]) -> Result<Vec<(Option<char>, T)>, anyhow::Error>
where
    T: FromStr + One + Neg<Output = T>,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    split_signed_terms(src)?
        .into_iter()
        .map(|term| parse_term(term, units))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNITS: [char; 3] = ['i', 'j', 'k'];

    #[test]
    fn split_on_signs() {
        assert_eq!(
            split_signed_terms("1+2i-3j+4k").unwrap(),
            vec!["1", "+2i", "-3j", "+4k"]
        );
        assert_eq!(split_signed_terms("-i").unwrap(), vec!["-i"]);
    }

    #[test]
    fn split_keeps_exponent_signs() {
        assert_eq!(split_signed_terms("1e-07i").unwrap(), vec!["1e-07i"]);
        assert_eq!(
            split_signed_terms("-1.5E+3-k").unwrap(),
            vec!["-1.5E+3", "-k"]
        );
    }

    #[test]
    fn split_empty() {
        assert!(split_signed_terms("").is_err());
    }

    #[test]
    fn unit_terms() {
        assert_eq!(parse_term::<f64>("k", &UNITS).unwrap(), (Some('k'), 1.0));
        assert_eq!(parse_term::<f64>("+j", &UNITS).unwrap(), (Some('j'), 1.0));
        assert_eq!(parse_term::<f64>("-i", &UNITS).unwrap(), (Some('i'), -1.0));
    }

    #[test]
    fn coefficient_terms() {
        assert_eq!(parse_term::<f64>("-2.5j", &UNITS).unwrap(), (Some('j'), -2.5));
        assert_eq!(parse_term::<f64>("+1e-07i", &UNITS).unwrap(), (Some('i'), 1e-7));
        assert_eq!(parse_term::<f64>("1.0", &UNITS).unwrap(), (None, 1.0));
    }

    #[test]
    fn invalid_terms() {
        assert!(parse_term::<f64>("+", &UNITS).is_err());
        assert!(parse_term::<f64>("2x", &UNITS).is_err());
        assert!(parse_term::<f64>("1..2i", &UNITS).is_err());
    }

    #[test]
    fn whole_sum() {
        let terms = parse_terms::<f64>("3-k+0.5i", &UNITS).unwrap();
        assert_eq!(
            terms,
            vec![(None, 3.0), (Some('k'), -1.0), (Some('i'), 0.5)]
        );
        assert!(parse_terms::<f64>("1+-2i", &UNITS).is_err());
    }
}
