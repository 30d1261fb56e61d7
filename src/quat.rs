use std::any::Any;
use std::fmt::{self, Write};
use std::ops::{Add, Mul, Neg};
use std::str::FromStr;

use anyhow::bail;
use num::{One, Zero};
use thiserror::Error;

use quat_utils_base::{GeneralFormat, impl_product, impl_sum, parsing::parse_terms};

/// Significant digits used when rendering a coefficient.
const SIGNIFICANT_DIGITS: usize = 6;
const UNITS: [char; 3] = ['i', 'j', 'k'];

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum QuaternionError {
    #[error("Operand is not a quaternion")]
    TypeMismatch,
}

/// A quaternion `a + bi + cj + dk` with real coefficients.
///
/// Quaternions are plain values: every operation returns a new instance and there is no way to
/// change the coefficients of an existing one. Equality is structural, comparing the four
/// coefficients pairwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quaternion {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
}

impl Quaternion {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    /// The multiplicative identity.
    pub const ONE: Self = Self::new(1.0, 0.0, 0.0, 0.0);
    pub const I: Self = Self::new(0.0, 1.0, 0.0, 0.0);
    pub const J: Self = Self::new(0.0, 0.0, 1.0, 0.0);
    pub const K: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    pub const fn new(a: f64, b: f64, c: f64, d: f64) -> Self {
        Self { a, b, c, d }
    }

    /// The real part.
    pub fn a(&self) -> f64 {
        self.a
    }

    pub fn b(&self) -> f64 {
        self.b
    }

    pub fn c(&self) -> f64 {
        self.c
    }

    pub fn d(&self) -> f64 {
        self.d
    }

    /// Returns the coefficients in the order `[a, b, c, d]`.
    pub fn coefficients(&self) -> [f64; 4] {
        [self.a, self.b, self.c, self.d]
    }

    pub fn add(self, other: Self) -> Self {
        Self::new(
            self.a + other.a,
            self.b + other.b,
            self.c + other.c,
            self.d + other.d,
        )
    }

    /// The Hamilton product `self * other`.
    ///
    /// Multiplication is associative but not commutative: `i * j == k` while `j * i == -k`.
    pub fn multiply(self, other: Self) -> Self {
        let (a1, b1, c1, d1) = (self.a, self.b, self.c, self.d);
        let (a2, b2, c2, d2) = (other.a, other.b, other.c, other.d);
        Self::new(
            a1 * a2 - b1 * b2 - c1 * c2 - d1 * d2,
            a1 * b2 + b1 * a2 + c1 * d2 - d1 * c2,
            a1 * c2 - b1 * d2 + c1 * a2 + d1 * b2,
            a1 * d2 + b1 * c2 - c1 * b2 + d1 * a2,
        )
    }

    pub fn conjugate(&self) -> Self {
        Self::new(self.a, -self.b, -self.c, -self.d)
    }

    /// Compares against a value of any type. Anything that is not a quaternion is unequal.
    pub fn equals(&self, other: &dyn Any) -> bool {
        other
            .downcast_ref::<Self>()
            .is_some_and(|other| self == other)
    }

    /// Like [`Quaternion::add`], for an operand whose type is only known at runtime.
    pub fn try_add(&self, other: &dyn Any) -> Result<Self, QuaternionError> {
        downcast_operand(other).map(|other| Self::add(*self, *other))
    }

    /// Like [`Quaternion::multiply`], for an operand whose type is only known at runtime.
    pub fn try_multiply(&self, other: &dyn Any) -> Result<Self, QuaternionError> {
        downcast_operand(other).map(|other| self.multiply(*other))
    }
}

fn downcast_operand(operand: &dyn Any) -> Result<&Quaternion, QuaternionError> {
    operand
        .downcast_ref::<Quaternion>()
        .ok_or(QuaternionError::TypeMismatch)
}

macro_rules! impl_binary_op {
    ($op: ident, $op_method: ident, $method: ident) => {
        impl $op for Quaternion {
            type Output = Quaternion;

            fn $op_method(self, rhs: Quaternion) -> Quaternion {
                Quaternion::$method(self, rhs)
            }
        }

        impl<'a> $op<&'a Quaternion> for &'a Quaternion {
            type Output = Quaternion;

            fn $op_method(self, rhs: &'a Quaternion) -> Quaternion {
                Quaternion::$method(*self, *rhs)
            }
        }
    };
}

impl_binary_op!(Add, add, add);
impl_binary_op!(Mul, mul, multiply);

impl Neg for Quaternion {
    type Output = Quaternion;

    fn neg(self) -> Quaternion {
        Self::new(-self.a, -self.b, -self.c, -self.d)
    }
}

impl Zero for Quaternion {
    fn zero() -> Self {
        Self::ZERO
    }

    fn is_zero(&self) -> bool {
        self.coefficients().iter().all(|x| *x == 0.0)
    }
}

impl One for Quaternion {
    fn one() -> Self {
        Self::ONE
    }
}

impl_sum!(Quaternion);
impl_product!(Quaternion);

impl From<[f64; 4]> for Quaternion {
    fn from([a, b, c, d]: [f64; 4]) -> Self {
        Self::new(a, b, c, d)
    }
}

impl From<Quaternion> for [f64; 4] {
    fn from(value: Quaternion) -> Self {
        value.coefficients()
    }
}

impl From<quaternion::Quaternion<f64>> for Quaternion {
    fn from(value: quaternion::Quaternion<f64>) -> Self {
        let (a, [b, c, d]) = value;
        Self::new(a, b, c, d)
    }
}

impl From<Quaternion> for quaternion::Quaternion<f64> {
    fn from(value: Quaternion) -> Self {
        (value.a, [value.b, value.c, value.d])
    }
}

/// Renders the algebraic form, e.g. `1+2i-3j+4k`.
///
/// Zero components are left out and a coefficient of magnitude one is written as the bare unit.
/// The pure real units render as `1.0` and `-1.0`, and the zero quaternion as `0`.
///
/// A precision (`{:.3}`) sets the significant digits per coefficient instead of the default 6.
/// Width, fill and alignment apply to the whole expression, left-aligned by default.
impl fmt::Display for Quaternion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = f.precision().unwrap_or(SIGNIFICANT_DIGITS);
        let mut out = String::new();
        if self.a != 0.0 {
            out.push_str(&self.a.fmt_general(digits));
        }
        for (value, unit) in [(self.b, 'i'), (self.c, 'j'), (self.d, 'k')] {
            if value == 0.0 {
                continue;
            }
            // the sign is written separately, so the magnitude never carries one
            if value < 0.0 {
                out.push('-');
            } else if !out.is_empty() {
                out.push('+');
            }
            let magnitude = value.abs();
            if magnitude != 1.0 {
                out.push_str(&magnitude.fmt_general(digits));
            }
            out.push(unit);
        }
        let rendered = match out.as_str() {
            "" => "0",
            "1" => "1.0",
            "-1" => "-1.0",
            other => other,
        };
        pad_expression(f, rendered)
    }
}

// `Formatter::pad` would also truncate to the precision, which here means significant digits
fn pad_expression(f: &mut fmt::Formatter<'_>, rendered: &str) -> fmt::Result {
    let len = rendered.chars().count();
    let padding = match f.width() {
        Some(width) if width > len => width - len,
        _ => return f.write_str(rendered),
    };
    let (before, after) = match f.align() {
        Some(fmt::Alignment::Right) => (padding, 0),
        Some(fmt::Alignment::Center) => (padding / 2, padding - padding / 2),
        Some(fmt::Alignment::Left) | None => (0, padding),
    };
    let fill = f.fill();
    for _ in 0..before {
        f.write_char(fill)?;
    }
    f.write_str(rendered)?;
    for _ in 0..after {
        f.write_char(fill)?;
    }
    Ok(())
}

/// Parses the algebraic form produced by [`Display`](fmt::Display).
///
/// Terms may come in any order and whitespace is ignored, so `1+2i-3j+4k`, `4k + 1 + 2i - 3j`
/// and `1.0` are all accepted. Each component may appear at most once.
impl FromStr for Quaternion {
    type Err = anyhow::Error;

    fn from_str(src: &str) -> Result<Self, Self::Err> {
        let src: String = src.split_whitespace().collect();
        let mut components: [Option<f64>; 4] = [None; 4];
        for (unit, value) in parse_terms::<f64>(&src, &UNITS)? {
            let idx = match unit {
                None => 0,
                Some('i') => 1,
                Some('j') => 2,
                Some('k') => 3,
                Some(other) => bail!("Unknown unit `{other}`."),
            };
            if components[idx].replace(value).is_some() {
                bail!("Repeated component in `{src}`.");
            }
        }
        let [a, b, c, d] = components.map(|value| value.unwrap_or(0.0));
        log::trace!("parsed `{src}` as ({a}, {b}, {c}, {d})");
        Ok(Self::new(a, b, c, d))
    }
}
