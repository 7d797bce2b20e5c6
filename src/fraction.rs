//! Exact rational arithmetic for score positions.
//!
//! Onsets and time signatures are kept as fractions of a whole note so that
//! positions in asymmetric meters (5/8, 7/8, ...) never accumulate rounding
//! errors. Conversion to `f64` only happens when a chart is assembled.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A normalized fraction: lowest terms, positive denominator.
///
/// Arithmetic is checked: any result whose reduced terms do not fit in `i64`
/// yields `None` instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fraction {
    numerator: i64,
    denominator: i64,
}

fn gcd(a: u128, b: u128) -> u128 {
    let (mut a, mut b) = (a, b);
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

impl Fraction {
    /// Create a fraction, or `None` if the denominator is zero or the
    /// normalized terms overflow.
    pub fn new(numerator: i64, denominator: i64) -> Option<Self> {
        Self::reduce(numerator as i128, denominator as i128)
    }

    pub fn from_integer(n: i64) -> Self {
        Self {
            numerator: n,
            denominator: 1,
        }
    }

    pub fn is_positive(&self) -> bool {
        self.numerator > 0
    }

    pub fn is_negative(&self) -> bool {
        self.numerator < 0
    }

    pub fn to_f64(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        let numerator = (self.numerator as i128)
            .checked_mul(rhs.denominator as i128)?
            .checked_add((rhs.numerator as i128).checked_mul(self.denominator as i128)?)?;
        let denominator = (self.denominator as i128).checked_mul(rhs.denominator as i128)?;
        Self::reduce(numerator, denominator)
    }

    pub fn checked_mul(self, rhs: Self) -> Option<Self> {
        Self::reduce(
            (self.numerator as i128).checked_mul(rhs.numerator as i128)?,
            (self.denominator as i128).checked_mul(rhs.denominator as i128)?,
        )
    }

    /// Divide, or `None` when dividing by zero or on overflow.
    pub fn checked_div(self, rhs: Self) -> Option<Self> {
        Self::reduce(
            (self.numerator as i128).checked_mul(rhs.denominator as i128)?,
            (self.denominator as i128).checked_mul(rhs.numerator as i128)?,
        )
    }

    fn reduce(numerator: i128, denominator: i128) -> Option<Self> {
        if denominator == 0 {
            return None;
        }
        let g = gcd(numerator.unsigned_abs(), denominator.unsigned_abs()).max(1);
        // Reduce in magnitude first; the sign is applied after narrowing.
        let num = i128::try_from(numerator.unsigned_abs() / g).ok()?;
        let den = i128::try_from(denominator.unsigned_abs() / g).ok()?;
        let negative = (numerator < 0) != (denominator < 0);
        let num = if negative { -num } else { num };
        Some(Self {
            numerator: i64::try_from(num).ok()?,
            denominator: i64::try_from(den).ok()?,
        })
    }
}

impl Ord for Fraction {
    fn cmp(&self, other: &Self) -> Ordering {
        let lhs = self.numerator as i128 * other.denominator as i128;
        let rhs = other.numerator as i128 * self.denominator as i128;
        lhs.cmp(&rhs)
    }
}

impl PartialOrd for Fraction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.denominator == 1 {
            write!(f, "{}", self.numerator)
        } else {
            write!(f, "{}/{}", self.numerator, self.denominator)
        }
    }
}

/// Parses `"n"` or `"n/d"`. Decimal notation is rejected: a decimal string
/// is already an approximation.
impl FromStr for Fraction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (num, den) = match trimmed.split_once('/') {
            Some((n, d)) => (n.trim(), d.trim()),
            None => (trimmed, "1"),
        };
        let numerator: i64 = num
            .parse()
            .map_err(|_| format!("Invalid fraction numerator: {}", s))?;
        let denominator: i64 = den
            .parse()
            .map_err(|_| format!("Invalid fraction denominator: {}", s))?;
        Fraction::new(numerator, denominator).ok_or_else(|| format!("Zero denominator: {}", s))
    }
}
