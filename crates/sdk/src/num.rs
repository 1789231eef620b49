//! Exact rational arithmetic for trade metrics.
//!
//! All quote math runs on integer numerator/denominator pairs with explicit
//! truncation toward zero. Floating point never appears on these paths: a
//! "minimum guaranteed" amount must not be nudged upward by rounding, and the
//! display floor for near-zero price impact is an exact comparison, not a
//! formatting artifact.

use std::cmp::Ordering;

use alloy_primitives::{U256, U512};

use crate::error::Error;

/// `10^exp`, or `None` if it does not fit `U256`.
pub(crate) fn pow10(exp: u8) -> Option<U256> {
    U256::from(10u64).checked_pow(U256::from(exp))
}

/// `a * b / d` truncated toward zero, or `None` if the quotient does not fit
/// `U256`. The intermediate product is computed at 512 bits and never
/// overflows.
pub(crate) fn mul_div(a: U256, b: U256, d: U256) -> Option<U256> {
    debug_assert!(!d.is_zero());
    let wide: U512 = a.widening_mul(b);
    let quotient = wide / U512::from(d);
    (quotient <= U512::from(U256::MAX)).then(|| quotient.to::<U256>())
}

/// Parses a non-negative decimal string into an exact `(numerator,
/// denominator)` pair where the denominator is a power of ten.
///
/// Returns `None` for empty, signed, or otherwise unparsable input; the
/// caller decides whether that means "use default" or an error.
pub(crate) fn parse_decimal(input: &str) -> Option<(U256, U256)> {
    let input = input.trim();
    let (int, frac) = input.split_once('.').unwrap_or((input, ""));
    if int.is_empty() && frac.is_empty() {
        return None;
    }
    if !int.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    if frac.len() > 77 {
        // More fractional digits than U256 can scale by
        return None;
    }
    let mut digits = String::with_capacity(int.len() + frac.len());
    digits.push_str(int);
    digits.push_str(frac);
    let numerator = digits.parse::<U256>().ok()?;
    let denominator = pow10(frac.len() as u8)?;
    Some((numerator, denominator))
}

/// Exact signed rational.
///
/// The stored fraction is a plain ratio of one: a value of `1` is 100%, so
/// 0.5% slippage is `5/1000`. Sign is tracked separately; a zero numerator is
/// always normalized to non-negative.
#[derive(Clone, Copy, Debug)]
pub struct Percent {
    negative: bool,
    numerator: U256,
    denominator: U256,
}

impl Percent {
    pub const ZERO: Percent =
        Percent { negative: false, numerator: U256::ZERO, denominator: U256::ONE };

    /// Non-negative ratio from integer parts. `denominator` must be non-zero.
    pub fn from_ratio(numerator: u64, denominator: u64) -> Self {
        assert!(denominator != 0, "zero denominator");
        Self::from_parts(false, U256::from(numerator), U256::from(denominator))
    }

    pub(crate) fn from_parts(negative: bool, numerator: U256, denominator: U256) -> Self {
        debug_assert!(!denominator.is_zero());
        Self { negative: negative && !numerator.is_zero(), numerator, denominator }
    }

    pub fn is_negative(&self) -> bool { self.negative }

    pub fn is_zero(&self) -> bool { self.numerator.is_zero() }

    /// Magnitude of the ratio, dropping the sign.
    pub fn abs(&self) -> Percent {
        Self { negative: false, numerator: self.numerator, denominator: self.denominator }
    }

    /// `1 - self`, defined for `0 <= self <= 1`.
    pub fn one_minus(&self) -> Result<Percent, Error> {
        if self.negative || self.numerator > self.denominator {
            return Err(Error::InvalidArgument(format!(
                "ratio out of [0, 1] range: {self}"
            )));
        }
        Ok(Self::from_parts(false, self.denominator - self.numerator, self.denominator))
    }

    /// `amount * self` truncated toward zero. Defined for non-negative
    /// ratios; saturates at `U256::MAX` if the product does not fit.
    pub fn floor_mul(&self, amount: U256) -> U256 {
        debug_assert!(!self.negative);
        mul_div(amount, self.numerator, self.denominator).unwrap_or(U256::MAX)
    }

    /// `floor(|self| * scale)`, saturating. `scale = 10_000` yields the value
    /// in hundredths of a percent.
    pub(crate) fn scaled_trunc(&self, scale: u64) -> U256 {
        mul_div(self.numerator, U256::from(scale), self.denominator).unwrap_or(U256::MAX)
    }

    fn magnitude_cmp(&self, other: &Percent) -> Ordering {
        let lhs: U512 = self.numerator.widening_mul(other.denominator);
        let rhs: U512 = other.numerator.widening_mul(self.denominator);
        lhs.cmp(&rhs)
    }
}

impl PartialEq for Percent {
    fn eq(&self, other: &Self) -> bool { self.cmp(other) == Ordering::Equal }
}

impl Eq for Percent {}

impl PartialOrd for Percent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
}

impl Ord for Percent {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.negative, other.negative) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => self.magnitude_cmp(other),
            (true, true) => other.magnitude_cmp(self),
        }
    }
}

impl std::fmt::Display for Percent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{}/{}",
            if self.negative { "-" } else { "" },
            self.numerator,
            self.denominator
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_decimal_exact() {
        assert_eq!(parse_decimal("1"), Some((U256::from(1u64), U256::from(1u64))));
        assert_eq!(parse_decimal("0.5"), Some((U256::from(5u64), U256::from(10u64))));
        assert_eq!(parse_decimal("12.34"), Some((U256::from(1234u64), U256::from(100u64))));
        assert_eq!(parse_decimal(".25"), Some((U256::from(25u64), U256::from(100u64))));
        assert_eq!(parse_decimal("3."), Some((U256::from(3u64), U256::from(1u64))));
    }

    #[test]
    fn parse_decimal_rejects_garbage() {
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal("."), None);
        assert_eq!(parse_decimal("-1"), None);
        assert_eq!(parse_decimal("1.2.3"), None);
        assert_eq!(parse_decimal("abc"), None);
        assert_eq!(parse_decimal("1e5"), None);
    }

    #[test]
    fn ordering_is_sign_aware() {
        let loss = Percent::from_parts(true, U256::from(3u64), U256::from(100u64));
        let gain = Percent::from_ratio(1, 100);
        assert!(loss < gain);
        assert!(loss < Percent::ZERO);
        assert_eq!(Percent::from_ratio(1, 2), Percent::from_ratio(50, 100));
        // Larger loss sorts lower
        let deep_loss = Percent::from_parts(true, U256::from(5u64), U256::from(100u64));
        assert!(deep_loss < loss);
    }

    #[test]
    fn one_minus_and_floor_mul_truncate() {
        let third = Percent::from_ratio(1, 3);
        assert_eq!(third.floor_mul(U256::from(10u64)), U256::from(3u64));
        let rest = third.one_minus().unwrap();
        assert_eq!(rest.floor_mul(U256::from(10u64)), U256::from(6u64));
        assert_eq!(Percent::ZERO.one_minus().unwrap().floor_mul(U256::from(7u64)), U256::from(7u64));
        assert!(Percent::from_ratio(3, 2).one_minus().is_err());
    }

    #[test]
    fn scaled_trunc_in_hundredths() {
        // 1.239% -> 123 hundredths of a percent
        let p = Percent::from_ratio(1239, 100_000);
        assert_eq!(p.scaled_trunc(10_000), U256::from(123u64));
    }
}
