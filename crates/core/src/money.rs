use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// A spend magnitude in rupees.
///
/// Statement amounts are summed as IEEE doubles with no intermediate rounding;
/// rounding to two places only happens when the value is displayed.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(f64);

impl Money {
    /// Wraps the magnitude of `value`. The sign of a statement amount carries
    /// no meaning for spend, so it is discarded here.
    pub fn new(value: f64) -> Self {
        Money(value.abs())
    }

    pub fn zero() -> Self {
        Money(0.0)
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0.0
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Twelve months of this spend ("Est. Annual Cost").
    pub fn annualized(self) -> Self {
        Money(self.0 * 12.0)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "₹{:.2}", self.0)
    }
}

impl Add for Money {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |a, b| a + b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_discards_sign() {
        assert_eq!(Money::new(-649.0).value(), 649.0);
        assert_eq!(Money::new(99.5).value(), 99.5);
    }

    #[test]
    fn display_two_decimals_with_rupee_sign() {
        assert_eq!(Money::new(245.5).to_string(), "₹245.50");
        assert_eq!(Money::zero().to_string(), "₹0.00");
    }

    #[test]
    fn sum_is_exact_addition() {
        let total: Money = [649.0, 99.0, 399.0, 149.0, 245.5, 0.0]
            .into_iter()
            .map(Money::new)
            .sum();
        assert_eq!(total.value(), 1541.5);
    }

    #[test]
    fn annualized_is_twelve_months() {
        assert_eq!(Money::new(100.25).annualized().value(), 1203.0);
    }

    #[test]
    fn serializes_as_bare_number() {
        let json = serde_json::to_string(&Money::new(649.0)).unwrap();
        assert_eq!(json, "649.0");
    }
}
