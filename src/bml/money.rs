use std::fmt;

use serde::{Deserialize, Serialize};

use thiserror::Error;

/// Number of fractional digits carried by every amount
const SCALE_DIGITS: usize = 4;
const SCALE: i64 = 10_000;

/// Rates are applied as fixed-point integers with twelve decimal places
const RATE_SCALE: i128 = 1_000_000_000_000;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Overflow error while applying {0} operation on {1} and {2}")]
    Overflow(&'static str, Money, Money),

    #[error("Underflow error while applying {0} operation on {1} and {2}")]
    Underflow(&'static str, Money, Money),

    #[error("Overflow error while applying a rate to {0}")]
    RateOverflow(Money),

    #[error("Money parse error: {0}, {1:?}")]
    Parse(&'static str, String),
}

/// Fixed-point amount with four decimal places: `Money(10_000)` is one whole unit
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct Money(pub i64);

impl Money {
    pub const ZERO: Self = Self(0);
    pub const MAX: Self = Self(i64::MAX);
    pub const MIN: Self = Self(i64::MIN);

    pub const fn from_whole(units: i64) -> Self {
        Self(units * SCALE)
    }

    pub fn parse(string: &str) -> Result<Self, MoneyError> {
        let trimmed = string.trim();

        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        let mut parts = unsigned.split('.');

        let whole = parts.next().unwrap_or_default();
        let fraction = parts.next().unwrap_or_default();

        if parts.next().is_some() {
            return Err(MoneyError::Parse("Too many decimal points", string.to_string()));
        }

        if whole.is_empty() || !whole.chars().all(|c| c.is_ascii_digit()) {
            return Err(MoneyError::Parse("Invalid whole part", string.to_string()));
        }

        if fraction.len() > SCALE_DIGITS || !fraction.chars().all(|c| c.is_ascii_digit()) {
            return Err(MoneyError::Parse("Invalid fractional part", string.to_string()));
        }

        let whole: i64 = whole
            .parse()
            .map_err(|_| MoneyError::Parse("Whole part out of range", string.to_string()))?;

        let fraction: i64 = if fraction.is_empty() {
            0
        } else {
            format!("{:0<width$}", fraction, width = SCALE_DIGITS)
                .parse()
                .map_err(|_| MoneyError::Parse("Invalid fractional part", string.to_string()))?
        };

        let units = whole
            .checked_mul(SCALE)
            .and_then(|units| units.checked_add(fraction))
            .ok_or_else(|| MoneyError::Parse("Amount out of range", string.to_string()))?;

        Ok(if negative { Money(-units) } else { Money(units) })
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Adds `other` in place. On overflow the value is left untouched.
    pub fn add(&mut self, other: &Self) -> Result<(), MoneyError> {
        let a = self.0;
        let b = other.0;

        self.0 = match a.checked_add(b) {
            Some(sum) => sum,
            None if b > 0 => return Err(MoneyError::Overflow("add", *self, *other)),
            None => return Err(MoneyError::Underflow("add", *self, *other)),
        };

        Ok(())
    }

    /// Subtracts `other` in place. On overflow the value is left untouched.
    pub fn sub(&mut self, other: &Self) -> Result<(), MoneyError> {
        let a = self.0;
        let b = other.0;

        self.0 = match a.checked_sub(b) {
            Some(difference) => difference,
            None if b > 0 => return Err(MoneyError::Underflow("sub", *self, *other)),
            None => return Err(MoneyError::Overflow("sub", *self, *other)),
        };

        Ok(())
    }

    /// Multiplies by `rate`, rounding half away from zero to the nearest unit.
    ///
    /// `rate` is first fixed to twelve decimal places and the product is taken in `i128`, so
    /// balances of any size keep their precision.
    pub fn apply_rate(&self, rate: f64) -> Result<Money, MoneyError> {
        let overflow = || MoneyError::RateOverflow(*self);

        let scaled_rate = (rate * RATE_SCALE as f64).round();
        if !scaled_rate.is_finite() || scaled_rate.abs() >= i128::MAX as f64 {
            return Err(overflow());
        }

        let product = (self.0 as i128)
            .checked_mul(scaled_rate as i128)
            .ok_or_else(overflow)?;

        let mut units = product / RATE_SCALE;
        let remainder = product % RATE_SCALE;

        if remainder.abs() * 2 >= RATE_SCALE {
            units += product.signum();
        }

        let units = i64::try_from(units).map_err(|_| overflow())?;

        Ok(Money(units))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        let units = self.0.unsigned_abs();
        let scale = SCALE as u64;

        write!(
            f,
            "{sign}{}.{:0width$}",
            units / scale,
            units % scale,
            width = SCALE_DIGITS
        )
    }
}
