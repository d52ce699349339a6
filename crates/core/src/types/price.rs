//! Type-safe price representation.
//!
//! Prices are whole Sudanese pounds; the store never deals in fractions.

use core::fmt;
use core::iter::Sum;

use serde::{Deserialize, Serialize};

/// Currency suffix shown after amounts.
pub const CURRENCY_SUFFIX: &str = "ج.س";

/// An amount in whole currency units.
///
/// Non-negative by construction. Multiplication and addition saturate rather
/// than wrap; real carts never get near `u64::MAX`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    /// Zero amount.
    pub const ZERO: Self = Self(0);

    /// Create a price from whole units.
    #[must_use]
    pub const fn new(amount: u64) -> Self {
        Self(amount)
    }

    /// Get the amount in whole units.
    #[must_use]
    pub const fn amount(self) -> u64 {
        self.0
    }

    /// Line total for `quantity` items at this price.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(u64::from(quantity)))
    }

    /// Amount with thousands separators and the currency suffix,
    /// e.g. `12,500 ج.س`.
    #[must_use]
    pub fn grouped(self) -> String {
        format!("{} {CURRENCY_SUFFIX}", group_thousands(self.0))
    }

    /// Discount relative to `original`, rounded to the nearest percent.
    ///
    /// Returns `None` unless `original` is strictly greater than `self`.
    #[must_use]
    pub fn discount_percent_from(self, original: Self) -> Option<u8> {
        if original.0 <= self.0 {
            return None;
        }
        let saved = original.0 - self.0;
        // Round half up: (saved * 100 + original / 2) / original
        let percent = (u128::from(saved) * 100 + u128::from(original.0) / 2) / u128::from(original.0);
        u8::try_from(percent).ok()
    }
}

/// Format an amount with thousands separators, e.g. `12,500`.
#[must_use]
pub fn group_thousands(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {CURRENCY_SUFFIX}", self.0)
    }
}

impl From<u64> for Price {
    fn from(amount: u64) -> Self {
        Self(amount)
    }
}

impl core::ops::Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, p| acc + p)
    }
}

// SQLx support (with postgres feature): stored as BIGINT with a CHECK >= 0
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Price {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <i64 as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <i64 as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Price {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let amount = <i64 as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self(u64::try_from(amount)?))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Price {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        let amount = i64::try_from(self.0)?;
        <i64 as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&amount, buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(9000), "9,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
        assert_eq!(Price::new(12_500).grouped(), "12,500 ج.س");
    }

    #[test]
    fn test_discount_percent_rounds() {
        // (5200 - 4500) / 5200 = 13.46%
        assert_eq!(Price::new(4500).discount_percent_from(Price::new(5200)), Some(13));
        // 1/3 off rounds to 33
        assert_eq!(Price::new(200).discount_percent_from(Price::new(300)), Some(33));
        // exactly half rounds up
        assert_eq!(Price::new(1).discount_percent_from(Price::new(8)), Some(88));
    }

    #[test]
    fn test_no_discount_when_original_not_higher() {
        assert_eq!(Price::new(4500).discount_percent_from(Price::new(4500)), None);
        assert_eq!(Price::new(4500).discount_percent_from(Price::new(100)), None);
    }

    #[test]
    fn test_times_and_sum() {
        let total: Price = [Price::new(4500).times(2), Price::new(2400).times(1)]
            .into_iter()
            .sum();
        assert_eq!(total, Price::new(11_400));
    }

    #[test]
    fn test_display_includes_currency() {
        assert_eq!(Price::new(9000).to_string(), "9000 ج.س");
    }
}
