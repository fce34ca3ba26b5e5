//! Price representation in the smallest currency unit.
//!
//! The storefront is single-currency (IDR, which has no fractional
//! unit in practice), so a price is a plain non-negative integer amount
//! of rupiah. Arithmetic saturates rather than wraps: a catalog feed is
//! untrusted input and must never be able to panic the engine.

use serde::{Deserialize, Serialize};

/// A non-negative amount in the smallest currency unit (rupiah).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    /// A zero amount.
    pub const ZERO: Self = Self(0);

    /// Create a price from an amount in the smallest currency unit.
    #[must_use]
    pub const fn new(amount: u64) -> Self {
        Self(amount)
    }

    /// Get the underlying amount.
    #[must_use]
    pub const fn amount(self) -> u64 {
        self.0
    }

    /// Saturating addition.
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Saturating multiplication by a quantity.
    #[must_use]
    pub const fn saturating_mul(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(quantity as u64))
    }

    /// Format for display as Indonesian Rupiah (e.g., `Rp5.000`).
    ///
    /// Matches `Intl.NumberFormat("id-ID", { currency: "IDR",
    /// maximumFractionDigits: 0 })`: dot-grouped thousands, no fraction.
    #[must_use]
    pub fn display(self) -> String {
        let digits = self.0.to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 2);
        out.push_str("Rp");
        let offset = digits.len() % 3;
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (i + 3 - offset) % 3 == 0 {
                out.push('.');
            }
            out.push(c);
        }
        out
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

impl From<u64> for Price {
    fn from(amount: u64) -> Self {
        Self(amount)
    }
}

impl From<Price> for u64 {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl std::iter::Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Self::saturating_add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_small() {
        assert_eq!(Price::new(0).display(), "Rp0");
        assert_eq!(Price::new(500).display(), "Rp500");
    }

    #[test]
    fn test_display_thousands_grouping() {
        assert_eq!(Price::new(5_000).display(), "Rp5.000");
        assert_eq!(Price::new(50_000).display(), "Rp50.000");
        assert_eq!(Price::new(1_250_000).display(), "Rp1.250.000");
    }

    #[test]
    fn test_saturating_mul() {
        assert_eq!(Price::new(1_000).saturating_mul(3), Price::new(3_000));
        assert_eq!(Price::new(u64::MAX).saturating_mul(2), Price::new(u64::MAX));
    }

    #[test]
    fn test_sum() {
        let total: Price = [Price::new(2_000), Price::new(500)].into_iter().sum();
        assert_eq!(total, Price::new(2_500));
    }

    #[test]
    fn test_serde_transparent() {
        let json = serde_json::to_string(&Price::new(5_000)).expect("serialize");
        assert_eq!(json, "5000");
    }
}
