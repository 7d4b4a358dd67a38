//! Type-safe price representation in whole hryvnia.
//!
//! The storefront has a single fixed locale (`uk-UA`) and currency (UAH).
//! Page markup declares prices as plain integers in the smallest displayed
//! unit, so a price is an integer count of hryvnia with no fractional part.
//!
//! Formatting follows the `uk-UA` number convention: digits are grouped in
//! threes and separated by a no-break space (U+00A0).
//!
//! ```rust
//! use apple_cart_core::Price;
//!
//! let price = Price::new(42_999);
//! assert_eq!(price.format_grouped(), "42\u{a0}999");
//! assert_eq!(price.to_string(), "42\u{a0}999 грн");
//! ```

use std::fmt;
use std::iter::Sum;
use std::ops::Add;

use serde::{Deserialize, Serialize};

/// Digit group separator used by the `uk-UA` locale.
pub const GROUP_SEPARATOR: char = '\u{a0}';

/// Currency suffix shown after formatted amounts.
pub const CURRENCY_SUFFIX: &str = "грн";

/// A price in whole hryvnia.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    /// Zero hryvnia.
    pub const ZERO: Self = Self(0);

    /// Create a new price.
    #[must_use]
    pub const fn new(amount: u64) -> Self {
        Self(amount)
    }

    /// Get the raw amount.
    #[must_use]
    pub const fn amount(self) -> u64 {
        self.0
    }

    /// Price of `quantity` units, saturating at `u64::MAX`.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(u64::from(quantity)))
    }

    /// Format the bare amount with `uk-UA` digit grouping (no currency).
    #[must_use]
    pub fn format_grouped(self) -> String {
        let digits = self.0.to_string();
        let len = digits.len();
        let mut out = String::with_capacity(len + len / 3 * 2);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (len - i) % 3 == 0 {
                out.push(GROUP_SEPARATOR);
            }
            out.push(c);
        }
        out
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {CURRENCY_SUFFIX}", self.format_grouped())
    }
}

impl From<u64> for Price {
    fn from(amount: u64) -> Self {
        Self(amount)
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}
