//! Money type for representing currency amounts
//!
//! Internally stores amounts in minor units (hundredths, i64) to avoid
//! floating-point drift when summing a ledger. Provides safe arithmetic
//! operations and formatting.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Currency symbols accepted (and ignored) when parsing user input
const KNOWN_SYMBOLS: [char; 4] = ['₹', '$', '€', '£'];

/// Represents a monetary amount stored in hundredths of the currency unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from minor units
    ///
    /// # Examples
    /// ```
    /// use pettyflow::models::Money;
    /// let amount = Money::from_minor(12050); // 120.50
    /// ```
    pub const fn from_minor(minor: i64) -> Self {
        Self(minor)
    }

    /// Create a Money amount from whole units and hundredths
    ///
    /// # Examples
    /// ```
    /// use pettyflow::models::Money;
    /// let amount = Money::from_major_minor(120, 50); // 120.50
    /// ```
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        Self(major * 100 + minor)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in minor units
    pub const fn minor_units(&self) -> i64 {
        self.0
    }

    /// Get the whole units portion (truncated toward zero)
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Get the hundredths portion (0-99)
    pub const fn minor_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Check if the amount is zero
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Check if the amount is positive
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Check if the amount is negative
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Parse a money amount from a string
    ///
    /// Accepts formats: "120.50", "-120.50", "₹120.50", "1,000", "120.5".
    /// More than two decimal places is an error rather than a silent truncation.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let invalid = || MoneyParseError::InvalidFormat(s.trim().to_string());
        let trimmed = s.trim();

        let (negative, rest) = match trimmed.strip_prefix('-') {
            Some(stripped) => (true, stripped),
            None => (false, trimmed),
        };

        let rest = rest.trim_start_matches(KNOWN_SYMBOLS).trim();
        let digits: String = rest.chars().filter(|c| *c != ',').collect();
        if digits.is_empty() {
            return Err(invalid());
        }

        let (whole, fraction) = match digits.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (digits.as_str(), ""),
        };

        let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if !all_digits(whole) || !all_digits(fraction) || (whole.is_empty() && fraction.is_empty())
        {
            return Err(invalid());
        }

        let major: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };

        let minor: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| invalid())? * 10,
            2 => fraction.parse().map_err(|_| invalid())?,
            _ => return Err(MoneyParseError::TooManyDecimals(trimmed.to_string())),
        };

        let value = major
            .checked_mul(100)
            .and_then(|v| v.checked_add(minor))
            .ok_or_else(invalid)?;

        Ok(Self(if negative { -value } else { value }))
    }

    /// Format with a currency symbol
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        if self.is_negative() {
            format!("-{}{}.{:02}", symbol, self.major().abs(), self.minor_part())
        } else {
            format!("{}{}.{:02}", symbol, self.major(), self.minor_part())
        }
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            write!(f, "-{}.{:02}", self.major().abs(), self.minor_part())
        } else {
            write!(f, "{}.{:02}", self.major(), self.minor_part())
        }
    }
}

// Sums saturate at the i64 bounds instead of wrapping or panicking.

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
    TooManyDecimals(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
            MoneyParseError::TooManyDecimals(s) => {
                write!(f, "At most 2 decimal places allowed: {}", s)
            }
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_minor() {
        let m = Money::from_minor(12050);
        assert_eq!(m.minor_units(), 12050);
        assert_eq!(m.major(), 120);
        assert_eq!(m.minor_part(), 50);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_minor(1050).to_string(), "10.50");
        assert_eq!(Money::from_minor(0).to_string(), "0.00");
        assert_eq!(Money::from_minor(-1050).to_string(), "-10.50");
        assert_eq!(Money::from_minor(5).to_string(), "0.05");
    }

    #[test]
    fn test_format_with_symbol() {
        assert_eq!(Money::from_minor(144500).format_with_symbol("₹"), "₹1445.00");
        assert_eq!(Money::from_minor(-3500).format_with_symbol("₹"), "-₹35.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_minor(1000);
        let b = Money::from_minor(500);

        assert_eq!((a + b).minor_units(), 1500);
        assert_eq!((a - b).minor_units(), 500);
        assert_eq!((-a).minor_units(), -1000);
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("120.50").unwrap().minor_units(), 12050);
        assert_eq!(Money::parse("₹120.50").unwrap().minor_units(), 12050);
        assert_eq!(Money::parse("-10.50").unwrap().minor_units(), -1050);
        assert_eq!(Money::parse("10").unwrap().minor_units(), 1000);
        assert_eq!(Money::parse("120.5").unwrap().minor_units(), 12050);
        assert_eq!(Money::parse("1,500").unwrap().minor_units(), 150000);
        assert_eq!(Money::parse(".75").unwrap().minor_units(), 75);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Money::parse("").is_err());
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse("1.2.3").is_err());
        assert!(Money::parse("10.-5").is_err());
        assert!(Money::parse("-").is_err());
        assert!(Money::parse(".").is_err());
    }

    #[test]
    fn test_parse_rejects_extra_decimal_places() {
        assert_eq!(
            Money::parse("10.999"),
            Err(MoneyParseError::TooManyDecimals("10.999".into()))
        );
        assert_eq!(
            Money::parse("0.005"),
            Err(MoneyParseError::TooManyDecimals("0.005".into()))
        );
        assert_eq!(Money::parse("10.99").unwrap().minor_units(), 1099);
    }

    #[test]
    fn test_arithmetic_saturates() {
        let huge = Money::from_minor(i64::MAX - 10);
        assert_eq!((huge + Money::from_minor(100)).minor_units(), i64::MAX);
        assert_eq!((-huge - Money::from_minor(100)).minor_units(), i64::MIN);

        let total: Money = [huge, huge].iter().sum();
        assert_eq!(total.minor_units(), i64::MAX);
    }

    #[test]
    fn test_sum() {
        let amounts = [
            Money::from_minor(100),
            Money::from_minor(200),
            Money::from_minor(300),
        ];
        let total: Money = amounts.iter().sum();
        assert_eq!(total.minor_units(), 600);
    }

    #[test]
    fn test_serialization() {
        let m = Money::from_minor(1050);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "1050");

        let deserialized: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(m, deserialized);
    }
}
