use crate::error::{GatewayError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A positive amount in the currency's minor units (cents, Rappen, ...).
///
/// This is the representation the gateway expects: `CHF 10.00` travels as `1000`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Amount(u64);

impl Amount {
    pub fn new(minor_units: u64) -> Result<Self> {
        if minor_units > 0 {
            Ok(Self(minor_units))
        } else {
            Err(GatewayError::ValidationError(
                "Amount must be positive".to_string(),
            ))
        }
    }

    /// Converts a major-unit value with at most two decimals into minor units.
    pub fn from_decimal(value: Decimal) -> Result<Self> {
        let minor = value.checked_mul(Decimal::ONE_HUNDRED).ok_or_else(|| {
            GatewayError::ValidationError(format!("Amount {value} is out of range"))
        })?;
        if minor.fract() != Decimal::ZERO {
            return Err(GatewayError::ValidationError(format!(
                "Amount {value} has more than two decimal places"
            )));
        }
        let minor = u64::try_from(minor.trunc()).map_err(|_| {
            GatewayError::ValidationError(format!("Amount {value} is out of range"))
        })?;
        Self::new(minor)
    }

    pub fn minor_units(&self) -> u64 {
        self.0
    }
}

impl TryFrom<u64> for Amount {
    type Error = GatewayError;

    fn try_from(value: u64) -> Result<Self> {
        Self::new(value)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Amount {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self> {
        let value = s.trim().parse::<u64>().map_err(|e| GatewayError::Malformed {
            field: "amount",
            reason: e.to_string(),
        })?;
        Self::new(value)
    }
}

/// ISO 4217 alphabetic currency code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency(String);

impl Currency {
    pub fn new(code: &str) -> Result<Self> {
        let code = code.trim();
        if code.len() == 3 && code.bytes().all(|b| b.is_ascii_alphabetic()) {
            Ok(Self(code.to_ascii_uppercase()))
        } else {
            Err(GatewayError::ValidationError(format!(
                "Invalid currency code '{code}'"
            )))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Currency {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
