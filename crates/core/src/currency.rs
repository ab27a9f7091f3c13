//! Currency codes and conversion results.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{DomainError, DomainResult};

/// Three-letter currency code, normalized to upper case (e.g. `CLP`, `USD`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for CurrencyCode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(DomainError::validation(format!(
                "'{code}' is not a three-letter currency code"
            )));
        }
        Ok(Self(code.to_ascii_uppercase()))
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CurrencyCode> for String {
    fn from(value: CurrencyCode) -> Self {
        value.0
    }
}

impl core::fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Query accepted by the conversion endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ConversionQuery {
    pub amount: f64,
    pub from_currency: CurrencyCode,
    pub to_currency: CurrencyCode,
}

impl ConversionQuery {
    pub fn validate(&self) -> DomainResult<()> {
        if !self.amount.is_finite() || self.amount < 0.0 {
            return Err(DomainError::validation("amount must be a non-negative number"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyConversion {
    pub amount: f64,
    pub from_currency: CurrencyCode,
    pub to_currency: CurrencyCode,
    pub rate: f64,
    pub converted_amount: f64,
}

impl CurrencyConversion {
    /// Fails with `Validation` when the converted amount is not a finite number.
    pub fn apply(query: &ConversionQuery, rate: f64) -> DomainResult<Self> {
        let converted_amount = query.amount * rate;
        if !converted_amount.is_finite() {
            return Err(DomainError::validation("converted amount is out of range"));
        }
        Ok(Self {
            amount: query.amount,
            from_currency: query.from_currency.clone(),
            to_currency: query.to_currency.clone(),
            rate,
            converted_amount,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_normalized_to_upper_case() {
        let code: CurrencyCode = "clp".parse().unwrap();
        assert_eq!(code.as_str(), "CLP");
    }

    #[test]
    fn rejects_malformed_codes() {
        for raw in ["", "US", "DOLLAR", "U$D", "12A"] {
            assert!(raw.parse::<CurrencyCode>().is_err(), "accepted {raw:?}");
        }
    }

    #[test]
    fn deserializes_through_validation() {
        let ok: CurrencyCode = serde_json::from_str("\"eur\"").unwrap();
        assert_eq!(ok.to_string(), "EUR");
        assert!(serde_json::from_str::<CurrencyCode>("\"euro\"").is_err());
    }

    #[test]
    fn negative_amount_is_rejected() {
        let query = ConversionQuery {
            amount: -5.0,
            from_currency: "USD".parse().unwrap(),
            to_currency: "CLP".parse().unwrap(),
        };
        assert!(query.validate().is_err());
    }

    #[test]
    fn conversion_that_overflows_is_rejected() {
        let query = ConversionQuery {
            amount: 1e308,
            from_currency: "USD".parse().unwrap(),
            to_currency: "CLP".parse().unwrap(),
        };
        assert!(query.validate().is_ok());

        let err = CurrencyConversion::apply(&query, 952.38).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let converted = CurrencyConversion::apply(&query, 0.5).unwrap();
        assert_eq!(converted.converted_amount, 5e307);
    }
}
