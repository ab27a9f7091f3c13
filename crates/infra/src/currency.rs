//! Exchange-rate lookup.

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;

use ferremas_core::CurrencyCode;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RateError {
    #[error("no exchange rate available for {from} -> {to}")]
    Unavailable { from: CurrencyCode, to: CurrencyCode },
}

#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Units of `to` per one unit of `from`.
    async fn rate(&self, from: &CurrencyCode, to: &CurrencyCode) -> Result<f64, RateError>;
}

/// Rate table keyed by the USD value of one unit of each currency.
#[derive(Debug, Clone)]
pub struct StaticRateProvider {
    usd_per_unit: HashMap<CurrencyCode, f64>,
}

impl StaticRateProvider {
    pub fn empty() -> Self {
        Self {
            usd_per_unit: HashMap::new(),
        }
    }

    /// Adds or replaces a currency. Non-positive values are ignored.
    pub fn with_rate(mut self, code: CurrencyCode, usd_per_unit: f64) -> Self {
        if usd_per_unit.is_finite() && usd_per_unit > 0.0 {
            self.usd_per_unit.insert(code, usd_per_unit);
        }
        self
    }

    pub fn supports(&self, code: &CurrencyCode) -> bool {
        self.usd_per_unit.contains_key(code)
    }
}

impl Default for StaticRateProvider {
    fn default() -> Self {
        let table = [
            ("USD", 1.0),
            ("CLP", 0.00105),
            ("EUR", 1.08),
            ("GBP", 1.27),
            ("ARS", 0.0011),
            ("PEN", 0.27),
        ];
        table
            .into_iter()
            .filter_map(|(code, rate)| code.parse::<CurrencyCode>().ok().map(|code| (code, rate)))
            .fold(Self::empty(), |provider, (code, rate)| {
                provider.with_rate(code, rate)
            })
    }
}

#[async_trait]
impl RateProvider for StaticRateProvider {
    async fn rate(&self, from: &CurrencyCode, to: &CurrencyCode) -> Result<f64, RateError> {
        let unavailable = || RateError::Unavailable {
            from: from.clone(),
            to: to.clone(),
        };
        let from_usd = self.usd_per_unit.get(from).ok_or_else(unavailable)?;
        let to_usd = self.usd_per_unit.get(to).ok_or_else(unavailable)?;
        if from == to {
            return Ok(1.0);
        }
        Ok(from_usd / to_usd)
    }
}
