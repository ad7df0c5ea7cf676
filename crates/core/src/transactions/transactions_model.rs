//! Transaction domain models.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{Error, Result, ValidationError};
use crate::utils::time_utils::parse_timestamp;

use super::transactions_constants::*;

/// Direction of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Operation {
    Buy,
    Sell,
}

impl Operation {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Operation::Buy => OPERATION_BUY,
            Operation::Sell => OPERATION_SELL,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = Error;

    /// Parses `BUY`/`SELL`, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim();
        if normalized.eq_ignore_ascii_case(OPERATION_BUY) {
            Ok(Operation::Buy)
        } else if normalized.eq_ignore_ascii_case(OPERATION_SELL) {
            Ok(Operation::Sell)
        } else {
            Err(ValidationError::InvalidOperation(s.to_string()).into())
        }
    }
}

/// Domain model representing a persisted transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: i64,
    pub timestamp: NaiveDateTime,
    pub asset: String,
    pub operation: Operation,
    pub quantity: f64,
    pub unit_price: f64,
    /// Caller-supplied; not reconciled against `quantity * unit_price`.
    pub total_cost: f64,
    pub fx_rate: f64,
}

/// Input model for recording a new transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    /// When `None`, the store assigns the current time.
    pub timestamp: Option<NaiveDateTime>,
    pub asset: String,
    pub operation: Operation,
    pub quantity: f64,
    pub unit_price: f64,
    pub total_cost: f64,
    pub fx_rate: f64,
}

impl NewTransaction {
    pub fn new(
        asset: impl Into<String>,
        operation: Operation,
        quantity: f64,
        unit_price: f64,
        total_cost: f64,
        fx_rate: f64,
    ) -> Self {
        Self {
            timestamp: None,
            asset: asset.into(),
            operation,
            quantity,
            unit_price,
            total_cost,
            fx_rate,
        }
    }

    pub fn with_timestamp(mut self, timestamp: NaiveDateTime) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Sets the timestamp from an ISO-8601 date or date-time string.
    pub fn with_timestamp_str(self, timestamp: &str) -> Result<Self> {
        Ok(self.with_timestamp(parse_timestamp(timestamp)?))
    }

    /// Validates the new transaction data.
    pub fn validate(&self) -> Result<()> {
        validate_asset(&self.asset)?;
        validate_positive(FIELD_QUANTITY, self.quantity)?;
        validate_positive(FIELD_UNIT_PRICE, self.unit_price)?;
        validate_finite(FIELD_TOTAL_COST, self.total_cost)?;
        validate_finite(FIELD_FX_RATE, self.fx_rate)?;
        Ok(())
    }
}

/// Partial update of a transaction's mutable fields.
///
/// Only fields that are `Some` are written.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionUpdate {
    pub timestamp: Option<NaiveDateTime>,
    pub asset: Option<String>,
    pub operation: Option<Operation>,
    pub quantity: Option<f64>,
    pub unit_price: Option<f64>,
    pub total_cost: Option<f64>,
    pub fx_rate: Option<f64>,
}

impl TransactionUpdate {
    /// Builds an update from free-form `field => value` pairs.
    ///
    /// Every key must name a mutable field. Unknown keys are collected and
    /// reported together so that nothing is applied when any key is invalid.
    pub fn from_fields<I, K, V>(fields: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let pairs: Vec<(K, V)> = fields.into_iter().collect();

        let invalid: Vec<String> = pairs
            .iter()
            .map(|(key, _)| key.as_ref())
            .filter(|key| !MUTABLE_FIELDS.contains(key))
            .map(str::to_string)
            .collect();
        if !invalid.is_empty() {
            return Err(ValidationError::InvalidField(invalid).into());
        }

        let mut update = TransactionUpdate::default();
        for (key, value) in &pairs {
            let value = value.as_ref();
            match key.as_ref() {
                FIELD_TIMESTAMP => update.timestamp = Some(parse_timestamp(value)?),
                FIELD_ASSET => update.asset = Some(value.trim().to_string()),
                FIELD_OPERATION => update.operation = Some(value.parse()?),
                FIELD_QUANTITY => update.quantity = Some(value.trim().parse()?),
                FIELD_UNIT_PRICE => update.unit_price = Some(value.trim().parse()?),
                FIELD_TOTAL_COST => update.total_cost = Some(value.trim().parse()?),
                FIELD_FX_RATE => update.fx_rate = Some(value.trim().parse()?),
                other => {
                    return Err(ValidationError::InvalidField(vec![other.to_string()]).into())
                }
            }
        }
        Ok(update)
    }

    /// Returns `true` when no field is set.
    pub fn is_empty(&self) -> bool {
        self.timestamp.is_none()
            && self.asset.is_none()
            && self.operation.is_none()
            && self.quantity.is_none()
            && self.unit_price.is_none()
            && self.total_cost.is_none()
            && self.fx_rate.is_none()
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(asset) = &self.asset {
            validate_asset(asset)?;
        }
        if let Some(quantity) = self.quantity {
            validate_positive(FIELD_QUANTITY, quantity)?;
        }
        if let Some(unit_price) = self.unit_price {
            validate_positive(FIELD_UNIT_PRICE, unit_price)?;
        }
        if let Some(total_cost) = self.total_cost {
            validate_finite(FIELD_TOTAL_COST, total_cost)?;
        }
        if let Some(fx_rate) = self.fx_rate {
            validate_finite(FIELD_FX_RATE, fx_rate)?;
        }
        Ok(())
    }
}

/// Conjunctive filter for transaction queries. Empty matches everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionFilter {
    /// Case-insensitive exact match.
    pub asset: Option<String>,
    pub operation: Option<Operation>,
    /// Inclusive lower bound on the date portion of the timestamp.
    pub date_from: Option<NaiveDate>,
    /// Inclusive upper bound on the date portion of the timestamp.
    pub date_to: Option<NaiveDate>,
}

impl TransactionFilter {
    pub fn asset(mut self, asset: impl Into<String>) -> Self {
        self.asset = Some(asset.into());
        self
    }

    pub fn operation(mut self, operation: Operation) -> Self {
        self.operation = Some(operation);
        self
    }

    pub fn date_from(mut self, date: NaiveDate) -> Self {
        self.date_from = Some(date);
        self
    }

    pub fn date_to(mut self, date: NaiveDate) -> Self {
        self.date_to = Some(date);
        self
    }

    /// Checks whether a transaction satisfies every set criterion.
    pub fn matches(&self, transaction: &Transaction) -> bool {
        let date = transaction.timestamp.date();
        self.asset
            .as_ref()
            .map_or(true, |a| a.trim().eq_ignore_ascii_case(transaction.asset.trim()))
            && self.operation.map_or(true, |op| op == transaction.operation)
            && self.date_from.map_or(true, |from| date >= from)
            && self.date_to.map_or(true, |to| date <= to)
    }
}

fn validate_asset(asset: &str) -> Result<()> {
    if asset.trim().is_empty() {
        return Err(Error::Validation(ValidationError::InvalidInput(
            "Asset cannot be empty".to_string(),
        )));
    }
    Ok(())
}

fn validate_positive(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(Error::Validation(ValidationError::InvalidInput(format!(
            "{} must be a positive number, got {}",
            field, value
        ))));
    }
    Ok(())
}

fn validate_finite(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(Error::Validation(ValidationError::InvalidInput(format!(
            "{} must be a finite number, got {}",
            field, value
        ))));
    }
    Ok(())
}
