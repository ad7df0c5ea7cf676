//! Database models for transactions.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use ledger_core::errors::Error;
use ledger_core::transactions::{NewTransaction, Operation, Transaction, TransactionUpdate};

use crate::errors::StorageError;

/// Database model for transactions
#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TransactionDB {
    pub id: i64,
    pub timestamp: NaiveDateTime,
    pub asset: String,
    pub operation: String,
    pub quantity: f64,
    pub unit_price: f64,
    pub total_cost: f64,
    pub fx_rate: f64,
}

/// Database model for inserting a transaction.
///
/// A `None` timestamp leaves the column out so the table default applies.
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::transactions)]
pub struct NewTransactionDB {
    pub timestamp: Option<NaiveDateTime>,
    pub asset: String,
    pub operation: String,
    pub quantity: f64,
    pub unit_price: f64,
    pub total_cost: f64,
    pub fx_rate: f64,
}

/// Partial update; `None` fields are left out of the `SET` clause.
#[derive(AsChangeset, Debug, Clone, Default)]
#[diesel(table_name = crate::schema::transactions)]
pub struct TransactionChangesetDB {
    pub timestamp: Option<NaiveDateTime>,
    pub asset: Option<String>,
    pub operation: Option<String>,
    pub quantity: Option<f64>,
    pub unit_price: Option<f64>,
    pub total_cost: Option<f64>,
    pub fx_rate: Option<f64>,
}

// Conversion to domain models
impl TryFrom<TransactionDB> for Transaction {
    type Error = Error;

    fn try_from(db: TransactionDB) -> Result<Self, Self::Error> {
        let operation: Operation = db.operation.parse().map_err(|_| {
            StorageError::CorruptRow(format!(
                "transaction {} has invalid operation '{}'",
                db.id, db.operation
            ))
        })?;

        Ok(Self {
            id: db.id,
            timestamp: db.timestamp,
            asset: db.asset,
            operation,
            quantity: db.quantity,
            unit_price: db.unit_price,
            total_cost: db.total_cost,
            fx_rate: db.fx_rate,
        })
    }
}

impl From<NewTransaction> for NewTransactionDB {
    fn from(domain: NewTransaction) -> Self {
        Self {
            timestamp: domain.timestamp,
            asset: domain.asset.trim().to_string(),
            operation: domain.operation.as_str().to_string(),
            quantity: domain.quantity,
            unit_price: domain.unit_price,
            total_cost: domain.total_cost,
            fx_rate: domain.fx_rate,
        }
    }
}

impl From<TransactionUpdate> for TransactionChangesetDB {
    fn from(domain: TransactionUpdate) -> Self {
        Self {
            timestamp: domain.timestamp,
            asset: domain.asset.map(|asset| asset.trim().to_string()),
            operation: domain.operation.map(|op| op.as_str().to_string()),
            quantity: domain.quantity,
            unit_price: domain.unit_price,
            total_cost: domain.total_cost,
            fx_rate: domain.fx_rate,
        }
    }
}
