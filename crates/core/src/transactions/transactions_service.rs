use log::debug;
use std::sync::Arc;

use crate::errors::Result;

use super::transactions_model::{NewTransaction, Transaction, TransactionFilter, TransactionUpdate};
use super::transactions_traits::{TransactionRepositoryTrait, TransactionServiceTrait};

/// Validating front for the ledger repository.
pub struct TransactionService {
    repository: Arc<dyn TransactionRepositoryTrait>,
}

impl TransactionService {
    pub fn new(repository: Arc<dyn TransactionRepositoryTrait>) -> Self {
        TransactionService { repository }
    }
}

impl TransactionServiceTrait for TransactionService {
    fn insert_transaction(&self, mut new_transaction: NewTransaction) -> Result<i64> {
        new_transaction.validate()?;
        new_transaction.asset = new_transaction.asset.trim().to_string();

        let id = self.repository.insert(new_transaction)?;
        debug!("Recorded transaction {}", id);
        Ok(id)
    }

    fn query_transactions(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>> {
        self.repository.query(filter)
    }

    fn get_transaction(&self, transaction_id: i64) -> Result<Option<Transaction>> {
        self.repository.get(transaction_id)
    }

    fn update_transaction(
        &self,
        transaction_id: i64,
        mut changes: TransactionUpdate,
    ) -> Result<bool> {
        if changes.is_empty() {
            debug!("Empty update for transaction {}, nothing to do", transaction_id);
            return Ok(false);
        }
        changes.validate()?;
        if let Some(asset) = changes.asset.as_mut() {
            *asset = asset.trim().to_string();
        }

        self.repository.update(transaction_id, changes)
    }

    fn update_transaction_fields(
        &self,
        transaction_id: i64,
        fields: &[(String, String)],
    ) -> Result<bool> {
        let changes = TransactionUpdate::from_fields(fields.iter().map(|(k, v)| (k, v)))?;
        self.update_transaction(transaction_id, changes)
    }

    fn delete_transaction(&self, transaction_id: i64) -> Result<bool> {
        let deleted = self.repository.delete(transaction_id)?;
        if !deleted {
            debug!("Transaction {} not found, nothing deleted", transaction_id);
        }
        Ok(deleted)
    }
}
