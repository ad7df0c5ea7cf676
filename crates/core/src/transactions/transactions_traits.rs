use crate::errors::Result;
use crate::transactions::transactions_model::{
    NewTransaction, Transaction, TransactionFilter, TransactionUpdate,
};

/// Trait for transaction repository operations.
///
/// Every call is a self-contained unit of work against the store.
pub trait TransactionRepositoryTrait: Send + Sync {
    /// Persists a new transaction and returns its store-assigned id.
    fn insert(&self, new_transaction: NewTransaction) -> Result<i64>;

    /// Returns matching transactions, most recent first.
    fn query(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>>;

    fn get(&self, transaction_id: i64) -> Result<Option<Transaction>>;

    /// Returns `true` iff exactly one row was updated.
    fn update(&self, transaction_id: i64, changes: TransactionUpdate) -> Result<bool>;

    /// Returns `true` iff a row existed and was removed.
    fn delete(&self, transaction_id: i64) -> Result<bool>;
}

/// Trait for transaction service operations
pub trait TransactionServiceTrait: Send + Sync {
    fn insert_transaction(&self, new_transaction: NewTransaction) -> Result<i64>;
    fn query_transactions(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>>;
    fn get_transaction(&self, transaction_id: i64) -> Result<Option<Transaction>>;
    fn update_transaction(&self, transaction_id: i64, changes: TransactionUpdate) -> Result<bool>;
    fn update_transaction_fields(
        &self,
        transaction_id: i64,
        fields: &[(String, String)],
    ) -> Result<bool>;
    fn delete_transaction(&self, transaction_id: i64) -> Result<bool>;
}
