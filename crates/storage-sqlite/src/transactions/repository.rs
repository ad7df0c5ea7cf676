use diesel::prelude::*;
use log::debug;
use std::sync::Arc;

use ledger_core::transactions::{
    NewTransaction, Transaction, TransactionFilter, TransactionRepositoryTrait, TransactionUpdate,
};
use ledger_core::Result;

use super::model::{NewTransactionDB, TransactionChangesetDB, TransactionDB};
use crate::db::Database;
use crate::errors::StorageError;
use crate::schema::transactions;
use crate::utils::{date_of, lower, sqlite_date};

pub struct TransactionRepository {
    db: Arc<Database>,
}

impl TransactionRepository {
    pub fn new(db: Arc<Database>) -> Self {
        TransactionRepository { db }
    }
}

impl TransactionRepositoryTrait for TransactionRepository {
    fn insert(&self, new_transaction: NewTransaction) -> Result<i64> {
        let new_transaction_db: NewTransactionDB = new_transaction.into();

        self.db.with_connection(|conn| {
            let new_id = diesel::insert_into(transactions::table)
                .values(&new_transaction_db)
                .returning(transactions::id)
                .get_result::<i64>(conn)
                .map_err(StorageError::from)?;
            debug!("Inserted transaction {}", new_id);
            Ok(new_id)
        })
    }

    fn query(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>> {
        self.db.with_connection(|conn| {
            let mut query = transactions::table
                .select(TransactionDB::as_select())
                .into_boxed();

            if let Some(asset) = &filter.asset {
                let asset = asset.trim().to_ascii_lowercase();
                query = query.filter(lower(transactions::asset).eq(asset));
            }
            if let Some(operation) = filter.operation {
                query = query.filter(transactions::operation.eq(operation.as_str()));
            }
            if let Some(date_from) = filter.date_from {
                query = query.filter(date_of(transactions::timestamp).ge(sqlite_date(date_from)));
            }
            if let Some(date_to) = filter.date_to {
                query = query.filter(date_of(transactions::timestamp).le(sqlite_date(date_to)));
            }

            let rows = query
                .order((transactions::timestamp.desc(), transactions::id.desc()))
                .load::<TransactionDB>(conn)
                .map_err(StorageError::from)?;
            debug!("Query {:?} matched {} transactions", filter, rows.len());

            rows.into_iter().map(Transaction::try_from).collect()
        })
    }

    fn get(&self, transaction_id: i64) -> Result<Option<Transaction>> {
        self.db.with_connection(|conn| {
            transactions::table
                .find(transaction_id)
                .select(TransactionDB::as_select())
                .first::<TransactionDB>(conn)
                .optional()
                .map_err(StorageError::from)?
                .map(Transaction::try_from)
                .transpose()
        })
    }

    fn update(&self, transaction_id: i64, changes: TransactionUpdate) -> Result<bool> {
        if changes.is_empty() {
            return Ok(false);
        }
        let changeset: TransactionChangesetDB = changes.into();

        self.db.with_connection(|conn| {
            let affected = diesel::update(transactions::table.find(transaction_id))
                .set(&changeset)
                .execute(conn)
                .map_err(StorageError::from)?;
            Ok(affected == 1)
        })
    }

    fn delete(&self, transaction_id: i64) -> Result<bool> {
        self.db.with_connection(|conn| {
            let affected = diesel::delete(transactions::table.find(transaction_id))
                .execute(conn)
                .map_err(StorageError::from)?;
            Ok(affected > 0)
        })
    }
}
