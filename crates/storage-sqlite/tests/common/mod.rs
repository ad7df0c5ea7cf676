#![allow(dead_code)]

use std::sync::Arc;

use ledger_core::transactions::{NewTransaction, Operation, TransactionService};
use ledger_storage_sqlite::transactions::TransactionRepository;
use ledger_storage_sqlite::{init, Database};
use tempfile::TempDir;

pub struct TestLedger {
    // Keeps the directory alive for the duration of the test.
    pub dir: TempDir,
    pub db: Arc<Database>,
    pub repository: Arc<TransactionRepository>,
}

impl TestLedger {
    pub fn db_path(&self) -> String {
        self.db.path().to_string()
    }

    pub fn service(&self) -> TransactionService {
        TransactionService::new(self.repository.clone())
    }
}

pub fn setup() -> TestLedger {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("data").join("ledger.db");
    let db_path = init(path.to_str().unwrap()).expect("init database");
    let db = Arc::new(Database::new(db_path));
    let repository = Arc::new(TransactionRepository::new(db.clone()));
    TestLedger {
        dir,
        db,
        repository,
    }
}

pub fn trade(asset: &str, operation: Operation, quantity: f64) -> NewTransaction {
    NewTransaction::new(asset, operation, quantity, 100.0, quantity * 100.0, 1.0)
}
