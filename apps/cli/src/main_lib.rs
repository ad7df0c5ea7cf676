use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use ledger_core::balances::{BalanceService, BalanceServiceTrait};
use ledger_core::transactions::{TransactionService, TransactionServiceTrait};
use ledger_storage_sqlite::{db, transactions::TransactionRepository, Database};

use crate::config::{Config, LogFormat};

pub struct AppState {
    pub transaction_service: Arc<dyn TransactionServiceTrait>,
    pub balance_service: Arc<dyn BalanceServiceTrait>,
}

/// Installs the global subscriber. Logs go to stderr so command output stays
/// clean on stdout.
pub fn init_tracing(log_format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let registry = tracing_subscriber::registry().with(filter);

    match log_format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .init(),
        LogFormat::Text => registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}

pub fn build_state(config: &Config) -> anyhow::Result<AppState> {
    let db_path = db::init(&config.db_path)?;
    tracing::debug!("Database path in use: {}", db_path);

    let database = Arc::new(Database::new(db_path));
    let transaction_repository = Arc::new(TransactionRepository::new(database));

    let transaction_service = Arc::new(TransactionService::new(transaction_repository.clone()));
    let balance_service = Arc::new(BalanceService::new(transaction_repository));

    Ok(AppState {
        transaction_service,
        balance_service,
    })
}
