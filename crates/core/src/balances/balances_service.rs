use std::sync::Arc;

use crate::errors::Result;
use crate::transactions::{TransactionFilter, TransactionRepositoryTrait};

use super::balances_calculator::calculate_balances;
use super::balances_model::BalanceReport;
use super::balances_traits::BalanceServiceTrait;

pub struct BalanceService {
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
}

impl BalanceService {
    pub fn new(transaction_repository: Arc<dyn TransactionRepositoryTrait>) -> Self {
        BalanceService {
            transaction_repository,
        }
    }
}

impl BalanceServiceTrait for BalanceService {
    fn compute_balances(&self) -> Result<BalanceReport> {
        let transactions = self
            .transaction_repository
            .query(&TransactionFilter::default())?;
        Ok(calculate_balances(&transactions))
    }
}
