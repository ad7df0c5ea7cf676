use crate::errors::Result;

use super::balances_model::BalanceReport;

/// Trait for balance engine operations
pub trait BalanceServiceTrait: Send + Sync {
    /// Computes net positions over the full transaction history.
    fn compute_balances(&self) -> Result<BalanceReport>;
}
