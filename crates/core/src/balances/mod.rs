//! Balance engine - per-asset net positions and negative-inventory alerts.

mod balances_calculator;
mod balances_model;
mod balances_service;
mod balances_traits;


pub use balances_calculator::calculate_balances;
pub use balances_model::{BalanceAlert, BalanceReport};
pub use balances_service::BalanceService;
pub use balances_traits::BalanceServiceTrait;
