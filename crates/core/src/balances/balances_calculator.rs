use log::debug;
use std::collections::BTreeMap;

use crate::transactions::{Operation, Transaction};

use super::balances_model::{BalanceAlert, BalanceReport};

#[derive(Debug, Default, Clone, Copy)]
struct Totals {
    bought: f64,
    sold: f64,
}

/// Nets buys against sells per asset and flags negative positions.
///
/// Assets are grouped by their upper-cased identifier. Quantities are summed
/// as plain `f64`; no tolerance is applied, so only a strictly negative net
/// raises an alert.
pub fn calculate_balances(transactions: &[Transaction]) -> BalanceReport {
    let mut totals: BTreeMap<String, Totals> = BTreeMap::new();

    for transaction in transactions {
        let entry = totals
            .entry(transaction.asset.to_ascii_uppercase())
            .or_default();
        match transaction.operation {
            Operation::Buy => entry.bought += transaction.quantity,
            Operation::Sell => entry.sold += transaction.quantity,
        }
    }

    let mut report = BalanceReport::default();
    for (asset, Totals { bought, sold }) in totals {
        let net = bought - sold;
        if net < 0.0 {
            let alert = BalanceAlert::negative_balance(&asset, bought, sold);
            debug!("{}", alert);
            report.alerts.push(alert);
        }
        report.balances.insert(asset, net);
    }

    debug!(
        "Computed balances for {} assets from {} transactions ({} alerts)",
        report.balances.len(),
        transactions.len(),
        report.alerts.len()
    );
    report
}
