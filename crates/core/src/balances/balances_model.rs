//! Balance engine models.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Net positions per asset plus any inconsistencies found while netting them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceReport {
    /// Asset (upper-cased) to net quantity, bought minus sold.
    pub balances: BTreeMap<String, f64>,
    /// One entry per asset with a negative net quantity, in asset order.
    pub alerts: Vec<BalanceAlert>,
}

/// Raised when more of an asset has been sold than bought.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceAlert {
    pub asset: String,
    pub net_quantity: f64,
    pub total_bought: f64,
    pub total_sold: f64,
    pub message: String,
}

impl BalanceAlert {
    pub fn negative_balance(asset: &str, total_bought: f64, total_sold: f64) -> Self {
        let net_quantity = total_bought - total_sold;
        let message = format!(
            "Negative balance for {}: {:.8} (bought {:.8}, sold {:.8})",
            asset, net_quantity, total_bought, total_sold
        );
        Self {
            asset: asset.to_string(),
            net_quantity,
            total_bought,
            total_sold,
            message,
        }
    }
}

impl fmt::Display for BalanceAlert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
