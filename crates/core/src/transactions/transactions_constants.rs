/// Canonical stored value for a buy.
pub const OPERATION_BUY: &str = "BUY";

/// Canonical stored value for a sell.
pub const OPERATION_SELL: &str = "SELL";

pub const FIELD_TIMESTAMP: &str = "timestamp";
pub const FIELD_ASSET: &str = "asset";
pub const FIELD_OPERATION: &str = "operation";
pub const FIELD_QUANTITY: &str = "quantity";
pub const FIELD_UNIT_PRICE: &str = "unit_price";
pub const FIELD_TOTAL_COST: &str = "total_cost";
pub const FIELD_FX_RATE: &str = "fx_rate";

/// Fields a caller may change after a transaction is recorded.
pub const MUTABLE_FIELDS: [&str; 7] = [
    FIELD_TIMESTAMP,
    FIELD_ASSET,
    FIELD_OPERATION,
    FIELD_QUANTITY,
    FIELD_UNIT_PRICE,
    FIELD_TOTAL_COST,
    FIELD_FX_RATE,
];
