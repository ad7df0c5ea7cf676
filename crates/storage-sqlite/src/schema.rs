diesel::table! {
    transactions (id) {
        id -> BigInt,
        timestamp -> Timestamp,
        asset -> Text,
        operation -> Text,
        quantity -> Double,
        unit_price -> Double,
        total_cost -> Double,
        fx_rate -> Double,
    }
}
