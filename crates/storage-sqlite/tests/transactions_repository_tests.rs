//! Integration tests for the SQLite transaction repository.

mod common;

use chrono::{Duration, NaiveDate, Utc};
use diesel::RunQueryDsl;
use std::sync::Arc;

use common::{setup, trade};
use ledger_core::balances::{BalanceService, BalanceServiceTrait};
use ledger_core::errors::{Error, ValidationError};
use ledger_core::transactions::{
    NewTransaction, Operation, TransactionFilter, TransactionRepositoryTrait,
    TransactionServiceTrait, TransactionUpdate,
};
use ledger_core::utils::time_utils::parse_date;
use ledger_storage_sqlite::errors::StorageError;
use ledger_storage_sqlite::DatabaseError;

#[test]
fn insert_then_query_echoes_fields() {
    let ledger = setup();
    let service = ledger.service();

    let id = service
        .insert_transaction(NewTransaction::new(
            "BTC",
            Operation::Buy,
            0.1,
            35000.0,
            3500.0,
            1000.0,
        ))
        .unwrap();

    let all = service
        .query_transactions(&TransactionFilter::default())
        .unwrap();
    let tx = all.iter().find(|t| t.id == id).expect("inserted row");
    assert_eq!(tx.asset, "BTC");
    assert_eq!(tx.operation, Operation::Buy);
    assert_eq!(tx.quantity, 0.1);
    assert_eq!(tx.unit_price, 35000.0);
    assert_eq!(tx.total_cost, 3500.0);
    assert_eq!(tx.fx_rate, 1000.0);
}

#[test]
fn insert_without_timestamp_uses_current_time() {
    let ledger = setup();
    let id = ledger.repository.insert(trade("ETH", Operation::Buy, 1.0)).unwrap();

    let tx = ledger.repository.get(id).unwrap().unwrap();
    let drift = Utc::now().naive_utc() - tx.timestamp;
    assert!(drift.num_minutes().abs() < 5, "timestamp {} is not now", tx.timestamp);
}

#[test]
fn ids_increase_and_are_never_reused() {
    let ledger = setup();
    let repo = &ledger.repository;

    let first = repo.insert(trade("BTC", Operation::Buy, 1.0)).unwrap();
    let second = repo.insert(trade("BTC", Operation::Buy, 1.0)).unwrap();
    assert!(second > first);

    assert!(repo.delete(second).unwrap());
    let third = repo.insert(trade("BTC", Operation::Buy, 1.0)).unwrap();
    assert!(third > second);
}

#[test]
fn delete_twice_reports_true_then_false() {
    let ledger = setup();
    let service = ledger.service();
    let id = service
        .insert_transaction(trade("SPY", Operation::Buy, 2.0))
        .unwrap();

    assert!(service.delete_transaction(id).unwrap());
    assert!(!service.delete_transaction(id).unwrap());
    assert!(service
        .query_transactions(&TransactionFilter::default())
        .unwrap()
        .iter()
        .all(|t| t.id != id));
}

#[test]
fn empty_update_returns_false_and_leaves_row_unchanged() {
    let ledger = setup();
    let service = ledger.service();
    let id = service
        .insert_transaction(trade("BTC", Operation::Buy, 1.0))
        .unwrap();
    let before = service.get_transaction(id).unwrap();

    assert!(!service
        .update_transaction(id, TransactionUpdate::default())
        .unwrap());
    assert!(!ledger
        .repository
        .update(id, TransactionUpdate::default())
        .unwrap());
    assert_eq!(service.get_transaction(id).unwrap(), before);
}

#[test]
fn update_with_unknown_field_is_rejected_whole() {
    let ledger = setup();
    let service = ledger.service();
    let id = service
        .insert_transaction(trade("BTC", Operation::Buy, 1.0))
        .unwrap();
    let before = service.get_transaction(id).unwrap();

    let err = service
        .update_transaction_fields(
            id,
            &[
                ("quantity".to_string(), "9".to_string()),
                ("badfield".to_string(), "1".to_string()),
            ],
        )
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Validation(ValidationError::InvalidField(ref fields)) if fields == &["badfield"]
    ));
    assert_eq!(service.get_transaction(id).unwrap(), before);
}

#[test]
fn partial_update_only_touches_given_fields() {
    let ledger = setup();
    let service = ledger.service();
    let id = service
        .insert_transaction(
            NewTransaction::new("ETH", Operation::Buy, 2.0, 1500.0, 3010.0, 1.0)
                .with_timestamp_str("2024-01-10T08:00:00")
                .unwrap(),
        )
        .unwrap();

    let updated = service
        .update_transaction(
            id,
            TransactionUpdate {
                operation: Some(Operation::Sell),
                total_cost: Some(2990.0),
                ..Default::default()
            },
        )
        .unwrap();
    assert!(updated);

    let tx = service.get_transaction(id).unwrap().unwrap();
    assert_eq!(tx.operation, Operation::Sell);
    assert_eq!(tx.total_cost, 2990.0);
    assert_eq!(tx.asset, "ETH");
    assert_eq!(tx.quantity, 2.0);
    assert_eq!(tx.unit_price, 1500.0);
    assert_eq!(tx.timestamp.to_string(), "2024-01-10 08:00:00");
}

#[test]
fn update_of_missing_id_returns_false() {
    let ledger = setup();
    let changes = TransactionUpdate {
        fx_rate: Some(1.2),
        ..Default::default()
    };
    assert!(!ledger.repository.update(9999, changes).unwrap());
    assert!(ledger.repository.get(9999).unwrap().is_none());
}

#[test]
fn date_bounds_are_inclusive_on_the_date_part() {
    let ledger = setup();
    let service = ledger.service();
    let id = service
        .insert_transaction(
            trade("BTC", Operation::Buy, 1.0)
                .with_timestamp_str("2024-03-15T23:59:59")
                .unwrap(),
        )
        .unwrap();

    let bracket = TransactionFilter::default()
        .date_from(parse_date("2024-03-15").unwrap())
        .date_to(parse_date("2024-03-15").unwrap());
    let found = service.query_transactions(&bracket).unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, id);

    let before = TransactionFilter::default().date_to(parse_date("2024-03-14").unwrap());
    assert!(service.query_transactions(&before).unwrap().is_empty());

    let after = TransactionFilter::default().date_from(parse_date("2024-03-16").unwrap());
    assert!(service.query_transactions(&after).unwrap().is_empty());
}

#[test]
fn asset_and_operation_filters_combine() {
    let ledger = setup();
    let service = ledger.service();
    let sell_upper = service
        .insert_transaction(trade("BTC", Operation::Sell, 0.5))
        .unwrap();
    let sell_lower = service
        .insert_transaction(trade("btc", Operation::Sell, 0.25))
        .unwrap();
    service
        .insert_transaction(trade("BTC", Operation::Buy, 2.0))
        .unwrap();
    service
        .insert_transaction(trade("ETH", Operation::Sell, 1.0))
        .unwrap();

    let filter = TransactionFilter::default()
        .asset("btc")
        .operation(Operation::Sell);
    let mut ids: Vec<i64> = service
        .query_transactions(&filter)
        .unwrap()
        .into_iter()
        .map(|t| t.id)
        .collect();
    ids.sort();
    assert_eq!(ids, vec![sell_upper, sell_lower]);
}

#[test]
fn results_are_most_recent_first() {
    let ledger = setup();
    let repo = &ledger.repository;
    let base = NaiveDate::from_ymd_opt(2023, 5, 1)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap();

    let oldest = repo
        .insert(trade("A", Operation::Buy, 1.0).with_timestamp(base))
        .unwrap();
    let newest = repo
        .insert(trade("A", Operation::Buy, 1.0).with_timestamp(base + Duration::days(2)))
        .unwrap();
    let middle = repo
        .insert(trade("A", Operation::Buy, 1.0).with_timestamp(base + Duration::days(1)))
        .unwrap();

    let ids: Vec<i64> = repo
        .query(&TransactionFilter::default())
        .unwrap()
        .into_iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(ids, vec![newest, middle, oldest]);
}

#[test]
fn results_with_equal_timestamps_order_by_id_desc() {
    let ledger = setup();
    let repo = &ledger.repository;
    let at = NaiveDate::from_ymd_opt(2023, 6, 1)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap();

    let ids: Vec<i64> = (0..3)
        .map(|_| {
            repo.insert(trade("A", Operation::Buy, 1.0).with_timestamp(at))
                .unwrap()
        })
        .collect();

    let listed: Vec<i64> = repo
        .query(&TransactionFilter::default())
        .unwrap()
        .into_iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(listed, vec![ids[2], ids[1], ids[0]]);
}

#[test]
fn repository_trims_asset_on_write_and_filter() {
    let ledger = setup();
    let repo = &ledger.repository;
    let padded = repo.insert(trade(" btc ", Operation::Buy, 1.0)).unwrap();
    repo.insert(trade("BTC", Operation::Buy, 1.0)).unwrap();
    repo.insert(trade("btc", Operation::Sell, 0.5)).unwrap();
    repo.insert(trade("ETH", Operation::Buy, 1.0)).unwrap();

    assert_eq!(repo.get(padded).unwrap().unwrap().asset, "btc");
    assert_eq!(
        repo.query(&TransactionFilter::default().asset("btc"))
            .unwrap()
            .len(),
        3
    );
    assert_eq!(
        repo.query(&TransactionFilter::default().asset("  BTC"))
            .unwrap()
            .len(),
        3
    );

    let renamed = TransactionUpdate {
        asset: Some(" eth ".to_string()),
        ..Default::default()
    };
    assert!(repo.update(padded, renamed).unwrap());
    assert_eq!(repo.get(padded).unwrap().unwrap().asset, "eth");
}

#[test]
fn balances_are_computed_from_stored_history() {
    let ledger = setup();
    let service = ledger.service();
    for tx in [
        trade("BTC", Operation::Buy, 2.0),
        trade("BTC", Operation::Sell, 0.5),
        trade("ETH", Operation::Buy, 1.0),
        trade("DOGE", Operation::Sell, 1.0),
    ] {
        service.insert_transaction(tx).unwrap();
    }

    let balances = BalanceService::new(ledger.repository.clone());
    let report = balances.compute_balances().unwrap();

    assert_eq!(report.balances["BTC"], 1.5);
    assert_eq!(report.balances["ETH"], 1.0);
    assert_eq!(report.balances["DOGE"], -1.0);
    assert_eq!(report.alerts.len(), 1);
    assert!(report.alerts[0].message.contains("DOGE"));
    assert!(report.alerts[0].message.contains("-1.00000000"));
}

#[test]
fn store_rejects_unknown_operation_values() {
    let ledger = setup();

    let err = ledger
        .db
        .with_connection(|conn| {
            diesel::sql_query(
                "INSERT INTO transactions (asset, operation, quantity, unit_price, total_cost, fx_rate) \
                 VALUES ('BTC', 'HOLD', 1, 1, 1, 1)",
            )
            .execute(conn)
            .map_err(StorageError::from)?;
            Ok(())
        })
        .unwrap_err();

    assert!(
        err.to_string().contains("CHECK constraint failed"),
        "unexpected error: {}",
        err
    );
    assert!(ledger
        .repository
        .query(&TransactionFilter::default())
        .unwrap()
        .is_empty());
}

#[test]
fn opening_a_path_in_a_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("ledger.db");
    let db = Arc::new(ledger_storage_sqlite::Database::new(path.to_str().unwrap()));

    let err = db.get_connection().err().expect("connection should fail");
    assert!(matches!(
        err,
        Error::Database(DatabaseError::ConnectionFailed(_))
    ));
}
