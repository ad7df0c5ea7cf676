//! SQL helpers for SQLite storage operations.

use chrono::NaiveDate;
use diesel::define_sql_function;
use diesel::sql_types::{Text, Timestamp};

define_sql_function! {
    /// SQLite `lower()`. Folds ASCII letters only.
    fn lower(x: Text) -> Text;
}

define_sql_function! {
    /// SQLite `date()`, yielding the `YYYY-MM-DD` part of a timestamp.
    #[sql_name = "date"]
    fn date_of(x: Timestamp) -> Text;
}

/// Formats a calendar date the way SQLite's `date()` renders it.
pub fn sqlite_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
