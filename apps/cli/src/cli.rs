use chrono::{NaiveDate, NaiveDateTime};
use clap::{Args, Parser, Subcommand, ValueEnum};

use ledger_core::transactions::{NewTransaction, Operation, TransactionFilter, TransactionUpdate};
use ledger_core::utils::time_utils::{parse_date, parse_timestamp};

#[derive(Parser, Debug)]
#[command(
    name = "ledger",
    version,
    about = "Personal ledger for crypto and ETF buy/sell transactions.",
    after_help = "Run 'ledger <command> --help' for command-specific options."
)]
pub struct Cli {
    /// Database file (overrides LEDGER_DB_PATH)
    #[arg(long, global = true)]
    pub db: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Record a new transaction
    Add(AddArgs),
    /// List transactions, most recent first
    List(ListArgs),
    /// Change fields of an existing transaction
    Update(UpdateArgs),
    /// Delete a transaction
    Delete {
        #[arg(long)]
        id: i64,
    },
    /// Net position per asset, with alerts for negative inventories
    Balance {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OperationArg {
    Buy,
    Sell,
}

impl From<OperationArg> for Operation {
    fn from(arg: OperationArg) -> Self {
        match arg {
            OperationArg::Buy => Operation::Buy,
            OperationArg::Sell => Operation::Sell,
        }
    }
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Asset identifier, e.g. BTC or VWRA
    #[arg(long)]
    pub asset: String,
    #[arg(long, value_enum, ignore_case = true)]
    pub operation: OperationArg,
    #[arg(long)]
    pub quantity: f64,
    /// Unit price
    #[arg(long)]
    pub price: f64,
    /// Total cost as paid, including fees
    #[arg(long)]
    pub cost: f64,
    /// Exchange rate at the time of the transaction
    #[arg(long)]
    pub fx_rate: f64,
    /// YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS; defaults to now
    #[arg(long, value_parser = timestamp_arg)]
    pub date: Option<NaiveDateTime>,
}

impl From<AddArgs> for NewTransaction {
    fn from(args: AddArgs) -> Self {
        let new_transaction = NewTransaction::new(
            args.asset,
            args.operation.into(),
            args.quantity,
            args.price,
            args.cost,
            args.fx_rate,
        );
        match args.date {
            Some(date) => new_transaction.with_timestamp(date),
            None => new_transaction,
        }
    }
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Case-insensitive asset match
    #[arg(long)]
    pub asset: Option<String>,
    #[arg(long, value_enum, ignore_case = true)]
    pub operation: Option<OperationArg>,
    /// First date to include (YYYY-MM-DD)
    #[arg(long, value_parser = date_arg)]
    pub from: Option<NaiveDate>,
    /// Last date to include (YYYY-MM-DD)
    #[arg(long, value_parser = date_arg)]
    pub to: Option<NaiveDate>,
    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl ListArgs {
    pub fn filter(&self) -> TransactionFilter {
        TransactionFilter {
            asset: self.asset.clone(),
            operation: self.operation.map(Operation::from),
            date_from: self.from,
            date_to: self.to,
        }
    }
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    #[arg(long)]
    pub id: i64,
    #[arg(long)]
    pub asset: Option<String>,
    #[arg(long, value_enum, ignore_case = true)]
    pub operation: Option<OperationArg>,
    #[arg(long)]
    pub quantity: Option<f64>,
    #[arg(long)]
    pub price: Option<f64>,
    #[arg(long)]
    pub cost: Option<f64>,
    #[arg(long)]
    pub fx_rate: Option<f64>,
    #[arg(long, value_parser = timestamp_arg)]
    pub date: Option<NaiveDateTime>,
}

impl UpdateArgs {
    pub fn changes(&self) -> TransactionUpdate {
        TransactionUpdate {
            timestamp: self.date,
            asset: self.asset.clone(),
            operation: self.operation.map(Operation::from),
            quantity: self.quantity,
            unit_price: self.price,
            total_cost: self.cost,
            fx_rate: self.fx_rate,
        }
    }
}

fn timestamp_arg(value: &str) -> Result<NaiveDateTime, String> {
    parse_timestamp(value).map_err(|e| e.to_string())
}

fn date_arg(value: &str) -> Result<NaiveDate, String> {
    parse_date(value).map_err(|e| e.to_string())
}
