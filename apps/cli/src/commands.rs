use std::io::Write;
use std::process::ExitCode;

use ledger_core::balances::BalanceReport;
use ledger_core::transactions::Transaction;

use crate::cli::Command;
use crate::main_lib::AppState;

/// Executes one subcommand, writing its result to `out`.
///
/// A missing transaction on update or delete is reported as a failure exit
/// code rather than an error.
pub fn run(command: Command, state: &AppState, out: &mut dyn Write) -> anyhow::Result<ExitCode> {
    match command {
        Command::Add(args) => {
            let id = state.transaction_service.insert_transaction(args.into())?;
            writeln!(out, "Recorded transaction {}", id)?;
        }
        Command::List(args) => {
            let transactions = state
                .transaction_service
                .query_transactions(&args.filter())?;
            if args.json {
                writeln!(out, "{}", serde_json::to_string_pretty(&transactions)?)?;
            } else {
                write_transactions(out, &transactions)?;
            }
        }
        Command::Update(args) => {
            let changes = args.changes();
            if changes.is_empty() {
                writeln!(out, "Nothing to update")?;
                return Ok(ExitCode::SUCCESS);
            }
            if !state
                .transaction_service
                .update_transaction(args.id, changes)?
            {
                writeln!(out, "Transaction {} not found", args.id)?;
                return Ok(ExitCode::FAILURE);
            }
            writeln!(out, "Updated transaction {}", args.id)?;
        }
        Command::Delete { id } => {
            if !state.transaction_service.delete_transaction(id)? {
                writeln!(out, "Transaction {} not found", id)?;
                return Ok(ExitCode::FAILURE);
            }
            writeln!(out, "Deleted transaction {}", id)?;
        }
        Command::Balance { json } => {
            let report = state.balance_service.compute_balances()?;
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
            } else {
                write_balances(out, &report)?;
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn write_transactions(out: &mut dyn Write, transactions: &[Transaction]) -> std::io::Result<()> {
    if transactions.is_empty() {
        return writeln!(out, "No transactions");
    }
    writeln!(
        out,
        "{:>6}  {:<19}  {:<10}  {:<4}  {:>16}  {:>14}  {:>14}  {:>12}",
        "ID", "TIMESTAMP", "ASSET", "OP", "QUANTITY", "UNIT PRICE", "TOTAL COST", "FX RATE"
    )?;
    for tx in transactions {
        writeln!(
            out,
            "{:>6}  {:<19}  {:<10}  {:<4}  {:>16.8}  {:>14.2}  {:>14.2}  {:>12.4}",
            tx.id,
            tx.timestamp.format("%Y-%m-%d %H:%M:%S"),
            tx.asset,
            tx.operation,
            tx.quantity,
            tx.unit_price,
            tx.total_cost,
            tx.fx_rate
        )?;
    }
    Ok(())
}

fn write_balances(out: &mut dyn Write, report: &BalanceReport) -> std::io::Result<()> {
    if report.balances.is_empty() {
        return writeln!(out, "No transactions");
    }
    for (asset, net) in &report.balances {
        writeln!(out, "{:<10}  {:>16.8}", asset, net)?;
    }
    for alert in &report.alerts {
        writeln!(out, "ALERT: {}", alert)?;
    }
    Ok(())
}
