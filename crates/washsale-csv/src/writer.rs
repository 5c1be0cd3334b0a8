//! Writing ledgers as CSV.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use washsale_core::{Cents, Ledger, Lot};

use crate::{CsvConfig, Result};

/// Write a ledger as CSV, lots in their current order.
///
/// Default values are left blank so that files stay readable: zero amounts,
/// an adjusted basis equal to the basis, an adjusted buy date equal to the
/// buy date, and false flags.
pub fn write_ledger<W: Write>(ledger: &Ledger, writer: W, config: &CsvConfig) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(config.delimiter)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    writer.write_record(config.output_schema.headers())?;
    for lot in ledger {
        writer.write_record(lot_record(lot, config))?;
    }
    writer.flush()?;
    tracing::debug!(lots = ledger.len(), schema = ?config.output_schema, "wrote ledger");
    Ok(())
}

/// Write a ledger to a CSV file, replacing any existing file.
pub fn write_ledger_file(ledger: &Ledger, path: &Path, config: &CsvConfig) -> Result<()> {
    let file = File::create(path)?;
    write_ledger(ledger, file, config)
}

/// Render a ledger as CSV text.
pub fn write_ledger_string(ledger: &Ledger, config: &CsvConfig) -> Result<String> {
    let mut buffer = Vec::new();
    write_ledger(ledger, &mut buffer, config)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

fn lot_record(lot: &Lot, config: &CsvConfig) -> [String; 16] {
    let date = |d: chrono::NaiveDate| d.format(&config.date_format).to_string();
    let adjusted_buy_date = if lot.adjusted_buy_date == lot.buy_date {
        String::new()
    } else {
        date(lot.adjusted_buy_date)
    };
    let adjusted_basis = if lot.adjusted_basis == lot.basis {
        String::new()
    } else {
        lot.adjusted_basis.to_string()
    };

    [
        lot.num_shares.to_string(),
        lot.symbol.clone(),
        lot.description.clone(),
        date(lot.buy_date),
        adjusted_buy_date,
        cents(lot.basis),
        adjusted_basis,
        lot.sell_date.map(date).unwrap_or_default(),
        cents(lot.proceeds),
        lot.adjustment_code.clone(),
        cents(lot.adjustment),
        lot.form_position.clone(),
        lot.buy_lot.clone(),
        lot.replacement_for
            .join(config.list_delimiter.to_string().as_str()),
        flag(lot.is_replacement),
        flag(lot.loss_processed),
    ]
}

fn cents(value: Cents) -> String {
    if value == 0 {
        String::new()
    } else {
        value.to_string()
    }
}

fn flag(value: bool) -> String {
    if value { "True" } else { "" }.to_string()
}
