//! Reading ledgers from CSV.

use chrono::NaiveDate;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use washsale_core::{Cents, Ledger, Lot};

use crate::{Column, CsvConfig, CsvError, HeaderSchema, Result};

/// Read a ledger from CSV data.
///
/// The first row must be a header in either the current or the legacy
/// spelling; otherwise [`CsvError::BadHeaders`] is returned before any row is
/// looked at. Rows that are entirely blank are skipped, and short rows are
/// padded with blank cells.
pub fn read_ledger<R: Read>(reader: R, config: &CsvConfig) -> Result<Ledger> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .delimiter(config.delimiter)
        .from_reader(reader);

    let header = reader.headers()?;
    let schema = HeaderSchema::detect(header).ok_or_else(|| CsvError::BadHeaders {
        found: header.iter().collect::<Vec<_>>().join(","),
    })?;
    tracing::debug!(?schema, "detected header schema");

    let mut lots = Vec::new();
    for result in reader.records() {
        let record = result?;
        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        let row = record.position().map_or(0, csv::Position::line);
        lots.push(RowParser::new(&record, row, config).parse()?);
    }

    tracing::debug!(lots = lots.len(), "read ledger");
    Ok(Ledger::from_lots(lots))
}

/// Read a ledger from a CSV file.
pub fn read_ledger_file(path: &Path, config: &CsvConfig) -> Result<Ledger> {
    let file = File::open(path)?;
    read_ledger(file, config)
}

/// Read a ledger from CSV text.
pub fn read_ledger_str(content: &str, config: &CsvConfig) -> Result<Ledger> {
    read_ledger(content.as_bytes(), config)
}

struct RowParser<'a> {
    record: &'a csv::StringRecord,
    row: u64,
    config: &'a CsvConfig,
}

impl<'a> RowParser<'a> {
    const fn new(record: &'a csv::StringRecord, row: u64, config: &'a CsvConfig) -> Self {
        Self {
            record,
            row,
            config,
        }
    }

    fn parse(&self) -> Result<Lot> {
        let num_shares = self.shares()?;
        let buy_date = self
            .date(Column::BuyDate)?
            .ok_or_else(|| self.error(Column::BuyDate, "missing buy date"))?;
        let basis = self.cents(Column::Basis)?;

        let mut lot = Lot::new(num_shares, buy_date, basis)
            .with_symbol(self.cell(Column::Symbol))
            .with_description(self.cell(Column::Description))
            .with_form_position(self.cell(Column::FormPosition))
            .with_buy_lot(self.cell(Column::BuyLot))
            .with_replacement_for(self.list(Column::ReplacementFor))
            .with_is_replacement(self.flag(Column::IsReplacement))
            .with_loss_processed(self.flag(Column::LossProcessed));

        if let Some(adjusted) = self.date(Column::AdjustedBuyDate)? {
            lot = lot.with_adjusted_buy_date(adjusted);
        }
        if !self.cell(Column::AdjustedBasis).is_empty() {
            lot = lot.with_adjusted_basis(self.cents(Column::AdjustedBasis)?);
        }
        let proceeds = self.cents(Column::Proceeds)?;
        if let Some(sell_date) = self.date(Column::SellDate)? {
            lot = lot.with_sale(sell_date, proceeds);
        } else {
            lot.proceeds = proceeds;
        }
        let adjustment = self.cents(Column::Adjustment)?;
        Ok(lot.with_adjustment(self.cell(Column::AdjustmentCode), adjustment))
    }

    fn cell(&self, column: Column) -> &'a str {
        self.record.get(column.index()).map_or("", str::trim)
    }

    fn error(&self, column: Column, message: impl Into<String>) -> CsvError {
        CsvError::InvalidRow {
            row: self.row,
            column,
            message: message.into(),
        }
    }

    fn shares(&self) -> Result<u64> {
        let cell = self.cell(Column::NumShares);
        match cell.parse::<i64>() {
            Ok(n) if n > 0 => Ok(n.unsigned_abs()),
            Ok(n) => Err(self.error(
                Column::NumShares,
                format!("share count must be positive, got {n}"),
            )),
            Err(e) => Err(self.error(Column::NumShares, format!("invalid integer '{cell}': {e}"))),
        }
    }

    fn cents(&self, column: Column) -> Result<Cents> {
        let cell = self.cell(column);
        if cell.is_empty() {
            return Ok(0);
        }
        cell.parse()
            .map_err(|e| self.error(column, format!("invalid integer '{cell}': {e}")))
    }

    fn date(&self, column: Column) -> Result<Option<NaiveDate>> {
        let cell = self.cell(column);
        if cell.is_empty() {
            return Ok(None);
        }
        NaiveDate::parse_from_str(cell, &self.config.date_format)
            .map(Some)
            .map_err(|e| {
                self.error(
                    column,
                    format!(
                        "invalid date '{cell}' for format '{}': {e}",
                        self.config.date_format
                    ),
                )
            })
    }

    fn flag(&self, column: Column) -> bool {
        self.cell(column).eq_ignore_ascii_case("true")
    }

    fn list(&self, column: Column) -> Vec<String> {
        let cell = self.cell(column);
        if cell.is_empty() {
            return Vec::new();
        }
        cell.split(self.config.list_delimiter)
            .map(|entry| entry.trim().to_string())
            .collect()
    }
}
