//! Console rendering of ledgers.

use clap::ValueEnum;
use std::fmt;
use std::io::IsTerminal;

use washsale_core::{format_cents, Highlight, Highlights, Ledger, Lot, LotOrdering};

const HEADERS: [&str; 17] = [
    "Num", "Symb", "Desc", "Buy Date", "AdjBuy", "Basis", "AdjBasis", "Sell Date", "Proceeds",
    "AdjCode", "Adj", "Pos", "BuyLot", "ReplFor", "IsRepl", "Done", "Matched",
];

const RESET: &str = "\x1b[0m";

/// When to color highlighted rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Color when stdout is a terminal.
    #[default]
    Auto,
    /// Always color.
    Always,
    /// Never color.
    Never,
}

/// Options for rendering ledger tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderConfig {
    /// Wrap highlighted rows in ANSI color codes.
    pub color: bool,
}

impl RenderConfig {
    /// Resolve a color choice against whether stdout is a terminal.
    #[must_use]
    pub fn from_choice(choice: ColorChoice) -> Self {
        Self::resolve(choice, std::io::stdout().is_terminal())
    }

    /// Resolve a color choice given whether output goes to a terminal.
    #[must_use]
    pub const fn resolve(choice: ColorChoice, is_terminal: bool) -> Self {
        let color = match choice {
            ColorChoice::Auto => is_terminal,
            ColorChoice::Always => true,
            ColorChoice::Never => false,
        };
        Self { color }
    }
}

const fn ansi_color(highlight: Highlight) -> &'static str {
    match highlight {
        Highlight::Loss => "\x1b[31m",
        Highlight::SplitOffLoss => "\x1b[35m",
        Highlight::Replacement => "\x1b[32m",
        Highlight::SplitOffReplacement => "\x1b[34m",
    }
}

/// An aligned text table of a ledger, ordered by original buy date.
///
/// Highlighted lots carry their marker in the `Matched` column and, with
/// color enabled, are drawn in the highlight's color.
pub struct LotTable<'a> {
    ledger: &'a Ledger,
    highlights: &'a Highlights,
    config: RenderConfig,
}

impl<'a> LotTable<'a> {
    /// Create a table over `ledger` with the given highlights.
    #[must_use]
    pub const fn new(ledger: &'a Ledger, highlights: &'a Highlights, config: RenderConfig) -> Self {
        Self {
            ledger,
            highlights,
            config,
        }
    }

    fn rows(&self) -> Vec<(Vec<String>, Option<Highlight>)> {
        self.ledger
            .sorted_ids(LotOrdering::OriginalBuyDate)
            .into_iter()
            .filter_map(|id| self.ledger.get(id))
            .map(|lot| {
                let highlight = self.highlights.classify(lot.id());
                (cells(lot, highlight), highlight)
            })
            .collect()
    }
}

fn cells(lot: &Lot, highlight: Option<Highlight>) -> Vec<String> {
    let flag = |value: bool| if value { "True" } else { "" }.to_string();
    vec![
        lot.num_shares.to_string(),
        lot.symbol.clone(),
        lot.description.clone(),
        lot.buy_date.to_string(),
        lot.adjusted_buy_date.to_string(),
        format_cents(lot.basis),
        format_cents(lot.adjusted_basis),
        lot.sell_date.map(|d| d.to_string()).unwrap_or_default(),
        format_cents(lot.proceeds),
        lot.adjustment_code.clone(),
        format_cents(lot.adjustment),
        lot.form_position.clone(),
        lot.buy_lot.clone(),
        lot.replacement_for.join("|"),
        flag(lot.is_replacement),
        flag(lot.loss_processed),
        highlight.map(|h| h.marker().to_string()).unwrap_or_default(),
    ]
}

fn join_padded(cells: &[String], widths: &[usize]) -> String {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    line.trim_end().to_string()
}

impl fmt::Display for LotTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = self.rows();

        let mut widths: Vec<usize> = HEADERS.iter().map(|h| h.len()).collect();
        for (cells, _) in &rows {
            for (width, cell) in widths.iter_mut().zip(cells) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let header: Vec<String> = HEADERS.iter().map(ToString::to_string).collect();
        writeln!(f, "{}", join_padded(&header, &widths))?;
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        writeln!(f, "{}", join_padded(&rule, &widths))?;

        for (cells, highlight) in &rows {
            let line = join_padded(cells, &widths);
            match highlight {
                Some(h) if self.config.color => writeln!(f, "{}{line}{RESET}", ansi_color(*h))?,
                _ => writeln!(f, "{line}")?,
            }
        }
        Ok(())
    }
}
