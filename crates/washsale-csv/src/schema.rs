//! Column layout and header spellings of a ledger CSV.

use std::fmt;

/// One of the sixteen columns of a ledger CSV, in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    /// Number of shares.
    NumShares,
    /// Ticker symbol.
    Symbol,
    /// Free-form description.
    Description,
    /// Purchase date.
    BuyDate,
    /// Purchase date after wash adjustments.
    AdjustedBuyDate,
    /// Cost basis in cents.
    Basis,
    /// Cost basis after wash adjustments.
    AdjustedBasis,
    /// Sale date.
    SellDate,
    /// Sale proceeds in cents.
    Proceeds,
    /// Adjustment code (`W` for a wash sale).
    AdjustmentCode,
    /// Adjustment amount in cents.
    Adjustment,
    /// Position on the tax form.
    FormPosition,
    /// Purchase-lot identifier.
    BuyLot,
    /// Buy lots this lot replaced.
    ReplacementFor,
    /// Whether the lot has been used as a replacement.
    IsReplacement,
    /// Whether the lot's loss has been resolved.
    LossProcessed,
}

impl Column {
    /// Every column in file order.
    pub const ALL: [Self; 16] = [
        Self::NumShares,
        Self::Symbol,
        Self::Description,
        Self::BuyDate,
        Self::AdjustedBuyDate,
        Self::Basis,
        Self::AdjustedBasis,
        Self::SellDate,
        Self::Proceeds,
        Self::AdjustmentCode,
        Self::Adjustment,
        Self::FormPosition,
        Self::BuyLot,
        Self::ReplacementFor,
        Self::IsReplacement,
        Self::LossProcessed,
    ];

    /// Zero-based position of the column in a row.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The column's header text under `schema`.
    #[must_use]
    pub const fn header(self, schema: HeaderSchema) -> &'static str {
        schema.headers()[self.index()]
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header(HeaderSchema::Current))
    }
}

const CURRENT_HEADERS: [&str; 16] = [
    "Num Shares",
    "Symbol",
    "Description",
    "Buy Date",
    "Adjusted Buy Date",
    "Basis",
    "Adjusted Basis",
    "Sell Date",
    "Proceeds",
    "Adjustment Code",
    "Adjustment",
    "Form Position",
    "Buy Lot",
    "Replacement For",
    "Is Replacement",
    "Loss Processed",
];

const LEGACY_HEADERS: [&str; 16] = [
    "Cnt",
    "Sym",
    "Desc",
    "BuyDate",
    "AdjBuyDate",
    "Basis",
    "AdjBasis",
    "SellDate",
    "Proceeds",
    "AdjCode",
    "Adj",
    "FormPosition",
    "BuyLot",
    "ReplacementFor",
    "IsReplacement",
    "LossProcessed",
];

/// A header spelling the reader accepts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum HeaderSchema {
    /// `Num Shares,Symbol,Description,...`
    #[default]
    Current,
    /// `Cnt,Sym,Desc,...`, written by older versions of the tool.
    Legacy,
}

impl HeaderSchema {
    /// The header row for this schema.
    #[must_use]
    pub const fn headers(self) -> &'static [&'static str; 16] {
        match self {
            Self::Current => &CURRENT_HEADERS,
            Self::Legacy => &LEGACY_HEADERS,
        }
    }

    /// Identify the schema of a header row.
    ///
    /// Cells are compared after trimming surrounding whitespace. Every one of
    /// the sixteen columns must be present, in order, and nothing else.
    pub fn detect<'a, I>(header: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let cells: Vec<&str> = header.into_iter().map(str::trim).collect();
        [Self::Current, Self::Legacy]
            .into_iter()
            .find(|schema| cells.as_slice() == schema.headers().as_slice())
    }
}
