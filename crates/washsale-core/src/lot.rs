//! Lot type representing one tranche of shares.
//!
//! A [`Lot`] is a purchase of some shares, optionally followed by their sale.
//! Wash-sale processing mutates the adjusted fields of a lot in place; the
//! original `buy_date` and `basis` are never changed.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::money::{format_cents, Cents};

/// Adjustment code recorded on a loss lot whose loss was disallowed.
pub const WASH_SALE_CODE: &str = "W";

/// Identifier of a lot inside a [`Ledger`](crate::Ledger).
///
/// Ids are handed out by the ledger in insertion order, so they double as the
/// creation sequence used for the final tie-break of every ordering. A lot that
/// has not been inserted into a ledger yet carries [`LotId::UNASSIGNED`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LotId(u64);

impl LotId {
    /// Id of a lot that is not owned by a ledger.
    pub const UNASSIGNED: Self = Self(0);

    /// Create an id from its creation sequence number.
    #[must_use]
    pub const fn new(sequence: u64) -> Self {
        Self(sequence)
    }

    /// The creation sequence number.
    #[must_use]
    pub const fn sequence(self) -> u64 {
        self.0
    }

    /// Whether a ledger has assigned this id.
    #[must_use]
    pub const fn is_assigned(self) -> bool {
        self.0 != 0
    }
}

impl fmt::Display for LotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A tranche of shares bought together and, possibly, sold together.
///
/// # Examples
///
/// ```
/// use washsale_core::Lot;
/// use chrono::NaiveDate;
///
/// let bought = NaiveDate::from_ymd_opt(2014, 9, 15).unwrap();
/// let sold = NaiveDate::from_ymd_opt(2014, 10, 5).unwrap();
///
/// let lot = Lot::new(10, bought, 2000)
///     .with_symbol("ABC")
///     .with_sale(sold, 1800);
///
/// assert!(lot.is_loss());
/// assert_eq!(lot.adjusted_basis, 2000);
/// assert_eq!(lot.adjusted_buy_date, bought);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lot {
    #[serde(skip)]
    pub(crate) id: LotId,
    /// Shares represented by this tranche; always positive.
    pub num_shares: u64,
    /// Ticker symbol (informational).
    pub symbol: String,
    /// Free-form description (informational).
    pub description: String,
    /// Original purchase date.
    pub buy_date: NaiveDate,
    /// Purchase date after any wash-sale holding period carry.
    pub adjusted_buy_date: NaiveDate,
    /// Original cost in cents.
    pub basis: Cents,
    /// Cost in cents after any wash-sale basis step-up.
    pub adjusted_basis: Cents,
    /// Sale date, if sold.
    pub sell_date: Option<NaiveDate>,
    /// Sale proceeds in cents; zero when unsold.
    pub proceeds: Cents,
    /// Adjustment code, [`WASH_SALE_CODE`] once a wash is applied.
    pub adjustment_code: String,
    /// Disallowed loss in cents.
    pub adjustment: Cents,
    /// User-assigned tie-break key.
    pub form_position: String,
    /// Purchase-event identifier shared by lots split from the same purchase.
    pub buy_lot: String,
    /// Buy lots whose losses this lot absorbed, oldest first.
    pub replacement_for: Vec<String>,
    /// Set once this lot has been used as a replacement.
    pub is_replacement: bool,
    /// Set once this lot's loss has been resolved.
    pub loss_processed: bool,
}

impl Lot {
    /// Create an unsold lot. Adjusted fields start equal to the originals.
    #[must_use]
    pub fn new(num_shares: u64, buy_date: NaiveDate, basis: Cents) -> Self {
        Self {
            id: LotId::UNASSIGNED,
            num_shares,
            symbol: String::new(),
            description: String::new(),
            buy_date,
            adjusted_buy_date: buy_date,
            basis,
            adjusted_basis: basis,
            sell_date: None,
            proceeds: 0,
            adjustment_code: String::new(),
            adjustment: 0,
            form_position: String::new(),
            buy_lot: String::new(),
            replacement_for: Vec::new(),
            is_replacement: false,
            loss_processed: false,
        }
    }

    /// Record the sale of this lot.
    #[must_use]
    pub fn with_sale(mut self, sell_date: NaiveDate, proceeds: Cents) -> Self {
        self.sell_date = Some(sell_date);
        self.proceeds = proceeds;
        self
    }

    /// Set the symbol.
    #[must_use]
    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = symbol.into();
        self
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the form position.
    #[must_use]
    pub fn with_form_position(mut self, form_position: impl Into<String>) -> Self {
        self.form_position = form_position.into();
        self
    }

    /// Set the buy lot.
    #[must_use]
    pub fn with_buy_lot(mut self, buy_lot: impl Into<String>) -> Self {
        self.buy_lot = buy_lot.into();
        self
    }

    /// Override the adjusted buy date.
    #[must_use]
    pub const fn with_adjusted_buy_date(mut self, date: NaiveDate) -> Self {
        self.adjusted_buy_date = date;
        self
    }

    /// Override the adjusted basis.
    #[must_use]
    pub const fn with_adjusted_basis(mut self, adjusted_basis: Cents) -> Self {
        self.adjusted_basis = adjusted_basis;
        self
    }

    /// Record a previously applied adjustment.
    #[must_use]
    pub fn with_adjustment(mut self, code: impl Into<String>, adjustment: Cents) -> Self {
        self.adjustment_code = code.into();
        self.adjustment = adjustment;
        self
    }

    /// Set the chain of buy lots this lot replaced.
    #[must_use]
    pub fn with_replacement_for(mut self, replacement_for: Vec<String>) -> Self {
        self.replacement_for = replacement_for;
        self
    }

    /// Mark this lot as already used as a replacement.
    #[must_use]
    pub const fn with_is_replacement(mut self, is_replacement: bool) -> Self {
        self.is_replacement = is_replacement;
        self
    }

    /// Mark this lot's loss as already processed.
    #[must_use]
    pub const fn with_loss_processed(mut self, loss_processed: bool) -> Self {
        self.loss_processed = loss_processed;
        self
    }

    /// The ledger-assigned id of this lot.
    #[must_use]
    pub const fn id(&self) -> LotId {
        self.id
    }

    /// Whether this lot was sold for less than its adjusted basis.
    #[must_use]
    pub const fn is_loss(&self) -> bool {
        self.is_sold() && self.proceeds < self.adjusted_basis
    }

    /// Whether this lot has been sold.
    #[must_use]
    pub const fn is_sold(&self) -> bool {
        self.sell_date.is_some()
    }

    /// Loss in cents as of the adjusted basis, zero for gains and unsold lots.
    #[must_use]
    pub const fn loss_amount(&self) -> Cents {
        if self.is_loss() {
            self.adjusted_basis - self.proceeds
        } else {
            0
        }
    }
}

/// Content equality over every persisted field; the [`LotId`] is ignored.
impl PartialEq for Lot {
    fn eq(&self, other: &Self) -> bool {
        self.num_shares == other.num_shares
            && self.symbol == other.symbol
            && self.description == other.description
            && self.buy_date == other.buy_date
            && self.adjusted_buy_date == other.adjusted_buy_date
            && self.basis == other.basis
            && self.adjusted_basis == other.adjusted_basis
            && self.sell_date == other.sell_date
            && self.proceeds == other.proceeds
            && self.adjustment_code == other.adjustment_code
            && self.adjustment == other.adjustment
            && self.form_position == other.form_position
            && self.buy_lot == other.buy_lot
            && self.replacement_for == other.replacement_for
            && self.is_replacement == other.is_replacement
            && self.loss_processed == other.loss_processed
    }
}

impl Eq for Lot {}

impl fmt::Display for Lot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {} {}",
            self.num_shares,
            self.symbol,
            self.description,
            self.buy_date,
            self.adjusted_buy_date,
            format_cents(self.basis),
            format_cents(self.adjusted_basis),
        )?;
        match self.sell_date {
            Some(date) => write!(f, " {date}")?,
            None => write!(f, " None")?,
        }
        write!(
            f,
            " {} {} {} {} {} {} {} {}",
            format_cents(self.proceeds),
            self.adjustment_code,
            format_cents(self.adjustment),
            self.form_position,
            self.buy_lot,
            self.replacement_for.join("|"),
            self.is_replacement,
            self.loss_processed,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_new_defaults_adjusted_fields() {
        let lot = Lot::new(10, date(2014, 9, 15), 2000);
        assert_eq!(lot.adjusted_buy_date, lot.buy_date);
        assert_eq!(lot.adjusted_basis, lot.basis);
        assert!(lot.sell_date.is_none());
        assert_eq!(lot.proceeds, 0);
        assert!(!lot.id().is_assigned());
    }

    #[test]
    fn test_is_loss() {
        let loss = Lot::new(10, date(2014, 9, 15), 2000).with_sale(date(2014, 10, 5), 1800);
        assert!(loss.is_loss());
        assert_eq!(loss.loss_amount(), 200);

        let gain = Lot::new(10, date(2014, 9, 15), 1000).with_sale(date(2014, 10, 5), 1800);
        assert!(!gain.is_loss());
        assert_eq!(gain.loss_amount(), 0);

        let unsold = Lot::new(10, date(2014, 9, 15), 2000);
        assert!(!unsold.is_sold());
        assert!(!unsold.is_loss());
        assert!(loss.is_sold() && gain.is_sold());
    }

    #[test]
    fn test_is_loss_uses_adjusted_basis() {
        let lot = Lot::new(10, date(2014, 9, 15), 1000)
            .with_adjusted_basis(2000)
            .with_sale(date(2014, 10, 5), 1800);
        assert!(lot.is_loss());

        let stepped_down = Lot::new(10, date(2014, 9, 15), 2000)
            .with_adjusted_basis(1500)
            .with_sale(date(2014, 10, 5), 1800);
        assert!(!stepped_down.is_loss());
    }

    #[test]
    fn test_equality_ignores_id() {
        let mut a = Lot::new(10, date(2014, 9, 15), 2000).with_form_position("form1");
        let b = a.clone();
        a.id = LotId::new(7);
        assert_eq!(a, b);

        let c = b.clone().with_loss_processed(true);
        assert_ne!(b, c);
    }

    #[test]
    fn test_display() {
        let lot = Lot::new(10, date(2014, 9, 15), 2000)
            .with_symbol("ABC")
            .with_description("A")
            .with_sale(date(2014, 10, 5), 1800);
        let text = lot.to_string();
        assert!(text.starts_with("10 ABC A 2014-09-15 2014-09-15 $20.00 $20.00 2014-10-05 $18.00"));
    }
}
