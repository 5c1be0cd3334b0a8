//! Orderings used to scan a ledger.
//!
//! Every ordering except [`LotOrdering::ShareCount`] is a lexicographic chain
//! that ends in `form_position` and then the creation sequence, so two distinct
//! lots never compare equal.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::Lot;

/// A total order over lots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LotOrdering {
    /// Adjusted buy date, then sell date (unsold last), then form position.
    BuyDate,
    /// Original buy date, then sell date (unsold last), then form position.
    OriginalBuyDate,
    /// Sell date (unsold last), then original buy date, then form position.
    SellDate,
    /// Ascending share count only.
    ShareCount,
}

impl LotOrdering {
    /// Compare two lots under this ordering.
    #[must_use]
    pub fn compare(self, a: &Lot, b: &Lot) -> Ordering {
        match self {
            Self::BuyDate => a
                .adjusted_buy_date
                .cmp(&b.adjusted_buy_date)
                .then_with(|| cmp_sell_date(a.sell_date, b.sell_date))
                .then_with(|| tie_break(a, b)),
            Self::OriginalBuyDate => a
                .buy_date
                .cmp(&b.buy_date)
                .then_with(|| cmp_sell_date(a.sell_date, b.sell_date))
                .then_with(|| tie_break(a, b)),
            Self::SellDate => cmp_sell_date(a.sell_date, b.sell_date)
                .then_with(|| a.buy_date.cmp(&b.buy_date))
                .then_with(|| tie_break(a, b)),
            Self::ShareCount => a.num_shares.cmp(&b.num_shares),
        }
    }
}

/// Sold lots sort before unsold ones.
fn cmp_sell_date(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn tie_break(a: &Lot, b: &Lot) -> Ordering {
    a.form_position
        .cmp(&b.form_position)
        .then_with(|| a.id.cmp(&b.id))
}
