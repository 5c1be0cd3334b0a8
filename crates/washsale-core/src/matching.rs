//! Loss and replacement lot search.
//!
//! [`earliest_loss_lot`] picks the next loss to wash, and
//! [`best_replacement_lot`] picks the single lot that should absorb it.
//! Both sort the ledger in place as part of the scan.

use chrono::NaiveDate;

use crate::{Ledger, Lot, LotId, LotOrdering};

/// Days before or after a sale in which a purchase triggers a wash sale.
pub const WASH_WINDOW_DAYS: i64 = 30;

/// Find the earliest-sold loss lot whose loss has not been processed.
///
/// Sorts the ledger by sell date. Returns `None` when every loss has been
/// resolved, which is the session's signal to stop.
pub fn earliest_loss_lot(ledger: &mut Ledger) -> Option<LotId> {
    ledger.sort_by(LotOrdering::SellDate);
    ledger
        .iter()
        .find(|lot| lot.is_loss() && !lot.loss_processed)
        .map(Lot::id)
}

/// Find the best replacement lot for a loss.
///
/// Sorts the ledger by original buy date, keeps the lots eligible to replace
/// `loss`, and chooses among those bought (and sold) on the earliest day:
///
/// 1. a lot with exactly as many shares as the loss, else
/// 2. the smallest lot with more shares than the loss, else
/// 3. the largest lot, which the loss will consume entirely.
///
/// Remaining ties go to the lowest form position, then the oldest lot.
/// The returned lot may hold more or fewer shares than the loss; the caller
/// splits whichever side is larger.
pub fn best_replacement_lot(loss: &Lot, ledger: &mut Ledger) -> Option<LotId> {
    let sell_date = loss.sell_date?;
    ledger.sort_by(LotOrdering::OriginalBuyDate);

    let candidates: Vec<&Lot> = ledger
        .iter()
        .filter(|candidate| is_eligible(loss, sell_date, candidate))
        .collect();

    let first = candidates.first()?;
    let mut first_day: Vec<&Lot> = candidates
        .iter()
        .copied()
        .filter(|c| c.buy_date == first.buy_date && c.sell_date == first.sell_date)
        .collect();

    if let [only] = first_day.as_slice() {
        return Some(only.id());
    }

    first_day.sort_by(|a, b| LotOrdering::ShareCount.compare(a, b));
    let chosen = first_day
        .iter()
        .find(|c| c.num_shares >= loss.num_shares)
        .or_else(|| {
            let largest = first_day.last()?.num_shares;
            first_day.iter().find(|c| c.num_shares == largest)
        })?;

    tracing::trace!(
        loss = %loss.id(),
        replacement = %chosen.id(),
        group = first_day.len(),
        "chose replacement from first-day group"
    );
    Some(chosen.id())
}

fn is_eligible(loss: &Lot, sell_date: NaiveDate, candidate: &Lot) -> bool {
    if (sell_date - candidate.buy_date).num_days().abs() > WASH_WINDOW_DAYS {
        return false;
    }
    if candidate.id() == loss.id() && loss.id().is_assigned() {
        return false;
    }
    if !loss.buy_lot.is_empty() && candidate.buy_lot == loss.buy_lot {
        return false;
    }
    // One bite of the apple: a lot replaces at most one loss.
    if candidate.is_replacement {
        return false;
    }
    // Keeps two losses from washing into each other.
    if loss.replacement_for.contains(&candidate.buy_lot) {
        return false;
    }
    match candidate.sell_date {
        Some(candidate_sold) => candidate_sold >= sell_date,
        None => true,
    }
}
