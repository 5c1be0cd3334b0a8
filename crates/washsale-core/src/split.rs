//! Proportional lot splitting.

use crate::money::scale_cents;
use crate::{Ledger, LotId, SplitError};

/// Split a lot so that it keeps `num_shares` shares.
///
/// The remaining shares move to a copy of the lot that is appended to the
/// ledger. `basis`, `adjusted_basis`, `proceeds` and `adjustment` are scaled
/// on each side by its share of the original and rounded to the nearest cent
/// independently, so each pair sums to within one cent of the original.
///
/// Returns the id of the split-off lot.
///
/// # Examples
///
/// ```
/// use washsale_core::{split_lot, Ledger, Lot};
/// use chrono::NaiveDate;
///
/// let bought = NaiveDate::from_ymd_opt(2011, 6, 1).unwrap();
/// let mut ledger = Ledger::new();
/// let id = ledger.push(Lot::new(10, bought, 12_000));
///
/// let rest = split_lot(&mut ledger, id, 6).unwrap();
///
/// assert_eq!(ledger.get(id).unwrap().num_shares, 6);
/// assert_eq!(ledger.get(id).unwrap().basis, 7_200);
/// assert_eq!(ledger.get(rest).unwrap().num_shares, 4);
/// assert_eq!(ledger.get(rest).unwrap().basis, 4_800);
/// ```
pub fn split_lot(ledger: &mut Ledger, id: LotId, num_shares: u64) -> Result<LotId, SplitError> {
    let lot = ledger.get_mut(id).ok_or(SplitError::UnknownLot(id))?;
    let total = lot.num_shares;
    if num_shares == 0 || num_shares >= total {
        return Err(SplitError::InvalidShareCount {
            id,
            num_shares: total,
            requested: num_shares,
        });
    }
    let remainder = total - num_shares;

    let mut new_lot = lot.clone();
    new_lot.num_shares = remainder;
    new_lot.basis = scale_cents(lot.basis, remainder, total);
    new_lot.adjusted_basis = scale_cents(lot.adjusted_basis, remainder, total);
    new_lot.proceeds = scale_cents(lot.proceeds, remainder, total);
    new_lot.adjustment = scale_cents(lot.adjustment, remainder, total);

    lot.num_shares = num_shares;
    lot.basis = scale_cents(lot.basis, num_shares, total);
    lot.adjusted_basis = scale_cents(lot.adjusted_basis, num_shares, total);
    lot.proceeds = scale_cents(lot.proceeds, num_shares, total);
    lot.adjustment = scale_cents(lot.adjustment, num_shares, total);

    let new_id = ledger.push(new_lot);
    tracing::debug!(
        lot = %id,
        split_off = %new_id,
        kept = num_shares,
        remainder,
        "split lot"
    );
    Ok(new_id)
}
