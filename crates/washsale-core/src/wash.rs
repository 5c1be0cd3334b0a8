//! Wash application for a matched loss/replacement pair.

use crate::{Ledger, LotId, WashError, WASH_SALE_CODE};

/// Apply a wash sale to a loss lot and its replacement.
///
/// Both lots must hold the same number of shares. The loss lot is marked
/// processed with its disallowed loss recorded as the adjustment. The
/// replacement absorbs that amount into its adjusted basis, inherits the loss
/// lot's holding period by moving its adjusted buy date earlier, and is marked
/// as used.
///
/// # Examples
///
/// ```
/// use washsale_core::{apply_wash, Ledger, Lot};
/// use chrono::NaiveDate;
///
/// let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
/// let mut ledger = Ledger::new();
/// let loss = ledger.push(
///     Lot::new(10, date(2011, 6, 1), 12_000).with_sale(date(2012, 1, 10), 11_000),
/// );
/// let replacement = ledger.push(Lot::new(10, date(2012, 1, 1), 10_000));
///
/// apply_wash(&mut ledger, loss, replacement).unwrap();
///
/// let replacement = ledger.get(replacement).unwrap();
/// assert_eq!(replacement.adjusted_basis, 11_000);
/// assert_eq!(replacement.adjusted_buy_date, date(2011, 5, 23));
/// ```
pub fn apply_wash(
    ledger: &mut Ledger,
    loss_id: LotId,
    replacement_id: LotId,
) -> Result<(), WashError> {
    for id in [loss_id, replacement_id] {
        if ledger.get(id).is_none() {
            return Err(WashError::UnknownLot(id));
        }
    }
    let (loss, replacement) = ledger
        .get_pair_mut(loss_id, replacement_id)
        .ok_or(WashError::SelfWash(loss_id))?;

    let sell_date = loss.sell_date.ok_or(WashError::NotSold(loss_id))?;
    if loss.num_shares != replacement.num_shares {
        return Err(WashError::ShareMismatch {
            loss: loss_id,
            loss_shares: loss.num_shares,
            replacement: replacement_id,
            replacement_shares: replacement.num_shares,
        });
    }

    loss.loss_processed = true;
    loss.adjustment_code = WASH_SALE_CODE.to_string();
    loss.adjustment = loss.adjusted_basis - loss.proceeds;

    replacement.is_replacement = true;
    replacement
        .replacement_for
        .extend(loss.replacement_for.iter().cloned());
    replacement.replacement_for.push(loss.buy_lot.clone());
    replacement.adjusted_basis += loss.adjustment;
    let holding_period = sell_date - loss.adjusted_buy_date;
    replacement.adjusted_buy_date -= holding_period;

    tracing::debug!(
        loss = %loss_id,
        replacement = %replacement_id,
        adjustment = loss.adjustment,
        holding_days = holding_period.num_days(),
        "applied wash"
    );
    Ok(())
}
