//! Ledger type holding every lot of a wash computation.
//!
//! A [`Ledger`] owns its [`Lot`]s exclusively. It assigns each inserted lot a
//! [`LotId`] from a counter it owns, fills in placeholder buy-lot ids, and only
//! ever grows: splitting appends the split-off lot, nothing is removed.

use std::collections::HashSet;

use serde::Serialize;

use crate::{Lot, LotId, LotOrdering};

/// An ordered collection of lots.
///
/// Equality (`==`) compares contents as a multiset: two ledgers are equal when
/// every lot in one has a content-equal counterpart in the other, regardless of
/// order or id. Use [`Ledger::contents_eq_in_order`] for positional comparison.
///
/// # Examples
///
/// ```
/// use washsale_core::{Ledger, Lot};
/// use chrono::NaiveDate;
///
/// let bought = NaiveDate::from_ymd_opt(2014, 9, 15).unwrap();
/// let ledger = Ledger::from_lots(vec![
///     Lot::new(10, bought, 2000).with_buy_lot("lot1"),
///     Lot::new(5, bought, 1000),
/// ]);
///
/// assert_eq!(ledger.len(), 2);
/// assert_eq!(ledger.lots()[1].buy_lot, "_1");
/// ```
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Ledger {
    lots: Vec<Lot>,
    #[serde(skip)]
    last_sequence: u64,
    #[serde(skip)]
    placeholders: u64,
    #[serde(skip)]
    buy_lots: HashSet<String>,
}

impl Ledger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a ledger from an initial list of lots, in order.
    ///
    /// Placeholder buy lots never reuse a buy lot given anywhere in `lots`,
    /// including lots that come later in the list.
    #[must_use]
    pub fn from_lots(lots: Vec<Lot>) -> Self {
        let mut ledger = Self::new();
        ledger.lots.reserve(lots.len());
        ledger.buy_lots.extend(
            lots.iter()
                .filter(|lot| !lot.buy_lot.is_empty())
                .map(|lot| lot.buy_lot.clone()),
        );
        for lot in lots {
            ledger.push(lot);
        }
        ledger
    }

    /// Append a lot, assigning its id and, if missing, a placeholder buy lot.
    ///
    /// Placeholders are `_1`, `_2`, ... and skip any buy lot already present.
    pub fn push(&mut self, mut lot: Lot) -> LotId {
        self.last_sequence += 1;
        lot.id = LotId::new(self.last_sequence);
        if lot.buy_lot.is_empty() {
            lot.buy_lot = self.next_placeholder();
        }
        self.buy_lots.insert(lot.buy_lot.clone());
        let id = lot.id;
        self.lots.push(lot);
        id
    }

    fn next_placeholder(&mut self) -> String {
        loop {
            self.placeholders += 1;
            let candidate = format!("_{}", self.placeholders);
            if !self.buy_lots.contains(&candidate) {
                return candidate;
            }
        }
    }

    /// Number of lots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lots.len()
    }

    /// Whether the ledger holds no lots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lots.is_empty()
    }

    /// All lots in their current order.
    #[must_use]
    pub fn lots(&self) -> &[Lot] {
        &self.lots
    }

    /// Iterate over lots in their current order.
    pub fn iter(&self) -> std::slice::Iter<'_, Lot> {
        self.lots.iter()
    }

    /// Ids of all lots in their current order.
    #[must_use]
    pub fn ids(&self) -> Vec<LotId> {
        self.lots.iter().map(Lot::id).collect()
    }

    /// Look up a lot by id.
    #[must_use]
    pub fn get(&self, id: LotId) -> Option<&Lot> {
        self.lots.iter().find(|lot| lot.id == id)
    }

    /// Look up a lot by id for mutation.
    pub fn get_mut(&mut self, id: LotId) -> Option<&mut Lot> {
        self.lots.iter_mut().find(|lot| lot.id == id)
    }

    /// Borrow two distinct lots mutably at once.
    ///
    /// Returns `None` if either id is unknown or both ids are the same.
    pub fn get_pair_mut(&mut self, a: LotId, b: LotId) -> Option<(&mut Lot, &mut Lot)> {
        let i = self.position(a)?;
        let j = self.position(b)?;
        if i == j {
            return None;
        }
        if i < j {
            let (left, right) = self.lots.split_at_mut(j);
            Some((&mut left[i], &mut right[0]))
        } else {
            let (left, right) = self.lots.split_at_mut(i);
            Some((&mut right[0], &mut left[j]))
        }
    }

    /// Index of a lot in the current order.
    #[must_use]
    pub fn position(&self, id: LotId) -> Option<usize> {
        self.lots.iter().position(|lot| lot.id == id)
    }

    /// Stable sort of the ledger under one of the lot orderings.
    pub fn sort_by(&mut self, ordering: LotOrdering) {
        self.lots.sort_by(|a, b| ordering.compare(a, b));
    }

    /// Ids in the order `ordering` would put the lots, leaving the ledger as is.
    #[must_use]
    pub fn sorted_ids(&self, ordering: LotOrdering) -> Vec<LotId> {
        let mut lots: Vec<&Lot> = self.lots.iter().collect();
        lots.sort_by(|a, b| ordering.compare(a, b));
        lots.into_iter().map(Lot::id).collect()
    }

    /// Compare lots position by position.
    #[must_use]
    pub fn contents_eq_in_order(&self, other: &Self) -> bool {
        self.lots.len() == other.lots.len()
            && self.lots.iter().zip(&other.lots).all(|(a, b)| a == b)
    }

    /// Total shares across all lots.
    #[must_use]
    pub fn total_shares(&self) -> u64 {
        self.lots.iter().map(|lot| lot.num_shares).sum()
    }

    /// Shares held by loss lots whose loss has not been resolved yet.
    #[must_use]
    pub fn unprocessed_loss_shares(&self) -> u64 {
        self.lots
            .iter()
            .filter(|lot| lot.is_loss() && !lot.loss_processed)
            .map(|lot| lot.num_shares)
            .sum()
    }
}

impl PartialEq for Ledger {
    fn eq(&self, other: &Self) -> bool {
        if self.lots.len() != other.lots.len() {
            return false;
        }
        let mut used = vec![false; other.lots.len()];
        self.lots.iter().all(|lot| {
            let found = other
                .lots
                .iter()
                .enumerate()
                .find(|(i, candidate)| !used[*i] && *candidate == lot)
                .map(|(i, _)| i);
            match found {
                Some(i) => {
                    used[i] = true;
                    true
                }
                None => false,
            }
        })
    }
}

impl Eq for Ledger {}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a Lot;
    type IntoIter = std::slice::Iter<'a, Lot>;

    fn into_iter(self) -> Self::IntoIter {
        self.lots.iter()
    }
}

impl FromIterator<Lot> for Ledger {
    fn from_iter<I: IntoIterator<Item = Lot>>(iter: I) -> Self {
        Self::from_lots(iter.into_iter().collect())
    }
}
