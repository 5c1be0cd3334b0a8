//! Logger port for tracing the wash computation.
//!
//! The session reports every step to a [`LotLogger`] as a message plus the
//! full ledger, with the lots involved in the step marked by [`Highlights`].
//! Implementations decide how (or whether) to show it; the engine never
//! depends on what a logger does.

use serde::{Deserialize, Serialize};

use crate::{Ledger, LotId};

/// The role a highlighted lot plays in the step being reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Highlight {
    /// The loss lot being washed.
    Loss,
    /// The remainder split off a loss lot.
    SplitOffLoss,
    /// The replacement lot absorbing the loss.
    Replacement,
    /// The remainder split off a replacement lot.
    SplitOffReplacement,
}

impl Highlight {
    /// Single-character marker used when rendering.
    #[must_use]
    pub const fn marker(self) -> char {
        match self {
            Self::Loss => '*',
            Self::SplitOffLoss => 'x',
            Self::Replacement => 'o',
            Self::SplitOffReplacement => '+',
        }
    }
}

/// Sets of lots to highlight in a ledger snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Highlights {
    /// Loss lots.
    pub loss: Vec<LotId>,
    /// Lots split off a loss lot.
    pub split_off_loss: Vec<LotId>,
    /// Replacement lots.
    pub replacement: Vec<LotId>,
    /// Lots split off a replacement lot.
    pub split_off_replacement: Vec<LotId>,
}

impl Highlights {
    /// No highlights.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Add a loss lot.
    #[must_use]
    pub fn loss(mut self, id: LotId) -> Self {
        self.loss.push(id);
        self
    }

    /// Add a lot split off a loss.
    #[must_use]
    pub fn split_off_loss(mut self, id: LotId) -> Self {
        self.split_off_loss.push(id);
        self
    }

    /// Add a replacement lot.
    #[must_use]
    pub fn replacement(mut self, id: LotId) -> Self {
        self.replacement.push(id);
        self
    }

    /// Add a lot split off a replacement.
    #[must_use]
    pub fn split_off_replacement(mut self, id: LotId) -> Self {
        self.split_off_replacement.push(id);
        self
    }

    /// Classify a lot. A lot in several sets takes the first of loss,
    /// split-off loss, replacement, split-off replacement.
    #[must_use]
    pub fn classify(&self, id: LotId) -> Option<Highlight> {
        if self.loss.contains(&id) {
            Some(Highlight::Loss)
        } else if self.split_off_loss.contains(&id) {
            Some(Highlight::SplitOffLoss)
        } else if self.replacement.contains(&id) {
            Some(Highlight::Replacement)
        } else if self.split_off_replacement.contains(&id) {
            Some(Highlight::SplitOffReplacement)
        } else {
            None
        }
    }

    /// Whether nothing is highlighted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.loss.is_empty()
            && self.split_off_loss.is_empty()
            && self.replacement.is_empty()
            && self.split_off_replacement.is_empty()
    }
}

/// Receives ledger snapshots while a session runs.
pub trait LotLogger {
    /// Report a step: a message, the full ledger, and the lots involved.
    fn print_lots(&mut self, message: &str, ledger: &Ledger, highlights: &Highlights);
}

/// A logger that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullLogger;

impl LotLogger for NullLogger {
    fn print_lots(&mut self, _message: &str, _ledger: &Ledger, _highlights: &Highlights) {}
}
