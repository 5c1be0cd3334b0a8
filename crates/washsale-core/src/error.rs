//! Engine error types.

use thiserror::Error;

use crate::LotId;

/// Error returned when a lot cannot be split.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SplitError {
    /// The lot is not in the ledger.
    #[error("lot {0} is not in the ledger")]
    UnknownLot(LotId),
    /// The requested share count would leave one side empty.
    #[error("cannot split {num_shares} shares of lot {id} at {requested}")]
    InvalidShareCount {
        /// The lot being split.
        id: LotId,
        /// Shares in the lot.
        num_shares: u64,
        /// Shares requested for the original side.
        requested: u64,
    },
}

/// Error returned when a wash cannot be applied to a pair of lots.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WashError {
    /// A lot is not in the ledger.
    #[error("lot {0} is not in the ledger")]
    UnknownLot(LotId),
    /// A lot cannot wash against itself.
    #[error("lot {0} cannot replace itself")]
    SelfWash(LotId),
    /// The loss lot was never sold.
    #[error("loss lot {0} has no sell date")]
    NotSold(LotId),
    /// The pair must cover the same number of shares.
    #[error("share mismatch: loss {loss} has {loss_shares} shares, replacement {replacement} has {replacement_shares}")]
    ShareMismatch {
        /// The loss lot.
        loss: LotId,
        /// Shares in the loss lot.
        loss_shares: u64,
        /// The replacement lot.
        replacement: LotId,
        /// Shares in the replacement lot.
        replacement_shares: u64,
    },
    /// Splitting one side of the pair failed.
    #[error(transparent)]
    Split(#[from] SplitError),
}
