//! Core types for washsale
//!
//! This crate provides the lot model and the wash-sale matching engine:
//!
//! - [`Lot`] - A tranche of shares with its basis, dates and wash-sale flags
//! - [`Ledger`] - The ordered collection of lots the engine mutates in place
//! - [`LotOrdering`] - The four orderings used to scan a ledger
//! - [`WashSession`] - The driver loop that washes every loss in a ledger
//! - [`LotLogger`] - The port that receives ledger snapshots while washing
//!
//! # Example
//!
//! ```
//! use washsale_core::{wash_all_lots, Ledger, Lot};
//! use chrono::NaiveDate;
//!
//! let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
//!
//! let mut ledger = Ledger::new();
//! let loss = ledger.push(
//!     Lot::new(10, date(2011, 6, 1), 12_000).with_sale(date(2012, 1, 10), 11_000),
//! );
//! let replacement = ledger.push(Lot::new(10, date(2012, 1, 1), 10_000));
//!
//! wash_all_lots(&mut ledger).unwrap();
//!
//! assert_eq!(ledger.get(loss).unwrap().adjustment, 1_000);
//! assert_eq!(ledger.get(replacement).unwrap().adjusted_basis, 11_000);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod ledger;
pub mod logger;
pub mod lot;
pub mod matching;
pub mod money;
pub mod ordering;
pub mod session;
pub mod split;
pub mod wash;

pub use error::{SplitError, WashError};
pub use ledger::Ledger;
pub use logger::{Highlight, Highlights, LotLogger, NullLogger};
pub use lot::{Lot, LotId, WASH_SALE_CODE};
pub use matching::{best_replacement_lot, earliest_loss_lot, WASH_WINDOW_DAYS};
pub use money::{format_cents, scale_cents, Cents};
pub use ordering::LotOrdering;
pub use session::{wash_all_lots, WashSession, WashSummary};
pub use split::split_lot;
pub use wash::apply_wash;

// Re-export commonly used external types
pub use chrono::NaiveDate;
