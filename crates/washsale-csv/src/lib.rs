//! CSV reading and writing for washsale ledgers
//!
//! A ledger file has one header row followed by one row per lot. Two header
//! spellings are accepted on input (see [`HeaderSchema`]); output uses the
//! current spelling unless [`CsvConfig`] asks for the legacy one.
//!
//! # Example
//!
//! ```
//! use washsale_csv::{read_ledger_str, write_ledger_string, CsvConfig};
//!
//! let input = "\
//! Num Shares,Symbol,Description,Buy Date,Adjusted Buy Date,Basis,Adjusted Basis,Sell Date,\
//! Proceeds,Adjustment Code,Adjustment,Form Position,Buy Lot,Replacement For,Is Replacement,\
//! Loss Processed
//! 10,ABC,A,9/15/2014,,2000,,10/5/2014,1800,,,form1,lot1,,,
//! ";
//!
//! let config = CsvConfig::default();
//! let ledger = read_ledger_str(input, &config).unwrap();
//! assert_eq!(ledger.len(), 1);
//!
//! let output = write_ledger_string(&ledger, &config).unwrap();
//! assert_eq!(
//!     output.lines().last(),
//!     Some("10,ABC,A,09/15/2014,,2000,,10/05/2014,1800,,,form1,lot1,,,")
//! );
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod reader;
pub mod schema;
pub mod writer;

pub use config::{CsvConfig, CsvConfigBuilder};
pub use error::{CsvError, Result};
pub use reader::{read_ledger, read_ledger_file, read_ledger_str};
pub use schema::{Column, HeaderSchema};
pub use writer::{write_ledger, write_ledger_file, write_ledger_string};
