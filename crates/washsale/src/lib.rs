//! Wash-sale CLI tools.
//!
//! This crate provides the `wash-sale` command, which reads a CSV of stock
//! lots, applies wash-sale basis and holding-period adjustments, and prints
//! or writes the adjusted lots.
//!
//! # Example Usage
//!
//! ```bash
//! wash-sale lots.csv
//! wash-sale lots.csv -o washed.csv
//! wash-sale lots.csv --interactive --color always
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cmd;
pub mod logger;
pub mod render;
