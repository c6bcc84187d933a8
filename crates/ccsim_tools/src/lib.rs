//! # ccsim Tools
//!
//! Command-line tools for working with battle setups:
//! - Setup file inspection and version conversion
//! - Setup import and export as RON or JSON
//! - Fleet cost and battle order reports
//! - Ship list validation

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod document;
pub mod error;
pub mod report;
pub mod validate;
