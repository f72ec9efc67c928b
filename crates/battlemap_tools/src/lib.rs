//! # Battlemap Tools
//!
//! Command-line front end for the placement engine:
//! - Build a generation request from flags and RON settings files
//! - Print the result as JSON or an ASCII preview
//! - List scenarios and their share-link indices

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod ascii;
pub mod error;
pub mod generate;
pub mod report;

pub use error::{CliError, Result};
