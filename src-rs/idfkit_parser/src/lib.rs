//! Parsers for EnergyPlus IDD and IDF text
//!
//! Both parsers are iterators. Each step reads one line (or, for an IDF,
//! connects one reference node) and yields a progress percentage, so a
//! caller can drive a long parse from an event loop and stop between
//! steps. `finish` drains the remaining steps and returns the result.

mod config;
mod error;
mod idd;
mod idf;
mod token;

#[cfg(test)]
mod fixture;

pub use config::Config;
pub use error::ParserError;
pub use idd::{IddParser, parse_idd};
pub use idf::{IdfParser, NoSchemas, SchemaSource, parse_idf};

/// Identifies the parser that produced a schema.
///
/// Cached schemas written by a parser with a different version are
/// rejected.
pub const PARSER_VERSION: &str = concat!("idfkit-", env!("CARGO_PKG_VERSION"));
