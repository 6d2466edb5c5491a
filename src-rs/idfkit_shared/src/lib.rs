//! Shared utilities for idfkit
//!
//! This crate holds the pieces that every other idfkit crate needs but that
//! belong to none of them in particular: the user-facing error
//! representation and the progress meter that parsers report through.

pub mod error;
pub mod progress;

pub use error::{AsIdfkitError, Context, ErrorLocation, IdfkitError};
pub use progress::Progress;
