//! Loading IDD and IDF files for idfkit
//!
//! Parsing an IDD takes long enough that each schema is parsed once and
//! cached on disk by EnergyPlus version. [`SchemaCache`] is that cache; it
//! also serves schemas to the IDF parser. The `load_*` functions read files
//! and run the parsers over them.

mod cache;
mod error;
mod file;

pub use cache::{CacheHeader, SchemaCache};
pub use error::LoadError;
pub use file::{
    load_idd, load_idd_with_progress, load_idf, load_idf_with_progress, read_text,
    read_text_with_encoding,
};
