//! Schema model for EnergyPlus Input Data Dictionary (IDD) files
//!
//! An IDD declares every object class an EnergyPlus input file may contain,
//! the ordered fields of each class, and the backslash tags annotating those
//! fields (type, units, bounds, defaults, cross-reference roles). The types
//! in this crate are built once by the IDD parser and then shared read-only
//! by every object instance of an IDF.

mod builder;
mod class;
mod error;
mod field;
mod schema;
pub mod tag;
mod units;

pub use builder::SchemaClassBuilder;
pub use class::{Extensible, SchemaClass};
pub use error::{SchemaError, SchemaErrorKind};
pub use field::{Bound, FieldKey, FieldKind, RefType, SchemaField, UnitsSpec};
pub use schema::{Schema, version_key};
pub use tag::{TagValue, Tags};
pub use units::{Conversion, UnitsRegistry, format_number};
