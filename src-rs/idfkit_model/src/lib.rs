//! Instance model for EnergyPlus Input Data Files (IDF)
//!
//! An [`Instance`] holds the objects of one IDF against the schema they were
//! read with. Alongside the objects it keeps two derived structures current
//! on every edit: a [`SearchIndex`] over field values and a
//! [`ReferenceGraph`] linking the fields that name other objects to the
//! fields that declare those names.

mod encoding;
mod field;
mod id;
mod instance;
mod object;
pub mod options;
mod reference;
mod search;

pub use encoding::TextEncoding;
pub use field::{FieldInstance, ReferenceRole};
pub use id::{FieldId, ObjectId};
pub use instance::{
    ClassView, EditError, FieldChange, Instance, ReferenceConnector, ReferenceEntry, ReferenceTree,
};
pub use object::{ObjectData, ObjectInstance};
pub use reference::ReferenceGraph;
pub use search::{GEOMETRY_CLASSES, ListRole, SearchEntry, SearchHit, SearchIndex, SearchQuery};
