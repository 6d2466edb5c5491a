//! Tabular access to the objects of one class.

use std::borrow::Cow;

use idfkit_schema::SchemaClass;

use super::Instance;
use crate::{field::FieldInstance, id::ObjectId, object::ObjectInstance};

/// A borrowed table of one class: one row per object, one column per field.
#[derive(Debug, Clone, Copy)]
pub struct ClassView<'a> {
    instance: &'a Instance,
    class: &'a SchemaClass,
    objects: &'a [ObjectId],
}

impl<'a> ClassView<'a> {
    pub(super) const fn new(instance: &'a Instance, class: &'a SchemaClass, objects: &'a [ObjectId]) -> Self {
        Self {
            instance,
            class,
            objects,
        }
    }

    /// Returns the schema class.
    #[must_use]
    pub const fn class(&self) -> &'a SchemaClass {
        self.class
    }

    /// Returns the number of objects.
    #[must_use]
    pub const fn row_count(&self) -> usize {
        self.objects.len()
    }

    /// Returns the number of columns: the declared fields, or more when an
    /// object of an extensible class is longer.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.objects
            .iter()
            .filter_map(|id| self.instance.object(*id))
            .map(ObjectInstance::len)
            .fold(self.class.field_count(), usize::max)
    }

    /// Returns the header of a column.
    #[must_use]
    pub fn header(&self, column: usize) -> Option<Cow<'a, str>> {
        self.class.field_name(column)
    }

    /// Returns the object of a row.
    #[must_use]
    pub fn object(&self, row: usize) -> Option<&'a ObjectInstance> {
        self.instance.object(*self.objects.get(row)?)
    }

    /// Returns the field in a cell.
    #[must_use]
    pub fn field(&self, row: usize, column: usize) -> Option<&'a FieldInstance> {
        let id = self.object(row)?.field(column)?;
        self.instance.field_by_id(id)
    }

    /// Returns the value in a cell. Missing cells have no data.
    #[must_use]
    pub fn data(&self, row: usize, column: usize) -> Option<&'a str> {
        self.field(row, column).map(FieldInstance::value)
    }
}
