//! Field instances and their reference roles.

use idfkit_schema::{FieldKey, RefType, SchemaField};

use crate::id::{FieldId, ObjectId};

/// The part a field plays in cross-references.
///
/// Computed once from the schema when the field is created. List names are
/// lowercased so that they compare the way EnergyPlus compares them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceRole {
    ref_type: Option<RefType>,
    object_lists: Vec<String>,
    references: Vec<String>,
}

impl ReferenceRole {
    /// Derives the role of a field from its schema definition.
    #[must_use]
    pub fn from_schema(field: Option<&SchemaField>) -> Self {
        let Some(field) = field else {
            return Self::default();
        };

        Self {
            ref_type: field.ref_type(),
            object_lists: field.object_lists().iter().map(|list| list.to_lowercase()).collect(),
            references: field.references().iter().map(|list| list.to_lowercase()).collect(),
        }
    }

    /// Returns the field's role, if any.
    #[must_use]
    pub const fn ref_type(&self) -> Option<RefType> {
        self.ref_type
    }

    /// Returns the lists the field draws its value from.
    #[must_use]
    pub fn object_lists(&self) -> &[String] {
        &self.object_lists
    }

    /// Returns the lists the field's value is a member of.
    #[must_use]
    pub fn references(&self) -> &[String] {
        &self.references
    }

    /// Returns whether the field can take part in the reference graph.
    ///
    /// Node fields are not linked; only `\object-list` and `\reference`
    /// fields are.
    #[must_use]
    pub fn is_linked(&self) -> bool {
        !self.object_lists.is_empty() || !self.references.is_empty()
    }
}

/// One value of one object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldInstance {
    id: FieldId,
    object: ObjectId,
    class: String,
    index: usize,
    key: Option<FieldKey>,
    pub(crate) value: String,
    role: ReferenceRole,
}

impl FieldInstance {
    pub(crate) fn new(
        object: ObjectId,
        class: &str,
        index: usize,
        schema_field: Option<&SchemaField>,
        value: String,
    ) -> Self {
        Self {
            id: FieldId::next(),
            object,
            class: class.to_string(),
            index,
            key: schema_field.map(|field| field.key().clone()),
            value,
            role: ReferenceRole::from_schema(schema_field),
        }
    }

    pub(crate) fn refresh(&mut self, schema_field: Option<&SchemaField>) {
        self.key = schema_field.map(|field| field.key().clone());
        self.role = ReferenceRole::from_schema(schema_field);
    }

    /// Returns the field's identity token.
    #[must_use]
    pub const fn id(&self) -> FieldId {
        self.id
    }

    /// Returns the identity of the owning object.
    #[must_use]
    pub const fn object(&self) -> ObjectId {
        self.object
    }

    /// Returns the lowercase class name of the owning object.
    #[must_use]
    pub fn class(&self) -> &str {
        &self.class
    }

    /// Returns the position of the field within its object.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Returns the schema key the field is paired with.
    ///
    /// Fields past the end of a non-extensible class have no key.
    #[must_use]
    pub const fn key(&self) -> Option<&FieldKey> {
        self.key.as_ref()
    }

    /// Returns the textual value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns the reference role.
    #[must_use]
    pub const fn role(&self) -> &ReferenceRole {
        &self.role
    }

    /// Returns the reference role type.
    #[must_use]
    pub const fn ref_type(&self) -> Option<RefType> {
        self.role.ref_type()
    }
}
