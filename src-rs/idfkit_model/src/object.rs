//! Object instances.

use crate::id::{FieldId, ObjectId};

/// One object of an IDF, such as a single `Zone`.
///
/// Field slots follow the order of the schema class. A slot is `None` when
/// the object was written with fewer fields than the slot's position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectInstance {
    id: ObjectId,
    obj_class: String,
    pub(crate) fields: Vec<Option<FieldId>>,
    comments: Vec<String>,
    comments_special: Vec<String>,
}

impl ObjectInstance {
    pub(crate) fn new(
        id: ObjectId,
        obj_class: &str,
        fields: Vec<Option<FieldId>>,
        comments: Vec<String>,
        comments_special: Vec<String>,
    ) -> Self {
        Self {
            id,
            obj_class: obj_class.to_string(),
            fields,
            comments,
            comments_special,
        }
    }

    /// Returns the object's identity token.
    #[must_use]
    pub const fn id(&self) -> ObjectId {
        self.id
    }

    /// Returns the lowercase class name.
    #[must_use]
    pub fn obj_class(&self) -> &str {
        &self.obj_class
    }

    /// Returns the field slots in order.
    #[must_use]
    pub fn fields(&self) -> &[Option<FieldId>] {
        &self.fields
    }

    /// Returns the field in a slot, if the slot exists and is set.
    #[must_use]
    pub fn field(&self, index: usize) -> Option<FieldId> {
        self.fields.get(index).copied().flatten()
    }

    /// Returns the number of slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns whether the object has no slots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the `!` comments written above the object.
    #[must_use]
    pub fn comments(&self) -> &[String] {
        &self.comments
    }

    /// Returns the `!-` comments written above the object.
    #[must_use]
    pub fn comments_special(&self) -> &[String] {
        &self.comments_special
    }
}

/// An object detached from any instance.
///
/// This is the currency of copy, paste and delete: removing objects hands
/// their data back so that an undo layer can add them again later.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectData {
    /// Class name in any case
    pub class: String,
    /// Field values; `None` marks an unset slot
    pub values: Vec<Option<String>>,
    /// `!` comments
    pub comments: Vec<String>,
    /// `!-` comments
    pub comments_special: Vec<String>,
}

impl ObjectData {
    /// Creates object data with every slot set and no comments.
    pub fn new<I, S>(class: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            class: class.into(),
            values: values.into_iter().map(|value| Some(value.into())).collect(),
            comments: Vec::new(),
            comments_special: Vec::new(),
        }
    }

    /// Returns the value of a slot, treating unset slots as absent.
    #[must_use]
    pub fn value(&self, index: usize) -> Option<&str> {
        self.values.get(index).and_then(Option::as_deref)
    }
}
