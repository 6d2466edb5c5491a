//! Class definitions within a schema.

use std::borrow::Cow;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{
    field::{FieldKey, SchemaField},
    tag::{Tags, names},
};

/// The repeating tail block of an extensible class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extensible {
    /// Number of fields in one repetition
    pub size: usize,
    /// Index of the first field of the first repetition
    pub start: usize,
}

impl Extensible {
    /// Maps an index at or past `start` onto the declared first repetition.
    #[must_use]
    pub const fn wrap(self, index: usize) -> usize {
        if index < self.start {
            index
        } else {
            self.start + (index - self.start) % self.size
        }
    }

    /// Returns the 1-based repetition an index falls into.
    #[must_use]
    pub const fn repetition(self, index: usize) -> usize {
        if index < self.start {
            0
        } else {
            (index - self.start) / self.size + 1
        }
    }
}

/// One object class declared in the schema, such as `Zone` or `Version`.
///
/// Field order is significant and matches declaration order in the IDD.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaClass {
    obj_class: String,
    obj_class_display: String,
    group: Option<String>,
    fields: IndexMap<FieldKey, SchemaField>,
    tags: Tags,
    comments: Vec<String>,
    comments_special: Vec<String>,
    extensible: Option<Extensible>,
}

impl SchemaClass {
    pub(crate) fn new(
        display_name: String,
        group: Option<String>,
        fields: IndexMap<FieldKey, SchemaField>,
        tags: Tags,
        comments: Vec<String>,
        comments_special: Vec<String>,
    ) -> Self {
        let extensible = Self::compute_extensible(&fields, &tags);

        Self {
            obj_class: display_name.to_lowercase(),
            obj_class_display: display_name,
            group,
            fields,
            tags,
            comments,
            comments_special,
            extensible,
        }
    }

    fn compute_extensible(
        fields: &IndexMap<FieldKey, SchemaField>,
        tags: &Tags,
    ) -> Option<Extensible> {
        let size = tags
            .first(names::EXTENSIBLE)
            .and_then(|value| value.trim().parse::<usize>().ok())
            .filter(|size| *size > 0 && *size <= fields.len())?;

        let start = fields
            .values()
            .position(|field| field.tags().contains(names::BEGIN_EXTENSIBLE))
            .unwrap_or(fields.len() - size);

        Some(Extensible { size, start })
    }

    /// Returns the canonical lowercase class name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.obj_class
    }

    /// Returns the class name as declared.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.obj_class_display
    }

    /// Returns the group the class was declared under.
    #[must_use]
    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    /// Returns the class-level tags.
    #[must_use]
    pub const fn tags(&self) -> &Tags {
        &self.tags
    }

    /// Returns general comments found inside the class declaration.
    #[must_use]
    pub fn comments(&self) -> &[String] {
        &self.comments
    }

    /// Returns special (`!-`) comments found inside the class declaration.
    #[must_use]
    pub fn comments_special(&self) -> &[String] {
        &self.comments_special
    }

    /// Returns the number of declared fields.
    #[must_use]
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Iterates over the declared fields in order.
    pub fn fields(&self) -> impl Iterator<Item = &SchemaField> {
        self.fields.values()
    }

    /// Returns the extensible block, if the class has one.
    #[must_use]
    pub const fn extensible(&self) -> Option<Extensible> {
        self.extensible
    }

    /// Returns the field definition for a position.
    ///
    /// Positions past the declared fields of an extensible class wrap into
    /// the extensible block. Non-extensible classes return `None` past their
    /// last field.
    #[must_use]
    pub fn field(&self, index: usize) -> Option<&SchemaField> {
        if index < self.fields.len() {
            return self.fields.get_index(index).map(|(_, field)| field);
        }

        let extensible = self.extensible?;
        self.fields
            .get_index(extensible.wrap(index))
            .map(|(_, field)| field)
    }

    /// Returns the key of the field at a position, wrapping as `field` does.
    #[must_use]
    pub fn key(&self, index: usize) -> Option<&FieldKey> {
        self.field(index).map(SchemaField::key)
    }

    /// Looks up a field by its positional code.
    #[must_use]
    pub fn field_by_key(&self, key: &str) -> Option<&SchemaField> {
        self.fields.get(&FieldKey::new(key))
    }

    /// Returns the display name of the field at a position.
    ///
    /// Wrapped extensible fields have the first number in their name
    /// replaced by their repetition, so the fifth vertex of a surface reads
    /// `Vertex 5 X-coordinate` instead of repeating the first vertex's name.
    #[must_use]
    pub fn field_name(&self, index: usize) -> Option<Cow<'_, str>> {
        let name = self.field(index)?.name()?;

        match self.extensible {
            Some(extensible) if index >= self.fields.len() => Some(Cow::Owned(
                renumber(name, extensible.repetition(index)),
            )),
            Some(_) | None => Some(Cow::Borrowed(name)),
        }
    }

    /// Returns whether the class may appear at most once.
    #[must_use]
    pub fn is_unique(&self) -> bool {
        self.tags.contains(names::UNIQUE_OBJECT)
    }

    /// Returns whether the class must appear at least once.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.tags.contains(names::REQUIRED_OBJECT)
    }

    /// Returns the `\min-fields` count, or 0.
    #[must_use]
    pub fn min_fields(&self) -> usize {
        self.tags
            .first(names::MIN_FIELDS)
            .and_then(|value| value.trim().parse().ok())
            .unwrap_or(0)
    }

    /// Returns the class documentation joined into one string.
    #[must_use]
    pub fn memo(&self) -> Option<String> {
        let memo = self.tags.values(names::MEMO);
        (!memo.is_empty()).then(|| memo.join(" "))
    }
}

fn renumber(name: &str, repetition: usize) -> String {
    let Some(start) = name.find(|c: char| c.is_ascii_digit()) else {
        return name.to_string();
    };
    let end = name[start..]
        .find(|c: char| !c.is_ascii_digit())
        .map_or(name.len(), |offset| start + offset);

    format!("{}{}{}", &name[..start], repetition, &name[end..])
}
