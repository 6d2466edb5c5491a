//! Incremental construction of schema classes.

use indexmap::IndexMap;

use crate::{
    class::SchemaClass,
    field::{FieldKey, SchemaField},
    tag::Tags,
};

/// Accumulates a class declaration one field and one tag at a time.
///
/// This mirrors how a class is written in an IDD: the class name comes
/// first, then fields, and every tag belongs to the most recently declared
/// field. Tags seen before any field belong to the class itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaClassBuilder {
    display_name: String,
    fields: Vec<(FieldKey, Tags)>,
    tags: Tags,
    comments: Vec<String>,
    comments_special: Vec<String>,
}

impl SchemaClassBuilder {
    /// Starts a class with the given display name.
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            fields: Vec::new(),
            tags: Tags::new(),
            comments: Vec::new(),
            comments_special: Vec::new(),
        }
    }

    /// Returns the class name as declared.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Returns the number of fields declared so far.
    #[must_use]
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Declares the next field.
    pub fn push_field(&mut self, key: impl AsRef<str>) {
        self.fields.push((FieldKey::new(key), Tags::new()));
    }

    /// Adds a tag to the last declared field, or to the class if no field
    /// has been declared yet.
    pub fn add_tag(&mut self, keyword: impl Into<String>, value: Option<String>) {
        match self.fields.last_mut() {
            Some((_, tags)) => tags.insert(keyword, value),
            None => self.tags.insert(keyword, value),
        }
    }

    /// Adds a general comment.
    pub fn add_comment(&mut self, comment: impl Into<String>) {
        self.comments.push(comment.into());
    }

    /// Adds a special (`!-`) comment.
    pub fn add_special_comment(&mut self, comment: impl Into<String>) {
        self.comments_special.push(comment.into());
    }

    /// Adds a class-level tag, chaining.
    #[must_use]
    pub fn class_tag(mut self, keyword: &str, value: Option<&str>) -> Self {
        self.tags.insert(keyword, value.map(str::to_string));
        self
    }

    /// Declares a field with its tags, chaining.
    #[must_use]
    pub fn field(mut self, key: &str, tags: &[(&str, Option<&str>)]) -> Self {
        self.push_field(key);
        for (keyword, value) in tags {
            self.add_tag(*keyword, value.map(str::to_string));
        }
        self
    }

    /// Finishes the class, placing it in `group`.
    ///
    /// A key declared twice keeps its first declaration.
    #[must_use]
    pub fn build(self, group: Option<String>) -> SchemaClass {
        let mut fields = IndexMap::with_capacity(self.fields.len());
        for (key, tags) in self.fields {
            let index = fields.len();
            fields
                .entry(key.clone())
                .or_insert_with(|| SchemaField::new(key, index, tags));
        }

        SchemaClass::new(
            self.display_name,
            group,
            fields,
            self.tags,
            self.comments,
            self.comments_special,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::names;

    #[test]
    fn tags_route_to_last_field() {
        let mut builder = SchemaClassBuilder::new("Zone");
        builder.add_tag(names::MEMO, Some("Defines a thermal zone".to_string()));
        builder.push_field("A1");
        builder.add_tag(names::FIELD, Some("Name".to_string()));
        builder.add_tag(names::REFERENCE, Some("ZoneNames".to_string()));
        builder.push_field("N1");
        builder.add_tag(names::FIELD, Some("Direction of Relative North".to_string()));

        let class = builder.build(None);
        assert_eq!(class.memo().as_deref(), Some("Defines a thermal zone"));
        let name = class.field(0).expect("A1 declared");
        assert_eq!(name.name(), Some("Name"));
        assert_eq!(name.references(), ["ZoneNames"]);
        let north = class.field(1).expect("N1 declared");
        assert_eq!(north.index(), 1);
        assert!(north.references().is_empty());
    }

    #[test]
    fn duplicate_keys_keep_first() {
        let class = SchemaClassBuilder::new("Odd")
            .field("A1", &[(names::FIELD, Some("First"))])
            .field("a1", &[(names::FIELD, Some("Second"))])
            .build(None);

        assert_eq!(class.field_count(), 1);
        assert_eq!(class.field(0).and_then(SchemaField::name), Some("First"));
    }
}
