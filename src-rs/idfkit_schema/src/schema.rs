//! The complete schema of one EnergyPlus version.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::class::SchemaClass;

/// An Input Data Dictionary: every class of one EnergyPlus version.
///
/// Classes are kept in declaration order and keyed by their lowercase name,
/// so lookups are case-insensitive. Once built, a schema is shared read-only
/// by every object instance that refers to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    version: Option<String>,
    parser_version: String,
    classes: IndexMap<String, SchemaClass>,
    groups: IndexSet<String>,
    object_lists: IndexMap<String, IndexSet<String>>,
}

impl Schema {
    /// Creates an empty schema stamped with the version of the parser that
    /// is about to fill it.
    pub fn new(parser_version: impl Into<String>) -> Self {
        Self {
            version: None,
            parser_version: parser_version.into(),
            classes: IndexMap::new(),
            groups: IndexSet::new(),
            object_lists: IndexMap::new(),
        }
    }

    /// Returns the full EnergyPlus version, such as `8.1.0.009`.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Returns the `major.minor` key used to match IDFs and cache files.
    #[must_use]
    pub fn version_key(&self) -> Option<String> {
        self.version.as_deref().map(version_key)
    }

    /// Sets the EnergyPlus version.
    pub fn set_version(&mut self, version: impl Into<String>) {
        self.version = Some(version.into());
    }

    /// Returns the version of the parser that produced the schema.
    #[must_use]
    pub fn parser_version(&self) -> &str {
        &self.parser_version
    }

    /// Adds a class, recording its group and the object lists it is a
    /// member of.
    ///
    /// A class whose name is already present replaces the earlier one in
    /// place.
    pub fn insert_class(&mut self, class: SchemaClass) {
        if let Some(group) = class.group() {
            self.groups.insert(group.to_string());
        }

        for field in class.fields() {
            for list in field.references() {
                self.object_lists
                    .entry(list.to_lowercase())
                    .or_default()
                    .insert(class.name().to_string());
            }
        }

        self.classes.insert(class.name().to_string(), class);
    }

    /// Looks up a class by name, ignoring case.
    #[must_use]
    pub fn class(&self, name: &str) -> Option<&SchemaClass> {
        self.classes
            .get(name)
            .or_else(|| self.classes.get(&name.to_lowercase()))
    }

    /// Returns whether a class exists, ignoring case.
    #[must_use]
    pub fn contains_class(&self, name: &str) -> bool {
        self.class(name).is_some()
    }

    /// Iterates over classes in declaration order.
    pub fn classes(&self) -> impl Iterator<Item = &SchemaClass> {
        self.classes.values()
    }

    /// Returns the number of classes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Returns whether the schema has no classes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Returns the group names in declaration order.
    #[must_use]
    pub const fn groups(&self) -> &IndexSet<String> {
        &self.groups
    }

    /// Returns every object list with its member classes.
    #[must_use]
    pub const fn object_lists(&self) -> &IndexMap<String, IndexSet<String>> {
        &self.object_lists
    }

    /// Returns the classes whose fields are members of a list, ignoring case.
    #[must_use]
    pub fn object_list(&self, name: &str) -> Option<&IndexSet<String>> {
        self.object_lists.get(&name.to_lowercase())
    }
}

/// Reduces a version string to `major.minor`.
///
/// ```rust
/// use idfkit_schema::version_key;
///
/// assert_eq!(version_key("8.1.0.009"), "8.1");
/// assert_eq!(version_key(" 9.4 "), "9.4");
/// assert_eq!(version_key("22"), "22");
/// ```
#[must_use]
pub fn version_key(version: &str) -> String {
    version
        .trim()
        .split('.')
        .take(2)
        .collect::<Vec<_>>()
        .join(".")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{builder::SchemaClassBuilder, tag::names};

    fn schema() -> Schema {
        let mut schema = Schema::new("test");
        schema.set_version("8.1.0.009");
        schema.insert_class(
            SchemaClassBuilder::new("Zone")
                .field(
                    "A1",
                    &[
                        (names::FIELD, Some("Name")),
                        (names::REFERENCE, Some("ZoneNames")),
                        (names::REFERENCE, Some("OutFaceEnvNames")),
                    ],
                )
                .build(Some("Thermal Zones and Surfaces".to_string())),
        );
        schema.insert_class(
            SchemaClassBuilder::new("ZoneList")
                .field(
                    "A1",
                    &[
                        (names::FIELD, Some("Name")),
                        (names::REFERENCE, Some("ZoneNames")),
                    ],
                )
                .build(Some("Thermal Zones and Surfaces".to_string())),
        );
        schema
    }

    #[test]
    fn classes_lookup_ignores_case() {
        let schema = schema();
        assert!(schema.contains_class("ZONE"));
        assert_eq!(schema.class("zonelist").map(SchemaClass::display_name), Some("ZoneList"));
        assert!(schema.class("Zone:Bogus").is_none());
    }

    #[test]
    fn references_fan_out_into_object_lists() {
        let schema = schema();
        let zone_names = schema.object_list("ZoneNames").expect("list exists");
        assert_eq!(zone_names.iter().collect::<Vec<_>>(), ["zone", "zonelist"]);
        let env = schema.object_list("outfaceenvnames").expect("list exists");
        assert_eq!(env.len(), 1);
    }

    #[test]
    fn groups_are_deduplicated() {
        let schema = schema();
        assert_eq!(schema.groups().len(), 1);
        assert_eq!(schema.version_key().as_deref(), Some("8.1"));
    }
}
