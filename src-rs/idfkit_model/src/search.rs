//! Value index over every field of an instance.
//!
//! The index serves two masters. Interactive search wants to find values by
//! exact match, prefix, substring or wildcard. The cross-reference engine
//! wants the fields that hold a given value within a given object list. Both
//! are answered from ordered maps keyed by the lowercased value, and every
//! entry is keyed by field identity so that re-adding a field replaces it.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use regex::Regex;

use crate::{field::ReferenceRole, id::FieldId};

/// Classes whose fields are mostly coordinates and surface bookkeeping.
///
/// Searches and reference connection can skip them on request, since large
/// models contain thousands of such objects.
pub const GEOMETRY_CLASSES: &[&str] = &[
    "BuildingSurface:Detailed",
    "Wall:Detailed",
    "RoofCeiling:Detailed",
    "Floor:Detailed",
    "FenestrationSurface:Detailed",
    "Wall:Exterior",
    "Wall:Adiabatic",
    "Wall:Underground",
    "Wall:Interzone",
    "Roof",
    "Ceiling:Adiabatic",
    "Ceiling:Interzone",
    "Floor:GroundContact",
    "Floor:Adiabatic",
    "Floor:Interzone",
    "Window",
    "Door",
    "GlazedDoor",
    "Window:Interzone",
    "Door:Interzone",
    "GlazedDoor:Interzone",
    "Shading:Site",
    "Shading:Building",
    "Shading:Site:Detailed",
    "Shading:Building:Detailed",
    "Shading:Overhang",
    "Shading:Overhang:Projection",
    "Shading:Fin",
    "Shading:Fin:Projection",
    "Shading:Zone:Detailed",
];

/// Which side of a list a field is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListRole {
    /// The field draws its value from the list
    ObjectList,
    /// The field's value is a member of the list
    Reference,
}

/// What the index knows about one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchEntry {
    /// Lowercase class name
    pub class: String,
    /// Class name as declared
    pub display_class: String,
    /// Value as stored
    pub value: String,
    /// Lists the field draws from
    pub object_lists: Vec<String>,
    /// Lists the field is a member of
    pub references: Vec<String>,
}

/// One search result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    /// Value as stored
    pub value: String,
    /// Lowercase class name
    pub class: String,
    /// Class name as declared
    pub display_class: String,
    /// The matching field
    pub field: FieldId,
}

/// A search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pattern: String,
    whole_field: bool,
    ignore_geometry: bool,
}

impl SearchQuery {
    /// Creates a partial-match query.
    ///
    /// A pattern containing `*` or `?` is matched as a wildcard over the
    /// whole value; any other pattern matches anywhere inside a value.
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            whole_field: false,
            ignore_geometry: false,
        }
    }

    /// Requires the pattern to equal the whole value.
    #[must_use]
    pub const fn whole_field(mut self, whole_field: bool) -> Self {
        self.whole_field = whole_field;
        self
    }

    /// Skips fields of geometry classes.
    #[must_use]
    pub const fn ignore_geometry(mut self, ignore_geometry: bool) -> Self {
        self.ignore_geometry = ignore_geometry;
        self
    }

    /// Returns the pattern.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

type BucketKey = (ListRole, String, String);

/// An inverted index from values to fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchIndex {
    entries: HashMap<FieldId, SearchEntry>,
    by_value: BTreeMap<String, BTreeSet<FieldId>>,
    buckets: HashMap<BucketKey, BTreeSet<FieldId>>,
    geometry: HashSet<String>,
}

impl Default for SearchIndex {
    fn default() -> Self {
        Self::new(GEOMETRY_CLASSES.iter().copied())
    }
}

impl SearchIndex {
    /// Creates an empty index with the given geometry classes.
    pub fn new<'a>(geometry_classes: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            entries: HashMap::new(),
            by_value: BTreeMap::new(),
            buckets: HashMap::new(),
            geometry: geometry_classes
                .into_iter()
                .map(str::to_lowercase)
                .collect(),
        }
    }

    /// Replaces the set of geometry classes.
    pub fn set_geometry_classes<'a>(&mut self, classes: impl IntoIterator<Item = &'a str>) {
        self.geometry = classes.into_iter().map(str::to_lowercase).collect();
    }

    /// Returns whether a class counts as geometry.
    #[must_use]
    pub fn is_geometry(&self, class: &str) -> bool {
        self.geometry.contains(&class.to_lowercase())
    }

    /// Inserts or replaces the entry for a field.
    ///
    /// An empty value removes the field from the index.
    pub fn add(
        &mut self,
        field: FieldId,
        class: &str,
        display_class: &str,
        role: &ReferenceRole,
        value: &str,
    ) {
        self.remove(field);
        if value.is_empty() {
            return;
        }

        let lower = value.to_lowercase();
        self.by_value.entry(lower.clone()).or_default().insert(field);

        for list in role.object_lists() {
            self.buckets
                .entry((ListRole::ObjectList, list.clone(), lower.clone()))
                .or_default()
                .insert(field);
        }
        for list in role.references() {
            self.buckets
                .entry((ListRole::Reference, list.clone(), lower.clone()))
                .or_default()
                .insert(field);
        }

        self.entries.insert(
            field,
            SearchEntry {
                class: class.to_lowercase(),
                display_class: display_class.to_string(),
                value: value.to_string(),
                object_lists: role.object_lists().to_vec(),
                references: role.references().to_vec(),
            },
        );
    }

    /// Removes a field, returning what was indexed for it.
    pub fn remove(&mut self, field: FieldId) -> Option<SearchEntry> {
        let entry = self.entries.remove(&field)?;
        let lower = entry.value.to_lowercase();

        if let Some(fields) = self.by_value.get_mut(&lower) {
            fields.remove(&field);
            if fields.is_empty() {
                self.by_value.remove(&lower);
            }
        }

        let keys = entry
            .object_lists
            .iter()
            .map(|list| (ListRole::ObjectList, list))
            .chain(entry.references.iter().map(|list| (ListRole::Reference, list)));
        for (role, list) in keys {
            let key = (role, list.clone(), lower.clone());
            if let Some(fields) = self.buckets.get_mut(&key) {
                fields.remove(&field);
                if fields.is_empty() {
                    self.buckets.remove(&key);
                }
            }
        }

        Some(entry)
    }

    /// Returns the entry for a field.
    #[must_use]
    pub fn get(&self, field: FieldId) -> Option<&SearchEntry> {
        self.entries.get(&field)
    }

    /// Returns the fields on one side of a list holding a value.
    ///
    /// A list or value with no fields yields nothing.
    pub fn members<'a>(
        &'a self,
        role: ListRole,
        list: &str,
        value: &str,
    ) -> impl Iterator<Item = FieldId> + use<'a> {
        self.buckets
            .get(&(role, list.to_lowercase(), value.to_lowercase()))
            .into_iter()
            .flatten()
            .copied()
    }

    /// Returns the number of indexed fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether nothing is indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Runs a query, returning hits ordered by value.
    #[must_use]
    pub fn query(&self, query: &SearchQuery) -> Vec<SearchHit> {
        let pattern = query.pattern.to_lowercase();

        let matched: Vec<FieldId> = if query.whole_field {
            self.by_value
                .get(&pattern)
                .into_iter()
                .flatten()
                .copied()
                .collect()
        } else if let Some(prefix) = plain_prefix(&pattern) {
            self.by_value
                .range(prefix.to_string()..)
                .take_while(|(value, _)| value.starts_with(prefix))
                .flat_map(|(_, fields)| fields.iter().copied())
                .collect()
        } else if pattern.contains(['*', '?']) {
            let Some(regex) = wildcard_regex(&pattern) else {
                return Vec::new();
            };
            self.scan(|value| regex.is_match(value))
        } else {
            self.scan(|value| value.contains(&pattern))
        };

        matched
            .into_iter()
            .filter_map(|field| Some((field, self.entries.get(&field)?)))
            .filter(|(_, entry)| !(query.ignore_geometry && self.geometry.contains(&entry.class)))
            .map(|(field, entry)| SearchHit {
                value: entry.value.clone(),
                class: entry.class.clone(),
                display_class: entry.display_class.clone(),
                field,
            })
            .collect()
    }

    fn scan(&self, matches: impl Fn(&str) -> bool) -> Vec<FieldId> {
        self.by_value
            .iter()
            .filter(|(value, _)| matches(value))
            .flat_map(|(_, fields)| fields.iter().copied())
            .collect()
    }
}

/// Returns the literal prefix of a `prefix*` pattern.
fn plain_prefix(pattern: &str) -> Option<&str> {
    let prefix = pattern.strip_suffix('*')?;
    (!prefix.is_empty() && !prefix.contains(['*', '?'])).then_some(prefix)
}

fn wildcard_regex(pattern: &str) -> Option<Regex> {
    let mut expression = String::from("^");
    for c in pattern.chars() {
        match c {
            '*' => expression.push_str(".*"),
            '?' => expression.push('.'),
            _ => expression.push_str(&regex::escape(c.encode_utf8(&mut [0; 4]))),
        }
    }
    expression.push('$');

    match Regex::new(&expression) {
        Ok(regex) => Some(regex),
        Err(error) => {
            tracing::warn!(%pattern, %error, "search pattern could not be compiled");
            None
        }
    }
}
