//! Backslash tags attached to IDD classes and fields.
//!
//! A tag is written `\keyword value` in the IDD. Some tags are flags that
//! carry no value (`\required-field`), others may repeat (`\key`, `\note`,
//! `\reference`). Every tag is stored uniformly: either as a flag or as a
//! non-empty ordered sequence of values.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Well-known tag keywords.
pub mod names {
    /// Field display name
    pub const FIELD: &str = "field";
    /// Field data type (`alpha`, `real`, `integer`, `choice`, `object-list`, `node`, ...)
    pub const TYPE: &str = "type";
    /// SI units
    pub const UNITS: &str = "units";
    /// Explicit IP units, overriding the default conversion
    pub const IP_UNITS: &str = "ip-units";
    /// Units taken from the value of another field
    pub const UNITS_BASED_ON_FIELD: &str = "unitsBasedOnField";
    /// Inclusive lower bound
    pub const MINIMUM: &str = "minimum";
    /// Exclusive lower bound
    pub const MINIMUM_EXCLUSIVE: &str = "minimum>";
    /// Inclusive upper bound
    pub const MAXIMUM: &str = "maximum";
    /// Exclusive upper bound
    pub const MAXIMUM_EXCLUSIVE: &str = "maximum<";
    /// Default value
    pub const DEFAULT: &str = "default";
    /// One allowed choice
    pub const KEY: &str = "key";
    /// Name of a list this field must draw its value from
    pub const OBJECT_LIST: &str = "object-list";
    /// Name of a list this field's value is a member of
    pub const REFERENCE: &str = "reference";
    /// Field must be present
    pub const REQUIRED_FIELD: &str = "required-field";
    /// Field accepts `autosize`
    pub const AUTOSIZABLE: &str = "autosizable";
    /// Field accepts `autocalculate`
    pub const AUTOCALCULATABLE: &str = "autocalculatable";
    /// Field is deprecated
    pub const DEPRECATED: &str = "deprecated";
    /// Documentation note
    pub const NOTE: &str = "note";
    /// First field of the repeating extensible block
    pub const BEGIN_EXTENSIBLE: &str = "begin-extensible";
    /// Class documentation
    pub const MEMO: &str = "memo";
    /// Class may appear at most once
    pub const UNIQUE_OBJECT: &str = "unique-object";
    /// Class must appear at least once
    pub const REQUIRED_OBJECT: &str = "required-object";
    /// Minimum number of fields written for the class
    pub const MIN_FIELDS: &str = "min-fields";
    /// Size of the repeating extensible block
    pub const EXTENSIBLE: &str = "extensible";
    /// Category for the following classes
    pub const GROUP: &str = "group";
    /// Field type value marking a node name
    pub const TYPE_NODE: &str = "node";
}

/// The value of one tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TagValue {
    /// A presence-only tag such as `\required-field`
    Flag,
    /// One or more values, in declaration order
    Values(Vec<String>),
}

impl TagValue {
    /// Returns the first value, or `None` for a flag.
    #[must_use]
    pub fn first(&self) -> Option<&str> {
        match self {
            Self::Flag => None,
            Self::Values(values) => values.first().map(String::as_str),
        }
    }

    /// Returns every value, or an empty slice for a flag.
    #[must_use]
    pub fn values(&self) -> &[String] {
        match self {
            Self::Flag => &[],
            Self::Values(values) => values,
        }
    }

    fn push(&mut self, value: String) {
        match self {
            Self::Flag => *self = Self::Values(vec![value]),
            Self::Values(values) => values.push(value),
        }
    }
}

/// An ordered collection of tags keyed by keyword.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tags(IndexMap<String, TagValue>);

impl Tags {
    /// Creates an empty tag collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a tag occurrence.
    ///
    /// A valueless occurrence of a tag that already has values leaves it
    /// unchanged; a valued occurrence appends to the sequence.
    pub fn insert(&mut self, keyword: impl Into<String>, value: Option<String>) {
        let keyword = keyword.into();
        match (self.0.get_mut(&keyword), value) {
            (Some(existing), Some(value)) => existing.push(value),
            (Some(_), None) => {}
            (None, Some(value)) => {
                self.0.insert(keyword, TagValue::Values(vec![value]));
            }
            (None, None) => {
                self.0.insert(keyword, TagValue::Flag);
            }
        }
    }

    /// Returns the value of a tag.
    #[must_use]
    pub fn get(&self, keyword: &str) -> Option<&TagValue> {
        self.0.get(keyword)
    }

    /// Returns whether the tag is present at all.
    #[must_use]
    pub fn contains(&self, keyword: &str) -> bool {
        self.0.contains_key(keyword)
    }

    /// Returns the first value of a tag.
    #[must_use]
    pub fn first(&self, keyword: &str) -> Option<&str> {
        self.get(keyword).and_then(TagValue::first)
    }

    /// Returns all values of a tag, or an empty slice.
    #[must_use]
    pub fn values(&self, keyword: &str) -> &[String] {
        match self.get(keyword) {
            Some(value) => value.values(),
            None => &[],
        }
    }

    /// Iterates over tags in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TagValue)> {
        self.0.iter().map(|(keyword, value)| (keyword.as_str(), value))
    }

    /// Returns the number of distinct tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether there are no tags.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
