//! Field definitions within a schema class.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tag::{Tags, names};

/// The positional code of a field, such as `A1` or `N12`.
///
/// Keys are stored upper-case so that lookups by key are insensitive to the
/// casing used in the IDD or in a `\unitsBasedOnField` reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FieldKey(String);

impl FieldKey {
    /// Creates a key from its textual code.
    pub fn new(key: impl AsRef<str>) -> Self {
        Self(key.as_ref().trim().to_ascii_uppercase())
    }

    /// Returns the key as written, upper-cased.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns whether the field holds text or a number.
    #[must_use]
    pub fn kind(&self) -> Option<FieldKind> {
        match self.0.chars().next() {
            Some('A') => Some(FieldKind::Alpha),
            Some('N') => Some(FieldKind::Numeric),
            _ => None,
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The storage kind encoded in a field key's first letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// `A` fields hold text
    Alpha,
    /// `N` fields hold numbers
    Numeric,
}

/// The reference role a field plays in the cross-reference graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RefType {
    /// The field names an object drawn from one or more lists
    ObjectList,
    /// The field's value is a member of one or more lists
    Reference,
    /// The field names an HVAC node
    Node,
}

/// How a field's units are declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitsSpec<'a> {
    /// Fixed SI units, as given by `\units`
    Fixed(&'a str),
    /// Units determined by the value of the field with the given key
    BasedOnField(&'a str),
}

/// A numeric bound from `\minimum`/`\maximum` style tags.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    /// The value may equal the bound
    Inclusive(f64),
    /// The value must not equal the bound
    Exclusive(f64),
}

impl Bound {
    /// Returns the bound's value.
    #[must_use]
    pub const fn value(self) -> f64 {
        match self {
            Self::Inclusive(value) | Self::Exclusive(value) => value,
        }
    }
}

/// One field definition of a schema class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaField {
    key: FieldKey,
    index: usize,
    tags: Tags,
}

impl SchemaField {
    /// Creates a field definition.
    #[must_use]
    pub const fn new(key: FieldKey, index: usize, tags: Tags) -> Self {
        Self { key, index, tags }
    }

    /// Returns the positional code of the field.
    #[must_use]
    pub const fn key(&self) -> &FieldKey {
        &self.key
    }

    /// Returns the declared position of the field within its class.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Returns all tags of the field.
    #[must_use]
    pub const fn tags(&self) -> &Tags {
        &self.tags
    }

    /// Returns the display name from the `\field` tag.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.tags.first(names::FIELD)
    }

    /// Returns the `\type` of the field.
    #[must_use]
    pub fn field_type(&self) -> Option<&str> {
        self.tags.first(names::TYPE)
    }

    /// Returns how the units of the field are declared.
    ///
    /// Both `\unitsBasedOnField A3` and the older `\units BasedOnField A3`
    /// spelling are recognized.
    #[must_use]
    pub fn units(&self) -> Option<UnitsSpec<'_>> {
        if let Some(code) = self.tags.first(names::UNITS_BASED_ON_FIELD) {
            return Some(UnitsSpec::BasedOnField(code));
        }

        let units = self.tags.first(names::UNITS)?;
        Some(units.strip_prefix("BasedOnField").map_or(
            UnitsSpec::Fixed(units),
            |code| UnitsSpec::BasedOnField(code.trim()),
        ))
    }

    /// Returns the explicit IP units, if any.
    #[must_use]
    pub fn ip_units(&self) -> Option<&str> {
        self.tags.first(names::IP_UNITS)
    }

    /// Returns the `\default` value.
    #[must_use]
    pub fn default_value(&self) -> Option<&str> {
        self.tags.first(names::DEFAULT)
    }

    /// Returns the lower bound, preferring an exclusive bound if both exist.
    #[must_use]
    pub fn minimum(&self) -> Option<Bound> {
        self.bound(names::MINIMUM_EXCLUSIVE, names::MINIMUM)
    }

    /// Returns the upper bound, preferring an exclusive bound if both exist.
    #[must_use]
    pub fn maximum(&self) -> Option<Bound> {
        self.bound(names::MAXIMUM_EXCLUSIVE, names::MAXIMUM)
    }

    fn bound(&self, exclusive: &str, inclusive: &str) -> Option<Bound> {
        let parse = |keyword| {
            self.tags
                .first(keyword)
                .and_then(|value| value.trim().parse::<f64>().ok())
        };

        parse(exclusive)
            .map(Bound::Exclusive)
            .or_else(|| parse(inclusive).map(Bound::Inclusive))
    }

    /// Returns the allowed `\key` choices.
    #[must_use]
    pub fn choices(&self) -> &[String] {
        self.tags.values(names::KEY)
    }

    /// Returns the names of the lists this field draws its value from.
    #[must_use]
    pub fn object_lists(&self) -> &[String] {
        self.tags.values(names::OBJECT_LIST)
    }

    /// Returns the names of the lists this field's value belongs to.
    #[must_use]
    pub fn references(&self) -> &[String] {
        self.tags.values(names::REFERENCE)
    }

    /// Returns the documentation notes.
    #[must_use]
    pub fn notes(&self) -> &[String] {
        self.tags.values(names::NOTE)
    }

    /// Returns whether the field is `\required-field`.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.tags.contains(names::REQUIRED_FIELD)
    }

    /// Returns whether the field accepts `autosize`.
    #[must_use]
    pub fn is_autosizable(&self) -> bool {
        self.tags.contains(names::AUTOSIZABLE)
    }

    /// Returns whether the field accepts `autocalculate`.
    #[must_use]
    pub fn is_autocalculatable(&self) -> bool {
        self.tags.contains(names::AUTOCALCULATABLE)
    }

    /// Returns whether the field is deprecated.
    #[must_use]
    pub fn is_deprecated(&self) -> bool {
        self.tags.contains(names::DEPRECATED)
    }

    /// Returns the reference role of the field.
    ///
    /// A field carrying both `\object-list` and `\reference` reports
    /// `ObjectList`; callers needing both sides should use
    /// [`object_lists`](Self::object_lists) and
    /// [`references`](Self::references) directly.
    #[must_use]
    pub fn ref_type(&self) -> Option<RefType> {
        if !self.object_lists().is_empty() {
            Some(RefType::ObjectList)
        } else if !self.references().is_empty() {
            Some(RefType::Reference)
        } else if self
            .field_type()
            .is_some_and(|field_type| field_type.eq_ignore_ascii_case(names::TYPE_NODE))
        {
            Some(RefType::Node)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(tags: &[(&str, Option<&str>)]) -> SchemaField {
        let mut collected = Tags::new();
        for (keyword, value) in tags {
            collected.insert(*keyword, value.map(str::to_string));
        }
        SchemaField::new(FieldKey::new("a1"), 0, collected)
    }

    #[test]
    fn keys_are_normalized() {
        let key = FieldKey::new(" n12 ");
        assert_eq!(key.as_str(), "N12");
        assert_eq!(key.kind(), Some(FieldKind::Numeric));
        assert_eq!(FieldKey::new("A3").kind(), Some(FieldKind::Alpha));
    }

    #[test]
    fn units_based_on_field_spellings() {
        let modern = field(&[(names::UNITS_BASED_ON_FIELD, Some("A3"))]);
        assert_eq!(modern.units(), Some(UnitsSpec::BasedOnField("A3")));

        let legacy = field(&[(names::UNITS, Some("BasedOnField A2"))]);
        assert_eq!(legacy.units(), Some(UnitsSpec::BasedOnField("A2")));

        let fixed = field(&[(names::UNITS, Some("W/m2-K"))]);
        assert_eq!(fixed.units(), Some(UnitsSpec::Fixed("W/m2-K")));
    }

    #[test]
    fn bounds_prefer_exclusive() {
        let field = field(&[
            (names::MINIMUM, Some("0")),
            (names::MINIMUM_EXCLUSIVE, Some("0.5")),
            (names::MAXIMUM, Some("100")),
        ]);
        assert_eq!(field.minimum(), Some(Bound::Exclusive(0.5)));
        assert_eq!(field.maximum(), Some(Bound::Inclusive(100.0)));
    }

    #[test]
    fn ref_type_precedence() {
        let both = field(&[
            (names::OBJECT_LIST, Some("ZoneNames")),
            (names::REFERENCE, Some("OutFaceEnvNames")),
        ]);
        assert_eq!(both.ref_type(), Some(RefType::ObjectList));

        let reference = field(&[(names::REFERENCE, Some("ZoneNames"))]);
        assert_eq!(reference.ref_type(), Some(RefType::Reference));

        let node = field(&[(names::TYPE, Some("node"))]);
        assert_eq!(node.ref_type(), Some(RefType::Node));

        let plain = field(&[(names::TYPE, Some("real"))]);
        assert_eq!(plain.ref_type(), None);
    }
}
