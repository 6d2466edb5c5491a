//! The in-memory model of one IDF.

mod edit;
mod references;
mod units;
mod view;

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::Arc,
};

use idfkit_schema::{Schema, SchemaClass, UnitsRegistry};
use indexmap::{IndexMap, IndexSet};

pub use edit::{EditError, FieldChange};
pub use references::{ReferenceConnector, ReferenceEntry, ReferenceTree};
pub use view::ClassView;

use crate::{
    encoding::TextEncoding,
    field::FieldInstance,
    id::{FieldId, ObjectId},
    object::{ObjectData, ObjectInstance},
    options,
    reference::ReferenceGraph,
    search::{SearchHit, SearchIndex, SearchQuery},
};

/// An IDF held in memory against its schema.
///
/// Objects and fields live in registries keyed by identity token. Everything
/// that refers to an object or field (class lists, object slots, search
/// entries, graph edges) holds a token, never a reference, so the instance
/// owns all of its data outright.
///
/// Every mutation keeps the search index and reference graph current before
/// returning, updating the index first.
#[derive(Debug)]
pub struct Instance {
    schema: Arc<Schema>,
    version: Option<String>,
    file_path: Option<PathBuf>,
    encoding: TextEncoding,
    si_units: bool,
    options: IndexSet<String>,
    classes: IndexMap<String, Vec<ObjectId>>,
    objects: HashMap<ObjectId, ObjectInstance>,
    fields: HashMap<FieldId, FieldInstance>,
    search: SearchIndex,
    graph: ReferenceGraph,
    trailing_comments: Vec<String>,
    trailing_comments_special: Vec<String>,
}

impl Instance {
    /// Creates an empty instance of a schema.
    ///
    /// Every schema class is present from the start, in declaration order.
    #[must_use]
    pub fn new(schema: Arc<Schema>) -> Self {
        let classes = schema
            .classes()
            .map(|class| (class.name().to_string(), Vec::new()))
            .collect();

        Self {
            version: schema.version().map(str::to_string),
            schema,
            file_path: None,
            encoding: TextEncoding::Utf8,
            si_units: true,
            options: IndexSet::new(),
            classes,
            objects: HashMap::new(),
            fields: HashMap::new(),
            search: SearchIndex::default(),
            graph: ReferenceGraph::new(),
            trailing_comments: Vec::new(),
            trailing_comments_special: Vec::new(),
        }
    }

    /// Replaces the classes that searches and connection may skip.
    #[must_use]
    pub fn with_geometry_classes<'a>(mut self, classes: impl IntoIterator<Item = &'a str>) -> Self {
        self.search.set_geometry_classes(classes);
        self
    }

    /// Returns the schema the instance was read against.
    #[must_use]
    pub const fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Returns the EnergyPlus version of the instance.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Sets the EnergyPlus version.
    pub fn set_version(&mut self, version: impl Into<String>) {
        self.version = Some(version.into());
    }

    /// Returns the file the instance was read from or last written to.
    #[must_use]
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Sets the file path.
    pub fn set_file_path(&mut self, path: impl Into<PathBuf>) {
        self.file_path = Some(path.into());
    }

    /// Returns the encoding the instance is written in.
    #[must_use]
    pub const fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    /// Sets the encoding, normally to the one the file was read in.
    pub const fn set_encoding(&mut self, encoding: TextEncoding) {
        self.encoding = encoding;
    }

    /// Returns whether values are presented in SI units.
    #[must_use]
    pub const fn si_units(&self) -> bool {
        self.si_units
    }

    /// Sets whether values are presented in SI units.
    pub const fn set_si_units(&mut self, si_units: bool) {
        self.si_units = si_units;
    }

    /// Returns the active options in the order they were added.
    #[must_use]
    pub const fn options(&self) -> &IndexSet<String> {
        &self.options
    }

    /// Adds an option flag.
    ///
    /// `ViewInIPunits` also switches the instance to IP presentation.
    pub fn add_option(&mut self, option: impl Into<String>) {
        let option = option.into();
        if option.eq_ignore_ascii_case(options::VIEW_IN_IP_UNITS) {
            self.si_units = false;
        }
        self.options.insert(option);
    }

    /// Returns whether an option is active, ignoring case.
    #[must_use]
    pub fn has_option(&self, option: &str) -> bool {
        self.options
            .iter()
            .any(|active| active.eq_ignore_ascii_case(option))
    }

    /// Returns the comments that follow the last object.
    #[must_use]
    pub fn trailing_comments(&self) -> &[String] {
        &self.trailing_comments
    }

    /// Sets the comments that follow the last object.
    pub fn set_trailing_comments(&mut self, comments: Vec<String>) {
        self.trailing_comments = comments;
    }

    /// Returns the `!-` comments that follow the last object.
    #[must_use]
    pub fn trailing_comments_special(&self) -> &[String] {
        &self.trailing_comments_special
    }

    /// Sets the `!-` comments that follow the last object.
    pub fn set_trailing_comments_special(&mut self, comments: Vec<String>) {
        self.trailing_comments_special = comments;
    }

    /// Iterates over class names in instance order, including empty ones.
    pub fn class_names(&self) -> impl Iterator<Item = &str> {
        self.classes.keys().map(String::as_str)
    }

    /// Returns the objects of a class in order, ignoring case.
    #[must_use]
    pub fn objects_of(&self, class: &str) -> &[ObjectId] {
        self.classes
            .get(class)
            .or_else(|| self.classes.get(&class.to_lowercase()))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Returns the total number of objects.
    #[must_use]
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Returns the total number of field instances.
    #[must_use]
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Looks up an object by identity.
    #[must_use]
    pub fn object(&self, id: ObjectId) -> Option<&ObjectInstance> {
        self.objects.get(&id)
    }

    /// Returns the object at a row of a class.
    #[must_use]
    pub fn object_at(&self, class: &str, row: usize) -> Option<&ObjectInstance> {
        let id = self.objects_of(class).get(row)?;
        self.objects.get(id)
    }

    /// Returns the row of an object within its class.
    #[must_use]
    pub fn object_row(&self, id: ObjectId) -> Option<usize> {
        let object = self.objects.get(&id)?;
        self.objects_of(object.obj_class())
            .iter()
            .position(|candidate| *candidate == id)
    }

    /// Looks up a field by identity.
    #[must_use]
    pub fn field_by_id(&self, id: FieldId) -> Option<&FieldInstance> {
        self.fields.get(&id)
    }

    /// Returns the field at a position.
    ///
    /// Unknown classes, rows past the last object, and unset or missing
    /// slots all yield `None`.
    #[must_use]
    pub fn field(&self, class: &str, row: usize, index: usize) -> Option<&FieldInstance> {
        let id = self.object_at(class, row)?.field(index)?;
        self.fields.get(&id)
    }

    /// Returns the value at a position.
    #[must_use]
    pub fn value(&self, class: &str, row: usize, index: usize) -> Option<&str> {
        self.field(class, row, index).map(FieldInstance::value)
    }

    /// Returns a tabular view of one class, ignoring case.
    #[must_use]
    pub fn class_view(&self, class: &str) -> Option<ClassView<'_>> {
        let schema_class = self.schema.class(class)?;
        Some(ClassView::new(self, schema_class, self.objects_of(class)))
    }

    /// Returns the search index.
    #[must_use]
    pub const fn search_index(&self) -> &SearchIndex {
        &self.search
    }

    /// Returns the reference graph.
    #[must_use]
    pub const fn reference_graph(&self) -> &ReferenceGraph {
        &self.graph
    }

    /// Searches field values.
    #[must_use]
    pub fn search(&self, query: &SearchQuery) -> Vec<SearchHit> {
        self.search.query(query)
    }

    /// Appends an object as read from a file.
    ///
    /// Linked fields become graph nodes immediately; edges are left for
    /// [`connect_references`](Self::connect_references).
    ///
    /// # Errors
    ///
    /// Returns [`EditError::UnknownClass`] if the schema has no such class.
    pub fn push_object(&mut self, data: ObjectData) -> Result<ObjectId, EditError> {
        let class = self.resolve_class(&data.class)?;
        Ok(self.insert_object(&class, data, None))
    }

    /// Inserts objects into a class at a row, or at the end.
    ///
    /// # Errors
    ///
    /// Returns an error if the class is unknown or an object belongs to a
    /// different class. Nothing is inserted in that case.
    pub fn add_objects(
        &mut self,
        class: &str,
        objects: Vec<ObjectData>,
        at: Option<usize>,
    ) -> Result<Vec<ObjectId>, EditError> {
        edit::add_objects(self, class, objects, at)
    }

    /// Removes objects by row, returning their data in row order.
    ///
    /// # Errors
    ///
    /// Returns an error if the class is unknown or a row is out of range.
    /// Nothing is removed in that case.
    pub fn remove_objects(&mut self, class: &str, rows: &[usize]) -> Result<Vec<ObjectData>, EditError> {
        edit::remove_objects(self, class, rows)
    }

    /// Copies objects, placing the copies after the last selected row.
    ///
    /// # Errors
    ///
    /// Returns an error if the class is unknown or a row is out of range.
    pub fn duplicate_objects(&mut self, class: &str, rows: &[usize]) -> Result<Vec<ObjectId>, EditError> {
        edit::duplicate_objects(self, class, rows)
    }

    /// Creates an object with `\min-fields` slots holding their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::UnknownClass`] if the schema has no such class.
    pub fn new_object(&mut self, class: &str, at: Option<usize>) -> Result<ObjectId, EditError> {
        edit::new_object(self, class, at)
    }

    /// Resets every field that declares a `\default` to that default.
    ///
    /// # Errors
    ///
    /// Returns an error if the class is unknown or the row is out of range.
    pub fn set_defaults(&mut self, class: &str, row: usize) -> Result<Vec<FieldChange>, EditError> {
        edit::set_defaults(self, class, row)
    }

    /// Copies objects out by row, in row order.
    ///
    /// # Errors
    ///
    /// Returns an error if the class is unknown or a row is out of range.
    pub fn objects_data(&self, class: &str, rows: &[usize]) -> Result<Vec<ObjectData>, EditError> {
        edit::objects_data(self, class, rows)
    }

    /// Sets the value at a position, extending the object if needed.
    ///
    /// Returns every value that changed, including names rewritten by the
    /// rename cascade.
    ///
    /// # Errors
    ///
    /// Returns an error if the class, row or field position does not exist.
    pub fn set_value(
        &mut self,
        class: &str,
        row: usize,
        index: usize,
        value: &str,
    ) -> Result<Vec<FieldChange>, EditError> {
        edit::set_value(self, class, row, index, value)
    }

    /// Sets the value of a field by identity.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::UnknownField`] if the field does not exist.
    pub fn set_value_by_id(&mut self, field: FieldId, value: &str) -> Result<Vec<FieldChange>, EditError> {
        edit::set_value_by_id(self, field, value)
    }

    /// Recomputes every field's schema key and reference role.
    pub fn refresh_roles(&mut self) {
        let schema = Arc::clone(&self.schema);
        for field in self.fields.values_mut() {
            let schema_field = schema
                .class(field.class())
                .and_then(|class| class.field(field.index()));
            field.refresh(schema_field);
        }

        let ids: Vec<FieldId> = self.fields.keys().copied().collect();
        for id in ids {
            self.index_field(id);
        }
        self.connect_references();
    }

    /// Rebuilds every reference edge.
    pub fn connect_references(&mut self) {
        self.connect_references_with(false);
    }

    /// Rebuilds every reference edge, optionally leaving geometry classes
    /// unconnected.
    pub fn connect_references_with(&mut self, ignore_geometry: bool) {
        ReferenceConnector::new(self, ignore_geometry).run(self);
    }

    /// Returns the number of fields connected to a field.
    ///
    /// Returns `-1` for a field that cannot take part in references, and
    /// `0` for one that can but has no connections.
    #[must_use]
    pub fn reference_count(&self, field: FieldId) -> i64 {
        references::reference_count(self, field)
    }

    /// Returns the fields pointing at and pointed at by the field at a
    /// position, or `None` if there is no such field or it has no
    /// connections.
    #[must_use]
    pub fn reference_tree_data(&self, class: &str, row: usize, index: usize) -> Option<ReferenceTree> {
        references::reference_tree_data(self, class, row, index)
    }

    /// Rewrites every field that referred to `field` by `old_value` to the
    /// field's current value.
    pub fn update_reference_names(&mut self, field: FieldId, old_value: &str) -> Vec<FieldChange> {
        references::update_reference_names(self, field, old_value)
    }

    /// Returns the SI units of a field.
    #[must_use]
    pub fn units(&self, field: FieldId) -> Option<String> {
        units::field_units(self, field)
    }

    /// Returns the IP units of a field.
    #[must_use]
    pub fn ip_units(&self, field: FieldId, registry: &UnitsRegistry) -> Option<String> {
        units::field_ip_units(self, field, registry)
    }

    /// Returns a field's value converted to IP units.
    #[must_use]
    pub fn to_ip(&self, field: FieldId, registry: &UnitsRegistry) -> Option<String> {
        units::to_ip(self, field, registry)
    }

    /// Converts an IP value entered for a field back to SI.
    #[must_use]
    pub fn to_si(&self, field: FieldId, value: &str, registry: &UnitsRegistry) -> Option<String> {
        units::to_si(self, field, value, registry)
    }

    fn resolve_class(&self, class: &str) -> Result<String, EditError> {
        self.schema
            .class(class)
            .map(|schema_class| schema_class.name().to_string())
            .ok_or_else(|| EditError::UnknownClass(class.to_string()))
    }

    fn display_class<'a>(&'a self, class: &'a str) -> &'a str {
        self.schema
            .class(class)
            .map_or(class, SchemaClass::display_name)
    }

    fn insert_object(&mut self, class: &str, data: ObjectData, row: Option<usize>) -> ObjectId {
        let id = ObjectId::next();
        let slots = data
            .values
            .into_iter()
            .enumerate()
            .map(|(index, value)| value.map(|value| self.create_field(id, class, index, value)))
            .collect();

        self.objects.insert(
            id,
            ObjectInstance::new(id, class, slots, data.comments, data.comments_special),
        );

        let objects = self.classes.entry(class.to_string()).or_default();
        let position = row.map_or(objects.len(), |row| row.min(objects.len()));
        objects.insert(position, id);
        id
    }

    fn create_field(&mut self, object: ObjectId, class: &str, index: usize, value: String) -> FieldId {
        let schema_field = self
            .schema
            .class(class)
            .and_then(|schema_class| schema_class.field(index));
        let field = FieldInstance::new(object, class, index, schema_field, value);
        let id = field.id();

        self.fields.insert(id, field);
        self.index_field(id);
        id
    }

    /// Brings the search index and graph membership of a field in line
    /// with its value. Edges are not touched.
    fn index_field(&mut self, id: FieldId) {
        let Some(field) = self.fields.get(&id) else {
            return;
        };

        if field.value().is_empty() {
            self.search.remove(id);
            self.graph.remove_node(id);
            return;
        }

        let display = self
            .schema
            .class(field.class())
            .map_or(field.class(), SchemaClass::display_name);
        self.search
            .add(id, field.class(), display, field.role(), field.value());

        if field.role().is_linked() {
            self.graph.add_node(id);
        } else {
            self.graph.remove_node(id);
        }
    }
}

#[cfg(test)]
mod test_schema;
