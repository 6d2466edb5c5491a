//! Object and value editing.

use std::sync::Arc;

use idfkit_schema::SchemaField;
use idfkit_shared::{AsIdfkitError, Context};
use thiserror::Error;

use super::{Instance, references};
use crate::{
    id::{FieldId, ObjectId},
    object::ObjectData,
};

/// An edit addressed something that does not exist.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// The schema has no class by this name
    #[error("unknown class `{0}`")]
    UnknownClass(String),
    /// The class has fewer objects than the row requires
    #[error("class `{class}` has no object at row {row}")]
    ObjectOutOfRange {
        /// Lowercase class name
        class: String,
        /// The requested row
        row: usize,
    },
    /// The class declares no field at this position
    #[error("class `{class}` has no field at position {index}")]
    FieldOutOfRange {
        /// Lowercase class name
        class: String,
        /// The requested position
        index: usize,
    },
    /// The field token does not belong to the instance
    #[error("{0} does not belong to this instance")]
    UnknownField(FieldId),
    /// An object was offered to a class other than its own
    #[error("cannot add a `{found}` object to class `{expected}`")]
    ClassMismatch {
        /// The class being edited
        expected: String,
        /// The class of the offered object
        found: String,
    },
}

impl AsIdfkitError for EditError {
    fn message(&self) -> String {
        self.to_string()
    }

    fn context(&self) -> Vec<Context> {
        match self {
            Self::UnknownClass(_) => vec![Context::Note(
                "class names are matched against the loaded schema, ignoring case".to_string(),
            )],
            Self::ObjectOutOfRange { .. } | Self::FieldOutOfRange { .. } => {
                vec![Context::Note("rows and fields are numbered from 0".to_string())]
            }
            Self::UnknownField(_) | Self::ClassMismatch { .. } => Vec::new(),
        }
    }
}

/// One value that an edit changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    /// The field that changed
    pub field: FieldId,
    /// The value before the edit
    pub old: String,
    /// The value after the edit
    pub new: String,
}

pub(super) fn set_value(
    instance: &mut Instance,
    class: &str,
    row: usize,
    index: usize,
    value: &str,
) -> Result<Vec<FieldChange>, EditError> {
    let class = instance.resolve_class(class)?;
    let object = object_id_at(instance, &class, row)?;

    let existing = instance
        .objects
        .get(&object)
        .and_then(|instance_object| instance_object.field(index));

    let field = match existing {
        Some(field) => field,
        None => {
            let schema = Arc::clone(&instance.schema);
            if schema
                .class(&class)
                .and_then(|schema_class| schema_class.field(index))
                .is_none()
            {
                return Err(EditError::FieldOutOfRange { class, index });
            }

            let field = instance.create_field(object, &class, index, String::new());
            if let Some(instance_object) = instance.objects.get_mut(&object) {
                if instance_object.fields.len() <= index {
                    instance_object.fields.resize(index + 1, None);
                }
                instance_object.fields[index] = Some(field);
            }
            field
        }
    };

    set_value_by_id(instance, field, value)
}

pub(super) fn set_value_by_id(
    instance: &mut Instance,
    field: FieldId,
    value: &str,
) -> Result<Vec<FieldChange>, EditError> {
    let current = instance
        .fields
        .get_mut(&field)
        .ok_or(EditError::UnknownField(field))?;
    if current.value == value {
        return Ok(Vec::new());
    }

    let old = std::mem::replace(&mut current.value, value.to_string());
    instance.index_field(field);

    let mut changes = vec![FieldChange {
        field,
        old: old.clone(),
        new: value.to_string(),
    }];
    changes.extend(references::update_reference_names(instance, field, &old));
    Ok(changes)
}

pub(super) fn add_objects(
    instance: &mut Instance,
    class: &str,
    objects: Vec<ObjectData>,
    at: Option<usize>,
) -> Result<Vec<ObjectId>, EditError> {
    let class = instance.resolve_class(class)?;
    for object in &objects {
        if object.class.is_empty() {
            continue;
        }
        let found = instance.resolve_class(&object.class)?;
        if found != class {
            return Err(EditError::ClassMismatch {
                expected: class,
                found,
            });
        }
    }

    let ids: Vec<ObjectId> = objects
        .into_iter()
        .enumerate()
        .map(|(offset, object)| instance.insert_object(&class, object, at.map(|row| row + offset)))
        .collect();

    reconnect_objects(instance, &ids);
    tracing::debug!(%class, count = ids.len(), "added objects");
    Ok(ids)
}

pub(super) fn remove_objects(
    instance: &mut Instance,
    class: &str,
    rows: &[usize],
) -> Result<Vec<ObjectData>, EditError> {
    let class = instance.resolve_class(class)?;
    let rows = checked_rows(instance, &class, rows)?;
    let removed = rows
        .iter()
        .map(|row| object_data(instance, &class, *row))
        .collect::<Result<Vec<_>, _>>()?;

    for row in rows.iter().rev() {
        let Some(objects) = instance.classes.get_mut(&class) else {
            break;
        };
        let id = objects.remove(*row);

        let Some(object) = instance.objects.remove(&id) else {
            continue;
        };
        for field in object.fields().iter().flatten() {
            instance.search.remove(*field);
            instance.graph.remove_node(*field);
            instance.fields.remove(field);
        }
    }

    tracing::debug!(%class, count = removed.len(), "removed objects");
    Ok(removed)
}

pub(super) fn duplicate_objects(
    instance: &mut Instance,
    class: &str,
    rows: &[usize],
) -> Result<Vec<ObjectId>, EditError> {
    let class = instance.resolve_class(class)?;
    let rows = checked_rows(instance, &class, rows)?;
    let Some(last) = rows.last().copied() else {
        return Ok(Vec::new());
    };

    let copies = rows
        .iter()
        .map(|row| object_data(instance, &class, *row))
        .collect::<Result<Vec<_>, _>>()?;

    let ids: Vec<ObjectId> = copies
        .into_iter()
        .enumerate()
        .map(|(offset, copy)| instance.insert_object(&class, copy, Some(last + 1 + offset)))
        .collect();

    reconnect_objects(instance, &ids);
    Ok(ids)
}

pub(super) fn new_object(
    instance: &mut Instance,
    class: &str,
    at: Option<usize>,
) -> Result<ObjectId, EditError> {
    let class = instance.resolve_class(class)?;
    let schema = Arc::clone(&instance.schema);
    let Some(schema_class) = schema.class(&class) else {
        return Err(EditError::UnknownClass(class));
    };

    let slots = schema_class
        .min_fields()
        .max(usize::from(schema_class.field_count() > 0));
    let values = (0..slots)
        .map(|index| {
            let default = schema_class
                .field(index)
                .and_then(SchemaField::default_value)
                .unwrap_or_default();
            Some(default.to_string())
        })
        .collect();

    let data = ObjectData {
        class: class.clone(),
        values,
        comments: Vec::new(),
        comments_special: Vec::new(),
    };
    let id = instance.insert_object(&class, data, at);
    reconnect_objects(instance, &[id]);
    Ok(id)
}

pub(super) fn set_defaults(
    instance: &mut Instance,
    class: &str,
    row: usize,
) -> Result<Vec<FieldChange>, EditError> {
    let class = instance.resolve_class(class)?;
    object_id_at(instance, &class, row)?;

    let schema = Arc::clone(&instance.schema);
    let Some(schema_class) = schema.class(&class) else {
        return Err(EditError::UnknownClass(class));
    };

    let mut changes = Vec::new();
    for field in schema_class.fields() {
        if let Some(default) = field.default_value() {
            changes.extend(set_value(instance, &class, row, field.index(), default)?);
        }
    }
    Ok(changes)
}

pub(super) fn objects_data(
    instance: &Instance,
    class: &str,
    rows: &[usize],
) -> Result<Vec<ObjectData>, EditError> {
    let class = instance.resolve_class(class)?;
    checked_rows(instance, &class, rows)?
        .into_iter()
        .map(|row| object_data(instance, &class, row))
        .collect()
}

fn object_id_at(instance: &Instance, class: &str, row: usize) -> Result<ObjectId, EditError> {
    instance
        .objects_of(class)
        .get(row)
        .copied()
        .ok_or_else(|| EditError::ObjectOutOfRange {
            class: class.to_string(),
            row,
        })
}

/// Sorts and deduplicates rows, checking each against the class.
fn checked_rows(instance: &Instance, class: &str, rows: &[usize]) -> Result<Vec<usize>, EditError> {
    let count = instance.objects_of(class).len();
    let mut rows = rows.to_vec();
    rows.sort_unstable();
    rows.dedup();

    match rows.iter().find(|row| **row >= count) {
        Some(row) => Err(EditError::ObjectOutOfRange {
            class: class.to_string(),
            row: *row,
        }),
        None => Ok(rows),
    }
}

fn object_data(instance: &Instance, class: &str, row: usize) -> Result<ObjectData, EditError> {
    let id = object_id_at(instance, class, row)?;
    let object = instance
        .objects
        .get(&id)
        .ok_or_else(|| EditError::ObjectOutOfRange {
            class: class.to_string(),
            row,
        })?;

    Ok(ObjectData {
        class: instance.display_class(class).to_string(),
        values: object
            .fields()
            .iter()
            .map(|slot| {
                slot.and_then(|field| instance.fields.get(&field))
                    .map(|field| field.value().to_string())
            })
            .collect(),
        comments: object.comments().to_vec(),
        comments_special: object.comments_special().to_vec(),
    })
}

fn reconnect_objects(instance: &mut Instance, objects: &[ObjectId]) {
    let fields: Vec<FieldId> = objects
        .iter()
        .filter_map(|id| instance.objects.get(id))
        .flat_map(|object| object.fields().iter().flatten().copied())
        .collect();

    for field in fields {
        references::reconnect_field(instance, field);
    }
}

#[cfg(test)]
mod tests {
    use super::{super::test_schema::instance, *};
    use crate::search::{ListRole, SearchQuery};

    #[test]
    fn rename_cascades_to_referrers() {
        let mut instance = instance();
        let zone = instance.field("Zone", 0, 0).expect("zone name").id();
        let zone_list_member = instance.field("ZoneList", 0, 1).expect("member").id();

        let changes = instance
            .set_value("Zone", 0, 0, "Interior_ZN")
            .expect("zone exists");

        assert_eq!(instance.value("ZoneList", 0, 1), Some("Interior_ZN"));
        assert_eq!(instance.value("People", 0, 1), Some("Interior_ZN"));
        assert_eq!(instance.value("BuildingSurface:Detailed", 0, 3), Some("Interior_ZN"));
        assert_eq!(changes.len(), 4);
        assert_eq!(changes[0].field, zone);
        assert_eq!(changes[0].old, "Core_ZN");

        let index = instance.search_index();
        assert_eq!(index.members(ListRole::ObjectList, "ZoneNames", "Core_ZN").count(), 0);
        assert_eq!(
            index.members(ListRole::ObjectList, "ZoneNames", "Interior_ZN").collect::<Vec<_>>().len(),
            2
        );
        assert!(
            instance
                .reference_graph()
                .ancestors(zone)
                .any(|(source, _)| source == zone_list_member)
        );
        assert_eq!(instance.reference_count(zone), 3);
    }

    #[test]
    fn clearing_a_name_does_not_cascade() {
        let mut instance = instance();
        let zone = instance.field("Zone", 0, 0).expect("zone name").id();

        let changes = instance.set_value_by_id(zone, "").expect("field exists");
        assert_eq!(changes.len(), 1);
        assert_eq!(instance.value("ZoneList", 0, 1), Some("Core_ZN"));
        assert_eq!(instance.reference_count(zone), 0);
    }

    #[test]
    fn setting_past_the_end_extends_the_object() {
        let mut instance = instance();
        instance
            .set_value("ZoneList", 0, 4, "Core_ZN")
            .expect("extensible class");

        let object = instance.object_at("ZoneList", 0).expect("zone list");
        assert_eq!(object.len(), 5);
        assert_eq!(object.field(3), None);
        assert_eq!(instance.value("ZoneList", 0, 4), Some("Core_ZN"));

        let error = instance
            .set_value("Version", 0, 3, "x")
            .expect_err("Version has one field");
        assert_eq!(
            error,
            EditError::FieldOutOfRange {
                class: "version".to_string(),
                index: 3
            }
        );
    }

    #[test]
    fn remove_drops_nodes_and_index_entries() {
        let mut instance = instance();
        let zone = instance.field("Zone", 0, 0).expect("zone name").id();
        let edges_before = instance.reference_graph().edge_count();

        let removed = instance.remove_objects("zone", &[0]).expect("row exists");
        assert_eq!(removed.len(), 1);
        assert_eq!(removed[0].class, "Zone");
        assert_eq!(removed[0].value(0), Some("Core_ZN"));

        assert!(instance.field_by_id(zone).is_none());
        assert!(!instance.reference_graph().contains(zone));
        assert_eq!(instance.reference_graph().edge_count(), edges_before - 3);
        assert_eq!(
            instance
                .search(&SearchQuery::new("core_zn").whole_field(true))
                .iter()
                .filter(|hit| hit.class == "zone")
                .count(),
            0
        );
        assert_eq!(instance.objects_of("zone").len(), 1);
    }

    #[test]
    fn remove_then_add_restores_references() {
        let mut instance = instance();
        let edges_before = instance.reference_graph().edge_count();

        let removed = instance.remove_objects("Zone", &[0]).expect("row exists");
        instance
            .add_objects("Zone", removed, Some(0))
            .expect("same class");

        assert_eq!(instance.value("Zone", 0, 0), Some("Core_ZN"));
        assert_eq!(instance.reference_graph().edge_count(), edges_before);
    }

    #[test]
    fn out_of_range_rows_remove_nothing() {
        let mut instance = instance();
        let error = instance
            .remove_objects("Zone", &[0, 7])
            .expect_err("row 7 does not exist");
        assert_eq!(
            error,
            EditError::ObjectOutOfRange {
                class: "zone".to_string(),
                row: 7
            }
        );
        assert_eq!(instance.objects_of("Zone").len(), 2);
    }

    #[test]
    fn duplicate_assigns_fresh_identities() {
        let mut instance = instance();
        let original = instance.object_at("People", 0).expect("people").clone();

        let ids = instance.duplicate_objects("People", &[0]).expect("row exists");
        assert_eq!(ids.len(), 1);
        assert_ne!(ids[0], original.id());
        assert_eq!(instance.object_row(ids[0]), Some(1));

        let copy = instance.object(ids[0]).expect("copy exists");
        assert_eq!(copy.obj_class(), original.obj_class());
        for (copied, source) in copy.fields().iter().zip(original.fields()) {
            assert_ne!(copied, source);
        }
        assert_eq!(instance.value("People", 1, 1), Some("Core_ZN"));
        assert_eq!(instance.value("People", 2, 0), Some("All People"));

        let zone = instance.field("Zone", 0, 0).expect("zone name").id();
        assert_eq!(instance.reference_count(zone), 4);
    }

    #[test]
    fn new_object_fills_defaults() {
        let mut instance = instance();
        let id = instance.new_object("SimulationControl", None).expect("class exists");
        let object = instance.object(id).expect("created");
        assert_eq!(object.len(), 2);
        assert_eq!(instance.value("SimulationControl", 0, 0), Some("No"));

        let id = instance.new_object("people", Some(0)).expect("class exists");
        assert_eq!(instance.object_row(id), Some(0));
        assert_eq!(instance.object(id).map(crate::ObjectInstance::len), Some(3));
    }

    #[test]
    fn set_defaults_overwrites_declared_defaults() {
        let mut instance = instance();
        let changes = instance.set_defaults("Zone", 1).expect("row exists");
        assert_eq!(changes.len(), 1);
        assert_eq!(instance.value("Zone", 1, 2), Some("0"));
        assert_eq!(instance.value("Zone", 1, 0), Some("Perimeter_ZN_1"));
    }

    #[test]
    fn add_rejects_other_classes() {
        let mut instance = instance();
        let error = instance
            .add_objects("Zone", vec![ObjectData::new("People", ["x"])], None)
            .expect_err("People is not a Zone");
        assert_eq!(
            error,
            EditError::ClassMismatch {
                expected: "zone".to_string(),
                found: "people".to_string()
            }
        );
    }

    #[test]
    fn objects_data_copies_in_row_order() {
        let instance = instance();
        let data = instance.objects_data("Zone", &[1, 0, 1]).expect("rows exist");
        let names: Vec<_> = data.iter().filter_map(|object| object.value(0)).collect();
        assert_eq!(names, ["Core_ZN", "Perimeter_ZN_1"]);
    }
}
