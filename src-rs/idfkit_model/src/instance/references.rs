//! Cross-reference connection and queries.

use std::collections::BTreeSet;

use super::{FieldChange, Instance};
use crate::{
    id::{FieldId, ObjectId},
    search::ListRole,
};

/// Rebuilds the reference graph one node at a time.
///
/// Creating a connector clears every edge. Each [`step`](Self::step) then
/// connects one node, so a caller can report progress or stop between
/// nodes. Stopping early leaves the remaining nodes without edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceConnector {
    pending: Vec<FieldId>,
    position: usize,
    ignore_geometry: bool,
}

impl ReferenceConnector {
    /// Clears every edge of the instance and prepares to reconnect.
    #[must_use]
    pub fn new(instance: &mut Instance, ignore_geometry: bool) -> Self {
        instance.graph.clear_edges();
        Self {
            pending: instance.graph.nodes().collect(),
            position: 0,
            ignore_geometry,
        }
    }

    /// Returns the number of nodes to connect.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Returns whether there are no nodes to connect.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Returns the number of nodes connected so far.
    #[must_use]
    pub const fn connected(&self) -> usize {
        self.position
    }

    /// Connects the next node. Returns `false` once every node is done.
    pub fn step(&mut self, instance: &mut Instance) -> bool {
        let Some(field) = self.pending.get(self.position).copied() else {
            return false;
        };
        connect_node(instance, field, self.ignore_geometry);
        self.position += 1;
        true
    }

    /// Connects every remaining node.
    pub fn run(mut self, instance: &mut Instance) {
        while self.step(instance) {}
        tracing::debug!(
            nodes = self.pending.len(),
            edges = instance.graph.edge_count(),
            "connected references"
        );
    }
}

/// One field connected to the field a tree was requested for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceEntry {
    /// The connected field
    pub field: FieldId,
    /// The object owning the connected field
    pub object: ObjectId,
    /// Lowercase class name of the object
    pub class: String,
    /// Class name as declared
    pub display_class: String,
    /// Row of the object within its class
    pub row: Option<usize>,
    /// Position of the field within its object
    pub index: usize,
    /// The connected field's value
    pub value: String,
    /// The lists shared by the two fields
    pub lists: Vec<String>,
}

/// The fields connected to one field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceTree {
    /// Fields that point at the field
    pub ancestors: Vec<ReferenceEntry>,
    /// Fields the field points at
    pub descendants: Vec<ReferenceEntry>,
}

/// Adds every edge a node takes part in.
///
/// Values are compared through the search index, so a node whose value has
/// no bucket simply gets no edges. Fields of the same object are never
/// linked.
fn connect_node(instance: &mut Instance, field: FieldId, ignore_geometry: bool) {
    let Some(source) = instance.fields.get(&field) else {
        return;
    };
    if source.value().is_empty() || (ignore_geometry && instance.search.is_geometry(source.class())) {
        return;
    }

    let eligible = |other: FieldId| {
        instance.fields.get(&other).is_some_and(|candidate| {
            candidate.object() != source.object()
                && !(ignore_geometry && instance.search.is_geometry(candidate.class()))
        })
    };

    let mut edges = Vec::new();
    for list in source.role().object_lists() {
        for target in instance
            .search
            .members(ListRole::Reference, list, source.value())
            .filter(|target| eligible(*target))
        {
            edges.push((field, target, list.clone()));
        }
    }
    for list in source.role().references() {
        for referrer in instance
            .search
            .members(ListRole::ObjectList, list, source.value())
            .filter(|referrer| eligible(*referrer))
        {
            edges.push((referrer, field, list.clone()));
        }
    }

    for (from, to, list) in edges {
        instance.graph.add_edge(from, to, &list);
    }
}

/// Recomputes the edges of one field after its value changed.
pub(super) fn reconnect_field(instance: &mut Instance, field: FieldId) {
    instance.graph.clear_edges_of(field);
    if instance.graph.contains(field) {
        connect_node(instance, field, false);
    }
}

pub(super) fn reference_count(instance: &Instance, field: FieldId) -> i64 {
    let Some(instance_field) = instance.fields.get(&field) else {
        return -1;
    };
    if !instance_field.role().is_linked() {
        return -1;
    }

    i64::try_from(instance.graph.degree(field)).unwrap_or(i64::MAX)
}

pub(super) fn reference_tree_data(
    instance: &Instance,
    class: &str,
    row: usize,
    index: usize,
) -> Option<ReferenceTree> {
    let field = instance.field(class, row, index)?.id();

    let entry = |(other, lists): (FieldId, &BTreeSet<String>)| {
        let connected = instance.fields.get(&other)?;
        Some(ReferenceEntry {
            field: other,
            object: connected.object(),
            class: connected.class().to_string(),
            display_class: instance.display_class(connected.class()).to_string(),
            row: instance.object_row(connected.object()),
            index: connected.index(),
            value: connected.value().to_string(),
            lists: lists.iter().cloned().collect(),
        })
    };

    let tree = ReferenceTree {
        ancestors: instance.graph.ancestors(field).filter_map(entry).collect(),
        descendants: instance.graph.descendants(field).filter_map(entry).collect(),
    };

    (!tree.ancestors.is_empty() || !tree.descendants.is_empty()).then_some(tree)
}

/// Propagates a field's new value to every field that referred to it by
/// `old_value`, then reconnects all of them.
///
/// An empty new value is not propagated: clearing a name leaves the
/// referring fields as they were.
pub(super) fn update_reference_names(
    instance: &mut Instance,
    field: FieldId,
    old_value: &str,
) -> Vec<FieldChange> {
    let Some(renamed) = instance.fields.get(&field) else {
        return Vec::new();
    };
    let new_value = renamed.value().to_string();
    let old_lower = old_value.to_lowercase();

    let ancestors: Vec<FieldId> = if new_value.is_empty() || new_value == old_value {
        Vec::new()
    } else {
        instance
            .graph
            .ancestors(field)
            .map(|(ancestor, _)| ancestor)
            .collect()
    };

    let mut changes = Vec::new();
    let mut touched = vec![field];
    for ancestor in ancestors {
        let Some(referrer) = instance.fields.get_mut(&ancestor) else {
            continue;
        };
        if referrer.value.to_lowercase() != old_lower {
            continue;
        }

        let previous = std::mem::replace(&mut referrer.value, new_value.clone());
        instance.index_field(ancestor);
        changes.push(FieldChange {
            field: ancestor,
            old: previous,
            new: new_value.clone(),
        });
        touched.push(ancestor);
    }

    for touched_field in touched {
        reconnect_field(instance, touched_field);
    }

    if !changes.is_empty() {
        tracing::debug!(
            from = old_value,
            to = %new_value,
            count = changes.len(),
            "renamed references"
        );
    }
    changes
}
