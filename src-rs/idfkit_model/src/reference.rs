//! The directed graph of cross-references between fields.
//!
//! An edge runs from a field that names an object (an `\object-list`
//! holder) to the field that carries that name (a `\reference` holder), and
//! is annotated with the lists that justified it. Edges are derived data:
//! they can always be recomputed from field values and schema tags.

use std::collections::BTreeSet;

use indexmap::{IndexMap, IndexSet};

use crate::id::FieldId;

type Adjacency = IndexMap<FieldId, IndexMap<FieldId, BTreeSet<String>>>;

/// Reference graph keyed by field identity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceGraph {
    nodes: IndexSet<FieldId>,
    outgoing: Adjacency,
    incoming: Adjacency,
}

impl ReferenceGraph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node. Adding an existing node is a no-op.
    pub fn add_node(&mut self, field: FieldId) {
        self.nodes.insert(field);
    }

    /// Removes a node together with every edge touching it.
    pub fn remove_node(&mut self, field: FieldId) -> bool {
        self.clear_edges_of(field);
        self.nodes.shift_remove(&field)
    }

    /// Returns whether a field is a node.
    #[must_use]
    pub fn contains(&self, field: FieldId) -> bool {
        self.nodes.contains(&field)
    }

    /// Iterates over nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = FieldId> {
        self.nodes.iter().copied()
    }

    /// Returns the number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of distinct (source, target) edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.outgoing.values().map(IndexMap::len).sum()
    }

    /// Adds an edge annotated with `list`.
    ///
    /// Both endpoints must already be nodes; otherwise nothing is added and
    /// `false` is returned. Re-adding an edge only merges its annotation.
    pub fn add_edge(&mut self, from: FieldId, to: FieldId, list: &str) -> bool {
        if from == to || !self.contains(from) || !self.contains(to) {
            return false;
        }

        self.outgoing
            .entry(from)
            .or_default()
            .entry(to)
            .or_default()
            .insert(list.to_string());
        self.incoming
            .entry(to)
            .or_default()
            .entry(from)
            .or_default()
            .insert(list.to_string());
        true
    }

    /// Removes every edge, keeping the nodes.
    pub fn clear_edges(&mut self) {
        self.outgoing.clear();
        self.incoming.clear();
    }

    /// Removes every edge into or out of a node.
    pub fn clear_edges_of(&mut self, field: FieldId) {
        if let Some(targets) = self.outgoing.shift_remove(&field) {
            for target in targets.keys() {
                remove_half(&mut self.incoming, *target, field);
            }
        }
        if let Some(sources) = self.incoming.shift_remove(&field) {
            for source in sources.keys() {
                remove_half(&mut self.outgoing, *source, field);
            }
        }
    }

    /// Iterates over the fields that point at `field`, with edge lists.
    pub fn ancestors(&self, field: FieldId) -> impl Iterator<Item = (FieldId, &BTreeSet<String>)> {
        self.incoming
            .get(&field)
            .into_iter()
            .flat_map(|sources| sources.iter().map(|(source, lists)| (*source, lists)))
    }

    /// Iterates over the fields `field` points at, with edge lists.
    pub fn descendants(
        &self,
        field: FieldId,
    ) -> impl Iterator<Item = (FieldId, &BTreeSet<String>)> {
        self.outgoing
            .get(&field)
            .into_iter()
            .flat_map(|targets| targets.iter().map(|(target, lists)| (*target, lists)))
    }

    /// Returns the number of fields connected to `field` in either
    /// direction.
    #[must_use]
    pub fn degree(&self, field: FieldId) -> usize {
        self.incoming.get(&field).map_or(0, IndexMap::len)
            + self.outgoing.get(&field).map_or(0, IndexMap::len)
    }
}

fn remove_half(adjacency: &mut Adjacency, node: FieldId, other: FieldId) {
    if let Some(neighbours) = adjacency.get_mut(&node) {
        neighbours.shift_remove(&other);
        if neighbours.is_empty() {
            adjacency.shift_remove(&node);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph() -> (ReferenceGraph, [FieldId; 3]) {
        let mut graph = ReferenceGraph::new();
        let ids = [FieldId::next(), FieldId::next(), FieldId::next()];
        for id in ids {
            graph.add_node(id);
        }
        (graph, ids)
    }

    #[test]
    fn edges_are_sets() {
        let (mut graph, [people, lights, zone]) = graph();
        assert!(graph.add_edge(people, zone, "zonenames"));
        assert!(graph.add_edge(people, zone, "zonenames"));
        assert!(graph.add_edge(people, zone, "zoneandzonelistnames"));
        assert!(graph.add_edge(lights, zone, "zonenames"));

        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.degree(zone), 2);
        let (source, lists) = graph.ancestors(zone).next().expect("has ancestors");
        assert_eq!(source, people);
        assert_eq!(lists.len(), 2);
        assert_eq!(graph.descendants(people).count(), 1);
    }

    #[test]
    fn edges_need_live_endpoints() {
        let (mut graph, [people, _, _]) = graph();
        assert!(!graph.add_edge(people, FieldId::next(), "zonenames"));
        assert!(!graph.add_edge(people, people, "zonenames"));
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn removing_a_node_drops_its_edges() {
        let (mut graph, [people, lights, zone]) = graph();
        graph.add_edge(people, zone, "zonenames");
        graph.add_edge(lights, zone, "zonenames");

        assert!(graph.remove_node(zone));
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.descendants(people).count(), 0);
        assert_eq!(graph.node_count(), 2);
        assert!(!graph.remove_node(zone));
    }

    #[test]
    fn clearing_keeps_nodes() {
        let (mut graph, [people, lights, zone]) = graph();
        graph.add_edge(people, zone, "zonenames");
        graph.add_edge(lights, zone, "zonenames");

        graph.clear_edges_of(lights);
        assert_eq!(graph.degree(zone), 1);

        graph.clear_edges();
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.node_count(), 3);
    }
}
