//! Plain-text reports for each subcommand.

use std::path::Path;

use anstream::println;
use idfkit_model::{Instance, ReferenceEntry, ReferenceTree, SearchHit};
use idfkit_schema::{Schema, SchemaClass};

use crate::stylesheet;

pub fn print_schema(schema: &Schema, cached_at: &Path) {
    let version = schema.version().unwrap_or("unknown");
    let heading = stylesheet::HEADING.style(format!("EnergyPlus {version}"));
    println!("{heading}");
    println!("  classes:      {}", schema.len());
    println!("  groups:       {}", schema.groups().len());
    println!("  object lists: {}", schema.object_lists().len());
    println!("  cached at:    {}", cached_at.display());
}

pub fn print_instance(instance: &Instance) {
    let version = instance.version().unwrap_or("unknown");
    let heading = stylesheet::HEADING.style(format!("EnergyPlus {version} model"));
    println!("{heading}");

    for class in instance.class_names() {
        let count = instance.objects_of(class).len();
        if count == 0 {
            continue;
        }
        let name = display_class(instance, class);
        println!("  {:<40} {count}", stylesheet::CLASS_NAME.style(name));
    }

    let graph = instance.reference_graph();
    println!();
    println!("  objects:    {}", instance.object_count());
    println!("  fields:     {}", instance.field_count());
    println!("  references: {} nodes, {} edges", graph.node_count(), graph.edge_count());
    if !instance.options().is_empty() {
        let options: Vec<&str> = instance.options().iter().map(String::as_str).collect();
        println!("  options:    {}", options.join(", "));
    }
}

pub fn print_hits(instance: &Instance, hits: &[SearchHit]) {
    if hits.is_empty() {
        println!("no matches");
        return;
    }

    for hit in hits {
        let Some(field) = instance.field_by_id(hit.field) else {
            continue;
        };
        let row = instance
            .object_row(field.object())
            .map_or_else(|| "?".to_string(), |row| row.to_string());
        let location = format!("{}[{row}].{}", hit.display_class, field.index());
        println!(
            "{}  {}",
            stylesheet::CLASS_NAME.style(location),
            stylesheet::VALUE.style(&hit.value)
        );
    }
}

pub fn print_tree(tree: Option<&ReferenceTree>) {
    let Some(tree) = tree else {
        println!("no references");
        return;
    };

    print_entries("referred to by", &tree.ancestors);
    print_entries("refers to", &tree.descendants);
}

fn print_entries(label: &str, entries: &[ReferenceEntry]) {
    if entries.is_empty() {
        return;
    }

    println!("{}", stylesheet::HEADING.style(label));
    for entry in entries {
        let row = entry.row.map_or_else(|| "?".to_string(), |row| row.to_string());
        let location = format!("{}[{row}].{}", entry.display_class, entry.index);
        println!(
            "  {}  {}  ({})",
            stylesheet::CLASS_NAME.style(location),
            stylesheet::VALUE.style(&entry.value),
            entry.lists.join(", ")
        );
    }
}

fn display_class<'a>(instance: &'a Instance, class: &'a str) -> &'a str {
    instance
        .schema()
        .class(class)
        .map_or(class, SchemaClass::display_name)
}
