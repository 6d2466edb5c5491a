//! Writes an [`Instance`] back to IDF text.
//!
//! The layout follows the IDF Editor conventions that EnergyPlus tooling
//! expects: a generated header, then every object with one field per line
//! and an aligned `!-` comment naming the field and its units.

use std::{
    fmt::{self, Write as _},
    fs,
    io::{self, Write},
    path::Path,
};

use idfkit_model::{Instance, ObjectInstance};
use idfkit_schema::{SchemaClass, UnitsSpec};

/// Values and their separators are padded to this width before the
/// field comment.
const VALUE_COLUMN: usize = 25;
const INDENT: &str = "    ";

const NOTICE: [&str; 2] = [
    "!-NOTE: All comments with '!-' are ignored by the IDFEditor and are generated automatically.",
    "!-      Use '!' comments if they need to be retained when using the IDFEditor.",
];

/// Renders the instance as IDF text.
///
/// ```rust
/// # use std::sync::Arc;
/// # use idfkit_model::{Instance, ObjectData};
/// # use idfkit_schema::{Schema, SchemaClassBuilder, tag::names};
/// let mut schema = Schema::new("docs");
/// schema.insert_class(
///     SchemaClassBuilder::new("Version")
///         .field("A1", &[(names::FIELD, Some("Version Identifier"))])
///         .build(None),
/// );
/// let mut instance = Instance::new(Arc::new(schema));
/// instance.push_object(ObjectData::new("version", ["8.1"])).expect("known class");
///
/// let text = idfkit_writer::to_idf_string(&instance);
/// assert!(text.starts_with("!-Generator idfkit v"));
/// assert!(text.contains("Version,\n    8.1;                     !- Version Identifier\n"));
/// ```
#[must_use]
pub fn to_idf_string(instance: &Instance) -> String {
    let mut text = String::new();
    // writing into a `String` cannot fail
    let _ = write_instance(instance, &mut text);
    text
}

/// Writes the instance as IDF text in the instance's encoding.
///
/// # Errors
///
/// Returns any error raised by `writer`.
pub fn write_to(instance: &Instance, writer: &mut impl Write) -> io::Result<()> {
    let text = to_idf_string(instance);
    writer.write_all(&instance.encoding().encode(&text))?;
    writer.flush()
}

/// Writes the instance to a file and records the path on success.
///
/// Failures are logged and reported as `false` so that the caller can pick
/// another path and try again.
pub fn write_idf(instance: &mut Instance, path: impl AsRef<Path>) -> bool {
    let path = path.as_ref();
    let result = fs::File::create(path).and_then(|mut file| write_to(instance, &mut file));

    match result {
        Ok(()) => {
            tracing::debug!(path = %path.display(), objects = instance.object_count(), "wrote IDF");
            instance.set_file_path(path);
            true
        }
        Err(error) => {
            tracing::error!(path = %path.display(), %error, "could not write IDF");
            false
        }
    }
}

fn write_instance(instance: &Instance, out: &mut String) -> fmt::Result {
    write_header(instance, out)?;

    for class in instance.class_names() {
        let objects = instance.objects_of(class);
        if objects.is_empty() {
            continue;
        }
        let schema_class = instance.schema().class(class);
        for object in objects.iter().filter_map(|id| instance.object(*id)) {
            write_object(instance, schema_class, object, out)?;
            writeln!(out)?;
        }
    }

    for comment in instance.trailing_comments_special() {
        writeln!(out, "!-{comment}")?;
    }
    for comment in instance.trailing_comments() {
        writeln!(out, "!{comment}")?;
    }
    Ok(())
}

fn write_header(instance: &Instance, out: &mut String) -> fmt::Result {
    writeln!(out, "!-Generator idfkit v{}", env!("CARGO_PKG_VERSION"))?;

    let options: Vec<&str> = instance.options().iter().map(String::as_str).collect();
    writeln!(out, "!-Option {}", options.join(" "))?;
    writeln!(out)?;

    for line in NOTICE {
        writeln!(out, "{line}")?;
    }
    writeln!(out)
}

fn write_object(
    instance: &Instance,
    schema_class: Option<&SchemaClass>,
    object: &ObjectInstance,
    out: &mut String,
) -> fmt::Result {
    for comment in object.comments_special() {
        writeln!(out, "!-{comment}")?;
    }
    for comment in object.comments() {
        writeln!(out, "!{comment}")?;
    }

    let display = schema_class.map_or(object.obj_class(), SchemaClass::display_name);
    if object.is_empty() {
        return writeln!(out, "{display};");
    }
    writeln!(out, "{display},")?;

    let last = object.len() - 1;
    for (index, slot) in object.fields().iter().enumerate() {
        let value = slot
            .and_then(|id| instance.field_by_id(id))
            .map_or("", |field| field.value());
        let separator = if index == last { ';' } else { ',' };
        let cell = format!("{value}{separator}");

        write!(out, "{INDENT}{cell:<VALUE_COLUMN$}")?;
        if cell.chars().count() >= VALUE_COLUMN {
            out.push_str("  ");
        }
        writeln!(out, "{}", field_comment(schema_class, index))?;
    }
    Ok(())
}

/// Returns `!- <name>` with ` {<units>}` appended for fixed units.
fn field_comment(schema_class: Option<&SchemaClass>, index: usize) -> String {
    let Some(class) = schema_class else {
        return "!-".to_string();
    };

    let mut comment = format!("!- {}", class.field_name(index).unwrap_or_default());
    if let Some(UnitsSpec::Fixed(units)) = class.field(index).and_then(|field| field.units()) {
        comment.push_str(&format!(" {{{units}}}"));
    }
    comment
}
