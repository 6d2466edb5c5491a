//! Error message formatting and display functionality
//
//       error: `NotARealClass` is not an object class of this schema (line 12)
//        --> model.idf:12:1
//         |
//      12 | NotARealClass,
//         | ^^^^^^^^^^^^^^
//         = note: objects of unknown classes are never skipped; fix or remove the object

use std::path::Path;

use anstream::eprintln;
use idfkit_shared::{Context, ErrorLocation, IdfkitError};
use owo_colors::{OwoColorize, Style};

use crate::stylesheet;

/// Prints a formatted error message to stderr
pub fn print(error: &IdfkitError) {
    let error_string = error_to_string(error);
    eprintln!("{error_string}");
}

/// Converts an error to a formatted string representation
fn error_to_string(error: &IdfkitError) -> String {
    let message_line = get_error_message_line(error.message());
    let location_line = get_location_line(error.path(), error.location());

    let mut lines = vec![message_line, location_line];
    match error.location() {
        Some(location) => lines.push(get_source_lines(location, error.context())),
        None => lines.extend(get_context_lines(" ", error.context())),
    }
    lines.push(String::new());

    lines.join("\n")
}

/// Formats the main error message line
fn get_error_message_line(message: &str) -> String {
    get_message_line("error", stylesheet::ERROR_COLOR, message)
}

/// Formats a note message line
fn get_note_message_line(message: &str) -> String {
    get_message_line("note", stylesheet::NOTE_COLOR, message)
}

/// Formats a help message line
fn get_help_message_line(message: &str) -> String {
    get_message_line("help", stylesheet::HELP_COLOR, message)
}

/// Formats a message line with a colored prefix
fn get_message_line(kind: &str, kind_color: Style, message: &str) -> String {
    // <kind>: <message>
    let kind_str = kind_color.style(kind);
    let message_line = format!("{kind_str}: {message}");

    message_line.bold().to_string()
}

/// Formats the location information line
fn get_location_line(path: &Path, location: Option<&ErrorLocation>) -> String {
    //  --> <path>
    // OR
    //  --> <path>:<line>:<column>
    let arrow = stylesheet::SOURCE_ANNOTATION.style("-->");
    let path = path.display();

    location.map_or_else(
        || format!(" {arrow} {path}"),
        |location| format!(" {arrow} {path}:{}:{}", location.line(), location.column()),
    )
}

/// Formats the source line with the offending text underlined
fn get_source_lines(location: &ErrorLocation, context: &[Context]) -> String {
    //    |
    // 12 | NotARealClass,
    //    | ^^^^^^^^^^^^^^
    let line = location.line();

    // the margin is as wide as the line number
    let margin_width = line.ilog10() + 1;
    let margin = " ".repeat(margin_width as usize);

    let bar = stylesheet::SOURCE_ANNOTATION.style("|");
    let line_label = stylesheet::SOURCE_ANNOTATION.style(line.to_string());

    let pointer_indent = " ".repeat(location.column() - 1);
    let pointer = stylesheet::ERROR_COLOR
        .bold()
        .style("^".repeat(location.length()));

    let blank_line = format!("{margin} {bar} ");
    let source_line = format!("{line_label} {bar} {}", location.line_source());
    let pointer_line = format!("{margin} {bar} {pointer_indent}{pointer}");

    let mut source_lines = vec![blank_line, source_line, pointer_line];
    source_lines.extend(get_context_lines(&margin, context));

    source_lines.join("\n")
}

fn get_context_lines(margin: &str, context: &[Context]) -> Vec<String> {
    context
        .iter()
        .map(|context| {
            let (equals, context_message) = match context {
                Context::Note(message) => (
                    stylesheet::NOTE_COLOR.bold().style("="),
                    get_note_message_line(message),
                ),
                Context::Help(message) => (
                    stylesheet::HELP_COLOR.bold().style("="),
                    get_help_message_line(message),
                ),
            };
            format!("{margin} {equals} {context_message}")
        })
        .collect()
}
