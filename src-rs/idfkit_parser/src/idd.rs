//! Parses IDD text into a [`Schema`].

use std::{iter::Enumerate, str::Lines};

use idfkit_schema::{Schema, SchemaClassBuilder, tag::names};
use idfkit_shared::Progress;

use crate::{
    PARSER_VERSION,
    token::{Comment, Line, Syntax, tokenize},
};

/// Pseudo-classes that open an IDD but are not object classes.
const RESERVED_CLASSES: [&str; 2] = ["lead input", "simulation data"];

const VERSION_MARKER: &str = "IDD_Version";

/// Parses IDD text one line per step.
///
/// Each call to `next` reads one line and yields the percentage of lines
/// read so far. The last value yielded is always 100. Dropping the parser
/// early abandons the parse; [`finish`](Self::finish) drains whatever is
/// left and returns the schema.
///
/// ```rust
/// use idfkit_parser::IddParser;
///
/// let text = "!IDD_Version 8.1.0.009\n\\group Simulation Parameters\nVersion,\n  A1 ; \\field Version Identifier\n";
/// let mut parser = IddParser::new(text);
/// let progress: Vec<u8> = parser.by_ref().collect();
/// assert_eq!(progress.last(), Some(&100));
///
/// let schema = parser.finish();
/// assert_eq!(schema.version(), Some("8.1.0.009"));
/// assert!(schema.contains_class("version"));
/// ```
#[derive(Debug)]
pub struct IddParser<'a> {
    lines: Enumerate<Lines<'a>>,
    progress: Progress,
    schema: Schema,
    group: Option<String>,
    open: Option<SchemaClassBuilder>,
    closed: bool,
    done: bool,
}

impl<'a> IddParser<'a> {
    /// Creates a parser over the full IDD text.
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines().enumerate(),
            progress: Progress::new(text.lines().count()),
            schema: Schema::new(PARSER_VERSION),
            group: None,
            open: None,
            closed: false,
            done: false,
        }
    }

    /// Reads any remaining lines and returns the schema.
    #[must_use]
    pub fn finish(mut self) -> Schema {
        self.by_ref().for_each(drop);
        self.schema
    }

    fn read_line(&mut self, line: &str) {
        let tokens = tokenize(line, Syntax::Idd);

        for value in &tokens.values {
            let open = if self.closed { None } else { self.open.as_mut() };
            if let Some(builder) = open {
                if !value.text.is_empty() {
                    builder.push_field(value.text);
                }
            } else {
                self.flush();
                self.open = Some(SchemaClassBuilder::new(value.text));
            }
            if value.last {
                self.closed = true;
            }
        }

        if let Some(tag) = tokens.tag {
            if tag.keyword == names::GROUP {
                if self.closed {
                    self.flush();
                }
                self.group = tag.value.map(str::to_string);
            } else if let Some(builder) = self.open.as_mut() {
                builder.add_tag(tag.keyword, tag.value.map(str::to_string));
            }
        }

        if let Some(comment) = tokens.comment {
            self.read_comment(&tokens, comment);
        }
    }

    fn read_comment(&mut self, tokens: &Line<'_>, comment: Comment<'_>) {
        if let Comment::General(text) = comment
            && let Some(version) = text.trim().strip_prefix(VERSION_MARKER)
        {
            self.schema.set_version(version.trim());
            return;
        }

        if !tokens.is_comment_only() || self.closed {
            return;
        }
        if let Some(builder) = self.open.as_mut() {
            match comment {
                Comment::General(text) => builder.add_comment(text),
                Comment::Special(text) => builder.add_special_comment(text),
            }
        }
    }

    /// Inserts the closed class, if any, into the schema.
    fn flush(&mut self) {
        let Some(builder) = self.open.take() else {
            return;
        };
        let closed = std::mem::replace(&mut self.closed, false);

        if !closed {
            tracing::warn!(class = builder.display_name(), "dropping class without a closing `;`");
            return;
        }
        if RESERVED_CLASSES
            .iter()
            .any(|reserved| reserved.eq_ignore_ascii_case(builder.display_name()))
        {
            return;
        }

        self.schema.insert_class(builder.build(self.group.clone()));
    }
}

impl Iterator for IddParser<'_> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        if self.done {
            return None;
        }

        if let Some((_, line)) = self.lines.next() {
            self.read_line(line);
            return Some(self.progress.advance(1));
        }

        self.flush();
        self.done = true;
        tracing::debug!(
            version = self.schema.version(),
            classes = self.schema.len(),
            groups = self.schema.groups().len(),
            "parsed schema"
        );
        Some(self.progress.finish())
    }
}

/// Parses IDD text in one call.
#[must_use]
pub fn parse_idd(text: &str) -> Schema {
    IddParser::new(text).finish()
}
