//! Parses IDF text into an [`Instance`].

use std::{iter::Enumerate, mem, str::Lines, sync::Arc};

use idfkit_model::{Instance, ObjectData, ReferenceConnector};
use idfkit_schema::{Schema, SchemaError, version_key};
use idfkit_shared::Progress;

use crate::{
    config::Config,
    error::ParserError,
    token::{Comment, Syntax, tokenize},
};

const VERSION_CLASS: &str = "version";
const OPTION_MARKER: &str = "Option";
const INGEST_CEILING: u8 = 50;

/// Special comments written by editors and regenerated on every save.
const GENERATED_PREFIXES: [&str; 5] = [
    "Generator",
    OPTION_MARKER,
    "NOTE:",
    "Use '!' comments",
    "===",
];

/// Provides schemas by EnergyPlus version.
///
/// The IDF parser asks for a schema as soon as it has read the file's
/// `Version` object. A source that cannot provide one returns a
/// [`SchemaError`], which the parser hands back unchanged so the caller can
/// obtain the schema and retry.
pub trait SchemaSource {
    /// Returns the schema for a version such as `8.1` or `8.1.0.009`.
    ///
    /// # Errors
    ///
    /// Returns a [`SchemaError`] if no usable schema exists for the version.
    fn schema(&self, version: &str) -> Result<Arc<Schema>, SchemaError>;
}

/// A source that never has a schema.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoSchemas;

impl SchemaSource for NoSchemas {
    fn schema(&self, version: &str) -> Result<Arc<Schema>, SchemaError> {
        Err(SchemaError::missing(version))
    }
}

/// A single schema serves its own version, or any version if it has none.
impl SchemaSource for Arc<Schema> {
    fn schema(&self, version: &str) -> Result<Arc<Schema>, SchemaError> {
        match self.version_key() {
            Some(key) if key != version_key(version) => Err(SchemaError::missing(version)),
            Some(_) | None => Ok(Self::clone(self)),
        }
    }
}

#[derive(Debug, Default)]
struct PendingObject {
    values: Vec<String>,
    line: usize,
}

#[derive(Debug)]
enum Phase {
    Reading,
    Connecting {
        connector: Option<ReferenceConnector>,
        progress: Progress,
    },
    Done,
}

/// Parses IDF text one line per step, then connects references one node
/// per step.
///
/// Reading lines reports 0 to 50 percent and connecting reports 50 to 100.
/// The first error ends the parse.
#[derive(Debug)]
pub struct IdfParser<'a, S: ?Sized> {
    lines: Enumerate<Lines<'a>>,
    source: &'a S,
    config: Config,
    progress: Progress,
    phase: Phase,
    instance: Option<Instance>,
    object: PendingObject,
    comments: Vec<String>,
    comments_special: Vec<String>,
    options: Vec<String>,
}

impl<'a, S: SchemaSource + ?Sized> IdfParser<'a, S> {
    /// Creates a parser that takes its schema from `source`.
    #[must_use]
    pub fn new(text: &'a str, source: &'a S, config: Config) -> Self {
        Self {
            lines: text.lines().enumerate(),
            source,
            config,
            progress: Progress::with_range(text.lines().count(), 0, INGEST_CEILING),
            phase: Phase::Reading,
            instance: None,
            object: PendingObject::default(),
            comments: Vec::new(),
            comments_special: Vec::new(),
            options: Vec::new(),
        }
    }

    /// Reads against `schema` instead of asking the source.
    #[must_use]
    pub fn with_schema(mut self, schema: Arc<Schema>) -> Self {
        self.attach(schema);
        self
    }

    /// Runs the parse to completion and returns the instance.
    ///
    /// # Errors
    ///
    /// Returns the first error the parse raised.
    pub fn finish(mut self) -> Result<Instance, ParserError> {
        for step in self.by_ref() {
            step?;
        }
        self.instance
            .ok_or_else(|| ParserError::from(SchemaError::no_version()))
    }

    fn attach(&mut self, schema: Arc<Schema>) {
        let mut instance = Instance::new(schema);
        if let Some(classes) = self.config.geometry_classes() {
            instance = instance.with_geometry_classes(classes.iter().map(String::as_str));
        }
        for option in self.options.drain(..) {
            instance.add_option(option);
        }
        self.instance = Some(instance);
    }

    fn read_next(&mut self) -> Result<u8, ParserError> {
        if let Some((number, line)) = self.lines.next() {
            self.read_line(number + 1, line)?;
            return Ok(self.progress.advance(1));
        }

        self.end_of_input()?;
        Ok(self.progress.finish())
    }

    fn read_line(&mut self, number: usize, line: &str) -> Result<(), ParserError> {
        let tokens = tokenize(line, Syntax::Idf);

        if tokens.values.is_empty() {
            if let Some(comment) = tokens.comment {
                self.read_comment(comment);
            }
            return Ok(());
        }

        for value in tokens.values {
            if self.object.values.is_empty() {
                self.object.line = number;
            }
            self.object.values.push(value.text.to_string());
            if value.last {
                self.complete_object()?;
            }
        }
        Ok(())
    }

    fn read_comment(&mut self, comment: Comment<'_>) {
        match comment {
            Comment::General(text) => self.comments.push(text.to_string()),
            Comment::Special(text) => {
                let trimmed = text.trim();
                if let Some(options) = trimmed.strip_prefix(OPTION_MARKER) {
                    for option in options.split_whitespace() {
                        self.add_option(option);
                    }
                } else if !GENERATED_PREFIXES.iter().any(|prefix| trimmed.starts_with(prefix)) {
                    self.comments_special.push(text.to_string());
                }
            }
        }
    }

    fn add_option(&mut self, option: &str) {
        match self.instance.as_mut() {
            Some(instance) => instance.add_option(option),
            None => self.options.push(option.to_string()),
        }
    }

    fn complete_object(&mut self) -> Result<(), ParserError> {
        let object = mem::take(&mut self.object);
        let mut values = object.values.into_iter();
        let Some(class) = values.next() else {
            return Ok(());
        };
        let values: Vec<String> = values.collect();
        let is_version = class.eq_ignore_ascii_case(VERSION_CLASS);

        if self.instance.is_none() {
            let declared = values.first().filter(|_| is_version).filter(|value| !value.is_empty());
            let schema = self.load_schema(declared.map(String::as_str))?;
            self.attach(schema);
        }
        let Some(instance) = self.instance.as_mut() else {
            return Err(SchemaError::no_version().into());
        };

        if is_version && let Some(version) = values.first() {
            instance.set_version(version.clone());
        }

        let line = object.line;
        let data = ObjectData {
            class: class.clone(),
            values: values.into_iter().map(Some).collect(),
            comments: mem::take(&mut self.comments),
            comments_special: mem::take(&mut self.comments_special),
        };
        instance.push_object(data).map(drop).map_err(|error| {
            tracing::debug!(%error, line, "rejected object");
            ParserError::InvalidObject { class, line }
        })
    }

    fn load_schema(&self, declared: Option<&str>) -> Result<Arc<Schema>, ParserError> {
        let version = declared
            .or_else(|| self.config.default_version())
            .ok_or_else(SchemaError::no_version)?;
        tracing::debug!(version, "loading schema");
        Ok(self.source.schema(version)?)
    }

    fn end_of_input(&mut self) -> Result<(), ParserError> {
        let unterminated = mem::take(&mut self.object);
        if let Some(class) = unterminated.values.first() {
            tracing::warn!(class = %class, line = unterminated.line, "dropping object without a closing `;`");
        }

        if self.instance.is_none() {
            let schema = self.load_schema(None)?;
            self.attach(schema);
        }
        let Some(instance) = self.instance.as_mut() else {
            return Err(SchemaError::no_version().into());
        };

        instance.set_trailing_comments(mem::take(&mut self.comments));
        instance.set_trailing_comments_special(mem::take(&mut self.comments_special));
        tracing::debug!(
            objects = instance.object_count(),
            fields = instance.field_count(),
            "read objects"
        );

        let connector = self
            .config
            .connect_references()
            .then(|| ReferenceConnector::new(instance, false));
        let total = connector.as_ref().map_or(0, ReferenceConnector::len);
        self.phase = Phase::Connecting {
            connector,
            progress: Progress::with_range(total, INGEST_CEILING, 100),
        };
        Ok(())
    }

    fn connect_next(&mut self) -> u8 {
        let Phase::Connecting { connector, progress } = &mut self.phase else {
            return 100;
        };

        if let (Some(connector), Some(instance)) = (connector.as_mut(), self.instance.as_mut())
            && connector.step(instance)
        {
            return progress.advance(1);
        }

        let percent = progress.finish();
        if let Some(instance) = self.instance.as_ref() {
            tracing::debug!(edges = instance.reference_graph().edge_count(), "connected references");
        }
        self.phase = Phase::Done;
        percent
    }
}

impl<S: SchemaSource + ?Sized> Iterator for IdfParser<'_, S> {
    type Item = Result<u8, ParserError>;

    fn next(&mut self) -> Option<Self::Item> {
        let step = match self.phase {
            Phase::Reading => self.read_next(),
            Phase::Connecting { .. } => Ok(self.connect_next()),
            Phase::Done => return None,
        };

        if step.is_err() {
            self.phase = Phase::Done;
        }
        Some(step)
    }
}

/// Parses IDF text in one call.
///
/// # Errors
///
/// Returns an error if no schema can be provided or an object names an
/// unknown class.
pub fn parse_idf<S: SchemaSource + ?Sized>(
    text: &str,
    source: &S,
    config: Config,
) -> Result<Instance, ParserError> {
    IdfParser::new(text, source, config).finish()
}
