//! Errors raised while parsing an IDF.

use idfkit_schema::SchemaError;
use idfkit_shared::{AsIdfkitError, Context, ErrorLocation};
use thiserror::Error;

/// Why an IDF could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParserError {
    /// No schema could be provided for the file's version
    #[error(transparent)]
    Schema(#[from] SchemaError),
    /// An object names a class the schema does not declare
    #[error("`{class}` is not an object class of this schema (line {line})")]
    InvalidObject {
        /// The class name as written
        class: String,
        /// 1-based line the object starts on
        line: usize,
    },
}

impl AsIdfkitError for ParserError {
    fn message(&self) -> String {
        self.to_string()
    }

    fn context(&self) -> Vec<Context> {
        match self {
            Self::Schema(error) => error.context(),
            Self::InvalidObject { .. } => vec![Context::Note(
                "objects of unknown classes are never skipped; fix or remove the object".to_string(),
            )],
        }
    }

    fn error_location(&self, source: &str) -> Option<ErrorLocation> {
        match self {
            Self::Schema(_) => None,
            Self::InvalidObject { line, .. } => ErrorLocation::from_source_and_line(source, *line),
        }
    }
}
