//! Errors raised while loading files.

use std::{io, path::PathBuf};

use idfkit_parser::ParserError;
use idfkit_schema::SchemaError;
use idfkit_shared::{AsIdfkitError, Context, ErrorLocation};
use thiserror::Error;

/// Why a file could not be loaded or a schema could not be cached.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be read
    #[error("could not read `{}`: {source}", path.display())]
    Read {
        /// The file that was being read
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
    /// A cache file could not be written
    #[error("could not write `{}`: {source}", path.display())]
    Write {
        /// The file that was being written
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
    /// A schema could not be encoded for the cache
    #[error("could not encode the schema for the cache: {0}")]
    Encode(#[from] bincode::Error),
    /// The text could not be parsed
    #[error(transparent)]
    Parser(#[from] ParserError),
    /// No usable schema
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

impl AsIdfkitError for LoadError {
    fn message(&self) -> String {
        self.to_string()
    }

    fn context(&self) -> Vec<Context> {
        match self {
            Self::Parser(error) => error.context(),
            Self::Schema(error) => error.context(),
            Self::Read { source, .. } if source.kind() == io::ErrorKind::NotFound => {
                vec![Context::Help("check that the path exists".to_string())]
            }
            Self::Read { .. } | Self::Write { .. } | Self::Encode(_) => Vec::new(),
        }
    }

    fn error_location(&self, source: &str) -> Option<ErrorLocation> {
        match self {
            Self::Parser(error) => error.error_location(source),
            Self::Read { .. } | Self::Write { .. } | Self::Encode(_) | Self::Schema(_) => None,
        }
    }
}
