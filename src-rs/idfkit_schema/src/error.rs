//! Errors raised when a schema cannot be provided.

use idfkit_shared::{AsIdfkitError, Context};
use thiserror::Error;

/// Why a schema could not be provided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaErrorKind {
    /// No schema is available for the requested version
    Missing,
    /// The input or the cached schema does not state a version
    NoVersion,
    /// The cached schema was written by an incompatible parser
    IncompatibleParser,
    /// The cached schema could not be decoded
    Corrupt,
}

/// A schema could not be provided for the requested version.
///
/// This is recoverable: a caller can locate or parse the matching IDD and
/// retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct SchemaError {
    kind: SchemaErrorKind,
    message: String,
    version: Option<String>,
}

impl SchemaError {
    /// Creates a schema error.
    pub fn new(kind: SchemaErrorKind, message: impl Into<String>, version: Option<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            version,
        }
    }

    /// No schema is available for `version`.
    pub fn missing(version: impl Into<String>) -> Self {
        let version = version.into();
        Self::new(
            SchemaErrorKind::Missing,
            format!("no schema is available for EnergyPlus version {version}"),
            Some(version),
        )
    }

    /// The input does not state which version it targets.
    pub fn no_version() -> Self {
        Self::new(
            SchemaErrorKind::NoVersion,
            "the input does not declare an EnergyPlus version",
            None,
        )
    }

    /// The cached schema for `version` was written by `found` instead of `expected`.
    pub fn incompatible_parser(version: impl Into<String>, found: &str, expected: &str) -> Self {
        let version = version.into();
        Self::new(
            SchemaErrorKind::IncompatibleParser,
            format!(
                "the cached schema for version {version} was written by parser version {found}, expected {expected}"
            ),
            Some(version),
        )
    }

    /// Returns why the schema could not be provided.
    #[must_use]
    pub const fn kind(&self) -> SchemaErrorKind {
        self.kind
    }

    /// Returns the human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the version that was requested, if known.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }
}

impl AsIdfkitError for SchemaError {
    fn message(&self) -> String {
        self.message.clone()
    }

    fn context(&self) -> Vec<Context> {
        match self.kind {
            SchemaErrorKind::Missing | SchemaErrorKind::IncompatibleParser => {
                vec![Context::Help(
                    "parse the matching Energy+.idd with `idfkit idd <path>` to cache it"
                        .to_string(),
                )]
            }
            SchemaErrorKind::NoVersion => vec![Context::Help(
                "add a `Version` object or pass `--default-version`".to_string(),
            )],
            SchemaErrorKind::Corrupt => vec![Context::Note(
                "the cached schema will be replaced the next time the IDD is parsed".to_string(),
            )],
        }
    }
}
