//! User-facing errors for idfkit

mod context;
mod location;
mod traits;

use std::path::PathBuf;

pub use context::Context;
pub use location::ErrorLocation;
pub use traits::AsIdfkitError;

/// Unified error representation for idfkit
///
/// This struct represents errors in a format suitable for display to users.
/// It includes the file path where the error occurred, a human-readable
/// message, and optional source location information pointing at the line of
/// the IDD or IDF file that caused the problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdfkitError {
    /// The path to the file where the error occurred
    path: PathBuf,
    /// Human-readable error message
    message: String,
    /// Optional source location information
    location: Option<ErrorLocation>,
    /// Notes and help attached to the error
    context: Vec<Context>,
}

impl IdfkitError {
    /// Creates a new `IdfkitError` from an error that implements `AsIdfkitError`
    ///
    /// The resulting error carries no source location. Use
    /// `from_error_with_source` when the file contents are available.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use idfkit_shared::error::{AsIdfkitError, IdfkitError};
    /// use std::path::PathBuf;
    ///
    /// struct SimpleError(String);
    ///
    /// impl AsIdfkitError for SimpleError {
    ///     fn message(&self) -> String {
    ///         self.0.clone()
    ///     }
    /// }
    ///
    /// let error = SimpleError("Something went wrong".to_string());
    /// let idfkit_error = IdfkitError::from_error(&error, PathBuf::from("in.idf"));
    /// assert_eq!(idfkit_error.message(), "Something went wrong");
    /// assert!(idfkit_error.location().is_none());
    /// ```
    pub fn from_error(error: &impl AsIdfkitError, path: PathBuf) -> Self {
        Self {
            path,
            message: error.message(),
            location: None,
            context: error.context(),
        }
    }

    /// Creates a new `IdfkitError` using the file contents to locate the error
    ///
    /// # Examples
    ///
    /// ```rust
    /// use idfkit_shared::error::{AsIdfkitError, ErrorLocation, IdfkitError};
    /// use std::path::PathBuf;
    ///
    /// struct LineError(usize);
    ///
    /// impl AsIdfkitError for LineError {
    ///     fn message(&self) -> String {
    ///         "unknown object".to_string()
    ///     }
    ///
    ///     fn error_location(&self, source: &str) -> Option<ErrorLocation> {
    ///         ErrorLocation::from_source_and_line(source, self.0)
    ///     }
    /// }
    ///
    /// let source = "Version,8.1;\nNotAClass,1;\n";
    /// let error = IdfkitError::from_error_with_source(&LineError(2), PathBuf::from("in.idf"), source);
    /// let location = error.location().expect("line 2 exists");
    /// assert_eq!(location.line(), 2);
    /// assert_eq!(location.line_source(), "NotAClass,1;");
    /// ```
    pub fn from_error_with_source(error: &impl AsIdfkitError, path: PathBuf, source: &str) -> Self {
        Self {
            path,
            message: error.message(),
            location: error.error_location(source),
            context: error.context(),
        }
    }

    /// Creates a new `IdfkitError`, locating it only if source is provided
    pub fn from_error_with_optional_source(
        error: &impl AsIdfkitError,
        path: PathBuf,
        source: Option<&str>,
    ) -> Self {
        match source {
            Some(source) => Self::from_error_with_source(error, path, source),
            None => Self::from_error(error, path),
        }
    }

    /// Returns the path to the file where the error occurred
    #[must_use]
    pub const fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Returns the human-readable error message
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the source location, if known
    #[must_use]
    pub const fn location(&self) -> Option<&ErrorLocation> {
        self.location.as_ref()
    }

    /// Returns the notes and help attached to the error
    #[must_use]
    pub fn context(&self) -> &[Context] {
        &self.context
    }
}
