use crate::error::{Context, ErrorLocation};

/// Trait for types that can be converted to idfkit error messages.
///
/// Every library error in the workspace implements this so that the command
/// line front end can render it the same way regardless of which crate it
/// came from.
pub trait AsIdfkitError {
    /// Returns the primary error message.
    fn message(&self) -> String;

    /// Returns notes and help about the error.
    ///
    /// Returns an empty vector if no context is available.
    fn context(&self) -> Vec<Context> {
        vec![]
    }

    /// Returns the location of the error in the given source text.
    ///
    /// Parsers of the line-oriented IDD/IDF formats know the line an error
    /// occurred on, which is enough to build an `ErrorLocation`.
    fn error_location(&self, source: &str) -> Option<ErrorLocation> {
        let _ = source;
        None
    }
}
