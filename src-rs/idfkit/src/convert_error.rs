//! Turns library errors into printable [`IdfkitError`]s.

use std::path::Path;

use idfkit_loader::{LoadError, read_text};
use idfkit_shared::{AsIdfkitError, Context, IdfkitError};

/// An error that only carries a message.
pub struct Message {
    message: String,
    context: Vec<Context>,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.context.push(Context::Help(help.into()));
        self
    }

    pub fn into_error(self, path: &Path) -> IdfkitError {
        IdfkitError::from_error(&self, path.to_path_buf())
    }
}

impl AsIdfkitError for Message {
    fn message(&self) -> String {
        self.message.clone()
    }

    fn context(&self) -> Vec<Context> {
        self.context.clone()
    }
}

/// Converts a load error, re-reading the file to point at the failing line.
pub fn load(path: &Path, error: &LoadError) -> IdfkitError {
    let source = match error {
        LoadError::Parser(_) => read_text(path).ok(),
        LoadError::Read { .. } | LoadError::Write { .. } | LoadError::Encode(_) | LoadError::Schema(_) => {
            None
        }
    };
    IdfkitError::from_error_with_optional_source(error, path.to_path_buf(), source.as_deref())
}
