/// Additional information attached to an error message.
///
/// # Examples
///
/// ```rust
/// use idfkit_shared::error::Context;
///
/// let note = Context::Note("the schema for version 9.4 has not been cached".to_string());
/// let help = Context::Help("run `idfkit idd Energy+.idd` first".to_string());
/// let contexts = vec![note, help];
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Context {
    /// Supplementary detail about the error
    Note(String),

    /// A suggestion for resolving the error
    Help(String),
}
