/// Configuration for the IDF parser.
///
/// Built with chained setters:
///
/// ```rust
/// use idfkit_parser::Config;
///
/// let config = Config::new()
///     .with_default_version("8.1")
///     .with_connect_references(false);
/// assert_eq!(config.default_version(), Some("8.1"));
/// assert!(!config.connect_references());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    default_version: Option<String>,
    geometry_classes: Option<Vec<String>>,
    connect_references: bool,
}

impl Config {
    /// Creates a new configuration with default settings.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            default_version: None,
            geometry_classes: None,
            connect_references: true,
        }
    }

    /// Sets the version assumed when a file does not start with `Version`.
    #[must_use]
    pub fn with_default_version(mut self, version: impl Into<String>) -> Self {
        self.default_version = Some(version.into());
        self
    }

    /// Replaces the classes that searches and connection may skip.
    #[must_use]
    pub fn with_geometry_classes<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.geometry_classes = Some(classes.into_iter().map(Into::into).collect());
        self
    }

    /// Sets whether references are connected once all objects are read.
    #[must_use]
    pub const fn with_connect_references(mut self, connect: bool) -> Self {
        self.connect_references = connect;
        self
    }

    /// Returns the fallback version.
    #[must_use]
    pub fn default_version(&self) -> Option<&str> {
        self.default_version.as_deref()
    }

    /// Returns the configured geometry classes, if overridden.
    #[must_use]
    pub fn geometry_classes(&self) -> Option<&[String]> {
        self.geometry_classes.as_deref()
    }

    /// Returns whether references are connected after parsing.
    #[must_use]
    pub const fn connect_references(&self) -> bool {
        self.connect_references
    }
}

impl Default for Config {
    /// Creates a default configuration.
    fn default() -> Self {
        Self::new()
    }
}
