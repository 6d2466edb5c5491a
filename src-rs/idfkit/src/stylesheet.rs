use owo_colors::Style;

pub const ERROR_COLOR: Style = Style::new().red();
pub const NOTE_COLOR: Style = Style::new().blue();
pub const HELP_COLOR: Style = Style::new().blue();
pub const SOURCE_ANNOTATION: Style = Style::new().blue().bold();
pub const HEADING: Style = Style::new().bold();
pub const CLASS_NAME: Style = Style::new().cyan();
pub const VALUE: Style = Style::new().green();
