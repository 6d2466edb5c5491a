//! Recognized `!-Option` flags.
//!
//! Options are stored verbatim; only `ViewInIPunits` changes how the
//! instance itself behaves.

/// Objects are listed in class order
pub const SORTED_ORDER: &str = "SortedOrder";
/// New objects are placed at the top of the file
pub const ORIGINAL_ORDER_TOP: &str = "OriginalOrderTop";
/// New objects are placed at the bottom of the file
pub const ORIGINAL_ORDER_BOTTOM: &str = "OriginalOrderBottom";
/// Geometry objects are written in compact form
pub const USE_SPECIAL_FORMAT: &str = "UseSpecialFormat";
/// Values are presented in IP units
pub const VIEW_IN_IP_UNITS: &str = "ViewInIPunits";
/// Class groups are hidden
pub const HIDE_GROUPS: &str = "HideGroups";
/// Classes without objects are hidden
pub const HIDE_EMPTY_CLASSES: &str = "HideEmptyClasses";

/// Every recognized option.
pub const ALL: &[&str] = &[
    SORTED_ORDER,
    ORIGINAL_ORDER_TOP,
    ORIGINAL_ORDER_BOTTOM,
    USE_SPECIAL_FORMAT,
    VIEW_IN_IP_UNITS,
    HIDE_GROUPS,
    HIDE_EMPTY_CLASSES,
];

/// Returns whether an option is one idfkit knows about, ignoring case.
#[must_use]
pub fn is_recognized(option: &str) -> bool {
    ALL.iter().any(|known| known.eq_ignore_ascii_case(option))
}
