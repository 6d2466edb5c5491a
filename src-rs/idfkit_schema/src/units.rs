//! SI/IP unit conversion.
//!
//! IDD files declare units in SI. An editor that shows IP values needs a
//! table of conversions; `UnitsRegistry` is that table, passed explicitly to
//! whoever converts so that different registries can coexist.

use std::collections::HashMap;

use indexmap::IndexMap;

/// A linear conversion `ip = si * multiplier + offset`.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    /// SI unit
    pub si: String,
    /// IP unit
    pub ip: String,
    /// Scale from SI to IP
    pub multiplier: f64,
    /// Offset added after scaling
    pub offset: f64,
}

impl Conversion {
    /// Converts an SI number to IP.
    #[must_use]
    pub fn to_ip(&self, value: f64) -> f64 {
        value.mul_add(self.multiplier, self.offset)
    }

    /// Converts an IP number to SI.
    #[must_use]
    pub fn to_si(&self, value: f64) -> f64 {
        (value - self.offset) / self.multiplier
    }
}

/// An immutable table of unit conversions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnitsRegistry {
    conversions: IndexMap<(String, String), Conversion>,
    defaults: HashMap<String, String>,
}

/// SI unit, IP unit, multiplier, offset.
const ENERGYPLUS_DEFAULTS: &[(&str, &str, f64, f64)] = &[
    ("m", "ft", 3.280_839_895_013_12, 0.0),
    ("m2", "ft2", 10.763_910_416_709_7, 0.0),
    ("m3", "ft3", 35.314_666_721_488_6, 0.0),
    ("m/s", "ft/min", 196.850_393_700_787, 0.0),
    ("m/hr", "ft/hr", 3.280_839_895_013_12, 0.0),
    ("m3/s", "ft3/min", 2_118.880_003_289_31, 0.0),
    ("m3/s-m2", "ft3/min-ft2", 196.850_393_700_787, 0.0),
    ("m3/s-person", "ft3/min-person", 2_118.880_003_289_31, 0.0),
    ("C", "F", 1.8, 32.0),
    ("deltaC", "deltaF", 1.8, 0.0),
    ("K", "R", 1.8, 0.0),
    ("W", "Btu/h", 3.412_141_633_127_94, 0.0),
    ("W/m2", "Btu/h-ft2", 0.316_997_086_298_221, 0.0),
    ("W/m2-K", "Btu/h-ft2-F", 0.176_110_194_261_872, 0.0),
    ("W/m-K", "Btu-in/h-ft2-F", 6.933_471_117_163_24, 0.0),
    ("W/K", "Btu/h-F", 1.895_634_047_695_44, 0.0),
    ("W/person", "Btu/h-person", 3.412_141_633_127_94, 0.0),
    ("m2-K/W", "ft2-F-hr/Btu", 5.678_263_340_863_01, 0.0),
    ("kg", "lb", 2.204_622_621_848_78, 0.0),
    ("kg/m3", "lb/ft3", 0.062_427_960_576_144_6, 0.0),
    ("kg/s", "lb/s", 2.204_622_621_848_78, 0.0),
    ("Pa", "psi", 0.000_145_037_743_897_283, 0.0),
    ("kPa", "psi", 0.145_037_743_897_283, 0.0),
    ("J", "Btu", 0.000_947_817_120_313_317, 0.0),
    ("J/kg", "Btu/lb", 0.000_429_922_614_025_136, 0.0),
    ("J/kg-K", "Btu/lb-F", 0.000_238_845_896_627_496, 0.0),
    ("lux", "foot-candles", 0.092_903_040_0, 0.0),
];

/// Alternate IP units selected with an explicit `\ip-units` tag.
const ENERGYPLUS_ALTERNATES: &[(&str, &str, f64, f64)] = &[
    ("m", "in", 39.370_078_740_157_5, 0.0),
    ("m3/s", "gal/min", 15_850.322_245_011_2, 0.0),
    ("m3", "gal", 264.172_037_284_185, 0.0),
    ("Pa", "inHg", 0.000_296_133_971_008_484, 0.0),
    ("Pa", "inH2O", 0.004_014_742_129_915_22, 0.0),
    ("Pa", "ftH2O", 0.000_334_552_565_551_551, 0.0),
    ("W", "W", 1.0, 0.0),
    ("J", "kWh", 2.777_777_777_777_78e-7, 0.0),
];

impl UnitsRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the default EnergyPlus conversion table.
    #[must_use]
    pub fn energyplus() -> Self {
        let registry = ENERGYPLUS_DEFAULTS
            .iter()
            .fold(Self::new(), |registry, (si, ip, multiplier, offset)| {
                registry.with_conversion(si, ip, *multiplier, *offset)
            });

        ENERGYPLUS_ALTERNATES
            .iter()
            .fold(registry, |registry, (si, ip, multiplier, offset)| {
                registry.with_alternate(si, ip, *multiplier, *offset)
            })
    }

    /// Adds a conversion and makes it the default for its SI unit.
    #[must_use]
    pub fn with_conversion(mut self, si: &str, ip: &str, multiplier: f64, offset: f64) -> Self {
        self.defaults.insert(si.to_string(), ip.to_string());
        self.with_alternate_mut(si, ip, multiplier, offset);
        self
    }

    /// Adds a conversion that is only used when explicitly requested.
    #[must_use]
    pub fn with_alternate(mut self, si: &str, ip: &str, multiplier: f64, offset: f64) -> Self {
        self.with_alternate_mut(si, ip, multiplier, offset);
        self
    }

    fn with_alternate_mut(&mut self, si: &str, ip: &str, multiplier: f64, offset: f64) {
        self.conversions.insert(
            (si.to_string(), ip.to_string()),
            Conversion {
                si: si.to_string(),
                ip: ip.to_string(),
                multiplier,
                offset,
            },
        );
    }

    /// Returns the default IP unit for an SI unit.
    #[must_use]
    pub fn default_ip(&self, si: &str) -> Option<&str> {
        self.defaults.get(si).map(String::as_str)
    }

    /// Resolves the IP unit for an SI unit, preferring an explicit override.
    #[must_use]
    pub fn ip_units<'a>(&'a self, si: &str, explicit: Option<&'a str>) -> Option<&'a str> {
        explicit.or_else(|| self.default_ip(si))
    }

    /// Returns the conversion between two units.
    #[must_use]
    pub fn conversion(&self, si: &str, ip: &str) -> Option<&Conversion> {
        self.conversions.get(&(si.to_string(), ip.to_string()))
    }

    /// Converts a textual SI value for display in IP units.
    ///
    /// Returns `None` when no conversion applies. Values that are not
    /// numbers (`autosize`, blanks, names) are returned unchanged.
    #[must_use]
    pub fn to_ip(&self, value: &str, si: &str, explicit_ip: Option<&str>) -> Option<String> {
        let ip = self.ip_units(si, explicit_ip)?;
        let conversion = self.conversion(si, ip)?;

        Some(
            value
                .trim()
                .parse::<f64>()
                .map_or_else(|_| value.to_string(), |number| format_number(conversion.to_ip(number))),
        )
    }

    /// Converts a textual IP value back to SI.
    #[must_use]
    pub fn to_si(&self, value: &str, si: &str, explicit_ip: Option<&str>) -> Option<String> {
        let ip = self.ip_units(si, explicit_ip)?;
        let conversion = self.conversion(si, ip)?;

        Some(
            value
                .trim()
                .parse::<f64>()
                .map_or_else(|_| value.to_string(), |number| format_number(conversion.to_si(number))),
        )
    }
}

/// Formats a number with up to ten significant digits and no trailing zeros.
///
/// ```rust
/// use idfkit_schema::format_number;
///
/// assert_eq!(format_number(68.0), "68");
/// assert_eq!(format_number(0.3048), "0.3048");
/// assert_eq!(format_number(-1.25), "-1.25");
/// ```
#[must_use]
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    if value.abs() < f64::MIN_POSITIVE {
        return "0".to_string();
    }

    // digits after the decimal point needed for ten significant digits
    #[expect(
        clippy::cast_possible_truncation,
        reason = "log10 of a finite f64 is well within i32"
    )]
    let magnitude = value.abs().log10().floor() as i32;
    let decimals = usize::try_from((9 - magnitude).clamp(0, 15)).unwrap_or(0);

    let formatted = format!("{value:.decimals$}");
    if formatted.contains('.') {
        formatted
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    } else {
        formatted
    }
}
