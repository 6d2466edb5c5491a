//! Units lookup for field instances.
//!
//! Most fields declare fixed SI units. Two kinds do not: fields tagged
//! `\unitsBasedOnField`, whose units follow the unit type named by another
//! field of the same object, and the values of a `Schedule:Compact`, whose
//! units follow the schedule's type limits.

use idfkit_schema::{UnitsRegistry, UnitsSpec};

use super::Instance;
use crate::{field::FieldInstance, id::FieldId};

const SCHEDULE_TYPE_LIMITS: &str = "scheduletypelimits";
const SCHEDULE_COMPACT: &str = "schedule:compact";
const UNIT_TYPE_FIELD: &str = "Unit Type";
const UNIT_TYPE_INDEX: usize = 4;
const TYPE_LIMITS_INDEX: usize = 1;

/// `ScheduleTypeLimits` unit types and their SI units.
const UNIT_TYPES: &[(&str, &str)] = &[
    ("Temperature", "C"),
    ("DeltaTemperature", "deltaC"),
    ("PrecipitationRate", "m/hr"),
    ("Angle", "deg"),
    ("ConvectionCoefficient", "W/m2-K"),
    ("ActivityLevel", "W/person"),
    ("Velocity", "m/s"),
    ("Capacity", "W"),
    ("Power", "W"),
    ("Percent", "percent"),
];

fn unit_type_units(unit_type: &str) -> Option<&'static str> {
    let unit_type = unit_type.trim();
    UNIT_TYPES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(unit_type))
        .map(|(_, units)| *units)
}

pub(super) fn field_units(instance: &Instance, field: FieldId) -> Option<String> {
    let field = instance.fields.get(&field)?;
    let class = instance.schema.class(field.class())?;

    match class.field(field.index())?.units() {
        Some(UnitsSpec::Fixed(units)) => Some(units.to_string()),
        Some(UnitsSpec::BasedOnField(code)) => {
            let source = class.field_by_key(code)?;
            let value = sibling_value(instance, field, source.index())?;
            unit_type_units(value)
                .or_else(|| type_limits_units(instance, value))
                .map(str::to_string)
        }
        None if field.class() == SCHEDULE_COMPACT && field.index() > TYPE_LIMITS_INDEX => {
            if field.value().trim().parse::<f64>().is_err() {
                return None;
            }
            let limits = sibling_value(instance, field, TYPE_LIMITS_INDEX)?;
            type_limits_units(instance, limits).map(str::to_string)
        }
        None => None,
    }
}

/// Returns the IP units of a field.
///
/// An explicit `\ip-units` tag wins over the registry default. It only
/// applies to fields with fixed units; indirect units always use the
/// registry.
pub(super) fn field_ip_units(
    instance: &Instance,
    field: FieldId,
    registry: &UnitsRegistry,
) -> Option<String> {
    let si = field_units(instance, field)?;
    registry
        .ip_units(&si, explicit_ip_units(instance, field))
        .map(str::to_string)
}

pub(super) fn to_ip(instance: &Instance, field: FieldId, registry: &UnitsRegistry) -> Option<String> {
    let si = field_units(instance, field)?;
    let value = instance.fields.get(&field)?.value();
    registry.to_ip(value, &si, explicit_ip_units(instance, field))
}

pub(super) fn to_si(
    instance: &Instance,
    field: FieldId,
    value: &str,
    registry: &UnitsRegistry,
) -> Option<String> {
    let si = field_units(instance, field)?;
    registry.to_si(value, &si, explicit_ip_units(instance, field))
}

fn explicit_ip_units(instance: &Instance, field: FieldId) -> Option<&str> {
    let field = instance.fields.get(&field)?;
    let schema_field = instance.schema.class(field.class())?.field(field.index())?;
    match schema_field.units() {
        Some(UnitsSpec::Fixed(_)) => schema_field.ip_units(),
        Some(UnitsSpec::BasedOnField(_)) | None => None,
    }
}

fn sibling_value<'a>(instance: &'a Instance, field: &FieldInstance, index: usize) -> Option<&'a str> {
    let sibling = instance.objects.get(&field.object())?.field(index)?;
    instance.fields.get(&sibling).map(FieldInstance::value)
}

/// Maps the name of a `ScheduleTypeLimits` object to the SI units of its
/// unit type.
fn type_limits_units(instance: &Instance, name: &str) -> Option<&'static str> {
    let class = instance.schema.class(SCHEDULE_TYPE_LIMITS)?;
    let unit_type_index = class
        .fields()
        .position(|field| field.name() == Some(UNIT_TYPE_FIELD))
        .unwrap_or(UNIT_TYPE_INDEX);

    let name = name.trim().to_lowercase();
    instance
        .objects_of(SCHEDULE_TYPE_LIMITS)
        .iter()
        .filter_map(|id| instance.objects.get(id))
        .find(|object| {
            object
                .field(0)
                .and_then(|field| instance.fields.get(&field))
                .is_some_and(|field| field.value().trim().to_lowercase() == name)
        })
        .and_then(|object| object.field(unit_type_index))
        .and_then(|field| instance.fields.get(&field))
        .and_then(|field| unit_type_units(field.value()))
}

#[cfg(test)]
mod tests {
    use super::{super::test_schema::instance, *};

    fn field(instance: &Instance, class: &str, row: usize, index: usize) -> FieldId {
        instance.field(class, row, index).expect("fixture field").id()
    }

    #[test]
    fn fixed_units_come_from_the_tag() {
        let instance = instance();
        let origin = field(&instance, "Zone", 1, 2);
        assert_eq!(instance.units(origin).as_deref(), Some("m"));

        let name = field(&instance, "Zone", 1, 0);
        assert_eq!(instance.units(name), None);
    }

    #[test]
    fn units_based_on_field_follow_type_limits() {
        let instance = instance();
        let value = field(&instance, "Schedule:Constant", 0, 2);
        assert_eq!(instance.units(value).as_deref(), Some("C"));
    }

    #[test]
    fn compact_schedule_values_follow_type_limits() {
        let instance = instance();
        let setpoint = field(&instance, "Schedule:Compact", 0, 5);
        assert_eq!(instance.units(setpoint).as_deref(), Some("C"));

        let until = field(&instance, "Schedule:Compact", 0, 4);
        assert_eq!(instance.units(until), None);

        let fraction = field(&instance, "Schedule:Compact", 1, 5);
        assert_eq!(instance.units(fraction), None);
    }

    #[test]
    fn ip_units_prefer_explicit_tag() {
        let instance = instance();
        let registry = UnitsRegistry::energyplus();

        let origin = field(&instance, "Zone", 1, 2);
        assert_eq!(instance.ip_units(origin, &registry).as_deref(), Some("ft"));

        let height = field(&instance, "Zone", 1, 3);
        assert_eq!(instance.ip_units(height, &registry).as_deref(), Some("in"));
        assert_eq!(instance.to_ip(height, &registry).as_deref(), Some("98.42519685"));
    }

    #[test]
    fn conversions_round_trip_through_registry() {
        let instance = instance();
        let registry = UnitsRegistry::energyplus();

        let value = field(&instance, "Schedule:Constant", 0, 2);
        assert_eq!(instance.to_ip(value, &registry).as_deref(), Some("68"));
        assert_eq!(instance.to_si(value, "68", &registry).as_deref(), Some("20"));

        let autocalculated = field(&instance, "Zone", 0, 3);
        assert_eq!(instance.to_ip(autocalculated, &registry).as_deref(), Some("autocalculate"));
    }
}
