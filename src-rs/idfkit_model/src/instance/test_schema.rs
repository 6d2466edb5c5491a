//! A small schema and instance shared by the instance tests.

use std::sync::Arc;

use idfkit_schema::{Schema, SchemaClassBuilder, tag::names};

use super::Instance;
use crate::object::ObjectData;

pub fn schema() -> Arc<Schema> {
    let mut schema = Schema::new("test");
    schema.set_version("8.1.0.009");

    let simulation = Some("Simulation Parameters".to_string());
    let zones = Some("Thermal Zones and Surfaces".to_string());
    let schedules = Some("Schedules".to_string());

    schema.insert_class(
        SchemaClassBuilder::new("Version")
            .class_tag(names::UNIQUE_OBJECT, None)
            .field("A1", &[(names::FIELD, Some("Version Identifier")), (names::DEFAULT, Some("8.1"))])
            .build(simulation.clone()),
    );
    schema.insert_class(
        SchemaClassBuilder::new("SimulationControl")
            .class_tag(names::UNIQUE_OBJECT, None)
            .class_tag(names::MIN_FIELDS, Some("2"))
            .field(
                "A1",
                &[
                    (names::FIELD, Some("Do Zone Sizing Calculation")),
                    (names::KEY, Some("Yes")),
                    (names::KEY, Some("No")),
                    (names::DEFAULT, Some("No")),
                ],
            )
            .field(
                "A2",
                &[
                    (names::FIELD, Some("Do System Sizing Calculation")),
                    (names::KEY, Some("Yes")),
                    (names::KEY, Some("No")),
                    (names::DEFAULT, Some("No")),
                ],
            )
            .build(simulation),
    );
    schema.insert_class(
        SchemaClassBuilder::new("Zone")
            .field(
                "A1",
                &[
                    (names::FIELD, Some("Name")),
                    (names::REFERENCE, Some("ZoneNames")),
                    (names::REFERENCE, Some("ZoneAndZoneListNames")),
                ],
            )
            .field(
                "N1",
                &[(names::FIELD, Some("Direction of Relative North")), (names::UNITS, Some("deg"))],
            )
            .field(
                "N2",
                &[
                    (names::FIELD, Some("X Origin")),
                    (names::UNITS, Some("m")),
                    (names::DEFAULT, Some("0")),
                ],
            )
            .field(
                "N3",
                &[
                    (names::FIELD, Some("Ceiling Height")),
                    (names::UNITS, Some("m")),
                    (names::IP_UNITS, Some("in")),
                    (names::AUTOCALCULATABLE, None),
                ],
            )
            .build(zones.clone()),
    );
    schema.insert_class(
        SchemaClassBuilder::new("ZoneList")
            .class_tag(names::EXTENSIBLE, Some("1"))
            .field(
                "A1",
                &[(names::FIELD, Some("Name")), (names::REFERENCE, Some("ZoneAndZoneListNames"))],
            )
            .field(
                "A2",
                &[
                    (names::FIELD, Some("Zone 1 Name")),
                    (names::BEGIN_EXTENSIBLE, None),
                    (names::OBJECT_LIST, Some("ZoneNames")),
                ],
            )
            .build(zones.clone()),
    );
    schema.insert_class(
        SchemaClassBuilder::new("People")
            .class_tag(names::MIN_FIELDS, Some("3"))
            .field("A1", &[(names::FIELD, Some("Name"))])
            .field(
                "A2",
                &[
                    (names::FIELD, Some("Zone or ZoneList Name")),
                    (names::OBJECT_LIST, Some("ZoneAndZoneListNames")),
                ],
            )
            .field(
                "A3",
                &[
                    (names::FIELD, Some("Number of People Schedule Name")),
                    (names::OBJECT_LIST, Some("ScheduleNames")),
                ],
            )
            .field(
                "N1",
                &[(names::FIELD, Some("Number of People")), (names::DEFAULT, Some("0"))],
            )
            .build(zones.clone()),
    );
    schema.insert_class(
        SchemaClassBuilder::new("ScheduleTypeLimits")
            .field(
                "A1",
                &[(names::FIELD, Some("Name")), (names::REFERENCE, Some("ScheduleTypeLimitsNames"))],
            )
            .field("N1", &[(names::FIELD, Some("Lower Limit Value"))])
            .field("N2", &[(names::FIELD, Some("Upper Limit Value"))])
            .field("A2", &[(names::FIELD, Some("Numeric Type"))])
            .field(
                "A3",
                &[(names::FIELD, Some("Unit Type")), (names::DEFAULT, Some("Dimensionless"))],
            )
            .build(schedules.clone()),
    );
    schema.insert_class(
        SchemaClassBuilder::new("Schedule:Compact")
            .class_tag(names::EXTENSIBLE, Some("1"))
            .field(
                "A1",
                &[(names::FIELD, Some("Name")), (names::REFERENCE, Some("ScheduleNames"))],
            )
            .field(
                "A2",
                &[
                    (names::FIELD, Some("Schedule Type Limits Name")),
                    (names::OBJECT_LIST, Some("ScheduleTypeLimitsNames")),
                ],
            )
            .field("A3", &[(names::FIELD, Some("Field 1")), (names::BEGIN_EXTENSIBLE, None)])
            .build(schedules.clone()),
    );
    schema.insert_class(
        SchemaClassBuilder::new("Schedule:Constant")
            .field(
                "A1",
                &[(names::FIELD, Some("Name")), (names::REFERENCE, Some("ScheduleNames"))],
            )
            .field(
                "A2",
                &[
                    (names::FIELD, Some("Schedule Type Limits Name")),
                    (names::OBJECT_LIST, Some("ScheduleTypeLimitsNames")),
                ],
            )
            .field(
                "N1",
                &[(names::FIELD, Some("Hourly Value")), (names::UNITS_BASED_ON_FIELD, Some("A2"))],
            )
            .build(schedules),
    );
    schema.insert_class(
        SchemaClassBuilder::new("BuildingSurface:Detailed")
            .class_tag(names::EXTENSIBLE, Some("3"))
            .field("A1", &[(names::FIELD, Some("Name"))])
            .field("A2", &[(names::FIELD, Some("Surface Type"))])
            .field("A3", &[(names::FIELD, Some("Construction Name"))])
            .field(
                "A4",
                &[(names::FIELD, Some("Zone Name")), (names::OBJECT_LIST, Some("ZoneNames"))],
            )
            .field("N1", &[(names::FIELD, Some("Number of Vertices"))])
            .field(
                "N2",
                &[
                    (names::FIELD, Some("Vertex 1 X-coordinate")),
                    (names::BEGIN_EXTENSIBLE, None),
                    (names::UNITS, Some("m")),
                ],
            )
            .field("N3", &[(names::FIELD, Some("Vertex 1 Y-coordinate")), (names::UNITS, Some("m"))])
            .field("N4", &[(names::FIELD, Some("Vertex 1 Z-coordinate")), (names::UNITS, Some("m"))])
            .build(zones),
    );

    Arc::new(schema)
}

/// A connected instance:
///
/// - zones `Core_ZN` and `Perimeter_ZN_1`, both in zone list `All Zones`
/// - people in `Core_ZN` and in `All Zones`, both on schedule `Occupancy`
/// - schedules `Heating Setpoint`, `Occupancy` and `Always 20`
/// - one floor surface in `Core_ZN`
pub fn instance() -> Instance {
    let mut instance = Instance::new(schema());
    let objects = [
        ObjectData::new("Version", ["8.1"]),
        ObjectData::new("Zone", ["Core_ZN", "0", "0", "autocalculate"]),
        ObjectData::new("Zone", ["Perimeter_ZN_1", "0", "3.5", "2.5"]),
        ObjectData::new("ZoneList", ["All Zones", "Core_ZN", "Perimeter_ZN_1"]),
        ObjectData::new("People", ["Core People", "Core_ZN", "Occupancy", "10"]),
        ObjectData::new("People", ["All People", "All Zones", "Occupancy", "5"]),
        ObjectData::new("ScheduleTypeLimits", ["Temperature", "-60", "200", "Continuous", "Temperature"]),
        ObjectData::new("ScheduleTypeLimits", ["Fraction", "0", "1", "Continuous"]),
        ObjectData::new(
            "Schedule:Compact",
            ["Heating Setpoint", "Temperature", "Through: 12/31", "For: AllDays", "Until: 24:00", "21.1"],
        ),
        ObjectData::new(
            "Schedule:Compact",
            ["Occupancy", "Fraction", "Through: 12/31", "For: AllDays", "Until: 24:00", "1"],
        ),
        ObjectData::new("Schedule:Constant", ["Always 20", "Temperature", "20"]),
        ObjectData::new(
            "BuildingSurface:Detailed",
            ["Core_ZN_Floor", "Floor", "Slab", "Core_ZN", "3", "0", "0", "0", "10", "0", "0", "10", "10", "0"],
        ),
    ];

    for object in objects {
        instance
            .push_object(object)
            .expect("fixture classes exist");
    }
    instance.connect_references();
    instance
}
