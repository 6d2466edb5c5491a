//! IDD and IDF text shared by the parser tests.

pub const IDD: &str = r"!IDD_Version 8.1.0.009
!IDD_BUILD 0c2c4c2b9c
! **************************************************************************
! Comments above the first class are not attached to anything.
! **************************************************************************

Lead Input;

Simulation Data;

\group Simulation Parameters

Version,
      \memo Specifies the EnergyPlus version of the IDF file.
      \unique-object
      \format singleLine
  A1 ; \field Version Identifier
      \default 8.1

SimulationControl,
      \unique-object
      \memo Controls which sizing runs are performed
      \min-fields 2
! Sizing is optional
  A1, \field Do Zone Sizing Calculation
      \type choice
      \key Yes
      \key No
      \default No
  A2; \field Do System Sizing Calculation
      \type choice
      \key Yes
      \key No
      \default No

\group Thermal Zones and Surfaces

Zone,
  A1 , \field Name
       \required-field
       \type alpha
       \reference ZoneNames
       \reference ZoneAndZoneListNames
  N1 , \field Direction of Relative North
       \units deg
       \default 0
  N2 , \field X Origin
       \units m
       \default 0
  N3 ; \field Ceiling Height
       \units m
       \ip-units in
       \minimum 0
       \autocalculatable

ZoneList,
       \extensible:1 - repeat last field, remembering to remove ; from inner fields
  A1 , \field Name
       \reference ZoneAndZoneListNames
  A2 ; \field Zone 1 Name
       \begin-extensible
       \type object-list
       \object-list ZoneNames

People,
       \min-fields 3
  A1 , \field Name
  A2 , \field Zone or ZoneList Name
       \type object-list
       \object-list ZoneAndZoneListNames
  A3 , \field Number of People Schedule Name
       \type object-list
       \object-list ScheduleNames
  N1 ; \field Number of People
       \default 0

\group Schedules

ScheduleTypeLimits,
  A1 , \field Name
       \reference ScheduleTypeLimitsNames
  N1 , \field Lower Limit Value
  N2 , \field Upper Limit Value
  A2 , \field Numeric Type
  A3 ; \field Unit Type
       \default Dimensionless

Schedule:Compact,
       \extensible:1
  A1 , \field Name
       \reference ScheduleNames
  A2 , \field Schedule Type Limits Name
       \type object-list
       \object-list ScheduleTypeLimitsNames
  A3 ; \field Field 1
       \begin-extensible

Schedule:Constant,
  A1 , \field Name
       \reference ScheduleNames
  A2 , \field Schedule Type Limits Name
       \type object-list
       \object-list ScheduleTypeLimitsNames
  N1 ; \field Hourly Value
       \unitsBasedOnField A2

\group Thermal Zones and Surfaces

BuildingSurface:Detailed,
       \extensible:3 - repeat last three fields
  A1 , \field Name
  A2 , \field Surface Type
  A3 , \field Construction Name
  A4 , \field Zone Name
       \type object-list
       \object-list ZoneNames
  N1 , \field Number of Vertices
  N2 , \field Vertex 1 X-coordinate
       \begin-extensible
       \units m
  N3 , \field Vertex 1 Y-coordinate
       \units m
  N4 ; \field Vertex 1 Z-coordinate
       \units m
";

pub const IDF: &str = "!-Generator IDFEditor 1.44
!-Option SortedOrder UseSpecialFormat

!-NOTE: All comments with '!-' are ignored by the IDFEditor and are generated automatically.
!-      Use '!' comments if they need to be retained when using the IDFEditor.


!-   ===========  ALL OBJECTS IN CLASS: VERSION ===========

Version,8.1;

SimulationControl,
  Yes,  !- Do Zone Sizing
  No;   !- Do System Sizing

! The core zone
Zone,
    Core_ZN,                 !- Name
    0,                       !- Direction of Relative North {deg}
    0,                       !- X Origin {m}
    autocalculate;           !- Ceiling Height {m}

Zone,
    Perimeter_ZN_1,          !- Name
    0,                       !- Direction of Relative North {deg}
    3.5,                     !- X Origin {m}
    2.5;                     !- Ceiling Height {m}

ZoneList,All Zones,Core_ZN,Perimeter_ZN_1;

People,
    Core People,             !- Name
    Core_ZN,                 !- Zone or ZoneList Name
    Occupancy,               !- Number of People Schedule Name
    10;                      !- Number of People

People,
    All People,              !- Name
    All Zones,               !- Zone or ZoneList Name
    Occupancy,               !- Number of People Schedule Name
    5;                       !- Number of People

ScheduleTypeLimits,Fraction,0,1,Continuous;

Schedule:Compact,
    Occupancy,               !- Name
    Fraction,                !- Schedule Type Limits Name
    Through: 12/31,          !- Field 1
    For: AllDays,            !- Field 2
    Until: 24:00,            !- Field 3
    1;                       !- Field 4

BuildingSurface:Detailed,
    Core_ZN_Floor,           !- Name
    Floor,                   !- Surface Type
    Slab,                    !- Construction Name
    Core_ZN,                 !- Zone Name
    3,                       !- Number of Vertices
    0,0,0,                   !- Vertex 1
    10,0,0,                  !- Vertex 2
    10,10,0;                 !- Vertex 3

! End of file
";
