use crate::entities::{LocationRecord, LocationType};

/// Sample records used when the locations endpoint cannot be reached.
pub fn locations() -> Vec<LocationRecord> {
    vec![
        LocationRecord::new(
            1,
            "Main Library",
            "Balme Library - The main university library",
            5.6484,
            -0.1864,
            LocationType::Library,
        ),
        LocationRecord::new(
            2,
            "Great Hall",
            "University of Ghana Great Hall for ceremonies",
            5.6490,
            -0.1870,
            LocationType::Auditorium,
        ),
        LocationRecord::new(
            3,
            "Commonwealth Hall",
            "Commonwealth Hall - Student residential facility",
            5.6475,
            -0.1850,
            LocationType::ResidentialHall,
        ),
        LocationRecord::new(
            4,
            "School of Medicine",
            "University of Ghana Medical School",
            5.6500,
            -0.1880,
            LocationType::AcademicBuilding,
        ),
        LocationRecord::new(
            5,
            "Sports Complex",
            "University sports and recreation complex",
            5.6465,
            -0.1845,
            LocationType::SportsFacility,
        ),
        LocationRecord::new(
            6,
            "Main Gate",
            "Main entrance to University of Ghana",
            5.6520,
            -0.1890,
            LocationType::EntranceGate,
        ),
        LocationRecord::new(
            7,
            "Student Centre",
            "Central hub for student activities",
            5.6480,
            -0.1860,
            LocationType::AdministrativeBuilding,
        ),
        LocationRecord::new(
            8,
            "Volta Hall",
            "Volta Hall - Student residential facility",
            5.6470,
            -0.1875,
            LocationType::ResidentialHall,
        ),
    ]
}

#[test]
fn fallback_has_eight_records_in_id_order() {
    let ids: Vec<i64> = locations().iter().map(|l| l.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5, 6, 7, 8]);
}
