use serde::{Deserialize, Serialize};

pub const DEFAULT_MARKER_COLOR: &str = "#667eea";

/// Category of a point of interest. Unknown categories from the backend are
/// kept verbatim in `Other`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LocationType {
    AcademicBuilding,
    AdministrativeBuilding,
    Library,
    ResidentialHall,
    DiningHall,
    SportsFacility,
    MedicalCenter,
    Parking,
    EntranceGate,
    Landmark,
    Department,
    Faculty,
    Auditorium,
    Laboratory,
    Cafeteria,
    Atm,
    Bookstore,
    BusStop,
    Mosque,
    Chapel,
    Garden,
    RecreationalArea,
    Other(String),
}

const KNOWN: [(LocationType, &str, &str); 22] = [
    (LocationType::AcademicBuilding, "ACADEMIC_BUILDING", "Academic Building"),
    (LocationType::AdministrativeBuilding, "ADMINISTRATIVE_BUILDING", "Administrative Building"),
    (LocationType::Library, "LIBRARY", "Library"),
    (LocationType::ResidentialHall, "RESIDENTIAL_HALL", "Residential Hall"),
    (LocationType::DiningHall, "DINING_HALL", "Dining Hall"),
    (LocationType::SportsFacility, "SPORTS_FACILITY", "Sports Facility"),
    (LocationType::MedicalCenter, "MEDICAL_CENTER", "Medical Center"),
    (LocationType::Parking, "PARKING", "Parking"),
    (LocationType::EntranceGate, "ENTRANCE_GATE", "Entrance Gate"),
    (LocationType::Landmark, "LANDMARK", "Landmark"),
    (LocationType::Department, "DEPARTMENT", "Department"),
    (LocationType::Faculty, "FACULTY", "Faculty"),
    (LocationType::Auditorium, "AUDITORIUM", "Auditorium"),
    (LocationType::Laboratory, "LABORATORY", "Laboratory"),
    (LocationType::Cafeteria, "CAFETERIA", "Cafeteria"),
    (LocationType::Atm, "ATM", "ATM"),
    (LocationType::Bookstore, "BOOKSTORE", "Bookstore"),
    (LocationType::BusStop, "BUS_STOP", "Bus Stop"),
    (LocationType::Mosque, "MOSQUE", "Mosque"),
    (LocationType::Chapel, "CHAPEL", "Chapel"),
    (LocationType::Garden, "GARDEN", "Garden"),
    (LocationType::RecreationalArea, "RECREATIONAL_AREA", "Recreational Area"),
];

impl LocationType {
    pub fn all() -> impl Iterator<Item = LocationType> {
        KNOWN.into_iter().map(|(t, _, _)| t)
    }

    pub fn code(&self) -> &str {
        match self {
            LocationType::Other(code) => code.as_str(),
            known => KNOWN
                .iter()
                .find(|(t, _, _)| t == known)
                .map(|(_, code, _)| *code)
                .unwrap_or_default(),
        }
    }

    pub fn display_name(&self) -> String {
        match self {
            LocationType::Other(code) => title_case(code),
            known => KNOWN
                .iter()
                .find(|(t, _, _)| t == known)
                .map(|(_, _, name)| name.to_string())
                .unwrap_or_default(),
        }
    }

    pub fn marker_color(&self) -> &'static str {
        match self {
            LocationType::Library => "#e74c3c",
            LocationType::AcademicBuilding => "#3498db",
            LocationType::AdministrativeBuilding => "#9b59b6",
            LocationType::ResidentialHall => "#f39c12",
            LocationType::DiningHall => "#27ae60",
            LocationType::SportsFacility => "#e67e22",
            LocationType::MedicalCenter => "#e74c3c",
            LocationType::Parking => "#95a5a6",
            LocationType::EntranceGate => "#34495e",
            LocationType::Auditorium => "#8e44ad",
            LocationType::Landmark => "#16a085",
            _ => DEFAULT_MARKER_COLOR,
        }
    }
}

fn title_case(code: &str) -> String {
    code.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

impl From<String> for LocationType {
    fn from(code: String) -> Self {
        let upper = code.trim().to_uppercase();

        KNOWN
            .iter()
            .find(|(_, known, _)| *known == upper)
            .map(|(t, _, _)| t.clone())
            .unwrap_or(LocationType::Other(upper))
    }
}

impl From<&str> for LocationType {
    fn from(code: &str) -> Self {
        code.to_string().into()
    }
}

impl From<LocationType> for String {
    fn from(t: LocationType) -> Self {
        t.code().to_string()
    }
}

#[test]
fn known_codes_parse_case_insensitively() {
    assert_eq!(LocationType::from("residential_hall"), LocationType::ResidentialHall);
    assert_eq!(LocationType::from("BUS_STOP"), LocationType::BusStop);
    assert_eq!(LocationType::all().count(), 22);
}

#[test]
fn unknown_codes_round_trip() {
    let t: LocationType = serde_json::from_str("\"FOOD_TRUCK\"").unwrap();
    assert_eq!(t, LocationType::Other("FOOD_TRUCK".into()));
    assert_eq!(t.display_name(), "FOOD TRUCK");
    assert_eq!(t.marker_color(), DEFAULT_MARKER_COLOR);
    assert_eq!(serde_json::to_string(&t).unwrap(), "\"FOOD_TRUCK\"");
}

#[test]
fn unknown_codes_normalise_like_known_ones() {
    assert_eq!(
        LocationType::from(" food_truck "),
        LocationType::Other("FOOD_TRUCK".into())
    );
    assert_eq!(LocationType::from("food_truck"), LocationType::from("FOOD_TRUCK"));
}

#[test]
fn colors_follow_lookup_table() {
    assert_eq!(LocationType::ResidentialHall.marker_color(), "#f39c12");
    assert_eq!(LocationType::Library.marker_color(), LocationType::MedicalCenter.marker_color());
    assert_eq!(LocationType::Chapel.marker_color(), DEFAULT_MARKER_COLOR);
    assert_eq!(LocationType::Atm.display_name(), "ATM");
}
