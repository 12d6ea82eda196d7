use std::env;
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Error {
    pub code: i32,
    pub message: String,
}

impl From<env::VarError> for Error {
    fn from(err: env::VarError) -> Self {
        env_var_error(err)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        reqwest_error(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code {})", self.message, self.code)
    }
}

impl std::error::Error for Error {}

impl Error {
    /// Text shown to the user. Internal failures collapse to a generic line.
    pub fn notice(&self) -> &str {
        match self.code {
            1..=99 => "Something went wrong",
            _ => self.message.as_str(),
        }
    }

    pub fn is_internal(&self) -> bool {
        (1..=99).contains(&self.code)
    }
}

pub fn invalid_input_error() -> Error {
    Error {
        code: 100,
        message: "invalid input".into(),
    }
}

pub fn missing_route_endpoint_error() -> Error {
    Error {
        code: 101,
        message: "Please select both starting point and destination".into(),
    }
}

pub fn current_location_unavailable_error() -> Error {
    Error {
        code: 102,
        message: "Current location not available. Please enable location services.".into(),
    }
}

pub fn location_not_found_error(id: i64) -> Error {
    Error {
        code: 103,
        message: format!("No location with id {}", id),
    }
}

pub fn geolocation_unsupported_error() -> Error {
    Error {
        code: 104,
        message: "Geolocation is not supported on this device".into(),
    }
}

pub fn geolocation_error() -> Error {
    Error {
        code: 105,
        message: "Failed to get your current location".into(),
    }
}

pub fn initialization_error() -> Error {
    Error {
        code: 106,
        message: "Failed to initialize the application".into(),
    }
}

pub fn env_var_error(_: env::VarError) -> Error {
    Error {
        code: 1,
        message: "environment variable error".into(),
    }
}

pub fn reqwest_error(_: reqwest::Error) -> Error {
    Error {
        code: 2,
        message: "reqwest error".into(),
    }
}

pub fn upstream_error() -> Error {
    Error {
        code: 3,
        message: "upstream error".into(),
    }
}

pub fn config_error(key: &str) -> Error {
    Error {
        code: 4,
        message: format!("invalid value for {}", key),
    }
}

pub fn widget_error(message: impl Into<String>) -> Error {
    Error {
        code: 5,
        message: message.into(),
    }
}

#[test]
fn internal_errors_hide_their_message() {
    assert_eq!(upstream_error().notice(), "Something went wrong");
    assert!(config_error("CAMPUS_NAV_ZOOM").is_internal());
}

#[test]
fn user_errors_carry_their_message() {
    let err = missing_route_endpoint_error();
    assert!(!err.is_internal());
    assert_eq!(
        err.notice(),
        "Please select both starting point and destination"
    );
}
