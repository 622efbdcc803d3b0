use std::env;
use std::fmt;

#[derive(Debug)]
pub struct Error {
    pub code: i32,
    pub message: String,
}

impl Error {
    pub fn is_validation(&self) -> bool {
        self.code == 102
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for Error {}

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

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        decode_error(err)
    }
}

pub fn validation_error(message: &str) -> Error {
    Error {
        code: 102,
        message: message.into(),
    }
}

pub fn invalid_input_error() -> Error {
    Error {
        code: 101,
        message: "invalid input".into(),
    }
}

pub fn env_var_error(err: env::VarError) -> Error {
    Error {
        code: 1,
        message: format!("environment variable error: {}", err),
    }
}

pub fn config_error(key: &str, value: &str) -> Error {
    Error {
        code: 2,
        message: format!("invalid value {:?} for {}", value, key),
    }
}

pub fn reqwest_error(err: reqwest::Error) -> Error {
    Error {
        code: 3,
        message: format!("reqwest error: {}", err),
    }
}

pub fn upstream_error() -> Error {
    Error {
        code: 4,
        message: "upstream error".into(),
    }
}

pub fn upstream_status_error(status: u16, body: &str) -> Error {
    Error {
        code: 4,
        message: format!("upstream error: status {}: {}", status, body),
    }
}

pub fn decode_error(err: serde_json::Error) -> Error {
    Error {
        code: 5,
        message: format!("malformed response: {}", err),
    }
}

pub fn directions_status_error(status: &str) -> Error {
    Error {
        code: 6,
        message: format!("directions request failed with status {}", status),
    }
}

pub fn missing_api_key_error() -> Error {
    Error {
        code: 7,
        message: "GOOGLE_MAPS_API_KEY is not set".into(),
    }
}

#[test]
fn validation_errors_are_user_facing() {
    let err = validation_error("Please enter both pickup and destination.");

    assert!(err.is_validation());
    assert!(err.code >= 100);
    assert_eq!(err.message, "Please enter both pickup and destination.");
}

#[test]
fn rejected_upstream_input_is_not_a_form_error() {
    let err = invalid_input_error();

    assert_eq!(err.code, 101);
    assert!(!err.is_validation());
}

#[test]
fn request_errors_are_internal() {
    let err = upstream_status_error(503, "service unavailable");

    assert!(!err.is_validation());
    assert!((1..=99).contains(&err.code));
    assert!(err.to_string().contains("503"));
    assert!(err.to_string().contains("service unavailable"));
}

#[test]
fn json_errors_convert_to_decode_errors() {
    let parse: Result<serde_json::Value, _> = serde_json::from_str("{not json");
    let err: Error = parse.unwrap_err().into();

    assert_eq!(err.code, 5);
}
