//! Rich diagnostic error types for roomlight.
//!
//! Each subsystem defines its own error type with miette `#[diagnostic]` derives,
//! providing error codes and help text so callers know exactly which part of a
//! payload or configuration was rejected.

use miette::Diagnostic;
use thiserror::Error;

/// Top-level error type for roomlight.
///
/// Each variant wraps a subsystem-specific error, preserving the full diagnostic
/// chain through to the user.
#[derive(Debug, Error, Diagnostic)]
pub enum RoomlightError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),
}

// ---------------------------------------------------------------------------
// Validation errors
// ---------------------------------------------------------------------------

/// The inbound payload is missing a field or carries a value of the wrong shape.
///
/// Raised before any triple is written, so a failed build never leaves a
/// partially populated store behind.
#[derive(Debug, Error, Diagnostic, PartialEq, Eq)]
pub enum ValidationError {
    #[error("request body must be a JSON object")]
    #[diagnostic(
        code(roomlight::validation::not_an_object),
        help("Send a JSON object of the form {{\"rooms\": [...]}}.")
    )]
    NotAnObject,

    #[error("JSON body does not have \"rooms\" key")]
    #[diagnostic(
        code(roomlight::validation::missing_rooms),
        help("Wrap the room list in an object under the \"rooms\" key.")
    )]
    MissingRooms,

    #[error("\"rooms\" must be an array, got {found}")]
    #[diagnostic(
        code(roomlight::validation::rooms_not_array),
        help("\"rooms\" holds a list of room records.")
    )]
    RoomsNotArray { found: String },

    #[error("room #{index} must be an object, got {found}")]
    #[diagnostic(
        code(roomlight::validation::room_not_object),
        help("Each room record is an object with name, side, roomType, w and h.")
    )]
    RoomNotObject { index: usize, found: String },

    #[error("room #{index} is missing required field \"{field}\"")]
    #[diagnostic(
        code(roomlight::validation::missing_field),
        help("Every room needs \"name\", \"side\", \"roomType\", \"w\" and \"h\".")
    )]
    MissingField { index: usize, field: &'static str },

    #[error("{location}: field \"{field}\" must be a string, got {found}")]
    #[diagnostic(code(roomlight::validation::not_a_string))]
    NotAString {
        location: String,
        field: &'static str,
        found: String,
    },

    #[error("{location}: field \"{field}\" must be an integer, got {found}")]
    #[diagnostic(
        code(roomlight::validation::not_an_integer),
        help(
            "Width, height and positions accept JSON integers, whole-valued \
             floats such as 3.0, or decimal strings such as \"3\"."
        )
    )]
    NotAnInteger {
        location: String,
        field: &'static str,
        found: String,
    },

    #[error("{location}: \"{field}\" must be an object, got {found}")]
    #[diagnostic(
        code(roomlight::validation::not_a_mapping),
        help(
            "\"appliances\" maps appliance names to states, \"people\" maps \
             person names to {{\"x\": int, \"y\": int}}."
        )
    )]
    NotAMapping {
        location: String,
        field: &'static str,
        found: String,
    },

    #[error("{location}: position is missing \"{field}\"")]
    #[diagnostic(
        code(roomlight::validation::missing_position),
        help("A person's position must carry both \"x\" and \"y\".")
    )]
    MissingPosition {
        location: String,
        field: &'static str,
    },
}

// ---------------------------------------------------------------------------
// Graph errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic, PartialEq, Eq)]
pub enum GraphError {
    #[error("invalid argument: {what} must not be empty")]
    #[diagnostic(
        code(roomlight::graph::invalid_argument),
        help(
            "Resources and namespaces are absolute IRIs. An empty one means \
             the caller built it from a missing value; this is a bug, not bad input."
        )
    )]
    InvalidArgument { what: &'static str },
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read config file: {path}")]
    #[diagnostic(
        code(roomlight::config::read),
        help("Check that the file exists and is readable.")
    )]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {message}")]
    #[diagnostic(
        code(roomlight::config::parse),
        help("The config file must be valid TOML. See the README for the recognised keys.")
    )]
    Parse { path: String, message: String },

    #[error("invalid value for {key}: {message}")]
    #[diagnostic(code(roomlight::config::invalid))]
    Invalid { key: &'static str, message: String },
}

/// Convenience alias for functions returning roomlight results.
pub type RoomlightResult<T> = std::result::Result<T, RoomlightError>;

/// Short JSON type name used in validation messages.
pub(crate) fn json_kind(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_converts_to_top_level() {
        let err = ValidationError::MissingRooms;
        let top: RoomlightError = err.into();
        assert!(matches!(
            top,
            RoomlightError::Validation(ValidationError::MissingRooms)
        ));
    }

    #[test]
    fn graph_error_converts_to_top_level() {
        let err = GraphError::InvalidArgument { what: "resource IRI" };
        let top: RoomlightError = err.into();
        assert!(matches!(top, RoomlightError::Graph(_)));
    }

    #[test]
    fn missing_rooms_message_matches_wire_text() {
        assert_eq!(
            ValidationError::MissingRooms.to_string(),
            "JSON body does not have \"rooms\" key"
        );
    }

    #[test]
    fn error_display_messages_are_descriptive() {
        let err = ValidationError::NotAnInteger {
            location: "room \"Kitchen\"".into(),
            field: "w",
            found: "\"wide\"".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Kitchen"));
        assert!(msg.contains("\"w\""));
        assert!(msg.contains("wide"));
    }

    #[test]
    fn json_kind_names() {
        assert_eq!(json_kind(&serde_json::json!(null)), "null");
        assert_eq!(json_kind(&serde_json::json!([1])), "an array");
        assert_eq!(json_kind(&serde_json::json!({"a": 1})), "an object");
    }
}
