//! Error types and handling for mobview
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for mobview operations
#[derive(Error, Diagnostic, Debug)]
pub enum MobviewError {
    // Connection errors
    #[error("Failed to connect to {host}: {reason}")]
    #[diagnostic(
        code(mobview::session::connect_failed),
        help("Check that the host is reachable and serves the vSphere API on port 443")
    )]
    ConnectFailed { host: String, reason: String },

    #[error("Login failed for user '{username}'")]
    #[diagnostic(
        code(mobview::session::login_failed),
        help("Check the username and password, and that the account is not locked")
    )]
    LoginFailed { username: String, reason: String },

    // Wire errors
    #[error("Request '{operation}' failed: {reason}")]
    #[diagnostic(code(mobview::wire::request_failed))]
    RequestFailed { operation: String, reason: String },

    #[error("Server fault during '{operation}': {message}")]
    #[diagnostic(code(mobview::wire::server_fault))]
    ServerFault { operation: String, message: String },

    #[error("Failed to parse '{operation}' response: {reason}")]
    #[diagnostic(
        code(mobview::wire::malformed_response),
        help("The endpoint may not be a vSphere SDK endpoint")
    )]
    MalformedResponse { operation: String, reason: String },

    // Prompt errors
    #[error("Failed to read password: {reason}")]
    #[diagnostic(code(mobview::prompt::password_failed))]
    PasswordPromptFailed { reason: String },
}

impl From<inquire::InquireError> for MobviewError {
    fn from(err: inquire::InquireError) -> Self {
        MobviewError::PasswordPromptFailed {
            reason: err.to_string(),
        }
    }
}

impl From<quick_xml::Error> for MobviewError {
    fn from(err: quick_xml::Error) -> Self {
        MobviewError::MalformedResponse {
            operation: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, MobviewError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_failed_display() {
        let err = MobviewError::ConnectFailed {
            host: "vcenter.local".to_string(),
            reason: "connection refused".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to connect to vcenter.local: connection refused"
        );
    }

    #[test]
    fn test_error_code() {
        let err = MobviewError::ConnectFailed {
            host: "vcenter.local".to_string(),
            reason: "timeout".to_string(),
        };
        assert_eq!(
            err.code().map(|c| c.to_string()),
            Some("mobview::session::connect_failed".to_string())
        );
    }

    #[test]
    fn test_login_failed_display() {
        let err = MobviewError::LoginFailed {
            username: "administrator@vsphere.local".to_string(),
            reason: "incorrect user name or password".to_string(),
        };
        assert!(err.to_string().contains("administrator@vsphere.local"));
    }

    #[test]
    fn test_server_fault_display() {
        let err = MobviewError::ServerFault {
            operation: "RetrievePropertiesEx".to_string(),
            message: "The session is not authenticated".to_string(),
        };
        assert!(err.to_string().contains("RetrievePropertiesEx"));
        assert!(err.to_string().contains("not authenticated"));
    }

    #[test]
    fn test_xml_error_conversion() {
        let mut reader = quick_xml::Reader::from_str("<a></b>");
        let _ = reader.read_event().unwrap();
        let err = reader.read_event().unwrap_err();
        let mob_err: MobviewError = err.into();
        assert!(matches!(mob_err, MobviewError::MalformedResponse { .. }));
    }
}
