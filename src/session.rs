//! Authenticated vSphere session
//!
//! One session per process invocation. Certificate verification is
//! disabled, matching how these endpoints are typically deployed with
//! self-signed certificates. Logout runs from `Drop` so the session is
//! released on every exit path that unwinds.

use std::time::Duration;

use reqwest::blocking::Client;

use crate::error::{MobviewError, Result};
use crate::vim::soap::{self, ServiceContent};
use crate::vim::{MoRef, MobHandle, MobKind};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// An authenticated session against one vSphere endpoint
pub struct Session {
    http: Client,
    endpoint: String,
    content: ServiceContent,
}

impl Session {
    /// Connect and authenticate. Fatal on any failure.
    pub fn connect(host: &str, username: &str, password: &str) -> Result<Self> {
        let http = Client::builder()
            .danger_accept_invalid_certs(true)
            .cookie_store(true)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| MobviewError::ConnectFailed {
                host: host.to_string(),
                reason: e.to_string(),
            })?;

        let endpoint = format!("https://{host}/sdk");

        let response = call(
            &http,
            &endpoint,
            "RetrieveServiceContent",
            soap::retrieve_service_content_body(),
        )
        .map_err(|e| MobviewError::ConnectFailed {
            host: host.to_string(),
            reason: reason_of(e),
        })?;
        let content = soap::parse_service_content(&response)?;

        let login = soap::login_body(&content.session_manager, username, password);
        call(&http, &endpoint, "Login", login).map_err(|e| MobviewError::LoginFailed {
            username: username.to_string(),
            reason: reason_of(e),
        })?;

        Ok(Session {
            http,
            endpoint,
            content,
        })
    }

    /// All objects of `kind` below the root folder, every property
    /// retrieved, filtered to `targets` by exact name when non-empty.
    pub fn find_objects(&self, kind: MobKind, targets: &[String]) -> Result<Vec<MobHandle>> {
        let view = {
            let body = soap::create_container_view_body(
                &self.content.view_manager,
                &self.content.root_folder,
                kind,
            );
            let response = self.call("CreateContainerView", body)?;
            soap::parse_container_view(&response)?
        };

        let retrieved = self.retrieve_all(kind, &view);

        // The view is transient server state; drop it before surfacing
        // any retrieval error.
        let destroy = self.call("DestroyView", soap::destroy_view_body(&view));
        let mut handles = retrieved?;
        destroy?;

        filter_by_targets(&mut handles, targets);
        Ok(handles)
    }

    fn retrieve_all(&self, kind: MobKind, view: &MoRef) -> Result<Vec<MobHandle>> {
        let collector = &self.content.property_collector;
        let mut handles = Vec::new();

        let body = soap::retrieve_properties_body(collector, view, kind);
        let response = self.call("RetrievePropertiesEx", body)?;
        let mut batch = soap::parse_retrieve_response("RetrievePropertiesEx", &response)?;

        loop {
            handles.extend(
                batch
                    .objects
                    .drain(..)
                    .map(|obj| MobHandle::new(kind, obj.moref, obj.props, obj.missing)),
            );

            let Some(token) = batch.token.take() else {
                break;
            };
            let body = soap::continue_retrieve_body(collector, &token);
            let response = self.call("ContinueRetrievePropertiesEx", body)?;
            batch = soap::parse_retrieve_response("ContinueRetrievePropertiesEx", &response)?;
        }

        Ok(handles)
    }

    fn call(&self, operation: &'static str, body: String) -> Result<String> {
        call(&self.http, &self.endpoint, operation, body)
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        // Best effort; a failed Logout on teardown is not actionable.
        let body = soap::logout_body(&self.content.session_manager);
        let _ = self.call("Logout", body);
    }
}

/// One SOAP round trip; non-success responses surface the fault.
fn call(http: &Client, endpoint: &str, operation: &'static str, body: String) -> Result<String> {
    let response = http
        .post(endpoint)
        .header("Content-Type", "text/xml; charset=utf-8")
        .header("SOAPAction", "urn:vim25/6.7")
        .body(soap::envelope(&body))
        .send()
        .map_err(|e| MobviewError::RequestFailed {
            operation: operation.to_string(),
            reason: e.to_string(),
        })?;

    let status = response.status();
    let text = response.text().map_err(|e| MobviewError::RequestFailed {
        operation: operation.to_string(),
        reason: e.to_string(),
    })?;

    if !status.is_success() {
        let message =
            soap::fault_message(&text).unwrap_or_else(|| format!("HTTP status {status}"));
        return Err(MobviewError::ServerFault {
            operation: operation.to_string(),
            message,
        });
    }

    Ok(text)
}

/// The part of a wire error worth repeating inside a higher-level error
fn reason_of(err: MobviewError) -> String {
    match err {
        MobviewError::ServerFault { message, .. } => message,
        MobviewError::RequestFailed { reason, .. } => reason,
        other => other.to_string(),
    }
}

/// Keep only handles whose name exactly matches a target; an empty
/// target list keeps everything.
fn filter_by_targets(handles: &mut Vec<MobHandle>, targets: &[String]) {
    if !targets.is_empty() {
        handles.retain(|h| targets.iter().any(|t| t == &h.name));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vim::{MoRef, RawValue};

    fn handle(name: &str) -> MobHandle {
        MobHandle::new(
            MobKind::VirtualMachine,
            MoRef::new("VirtualMachine", format!("vm-{name}")),
            vec![(
                "name".to_string(),
                RawValue {
                    type_name: Some("xsd:string".to_string()),
                    nil: false,
                    body: name.to_string(),
                },
            )],
            vec![],
        )
    }

    #[test]
    fn test_empty_target_list_keeps_everything() {
        let mut handles = vec![handle("web01"), handle("db01")];
        filter_by_targets(&mut handles, &[]);
        assert_eq!(handles.len(), 2);
    }

    #[test]
    fn test_targets_match_exact_names_only() {
        let mut handles = vec![handle("web01"), handle("web01-clone"), handle("db01")];
        filter_by_targets(&mut handles, &["web01".to_string(), "db01".to_string()]);
        let names: Vec<&str> = handles.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, vec!["web01", "db01"]);
    }

    #[test]
    fn test_unmatched_target_yields_nothing() {
        let mut handles = vec![handle("web01")];
        filter_by_targets(&mut handles, &["missing".to_string()]);
        assert!(handles.is_empty());
    }

    #[test]
    fn test_reason_of_unwraps_server_fault() {
        let err = MobviewError::ServerFault {
            operation: "Login".to_string(),
            message: "incorrect user name or password".to_string(),
        };
        assert_eq!(reason_of(err), "incorrect user name or password");
    }
}
