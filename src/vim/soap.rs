//! vim25 SOAP glue
//!
//! The six wire operations the viewer needs, nothing more: request body
//! builders and response parsers. Responses are walked with quick-xml
//! event loops; element names are matched by local name so namespace
//! prefixes do not matter.

use quick_xml::Reader;
use quick_xml::escape::{escape, unescape};
use quick_xml::events::{BytesStart, Event};

use crate::error::{MobviewError, Result};
use crate::vim::{MoRef, MobKind, RawValue};

/// The service content handles the viewer needs
#[derive(Clone, Debug)]
pub struct ServiceContent {
    pub root_folder: MoRef,
    pub session_manager: MoRef,
    pub view_manager: MoRef,
    pub property_collector: MoRef,
}

/// One object as returned by the property collector
#[derive(Clone, Debug)]
pub struct RetrievedObject {
    pub moref: MoRef,
    /// Successfully read properties: name, wire value
    pub props: Vec<(String, RawValue)>,
    /// Unreadable properties: name, fault type
    pub missing: Vec<(String, String)>,
}

/// One `RetrievePropertiesEx` page
#[derive(Clone, Debug)]
pub struct RetrieveBatch {
    pub objects: Vec<RetrievedObject>,
    /// Continuation token when the server has more pages
    pub token: Option<String>,
}

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

/// Wrap an operation body in the SOAP envelope
pub fn envelope(body: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
         <soapenv:Envelope xmlns:soapenv=\"http://schemas.xmlsoap.org/soap/envelope/\" \
         xmlns:xsd=\"http://www.w3.org/2001/XMLSchema\" \
         xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\">\
         <soapenv:Body>{body}</soapenv:Body></soapenv:Envelope>"
    )
}

pub fn retrieve_service_content_body() -> String {
    "<RetrieveServiceContent xmlns=\"urn:vim25\">\
     <_this type=\"ServiceInstance\">ServiceInstance</_this>\
     </RetrieveServiceContent>"
        .to_string()
}

pub fn login_body(session_manager: &MoRef, username: &str, password: &str) -> String {
    format!(
        "<Login xmlns=\"urn:vim25\"><_this type=\"{}\">{}</_this>\
         <userName>{}</userName><password>{}</password></Login>",
        escape(&session_manager.kind),
        escape(&session_manager.moid),
        escape(username),
        escape(password)
    )
}

pub fn logout_body(session_manager: &MoRef) -> String {
    format!(
        "<Logout xmlns=\"urn:vim25\"><_this type=\"{}\">{}</_this></Logout>",
        escape(&session_manager.kind),
        escape(&session_manager.moid)
    )
}

pub fn create_container_view_body(view_manager: &MoRef, root: &MoRef, kind: MobKind) -> String {
    format!(
        "<CreateContainerView xmlns=\"urn:vim25\"><_this type=\"{}\">{}</_this>\
         <container type=\"{}\">{}</container>\
         <type>{}</type><recursive>true</recursive></CreateContainerView>",
        escape(&view_manager.kind),
        escape(&view_manager.moid),
        escape(&root.kind),
        escape(&root.moid),
        kind.vim_type()
    )
}

pub fn destroy_view_body(view: &MoRef) -> String {
    format!(
        "<DestroyView xmlns=\"urn:vim25\"><_this type=\"{}\">{}</_this></DestroyView>",
        escape(&view.kind),
        escape(&view.moid)
    )
}

/// All properties of every object of `kind` reachable through the view
pub fn retrieve_properties_body(collector: &MoRef, view: &MoRef, kind: MobKind) -> String {
    format!(
        "<RetrievePropertiesEx xmlns=\"urn:vim25\"><_this type=\"{}\">{}</_this>\
         <specSet>\
         <propSet><type>{}</type><all>true</all></propSet>\
         <objectSet><obj type=\"{}\">{}</obj><skip>true</skip>\
         <selectSet xsi:type=\"TraversalSpec\"><name>traverseView</name>\
         <type>ContainerView</type><path>view</path><skip>false</skip></selectSet>\
         </objectSet>\
         </specSet><options/></RetrievePropertiesEx>",
        escape(&collector.kind),
        escape(&collector.moid),
        kind.vim_type(),
        escape(&view.kind),
        escape(&view.moid)
    )
}

pub fn continue_retrieve_body(collector: &MoRef, token: &str) -> String {
    format!(
        "<ContinueRetrievePropertiesEx xmlns=\"urn:vim25\"><_this type=\"{}\">{}</_this>\
         <token>{}</token></ContinueRetrievePropertiesEx>",
        escape(&collector.kind),
        escape(&collector.moid),
        escape(token)
    )
}

// ---------------------------------------------------------------------------
// Response parsing
// ---------------------------------------------------------------------------

fn malformed(operation: &str, reason: impl std::fmt::Display) -> MobviewError {
    MobviewError::MalformedResponse {
        operation: operation.to_string(),
        reason: reason.to_string(),
    }
}

/// Value of the first attribute whose local name is `name`
fn attr_local(e: &BytesStart, name: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.local_name().as_ref() == name)
        .map(|a| String::from_utf8_lossy(&a.value).to_string())
}

fn is_nil(e: &BytesStart) -> bool {
    attr_local(e, b"nil").is_some_and(|v| v == "true" || v == "1")
}

/// Scalar value bodies come back entity-escaped; structured bodies keep
/// their raw inner markup.
fn value_body(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.contains('<') {
        trimmed.to_string()
    } else {
        unescape(trimmed)
            .map(|c| c.into_owned())
            .unwrap_or_else(|_| trimmed.to_string())
    }
}

pub fn parse_service_content(xml: &str) -> Result<ServiceContent> {
    const OP: &str = "RetrieveServiceContent";
    let mut reader = Reader::from_str(xml);
    let mut root_folder = None;
    let mut session_manager = None;
    let mut view_manager = None;
    let mut property_collector = None;

    loop {
        match reader.read_event().map_err(|e| malformed(OP, e))? {
            Event::Start(e) => {
                let field = e.local_name().as_ref().to_vec();
                if matches!(
                    field.as_slice(),
                    b"rootFolder" | b"sessionManager" | b"viewManager" | b"propertyCollector"
                ) {
                    let kind = attr_local(&e, b"type").unwrap_or_default();
                    let moid = reader
                        .read_text(e.name())
                        .map_err(|err| malformed(OP, err))?
                        .trim()
                        .to_string();
                    let moref = MoRef::new(kind, moid);
                    match field.as_slice() {
                        b"rootFolder" => root_folder = Some(moref),
                        b"sessionManager" => session_manager = Some(moref),
                        b"viewManager" => view_manager = Some(moref),
                        _ => property_collector = Some(moref),
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    match (root_folder, session_manager, view_manager, property_collector) {
        (Some(root_folder), Some(session_manager), Some(view_manager), Some(property_collector)) => {
            Ok(ServiceContent {
                root_folder,
                session_manager,
                view_manager,
                property_collector,
            })
        }
        _ => Err(malformed(OP, "service content is missing required handles")),
    }
}

/// Parse the view reference out of a `CreateContainerView` response
pub fn parse_container_view(xml: &str) -> Result<MoRef> {
    const OP: &str = "CreateContainerView";
    let mut reader = Reader::from_str(xml);
    loop {
        match reader.read_event().map_err(|e| malformed(OP, e))? {
            Event::Start(e) if e.local_name().as_ref() == b"returnval" => {
                let kind = attr_local(&e, b"type").unwrap_or_default();
                let moid = reader
                    .read_text(e.name())
                    .map_err(|err| malformed(OP, err))?
                    .trim()
                    .to_string();
                return Ok(MoRef::new(kind, moid));
            }
            Event::Eof => return Err(malformed(OP, "no view reference in response")),
            _ => {}
        }
    }
}

/// Parse one `RetrievePropertiesEx` / `ContinueRetrievePropertiesEx` page
pub fn parse_retrieve_response(operation: &str, xml: &str) -> Result<RetrieveBatch> {
    let mut reader = Reader::from_str(xml);
    let mut objects = Vec::new();
    let mut token = None;

    let mut moref: Option<MoRef> = None;
    let mut props: Vec<(String, RawValue)> = Vec::new();
    let mut missing: Vec<(String, String)> = Vec::new();

    let mut in_prop = false;
    let mut prop_name = String::new();
    let mut prop_val: Option<RawValue> = None;

    let mut in_missing = false;
    let mut missing_path = String::new();
    let mut missing_fault = String::new();

    loop {
        match reader.read_event().map_err(|e| malformed(operation, e))? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"obj" => {
                    let kind = attr_local(&e, b"type").unwrap_or_default();
                    let moid = reader
                        .read_text(e.name())
                        .map_err(|err| malformed(operation, err))?
                        .trim()
                        .to_string();
                    moref = Some(MoRef::new(kind, moid));
                }
                b"propSet" => {
                    in_prop = true;
                    prop_name.clear();
                    prop_val = None;
                }
                b"name" if in_prop => {
                    prop_name = reader
                        .read_text(e.name())
                        .map_err(|err| malformed(operation, err))?
                        .trim()
                        .to_string();
                }
                b"val" if in_prop => {
                    let type_name = attr_local(&e, b"type");
                    let nil = is_nil(&e);
                    let raw = reader
                        .read_text(e.name())
                        .map_err(|err| malformed(operation, err))?;
                    prop_val = Some(RawValue {
                        type_name,
                        nil,
                        body: value_body(&raw),
                    });
                }
                b"missingSet" => {
                    in_missing = true;
                    missing_path.clear();
                    missing_fault.clear();
                }
                b"path" if in_missing => {
                    missing_path = reader
                        .read_text(e.name())
                        .map_err(|err| malformed(operation, err))?
                        .trim()
                        .to_string();
                }
                // The outer LocalizedMethodFault element carries no type
                // attribute; the nested fault carries the fault type.
                b"fault" if in_missing => {
                    if let Some(t) = attr_local(&e, b"type") {
                        missing_fault = t;
                    }
                }
                b"token" => {
                    token = Some(
                        reader
                            .read_text(e.name())
                            .map_err(|err| malformed(operation, err))?
                            .trim()
                            .to_string(),
                    );
                }
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"val" if in_prop => {
                    prop_val = Some(RawValue {
                        type_name: attr_local(&e, b"type"),
                        nil: true,
                        body: String::new(),
                    });
                }
                b"fault" if in_missing => {
                    if let Some(t) = attr_local(&e, b"type") {
                        missing_fault = t;
                    }
                }
                _ => {}
            },
            Event::End(e) => match e.local_name().as_ref() {
                b"propSet" => {
                    if let Some(val) = prop_val.take() {
                        props.push((std::mem::take(&mut prop_name), val));
                    }
                    in_prop = false;
                }
                b"missingSet" => {
                    if missing_fault.is_empty() {
                        missing_fault = "MethodFault".to_string();
                    }
                    missing.push((
                        std::mem::take(&mut missing_path),
                        std::mem::take(&mut missing_fault),
                    ));
                    in_missing = false;
                }
                b"objects" => {
                    if let Some(moref) = moref.take() {
                        objects.push(RetrievedObject {
                            moref,
                            props: std::mem::take(&mut props),
                            missing: std::mem::take(&mut missing),
                        });
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(RetrieveBatch { objects, token })
}

/// Extract the human-readable message from a SOAP fault body
pub fn fault_message(xml: &str) -> Option<String> {
    let mut reader = Reader::from_str(xml);
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.local_name().as_ref() == b"faultstring" => {
                return reader.read_text(e.name()).ok().map(|t| t.trim().to_string());
            }
            Ok(Event::Eof) | Err(_) => return None,
            _ => {}
        }
    }
}
