//! Reflective property collector
//!
//! Walks every attribute of every retrieved managed object and classifies
//! it as a property, a method, or an unreadable attribute. A single
//! unreadable attribute never aborts enumeration; it lands in the
//! per-object failure set and the walk continues.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::vim::{MobHandle, RawAttr, RawValue};

/// Attribute names with this prefix are implementation-private and skipped
const PRIVATE_PREFIX: char = '_';

/// A classified property value
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PropertyValue {
    /// Plain text: string properties and scalar wire values
    Text(String),
    /// A value from the vendor's type namespace; body is its wire rendering
    Vendor { type_name: String, body: String },
    /// The null sentinel: the property exists but carries no value
    Unset,
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Text(s) => f.write_str(s),
            PropertyValue::Unset => f.write_str("unset"),
            PropertyValue::Vendor { type_name, body } if body.is_empty() => {
                write!(f, "({type_name})")
            }
            PropertyValue::Vendor { type_name, body } => write!(f, "({type_name}) {body}"),
        }
    }
}

/// One object's classified attribute enumeration
#[derive(Clone, Debug, Default)]
pub struct CollectedObject {
    pub name: String,
    pub properties: BTreeMap<String, PropertyValue>,
    pub methods: BTreeSet<String>,
    pub failures: BTreeSet<String>,
}

/// Classify every attribute of every handle. Order of the result follows
/// the input; callers sort for display.
pub fn collect(handles: &[MobHandle]) -> Vec<CollectedObject> {
    handles.iter().map(collect_one).collect()
}

fn collect_one(handle: &MobHandle) -> CollectedObject {
    let mut object = CollectedObject {
        name: handle.name.clone(),
        ..CollectedObject::default()
    };

    for (name, attr) in &handle.attrs {
        if name.starts_with(PRIVATE_PREFIX) {
            continue;
        }
        match attr {
            RawAttr::Data(value) => {
                object.properties.insert(name.clone(), classify(value));
            }
            RawAttr::Method => {
                object.methods.insert(name.clone());
            }
            RawAttr::Unreadable(_) => {
                object.failures.insert(name.clone());
            }
        }
    }

    object
}

/// A nil value is the null sentinel; an `xsi:type` outside the `xsd:`
/// namespace is a vendor type; everything else arrives as text.
fn classify(value: &RawValue) -> PropertyValue {
    if value.nil {
        return PropertyValue::Unset;
    }
    match &value.type_name {
        Some(t) if !t.starts_with("xsd:") => PropertyValue::Vendor {
            type_name: t.clone(),
            body: value.body.clone(),
        },
        _ => PropertyValue::Text(value.body.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vim::{MoRef, MobKind};

    fn raw(type_name: Option<&str>, nil: bool, body: &str) -> RawValue {
        RawValue {
            type_name: type_name.map(str::to_string),
            nil,
            body: body.to_string(),
        }
    }

    fn sample_handle() -> MobHandle {
        MobHandle::new(
            MobKind::VirtualMachine,
            MoRef::new("VirtualMachine", "vm-12"),
            vec![
                ("name".to_string(), raw(Some("xsd:string"), false, "web01")),
                (
                    "runtime".to_string(),
                    raw(
                        Some("VirtualMachineRuntimeInfo"),
                        false,
                        "<powerState>poweredOn</powerState>",
                    ),
                ),
                (
                    "snapshot".to_string(),
                    raw(Some("VirtualMachineSnapshotInfo"), true, ""),
                ),
                ("overallStatus".to_string(), raw(None, false, "green")),
                ("_secret".to_string(), raw(None, false, "hidden")),
            ],
            vec![("environmentBrowser".to_string(), "NoPermission".to_string())],
        )
    }

    #[test]
    fn test_classification_buckets() {
        let objects = collect(&[sample_handle()]);
        let vm = &objects[0];

        assert_eq!(
            vm.properties.get("name"),
            Some(&PropertyValue::Text("web01".to_string()))
        );
        assert_eq!(
            vm.properties.get("overallStatus"),
            Some(&PropertyValue::Text("green".to_string()))
        );
        assert_eq!(vm.properties.get("snapshot"), Some(&PropertyValue::Unset));
        assert!(matches!(
            vm.properties.get("runtime"),
            Some(PropertyValue::Vendor { type_name, .. }) if type_name == "VirtualMachineRuntimeInfo"
        ));

        assert!(vm.methods.contains("PowerOnVM_Task"));
        assert!(!vm.properties.contains_key("PowerOnVM_Task"));

        assert!(vm.failures.contains("environmentBrowser"));
        assert!(!vm.properties.contains_key("environmentBrowser"));
    }

    #[test]
    fn test_private_attributes_are_skipped() {
        let objects = collect(&[sample_handle()]);
        let vm = &objects[0];
        assert!(!vm.properties.contains_key("_secret"));
        assert!(!vm.methods.contains("_secret"));
        assert!(!vm.failures.contains("_secret"));
    }

    #[test]
    fn test_every_public_attribute_lands_in_exactly_one_bucket() {
        let handle = sample_handle();
        let objects = collect(std::slice::from_ref(&handle));
        let vm = &objects[0];

        for (name, _) in &handle.attrs {
            if name.starts_with('_') {
                continue;
            }
            let buckets = usize::from(vm.properties.contains_key(name))
                + usize::from(vm.methods.contains(name))
                + usize::from(vm.failures.contains(name));
            assert_eq!(buckets, 1, "attribute {name} is in {buckets} buckets");
        }
    }

    #[test]
    fn test_failure_isolation_keeps_other_attributes() {
        let handle = MobHandle::new(
            MobKind::Datastore,
            MoRef::new("Datastore", "datastore-3"),
            vec![("name".to_string(), raw(Some("xsd:string"), false, "nfs01"))],
            vec![
                ("host".to_string(), "NotAuthenticated".to_string()),
                ("browser".to_string(), "NoPermission".to_string()),
            ],
        );
        let objects = collect(&[handle]);
        let ds = &objects[0];

        assert_eq!(ds.failures.len(), 2);
        assert!(ds.properties.contains_key("name"));
        assert!(ds.methods.contains("RefreshDatastore"));
    }

    #[test]
    fn test_value_display() {
        assert_eq!(PropertyValue::Text("green".to_string()).to_string(), "green");
        assert_eq!(PropertyValue::Unset.to_string(), "unset");
        assert_eq!(
            PropertyValue::Vendor {
                type_name: "VirtualMachinePowerState".to_string(),
                body: "poweredOn".to_string(),
            }
            .to_string(),
            "(VirtualMachinePowerState) poweredOn"
        );
        assert_eq!(
            PropertyValue::Vendor {
                type_name: "ArrayOfManagedObjectReference".to_string(),
                body: String::new(),
            }
            .to_string(),
            "(ArrayOfManagedObjectReference)"
        );
    }

    #[test]
    fn test_collection_preserves_input_order() {
        let first = MobHandle::new(
            MobKind::Network,
            MoRef::new("Network", "network-2"),
            vec![("name".to_string(), raw(None, false, "zeta"))],
            vec![],
        );
        let second = MobHandle::new(
            MobKind::Network,
            MoRef::new("Network", "network-1"),
            vec![("name".to_string(), raw(None, false, "alpha"))],
            vec![],
        );
        let objects = collect(&[first, second]);
        assert_eq!(objects[0].name, "zeta");
        assert_eq!(objects[1].name, "alpha");
    }
}
