//! vSphere managed object model
//!
//! The subset of the vim25 object model the viewer needs: the inspectable
//! managed-object kinds, opaque object references, and the raw attribute
//! form that property retrieval produces before classification.

pub mod methods;
pub mod soap;

use clap::ValueEnum;

/// Managed object kinds the viewer can inspect
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum MobKind {
    #[value(name = "Datacenter")]
    Datacenter,
    #[value(name = "Datastore")]
    Datastore,
    #[value(name = "Folder")]
    Folder,
    #[value(name = "Network")]
    Network,
    #[value(name = "ResourcePool")]
    ResourcePool,
    #[value(name = "VirtualMachine")]
    VirtualMachine,
}

impl MobKind {
    /// Wire type name as it appears in vim25 requests and responses
    pub fn vim_type(self) -> &'static str {
        match self {
            MobKind::Datacenter => "Datacenter",
            MobKind::Datastore => "Datastore",
            MobKind::Folder => "Folder",
            MobKind::Network => "Network",
            MobKind::ResourcePool => "ResourcePool",
            MobKind::VirtualMachine => "VirtualMachine",
        }
    }

    /// Method names this kind exposes, including inherited ones
    pub fn methods(self) -> &'static [&'static str] {
        methods::for_kind(self)
    }
}

/// Opaque reference to a managed object
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoRef {
    pub kind: String,
    pub moid: String,
}

impl MoRef {
    pub fn new(kind: impl Into<String>, moid: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            moid: moid.into(),
        }
    }
}

/// One property value as it arrived on the wire
///
/// `body` holds unescaped text for scalar values and raw inner XML for
/// structured ones. `type_name` is the `xsi:type` attribute when present.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawValue {
    pub type_name: Option<String>,
    pub nil: bool,
    pub body: String,
}

/// What reading one attribute produced
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RawAttr {
    /// A readable property value
    Data(RawValue),
    /// A callable operation on the object
    Method,
    /// The server could not produce the value; holds the fault type
    Unreadable(String),
}

/// One managed object with its full attribute enumeration
#[derive(Clone, Debug)]
pub struct MobHandle {
    pub moref: MoRef,
    pub name: String,
    pub attrs: Vec<(String, RawAttr)>,
}

impl MobHandle {
    /// Merge retrieved properties, the kind's method table, and the
    /// per-attribute fault set into one attribute enumeration.
    ///
    /// The display name comes from the `name` property; when that was
    /// itself unreadable the moid stands in.
    pub fn new(
        kind: MobKind,
        moref: MoRef,
        props: Vec<(String, RawValue)>,
        missing: Vec<(String, String)>,
    ) -> Self {
        let name = props
            .iter()
            .find(|(n, _)| n == "name")
            .map(|(_, v)| v.body.clone())
            .unwrap_or_else(|| moref.moid.clone());

        let mut attrs: Vec<(String, RawAttr)> = props
            .into_iter()
            .map(|(n, v)| (n, RawAttr::Data(v)))
            .collect();
        attrs.extend(
            kind.methods()
                .iter()
                .map(|m| ((*m).to_string(), RawAttr::Method)),
        );
        attrs.extend(
            missing
                .into_iter()
                .map(|(n, fault)| (n, RawAttr::Unreadable(fault))),
        );

        Self { moref, name, attrs }
    }
}
