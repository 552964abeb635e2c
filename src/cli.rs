//! CLI definitions using clap derive API

use clap::Parser;
use clap::builder::{Styles, styling::AnsiColor};

use crate::vim::MobKind;

/// mobview - vSphere managed object property viewer
///
/// Connects to a vCenter endpoint and dumps the properties and methods of
/// managed inventory objects for ad-hoc inspection.
#[derive(Parser, Debug)]
#[command(
    name = "mobview",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Dump properties and methods of vSphere managed objects",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n    \
                  mobview --host vcenter.local --mob Datastore\n    \
                  mobview --host vcenter.local --mob VirtualMachine -t web01 db01\n    \
                  mobview --host vcenter.local --mob VirtualMachine -t web01 --property runtime\n    \
                  mobview --host vcenter.local --mob Network --property-list\n    \
                  mobview --host vcenter.local --mob Folder --methods"
)]
pub struct Cli {
    /// vCenter hostname or IP address
    #[arg(long, value_name = "HOST")]
    pub host: String,

    /// Login user name
    #[arg(long, short = 'u', default_value = "administrator@vsphere.local")]
    pub username: String,

    /// Login password (prompted interactively when omitted)
    #[arg(long, short = 'p')]
    pub password: Option<String>,

    /// Managed object kind to inspect
    #[arg(long, value_enum, value_name = "KIND")]
    pub mob: MobKind,

    /// Only inspect objects with these exact names
    #[arg(long, short = 't', num_args = 1.., value_name = "NAME")]
    pub target: Vec<String>,

    /// Display a single named property of each object
    #[arg(long, value_name = "PROPERTY", group = "mode")]
    pub property: Option<String>,

    /// Display sorted property names only, without values
    #[arg(long, short = 'l', group = "mode")]
    pub property_list: bool,

    /// Display sorted method names only
    #[arg(long, short = 'm', group = "mode")]
    pub methods: bool,
}

/// How collected objects are rendered; the variants are mutually
/// exclusive by construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DisplayMode {
    /// Every property name with its value (the default)
    Full,
    /// One named property per object
    Property(String),
    /// Property names only
    PropertyList,
    /// Method names only
    Methods,
}

impl Cli {
    /// Resolve the mode flag group. clap guarantees at most one is set.
    pub fn display_mode(&self) -> DisplayMode {
        if let Some(ref name) = self.property {
            DisplayMode::Property(name.clone())
        } else if self.property_list {
            DisplayMode::PropertyList
        } else if self.methods {
            DisplayMode::Methods
        } else {
            DisplayMode::Full
        }
    }
}
