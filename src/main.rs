//! mobview - vSphere managed object property viewer
//!
//! Connects to a vCenter endpoint and dumps the properties and methods of
//! managed inventory objects (virtual machines, datastores, networks, ...)
//! for ad-hoc inspection.

use clap::Parser;

mod cli;
mod collector;
mod commands;
mod error;
mod session;
mod ui;
mod vim;

use cli::Cli;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = commands::view::run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
