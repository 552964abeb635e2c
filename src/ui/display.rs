//! Display functions for collected managed objects
//!
//! Objects render sorted case-insensitively by name; attribute names
//! within an object render in lexicographic order. Objects with
//! unreadable attributes are listed at the end, names only.

use console::Style;

use crate::cli::DisplayMode;
use crate::collector::CollectedObject;

/// Frame a title in the dash banner used for every heading
pub fn banner(title: &str) -> String {
    let rule = "-".repeat(title.len() + 4);
    format!("{rule}\n| {title} |\n{rule}")
}

/// Render every collected object in the selected mode, then the
/// failure section for objects with unreadable attributes.
pub fn render(objects: &[CollectedObject], mode: &DisplayMode) {
    let sorted = sort_for_display(objects);

    for object in &sorted {
        println!(
            "{}",
            Style::new().bold().yellow().apply_to(banner(&object.name))
        );
        match mode {
            DisplayMode::Property(name) => render_single_property(object, name),
            DisplayMode::PropertyList => render_property_names(object),
            DisplayMode::Methods => render_method_names(object),
            DisplayMode::Full => render_full(object),
        }
        println!();
    }

    render_failures(&sorted);
}

/// Case-insensitive object ordering; collection order is meaningless
fn sort_for_display(objects: &[CollectedObject]) -> Vec<&CollectedObject> {
    let mut sorted: Vec<&CollectedObject> = objects.iter().collect();
    sorted.sort_by_key(|o| o.name.to_lowercase());
    sorted
}

fn render_single_property(object: &CollectedObject, name: &str) {
    println!("{}", Style::new().bold().apply_to(banner(name)));
    println!("{}", single_property_line(object, name));
}

fn single_property_line(object: &CollectedObject, name: &str) -> String {
    match object.properties.get(name) {
        Some(value) => value.to_string(),
        None => format!("Property '{name}' not found on this object."),
    }
}

fn render_property_names(object: &CollectedObject) {
    for name in object.properties.keys() {
        println!("{name}");
    }
}

fn render_method_names(object: &CollectedObject) {
    for name in &object.methods {
        println!("{name}");
    }
}

fn render_full(object: &CollectedObject) {
    for (name, value) in &object.properties {
        println!("{}", Style::new().bold().apply_to(banner(name)));
        println!("{value}");
    }
}

fn render_failures(sorted: &[&CollectedObject]) {
    for object in sorted {
        if object.failures.is_empty() {
            continue;
        }
        let title = format!("Unreadable attributes on {}", object.name);
        println!("{}", Style::new().bold().red().apply_to(banner(&title)));
        for name in &object.failures {
            println!("{}", Style::new().dim().apply_to(name));
        }
        println!();
    }
}
