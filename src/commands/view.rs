//! View command implementation
//!
//! The whole data flow lives here: resolve credentials, open the
//! session, retrieve the requested objects, classify their attributes,
//! render.

use std::time::Duration;

use indicatif::ProgressBar;

use crate::cli::Cli;
use crate::collector;
use crate::error::Result;
use crate::session::Session;
use crate::ui::display;

pub fn run(cli: Cli) -> Result<()> {
    let password = match cli.password.clone() {
        Some(password) => password,
        None => prompt_password(&cli.username)?,
    };

    let session = Session::connect(&cli.host, &cli.username, &password)?;

    let spinner = ProgressBar::new_spinner();
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner.set_message(format!(
        "Retrieving {} objects from {}",
        cli.mob.vim_type(),
        cli.host
    ));
    let handles = session.find_objects(cli.mob, &cli.target);
    spinner.finish_and_clear();
    let handles = handles?;

    if handles.is_empty() {
        println!("No matching {} objects.", cli.mob.vim_type());
        return Ok(());
    }

    let objects = collector::collect(&handles);
    display::render(&objects, &cli.display_mode());

    Ok(())
}

/// Hidden interactive prompt, used when `--password` is omitted
fn prompt_password(username: &str) -> Result<String> {
    let prompt = format!("Password for {username}:");
    Ok(inquire::Password::new(&prompt)
        .without_confirmation()
        .prompt()?)
}
