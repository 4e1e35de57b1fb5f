//! Interactive input collaborator: stdin prompts with defaults.
//!
//! Everything here blocks the single thread on the terminal and hands the
//! answers to [`crate::config`]; the extraction core never prompts. Empty
//! input accepts the default shown in the prompt.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use crate::model::BusyStatus;

/// Ask for a line of input, returning `default` on empty input.
pub fn prompt_line(message: &str, default: &str) -> io::Result<String> {
    print!("{message} ");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;

    let answer = answer.trim();
    if answer.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(answer.to_string())
    }
}

/// Yes/no confirmation. Empty input takes the default; anything starting
/// with `y`/`Y` is yes, everything else is no.
pub fn prompt_confirm(message: &str, default: bool) -> io::Result<bool> {
    let hint = if default { "Y/n" } else { "y/N" };
    let answer = prompt_line(&format!("{message} [{hint}]"), "")?;

    if answer.is_empty() {
        return Ok(default);
    }
    Ok(answer.to_ascii_lowercase().starts_with('y'))
}

/// Ask for an input directory, re-prompting until the answer names an
/// existing directory.
pub fn prompt_existing_directory(message: &str, default: &str) -> io::Result<PathBuf> {
    let mut dir = PathBuf::from(prompt_line(message, default)?);

    while !dir.is_dir() {
        println!("The directory does not exist: {}", dir.display());
        dir = PathBuf::from(prompt_line(
            "Please enter a valid emails directory:",
            default,
        )?);
    }

    Ok(dir)
}

/// Choose a busy status from the closed set, defaulting to out-of-office.
/// Unrecognized answers re-prompt.
pub fn prompt_busy_status() -> io::Result<BusyStatus> {
    let choices = BusyStatus::ALL
        .iter()
        .map(|s| s.as_ics())
        .collect::<Vec<_>>()
        .join(", ");

    loop {
        let answer = prompt_line(
            &format!(
                "Choose the busy status for the ICS files ({choices}; default: Out Of Office):"
            ),
            "OOF",
        )?;

        match answer.parse::<BusyStatus>() {
            Ok(status) => return Ok(status),
            Err(e) => println!("{e}"),
        }
    }
}
