/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint.

It exposes one module per surface:

- `auth`          — Register, login, logout, status
- `onboard`       — Profile onboarding wizard
- `dashboard`     — Coverage heatmap and thread overview
- `thread`        — Thread creation and the interview loop
- `entries`       — Life entry browsing and seal updates
- `autobiography` — Autobiography generation and export

These handlers are intentionally small and use the library components:
the API client, the session store, the interview state machine, and the
heatmap renderer.
*/

pub mod auth;
pub mod autobiography;
pub mod dashboard;
pub mod entries;
pub mod onboard;
pub mod thread;

use crate::error::Result;

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

/// Read one trimmed line from the user
///
/// Returns `Ok(None)` when the user cancels with Ctrl-C or Ctrl-D, so
/// callers can unwind interactive flows cleanly instead of erroring.
pub(crate) fn read_line(rl: &mut DefaultEditor, prompt: &str) -> Result<Option<String>> {
    match rl.readline(prompt) {
        Ok(line) => Ok(Some(line.trim().to_string())),
        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

/// Read an optional field: blank input maps to `None`
///
/// The outer `Option` distinguishes cancellation from a blank answer.
pub(crate) fn read_optional(rl: &mut DefaultEditor, prompt: &str) -> Result<Option<Option<String>>> {
    match read_line(rl, prompt)? {
        None => Ok(None),
        Some(line) if line.is_empty() => Ok(Some(None)),
        Some(line) => Ok(Some(Some(line))),
    }
}

/// Read a required field, re-prompting on blank input
pub(crate) fn read_required(rl: &mut DefaultEditor, prompt: &str) -> Result<Option<String>> {
    loop {
        match read_line(rl, prompt)? {
            None => return Ok(None),
            Some(line) if line.is_empty() => {
                println!("A value is required.");
            }
            Some(line) => return Ok(Some(line)),
        }
    }
}
