//! Authentication command handlers
//!
//! Register, login, logout, and session status. Login and register
//! propagate the server error untouched so the caller sees the server's
//! detail message (for example "Incorrect email or password").

use crate::api::ApiClient;
use crate::commands::read_required;
use crate::config::Config;
use crate::error::Result;
use crate::session::Session;

use colored::Colorize;
use rustyline::DefaultEditor;

/// Log in to an existing account and persist the token
pub async fn run_login(config: &Config, email: Option<String>) -> Result<()> {
    let api = ApiClient::new(&config.api)?;
    let mut session = Session::load()?;

    let Some((email, password)) = prompt_credentials(email)? else {
        println!("Cancelled.");
        return Ok(());
    };

    session.login(&api, &email, &password).await?;
    println!("{}", "Logged in.".green());
    Ok(())
}

/// Register a new account, log in, and persist the token
pub async fn run_register(config: &Config, email: Option<String>) -> Result<()> {
    let api = ApiClient::new(&config.api)?;
    let mut session = Session::load()?;

    let Some((email, password)) = prompt_credentials(email)? else {
        println!("Cancelled.");
        return Ok(());
    };

    session.register(&api, &email, &password).await?;
    println!("{}", "Account created and logged in.".green());
    println!("Run `lifeharness onboard` to set up your profile.");
    Ok(())
}

/// Clear the stored token; no network call is made
pub fn run_logout() -> Result<()> {
    let mut session = Session::load()?;
    session.logout()?;
    println!("Logged out.");
    Ok(())
}

/// Report whether a session token is stored
pub fn run_status() -> Result<()> {
    let session = Session::load()?;
    if session.is_authenticated() {
        println!("{}", "Logged in.".green());
    } else {
        println!("Not logged in. Run `lifeharness login` first.");
    }
    Ok(())
}

fn prompt_credentials(email: Option<String>) -> Result<Option<(String, String)>> {
    let mut rl = DefaultEditor::new()?;

    let email = match email {
        Some(email) => email,
        None => match read_required(&mut rl, "Email: ")? {
            Some(email) => email,
            None => return Ok(None),
        },
    };

    let password = match read_required(&mut rl, "Password: ")? {
        Some(password) => password,
        None => return Ok(None),
    };

    Ok(Some((email, password)))
}
