//! Profile onboarding wizard
//!
//! Three-phase interactive intake mirroring the product's profile form:
//! basic information, work & preferences, and a free-text life snapshot.
//! Blank answers leave fields unset; a single upsert is sent at the end.

use crate::api::types::{Intensity, ProfileUpdate};
use crate::api::ApiClient;
use crate::commands::{read_line, read_optional};
use crate::config::Config;
use crate::error::Result;
use crate::session::Session;

use colored::Colorize;
use rustyline::DefaultEditor;

/// Run the onboarding wizard and upsert the profile
pub async fn run_onboard(config: &Config) -> Result<()> {
    let session = Session::load()?;
    let token = session.require_token()?;
    let api = ApiClient::new(&config.api)?.with_token(Some(token.to_string()));

    let mut rl = DefaultEditor::new()?;

    println!("\nWelcome to Life Harness!");
    println!("Let's set up your profile so the interviews fit your story.");
    println!("Press Enter to skip any question; Ctrl-C cancels.\n");

    let Some(update) = collect_profile(&mut rl)? else {
        println!("Onboarding cancelled.");
        return Ok(());
    };

    api.upsert_profile(&update).await?;
    println!("{}", "Profile saved.".green());
    println!("Run `lifeharness dashboard` to see where your story stands.");
    Ok(())
}

fn collect_profile(rl: &mut DefaultEditor) -> Result<Option<ProfileUpdate>> {
    let mut update = ProfileUpdate::default();

    // Phase 1: basic information
    println!("{}", "Basic Information".bold());

    match read_optional(rl, "Year of birth: ")? {
        None => return Ok(None),
        Some(value) => {
            update.year_of_birth = match value {
                Some(raw) => match raw.parse() {
                    Ok(year) => Some(year),
                    Err(_) => {
                        println!("Not a year, skipping.");
                        None
                    }
                },
                None => None,
            };
        }
    }

    match read_optional(rl, "Country: ")? {
        None => return Ok(None),
        Some(value) => update.country = value,
    }

    match read_optional(rl, "Primary language: ")? {
        None => return Ok(None),
        Some(value) => update.primary_language = value,
    }

    match read_optional(
        rl,
        "Relationship status (single/partnered/married/divorced/widowed/complicated): ",
    )? {
        None => return Ok(None),
        Some(value) => update.relationship_status = value,
    }

    match read_optional(rl, "Do you have children? (y/n): ")? {
        None => return Ok(None),
        Some(Some(answer)) if answer.eq_ignore_ascii_case("y") => {
            update.has_children = Some(true);
            match read_optional(rl, "Number of children: ")? {
                None => return Ok(None),
                Some(value) => {
                    update.children_count = value.and_then(|raw| raw.parse().ok());
                }
            }
        }
        Some(Some(answer)) if answer.eq_ignore_ascii_case("n") => {
            update.has_children = Some(false);
        }
        Some(_) => {}
    }

    // Phase 2: work & preferences
    println!("\n{}", "Work & Preferences".bold());

    match read_optional(
        rl,
        "Main role (student/employee/self_employed/unemployed/retired/caregiver/other): ",
    )? {
        None => return Ok(None),
        Some(value) => update.main_role = value,
    }

    match read_optional(rl, "Field or industry: ")? {
        None => return Ok(None),
        Some(value) => update.field_or_industry = value,
    }

    loop {
        match read_optional(rl, "Interview intensity (light/balanced/deep): ")? {
            None => return Ok(None),
            Some(None) => break,
            Some(Some(raw)) => match Intensity::parse_str(&raw) {
                Ok(intensity) => {
                    update.intensity = Some(intensity);
                    break;
                }
                Err(message) => println!("{}", message),
            },
        }
    }

    match read_optional(rl, "Topics to avoid (comma separated): ")? {
        None => return Ok(None),
        Some(value) => {
            update.avoid_topics = value.map(|raw| {
                raw.split(',')
                    .map(|topic| topic.trim().to_string())
                    .filter(|topic| !topic.is_empty())
                    .collect()
            });
        }
    }

    // Phase 3: life snapshot
    println!("\n{}", "Life Snapshot".bold());
    println!("Write a brief sketch of your life so far; it helps the");
    println!("interviewer ask better questions.");

    match read_line(rl, "Snapshot: ")? {
        None => return Ok(None),
        Some(snapshot) if snapshot.is_empty() => {}
        Some(snapshot) => update.life_snapshot = Some(snapshot),
    }

    Ok(Some(update))
}
