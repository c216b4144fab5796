//! Autobiography generation command handler
//!
//! Builds the generation request from the audience, tone, and scope
//! inputs, renders the returned outline and markdown, and writes the
//! markdown to a local file. The export is entirely client-side; no
//! second server round trip is involved.

use crate::api::types::{AutobiographyRequest, Scope, Tone, Visibility};
use crate::api::ApiClient;
use crate::config::Config;
use crate::error::{HarnessError, Result};
use crate::session::Session;

use anyhow::Context;
use chrono::Utc;
use colored::Colorize;
use serde_json::Value;

/// Generate an autobiography and export it as markdown
#[allow(clippy::too_many_arguments)]
pub async fn run_generate(
    config: &Config,
    audience: String,
    tone: String,
    from: Option<i32>,
    to: Option<i32>,
    include_placeholders: bool,
    output: Option<String>,
) -> Result<()> {
    let session = Session::load()?;
    let token = session.require_token()?;
    let api = ApiClient::new(&config.api)?.with_token(Some(token.to_string()));

    let request = build_request(audience, tone, from, to, include_placeholders)?;

    println!("Generating your autobiography...");
    println!("{}", "This may take a minute depending on how many entries you have.".dimmed());

    let autobiography = api
        .generate_autobiography(&request)
        .await
        .context("Failed to generate autobiography. Make sure you have some life entries first")?;

    let outline = render_outline(&autobiography.outline);
    if !outline.is_empty() {
        println!("\n{}", "Outline".bold());
        println!("{}", outline);
    }

    println!("\n{}", autobiography.markdown);

    let path = output.unwrap_or_else(|| config.output.autobiography_path.clone());
    std::fs::write(&path, &autobiography.markdown)
        .with_context(|| format!("Failed to write {}", path))?;
    println!("\n{}", format!("Saved to {}", path).green());

    Ok(())
}

/// Assemble and validate the generation request
fn build_request(
    audience: String,
    tone: String,
    from: Option<i32>,
    to: Option<i32>,
    include_placeholders: bool,
) -> Result<AutobiographyRequest> {
    let audience = Visibility::parse_str(&audience).map_err(HarnessError::Validation)?;
    let tone = Tone::parse_str(&tone).map_err(HarnessError::Validation)?;

    let scope = match (from, to) {
        (None, None) => Scope::Full,
        (Some(from), Some(to)) => Scope::TimeRange { from, to },
        _ => {
            return Err(HarnessError::Validation(
                "a time-range scope needs both --from and --to".to_string(),
            )
            .into())
        }
    };

    Ok(AutobiographyRequest {
        audience,
        date: Utc::now(),
        include_placeholders,
        scope,
        tone,
    })
}

/// Render the outline the way the server shapes it in practice: an array
/// of chapters with a number, a title, and ordered section titles.
/// Anything else renders as nothing; the markdown body is authoritative.
fn render_outline(outline: &Value) -> String {
    let Some(chapters) = outline.as_array() else {
        return String::new();
    };

    let mut rendered = String::new();
    for chapter in chapters {
        let Some(title) = chapter.get("title").and_then(Value::as_str) else {
            continue;
        };
        match chapter.get("chapter").and_then(Value::as_i64) {
            Some(number) => rendered.push_str(&format!("Chapter {}: {}\n", number, title)),
            None => rendered.push_str(&format!("{}\n", title)),
        }
        if let Some(sections) = chapter.get("sections").and_then(Value::as_array) {
            for section in sections {
                if let Some(section) = section.as_str() {
                    rendered.push_str(&format!("  - {}\n", section));
                }
            }
        }
    }
    rendered
}
