//! Life entry command handlers
//!
//! Listing with server-side filters, a full detail view, and seal updates.
//! The seal patch is the only path through which visibility and seal
//! fields change; after a successful patch the list is reloaded in full
//! rather than updated optimistically.

use crate::api::types::{EntryFilter, LifeEntry, SealType, SealUpdate, Visibility};
use crate::api::ApiClient;
use crate::config::Config;
use crate::error::{HarnessError, Result};
use crate::session::Session;

use chrono::{DateTime, Utc};
use colored::Colorize;
use prettytable::{row, Table};

/// List entries, with blank filter dimensions omitted from the request
pub async fn run_list(
    config: &Config,
    time_bucket: Option<String>,
    topic_bucket: Option<String>,
) -> Result<()> {
    let session = Session::load()?;
    let token = session.require_token()?;
    let api = ApiClient::new(&config.api)?.with_token(Some(token.to_string()));

    let filter = EntryFilter {
        time_bucket,
        topic_bucket,
    };
    let entries = api.list_entries(&filter).await?;
    print_entry_list(&entries);
    Ok(())
}

/// Show one entry in full
pub async fn run_show(config: &Config, id: String) -> Result<()> {
    let session = Session::load()?;
    let token = session.require_token()?;
    let api = ApiClient::new(&config.api)?.with_token(Some(token.to_string()));

    let entry = api.get_entry(&id).await?;
    print_entry_detail(&entry);
    Ok(())
}

/// Patch an entry's seal policy, then reload and re-render the list
pub async fn run_seal(
    config: &Config,
    id: String,
    visibility: Option<String>,
    seal_type: Option<String>,
    release_at: Option<String>,
    event_key: Option<String>,
    block_audiences: Vec<String>,
) -> Result<()> {
    let session = Session::load()?;
    let token = session.require_token()?;
    let api = ApiClient::new(&config.api)?.with_token(Some(token.to_string()));

    let update = build_seal_update(visibility, seal_type, release_at, event_key, block_audiences)?;

    api.update_seal(&id, &update).await?;
    println!("{}", "Seal updated.".green());

    // Full reload; the client never patches its local view in place.
    let entries = api.list_entries(&EntryFilter::default()).await?;
    print_entry_list(&entries);
    Ok(())
}

/// Assemble and validate the seal patch payload
///
/// Release semantics are server-side; the client only checks the pairing
/// the field names imply and that the patch is not empty.
fn build_seal_update(
    visibility: Option<String>,
    seal_type: Option<String>,
    release_at: Option<String>,
    event_key: Option<String>,
    block_audiences: Vec<String>,
) -> Result<SealUpdate> {
    let visibility = visibility
        .map(|raw| Visibility::parse_str(&raw))
        .transpose()
        .map_err(HarnessError::Validation)?;

    let seal_type = seal_type
        .map(|raw| SealType::parse_str(&raw))
        .transpose()
        .map_err(HarnessError::Validation)?;

    let seal_release_at = release_at
        .map(|raw| {
            DateTime::parse_from_rfc3339(&raw)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| HarnessError::Validation(format!("invalid --release-at: {}", e)))
        })
        .transpose()?;

    if seal_type == Some(SealType::UntilDate) && seal_release_at.is_none() {
        return Err(
            HarnessError::Validation("an until_date seal requires --release-at".to_string()).into(),
        );
    }
    if seal_type == Some(SealType::UntilEvent) && event_key.is_none() {
        return Err(
            HarnessError::Validation("an until_event seal requires --event-key".to_string()).into(),
        );
    }

    let update = SealUpdate {
        visibility,
        seal_type,
        seal_release_at,
        seal_event_key: event_key,
        seal_audiences_blocked: if block_audiences.is_empty() {
            None
        } else {
            Some(block_audiences)
        },
    };

    if update.visibility.is_none()
        && update.seal_type.is_none()
        && update.seal_release_at.is_none()
        && update.seal_event_key.is_none()
        && update.seal_audiences_blocked.is_none()
    {
        return Err(HarnessError::Validation(
            "nothing to update; set at least one seal field".to_string(),
        )
        .into());
    }

    Ok(update)
}

fn print_entry_list(entries: &[LifeEntry]) {
    if entries.is_empty() {
        println!("No entries yet. Start a thread to create your first entry!");
        return;
    }
    entry_table(entries).printstd();
}

/// Build the entry overview table
pub fn entry_table(entries: &[LifeEntry]) -> Table {
    let mut table = Table::new();
    table.add_row(row![b => "Id", "Headline", "Timeframe", "Time", "Visibility", "Seal"]);
    for entry in entries {
        table.add_row(row![
            entry.id,
            entry.headline,
            entry.timeframe_label,
            entry.time_bucket,
            entry.visibility,
            entry.seal_type,
        ]);
    }
    table
}

fn print_entry_detail(entry: &LifeEntry) {
    println!("\n{}", entry.headline.bold());
    println!("{} · {}", entry.timeframe_label, entry.time_bucket);
    if let (Some(start), Some(end)) = (entry.approx_year_start, entry.approx_year_end) {
        println!("Years: {}-{}", start, end);
    }

    println!("\n{}", "Full Text".bold());
    println!("{}", entry.raw_text);

    println!("\n{}", "Distilled".bold());
    println!("{}", entry.distilled);

    if let Some(tags) = &entry.tags {
        if !tags.is_empty() {
            println!("\nTags: {}", tags.join(", "));
        }
    }
    if let Some(topics) = &entry.topic_buckets {
        if !topics.is_empty() {
            println!("Topics: {}", topics.join(", "));
        }
    }
    if let Some(people) = &entry.people {
        if !people.is_empty() {
            println!("People: {}", people.join(", "));
        }
    }
    if let Some(locations) = &entry.locations {
        if !locations.is_empty() {
            println!("Locations: {}", locations.join(", "));
        }
    }
    if let Some(tone) = &entry.emotional_tone {
        println!("Emotional tone: {}", tone);
    }

    println!("\n{}", "Visibility".bold());
    println!("Level: {}", entry.visibility);
    println!("Seal: {}", entry.seal_type);
    if let Some(release_at) = entry.seal_release_at {
        println!("Releases at: {}", release_at.to_rfc3339());
    }
    if let Some(event_key) = &entry.seal_event_key {
        println!("Release event: {}", event_key);
    }
    if let Some(blocked) = &entry.seal_audiences_blocked {
        if !blocked.is_empty() {
            println!("Blocked audiences: {}", blocked.join(", "));
        }
    }
}
