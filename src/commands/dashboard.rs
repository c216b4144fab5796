//! Dashboard command handler
//!
//! Loads threads, the coverage grid, and the profile concurrently, then
//! renders the coverage heatmap and a thread table. The three fetches are
//! all-or-nothing: a failure in any one fails the whole load, so the
//! dashboard never renders from partial data.

use crate::api::types::{CoverageCell, Profile, Thread};
use crate::api::ApiClient;
use crate::config::Config;
use crate::error::Result;
use crate::heatmap::CoverageGrid;
use crate::session::Session;

use colored::Colorize;
use prettytable::{row, Table};

/// Everything the dashboard renders from
#[derive(Debug)]
pub struct Overview {
    pub threads: Vec<Thread>,
    pub coverage: Vec<CoverageCell>,
    pub profile: Profile,
}

/// Fetch threads, coverage, and profile concurrently
///
/// No partial-success rendering: any failed fetch fails the combined load.
pub async fn load_overview(api: &ApiClient) -> Result<Overview> {
    let (threads, coverage, profile) = tokio::try_join!(
        api.list_threads(),
        api.coverage_grid(),
        api.get_profile(),
    )?;
    Ok(Overview {
        threads,
        coverage,
        profile,
    })
}

/// Render the dashboard
pub async fn run_dashboard(config: &Config) -> Result<()> {
    let session = Session::load()?;
    let token = session.require_token()?;
    let api = ApiClient::new(&config.api)?.with_token(Some(token.to_string()));

    let overview = load_overview(&api).await?;

    println!("\n{}", "Life Harness Dashboard".bold());
    println!("Welcome back! Continue documenting your life story.");
    if let Some(intensity) = &overview.profile.intensity {
        println!("Interview intensity: {}", intensity);
    }

    println!("\n{}", "Coverage Heatmap".bold());
    println!("Which life areas you've explored; darker means more coverage.");
    CoverageGrid::from_cells(&overview.coverage).render().printstd();

    println!("\n{}", "Your Threads".bold());
    if overview.threads.is_empty() {
        println!("No threads yet. Run `lifeharness thread new` to start documenting your life!");
    } else {
        thread_table(&overview.threads).printstd();
    }

    Ok(())
}

/// Build the thread overview table
pub fn thread_table(threads: &[Thread]) -> Table {
    let mut table = Table::new();
    table.add_row(row![b => "Id", "Title", "Prompt", "Questions", "Last activity"]);
    for thread in threads {
        table.add_row(row![
            thread.id,
            thread.title,
            truncate(&thread.root_prompt, 48),
            thread.questions_asked,
            thread.last_activity_at.format("%Y-%m-%d %H:%M"),
        ]);
    }
    table
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_chars).collect();
        format!("{}…", cut)
    }
}
