//! Life Harness - terminal client for the guided journaling service
//!
//! Main entry point: initializes tracing, loads configuration, and
//! dispatches to the command handlers.

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use lifeharness::cli::{Cli, Commands, EntryCommand, ThreadCommand};
use lifeharness::commands;
use lifeharness::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    init_tracing();

    // Parse command line arguments
    let cli = Cli::parse_args();

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let mut config = Config::load(config_path)?;

    // A CLI-supplied API URL wins over both the config file and the
    // LIFEHARNESS_API_URL environment variable.
    if let Some(api_url) = &cli.api_url {
        config.api.base_url = api_url.clone();
        tracing::debug!("Using API URL override from CLI: {}", api_url);
    }

    // Validate configuration
    config.validate()?;

    // Execute command
    match cli.command {
        Commands::Register { email } => {
            tracing::info!("Starting account registration");
            commands::auth::run_register(&config, email).await?;
            Ok(())
        }
        Commands::Login { email } => {
            tracing::info!("Starting login");
            commands::auth::run_login(&config, email).await?;
            Ok(())
        }
        Commands::Logout => {
            tracing::info!("Logging out");
            commands::auth::run_logout()?;
            Ok(())
        }
        Commands::Status => {
            commands::auth::run_status()?;
            Ok(())
        }
        Commands::Onboard => {
            tracing::info!("Starting onboarding wizard");
            commands::onboard::run_onboard(&config).await?;
            Ok(())
        }
        Commands::Dashboard => {
            tracing::info!("Loading dashboard");
            commands::dashboard::run_dashboard(&config).await?;
            Ok(())
        }
        Commands::Thread { command } => match command {
            ThreadCommand::List => {
                commands::thread::run_list(&config).await?;
                Ok(())
            }
            ThreadCommand::New {
                title,
                prompt,
                persona,
                time_focus,
                topic_focus,
            } => {
                tracing::info!("Creating new thread");
                commands::thread::run_new(&config, title, prompt, persona, time_focus, topic_focus)
                    .await?;
                Ok(())
            }
            ThreadCommand::Run { id } => {
                tracing::info!("Resuming thread {}", id);
                commands::thread::run_resume(&config, id).await?;
                Ok(())
            }
        },
        Commands::Entries { command } => match command {
            EntryCommand::List {
                time_bucket,
                topic_bucket,
            } => {
                commands::entries::run_list(&config, time_bucket, topic_bucket).await?;
                Ok(())
            }
            EntryCommand::Show { id } => {
                commands::entries::run_show(&config, id).await?;
                Ok(())
            }
            EntryCommand::Seal {
                id,
                visibility,
                seal_type,
                release_at,
                event_key,
                block_audiences,
            } => {
                tracing::info!("Updating seal for entry {}", id);
                commands::entries::run_seal(
                    &config,
                    id,
                    visibility,
                    seal_type,
                    release_at,
                    event_key,
                    block_audiences,
                )
                .await?;
                Ok(())
            }
        },
        Commands::Autobiography {
            audience,
            tone,
            from,
            to,
            include_placeholders,
            output,
        } => {
            tracing::info!("Starting autobiography generation");
            commands::autobiography::run_generate(
                &config,
                audience,
                tone,
                from,
                to,
                include_placeholders,
                output,
            )
            .await?;
            Ok(())
        }
    }
}

/// Initialize tracing subscriber with environment filter
fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lifeharness=info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
