//! Life Harness terminal client library
//!
//! This library provides the building blocks for the Life Harness CLI,
//! a thin typed client of the Life Harness journaling service.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `api`: REST client wrapper and wire types
//! - `session`: Authentication state and durable token storage
//! - `interview`: Interview session state machine and answer validation
//! - `heatmap`: Coverage grid rendering
//! - `commands`: Command handlers invoked by the CLI entrypoint
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use lifeharness::config::Config;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config/config.yaml")?;
//!     config.validate()?;
//!
//!     // Command dispatch would go here
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod heatmap;
pub mod interview;
pub mod session;

// Re-export commonly used types
pub use api::ApiClient;
pub use config::Config;
pub use error::{HarnessError, Result};
pub use heatmap::CoverageGrid;
pub use interview::{AnswerDraft, InterviewState};
pub use session::{Session, TokenStore};
