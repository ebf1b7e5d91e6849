//! Command-line interface.
//!
//! Each subcommand lives in its own module with an `Args` struct and a
//! `cmd` entry point. Commands build an [`context::AppContext`] from the
//! configuration and talk to the store only through the manager and the
//! services.
//!
//! ```text
//! momentum init
//! momentum task add "Water plants" --due 2024-05-02
//! momentum task move <id> 0
//! momentum reorder <id> <id> <id>
//! momentum stats --json
//! ```

pub mod context;
pub mod init;
pub mod profile;
pub mod reorder;
pub mod stats;
pub mod task;
pub mod urgent;

use crate::libs::messages::Message;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "List and change tasks")]
    Task(task::TaskArgs),
    #[command(about = "Put all tasks in the given order", arg_required_else_help = true)]
    Reorder(reorder::ReorderArgs),
    #[command(about = "Show task statistics")]
    Stats(stats::StatsArgs),
    #[command(about = "Show or change the display name")]
    Profile(profile::ProfileArgs),
    #[command(about = "Show, set or clear the urgent task")]
    Urgent(urgent::UrgentArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> anyhow::Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args).await,
            Commands::Task(args) => task::cmd(args).await,
            Commands::Reorder(args) => reorder::cmd(args).await,
            Commands::Stats(args) => stats::cmd(args).await,
            Commands::Profile(args) => profile::cmd(args).await,
            Commands::Urgent(args) => urgent::cmd(args).await,
        }
    }
}

/// `YYYY-MM-DD` argument parser.
pub(crate) fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| Message::InvalidDueDate(value.to_string()).to_string())
}
