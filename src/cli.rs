use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::builds;
use crate::checkout::{self, ToggleAction, ToggleOutcome};
use crate::config;
use crate::context::Context;
use crate::error::Result;

#[derive(Debug, Parser)]
#[command(name = "ado", version)]
#[command(about = "Azure DevOps chores from the terminal", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ./.ado-config.toml (or ./.ado-config.json)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Checkout or create a branch attached to a workitem
    Checkout {
        /// Work item id
        workitem: String,
    },
    /// Print config to the console
    Config,
    /// Outputs all build definitions
    Builds,
}

pub async fn run(ctx: &Context, command: Command, out: &mut impl Write) -> Result<()> {
    match command {
        Command::Checkout { workitem } => handle_checkout(ctx, &workitem, out).await,
        Command::Config => config::print_config(&ctx.config, out),
        Command::Builds => builds::list_builds(ctx, out).await,
    }
}

pub async fn handle_checkout(ctx: &Context, workitem: &str, out: &mut impl Write) -> Result<()> {
    let id = checkout::parse_work_item_id(workitem)?;
    let outcome = checkout::toggle_branch_link(ctx, id).await?;
    print_outcome(&outcome, out)
}

fn print_outcome(outcome: &ToggleOutcome, out: &mut impl Write) -> Result<()> {
    match &outcome.action {
        ToggleAction::Added { branch } => {
            writeln!(out, "Linked {branch} to work item {}", outcome.id)?
        }
        ToggleAction::Removed { relation } => {
            writeln!(out, "Unlinked {} from work item {}", relation.url, outcome.id)?
        }
    }
    writeln!(
        out,
        "Relations: {} -> {}",
        outcome.before.len(),
        outcome.after.len()
    )?;
    writeln!(out, "{}", serde_json::to_string_pretty(&outcome.after)?)?;
    Ok(())
}
