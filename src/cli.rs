use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::config::{Config, ConfigError};
use crate::filter::{CategoryFilter, StatusFilter, TaskFilter, remaining_count};
use crate::models::Task;
use crate::tasks::TaskList;
use crate::utils::{self, Profile};

#[derive(Parser)]
#[command(name = "taskai")]
#[command(about = "TaskAI - a task list with search and filters, in the terminal")]
#[command(version)]
pub struct Cli {
    /// Custom config file path
    #[arg(short, long)]
    pub config: Option<String>,

    /// Use development mode (separate dev config and log directories)
    #[arg(long)]
    pub dev: bool,

    /// Theme for this session, a preset or one defined in the config
    #[arg(long)]
    pub theme: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch interactive TUI (default if no subcommand)
    Tui,
    /// Print the task list through the same filters the UI uses
    List {
        /// all, completed or incomplete
        #[arg(long, default_value = "all")]
        status: String,
        /// Only tasks in this category
        #[arg(long)]
        category: Option<String>,
        /// Case-insensitive match on title or description
        #[arg(long)]
        search: Option<String>,
        /// Print the matching tasks as a JSON array
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Invalid status filter: {0}")]
    InvalidStatus(String),
    #[error("Failed to encode JSON: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Config for the interactive UI: `--config` or the profile's file, then `--theme` on top.
/// The theme override is not written back.
pub fn load_tui_config(cli: &Cli, profile: Profile) -> Result<Config, ConfigError> {
    let mut config = match cli.config {
        Some(ref path) => Config::load_from_path(&utils::expand_path(path))?,
        None => Config::load_with_profile(profile)?,
    };
    if let Some(ref theme) = cli.theme {
        config.set_theme(theme)?;
    }
    Ok(config)
}

/// Build the filter the `list` command describes
pub fn build_filter(status: &str, category: Option<String>, search: Option<String>) -> Result<TaskFilter, CliError> {
    let status: StatusFilter = status.parse().map_err(CliError::InvalidStatus)?;
    Ok(TaskFilter {
        status,
        category: CategoryFilter::from(category),
        search: search.unwrap_or_default(),
    })
}

fn format_task_line(task: &Task) -> String {
    let checkbox = if task.completed { "[x]" } else { "[ ]" };
    let mut line = format!(
        "{} #{} {} ({}, {}, {})",
        checkbox, task.id, task.title, task.priority, task.date, task.category
    );
    if let Some(ref description) = task.description {
        line.push_str(&format!(" - {}", description));
    }
    line
}

/// Render the filtered list as text (one task per line plus the remaining count) or JSON
pub fn render_list(tasks: &TaskList, filter: &TaskFilter, json: bool) -> Result<String, CliError> {
    let visible = filter.apply(tasks);
    if json {
        return Ok(serde_json::to_string_pretty(&visible)?);
    }

    let mut out = String::new();
    if visible.is_empty() {
        out.push_str("No tasks found.\n");
    }
    for task in &visible {
        out.push_str(&format_task_line(task));
        out.push('\n');
    }
    out.push_str(&format!("{} remaining", remaining_count(&visible)));
    Ok(out)
}

/// Handle the list command
pub fn handle_list(
    status: String,
    category: Option<String>,
    search: Option<String>,
    json: bool,
) -> Result<(), CliError> {
    let filter = build_filter(&status, category, search)?;
    log::debug!("list with {}", filter.summary());
    let output = render_list(&TaskList::seeded(), &filter, json)?;
    println!("{}", output);
    Ok(())
}
