use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::anyhow;
use chrono::NaiveDate;
use clap::{ArgAction, Args, Parser, Subcommand};
use lifegrid_shared::{WeekKey, WeekSelection};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[derive(Debug, Clone)]
pub struct KeyVal {
    pub key: String,
    pub value: String,
}

impl std::str::FromStr for KeyVal {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (k, v) = s
            .split_once('=')
            .ok_or_else(|| anyhow!("expected KEY=VALUE, got: {s}"))?;
        Ok(Self {
            key: k.trim().to_string(),
            value: v.trim().to_string(),
        })
    }
}

#[derive(Parser, Debug, Clone)]
#[command(
    name = "lifegrid",
    version,
    about = "Lifegrid: weekly activities across life domains",
    disable_help_subcommand = true
)]
pub struct GlobalCli {
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[arg(short = 'q', long = "quiet", action = ArgAction::Count, global = true)]
    pub quiet: u8,

    #[arg(
        long = "rc",
        value_parser = clap::builder::ValueParser::new(|s: &str| s.parse::<KeyVal>()),
        action = ArgAction::Append,
        global = true
    )]
    pub rc_overrides: Vec<KeyVal>,

    #[arg(long = "lifegridrc", global = true)]
    pub lifegridrc: Option<PathBuf>,

    #[arg(long = "data", global = true)]
    pub data: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Show the domain × week grid.
    Grid(WeekArgs),
    /// Add an activity to a domain.
    Add(AddArgs),
    /// Change fields of an existing activity.
    Edit(EditArgs),
    /// Remove an activity.
    Delete {
        /// Activity id or a unique prefix of it.
        id: String,
    },
    /// List the life domains.
    Domains,
    /// Print every activity as JSON.
    Export,
    /// Print the effective configuration.
    Show,
}

#[derive(Args, Debug, Clone, Default)]
pub struct WeekArgs {
    /// Any date inside the wanted week (YYYY-MM-DD).
    #[arg(long, conflicts_with = "week")]
    pub date: Option<NaiveDate>,

    /// ISO week, e.g. 2024-W03.
    #[arg(long)]
    pub week: Option<WeekKey>,
}

impl WeekArgs {
    pub fn resolve(&self, today: NaiveDate) -> anyhow::Result<WeekSelection> {
        let selection = match self.week {
            Some(week) => WeekSelection::for_week(week)
                .ok_or_else(|| anyhow!("week does not exist: {week}"))?,
            None => WeekSelection::new(self.date.unwrap_or(today)),
        };
        if !selection.is_bounded() {
            return Err(anyhow!(
                "week {} runs past the supported calendar range",
                selection.key()
            ));
        }
        Ok(selection)
    }
}

#[derive(Args, Debug, Clone)]
pub struct AddArgs {
    #[arg(long, short = 'd')]
    pub domain: String,

    #[arg(long, short = 't')]
    pub title: String,

    #[arg(long, default_value = "")]
    pub description: String,

    #[command(flatten)]
    pub week: WeekArgs,
}

#[derive(Args, Debug, Clone)]
pub struct EditArgs {
    /// Activity id or a unique prefix of it.
    pub id: String,

    #[arg(long, short = 't')]
    pub title: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long, conflicts_with = "undone")]
    pub done: bool,

    #[arg(long)]
    pub undone: bool,
}

pub fn init_tracing(verbose: u8, quiet: u8) -> anyhow::Result<()> {
    let default_level = if quiet >= 2 {
        "error"
    } else if quiet == 1 {
        "warn"
    } else if verbose >= 3 {
        "trace"
    } else if verbose == 2 {
        "debug"
    } else if verbose == 1 {
        "info"
    } else {
        "warn"
    };

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| anyhow!("invalid RUST_LOG / log filter: {e}"))?;

    let init_result = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init();

    if let Err(err) = init_result {
        debug!(error = %err, "tracing subscriber already set, continuing");
    }

    Ok(())
}

/// Picks the command to run when none was given on the command line.
pub fn default_command(cfg: &Config) -> anyhow::Result<Command> {
    let name = cfg.default_command();
    debug!(command = %name, "no explicit command, using default");

    match name {
        "grid" => Ok(Command::Grid(WeekArgs::default())),
        "domains" => Ok(Command::Domains),
        "export" => Ok(Command::Export),
        "show" => Ok(Command::Show),
        other => Err(anyhow!("unsupported default.command: {other}")),
    }
}
