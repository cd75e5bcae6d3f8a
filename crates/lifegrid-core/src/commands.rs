use anyhow::{Context, anyhow};
use chrono::{DateTime, Local, Utc};
use lifegrid_shared::{ActivityPatch, LIFE_DOMAINS, NewActivity, find_domain};
use tracing::{debug, info, instrument};

use crate::cli::{AddArgs, Command, EditArgs, WeekArgs};
use crate::config::Config;
use crate::datastore::DataStore;
use crate::render::Renderer;

#[instrument(skip(store, cfg, renderer, command))]
pub fn dispatch(
    store: &mut DataStore,
    cfg: &Config,
    renderer: &mut Renderer,
    command: Command,
) -> anyhow::Result<()> {
    let now = Utc::now();
    debug!(?command, "dispatching command");

    match command {
        Command::Grid(args) => cmd_grid(store, renderer, &args),
        Command::Add(args) => cmd_add(store, renderer, args, now),
        Command::Edit(args) => cmd_edit(store, renderer, args, now),
        Command::Delete { id } => cmd_delete(store, &id),
        Command::Domains => renderer.print_domains(),
        Command::Export => cmd_export(store),
        Command::Show => cmd_show(cfg),
    }
}

#[instrument(skip(store, renderer, args))]
fn cmd_grid(store: &DataStore, renderer: &mut Renderer, args: &WeekArgs) -> anyhow::Result<()> {
    info!("command grid");

    let selection = args.resolve(Local::now().date_naive())?;
    let log = store.load_activities()?;
    renderer.print_grid(&selection, log.activities())
}

#[instrument(skip(store, renderer, args, now), fields(domain = %args.domain))]
fn cmd_add(
    store: &DataStore,
    renderer: &mut Renderer,
    args: AddArgs,
    now: DateTime<Utc>,
) -> anyhow::Result<()> {
    info!("command add");

    let domain = find_domain(args.domain.trim()).ok_or_else(|| {
        let known: Vec<&str> = LIFE_DOMAINS.iter().map(|domain| domain.id).collect();
        anyhow!(
            "unknown domain: {} (expected one of: {})",
            args.domain,
            known.join(", ")
        )
    })?;

    let title = args.title.trim().to_string();
    if title.is_empty() {
        return Err(anyhow!("activity title cannot be empty"));
    }

    let week = args.week.resolve(Local::now().date_naive())?.key();
    let added = store.add_activity(
        NewActivity {
            title,
            description: args.description.trim().to_string(),
            domain_id: domain.id.to_string(),
            week_number: week.week_number,
            year: week.year,
        },
        now,
    )?;

    debug!(id = %added.id, %week, "activity added");
    println!("Created activity {} in {} for {week}.", added.id, domain.name);
    renderer.print_activity(&added)
}

#[instrument(skip(store, renderer, args, now), fields(id = %args.id))]
fn cmd_edit(
    store: &DataStore,
    renderer: &mut Renderer,
    args: EditArgs,
    now: DateTime<Utc>,
) -> anyhow::Result<()> {
    info!("command edit");

    let log = store.load_activities()?;
    let id = store.resolve_id(&log, &args.id)?;

    if let Some(title) = args.title.as_deref()
        && title.trim().is_empty()
    {
        return Err(anyhow!("activity title cannot be empty"));
    }

    let completed = if args.done {
        Some(true)
    } else if args.undone {
        Some(false)
    } else {
        None
    };
    let patch = ActivityPatch {
        title: args.title.map(|title| title.trim().to_string()),
        description: args.description,
        completed,
        ..ActivityPatch::default()
    };
    if patch.is_empty() {
        return Err(anyhow!("edit requires at least one change"));
    }

    let edited = store.edit_activity(id, patch, now)?;
    println!("Modified activity {}.", edited.id);
    renderer.print_activity(&edited)
}

#[instrument(skip(store))]
fn cmd_delete(store: &DataStore, raw_id: &str) -> anyhow::Result<()> {
    info!("command delete");

    let log = store.load_activities()?;
    let id = store.resolve_id(&log, raw_id)?;
    store.delete_activity(id)?;
    println!("Deleted activity {id}.");
    Ok(())
}

#[instrument(skip(store))]
fn cmd_export(store: &DataStore) -> anyhow::Result<()> {
    info!("command export");

    let log = store.load_activities()?;
    let out = serde_json::to_string(&log).context("failed to serialize activities")?;
    println!("{out}");
    Ok(())
}

#[instrument(skip(cfg))]
fn cmd_show(cfg: &Config) -> anyhow::Result<()> {
    let mut entries: Vec<(&String, &String)> = cfg.iter().collect();
    entries.sort();
    for (key, value) in entries {
        println!("{key}={value}");
    }
    for file in &cfg.loaded_files {
        println!("# loaded {}", file.display());
    }
    Ok(())
}
