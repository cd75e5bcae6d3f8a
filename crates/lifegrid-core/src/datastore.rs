use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use chrono::{DateTime, Utc};
use lifegrid_shared::{Activity, ActivityLog, ActivityPatch, NewActivity};
use tempfile::NamedTempFile;
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Debug)]
pub struct DataStore {
    pub data_dir: PathBuf,
    pub activities_path: PathBuf,
}

impl DataStore {
    #[tracing::instrument(skip(data_dir))]
    pub fn open(data_dir: &Path) -> anyhow::Result<Self> {
        let data_dir = data_dir.to_path_buf();
        fs::create_dir_all(&data_dir)
            .with_context(|| format!("failed to create {}", data_dir.display()))?;

        let activities_path = data_dir.join("activities.data");
        if !activities_path.exists() {
            fs::write(&activities_path, "")
                .with_context(|| format!("failed to create {}", activities_path.display()))?;
        }

        info!(
            data_dir = %data_dir.display(),
            activities = %activities_path.display(),
            "opened datastore"
        );

        Ok(Self {
            data_dir,
            activities_path,
        })
    }

    #[tracing::instrument(skip(self))]
    pub fn load_activities(&self) -> anyhow::Result<ActivityLog> {
        load_jsonl(&self.activities_path)
            .map(ActivityLog::from)
            .context("failed to load activities.data")
    }

    #[tracing::instrument(skip(self, log), fields(count = log.len()))]
    pub fn save_activities(&self, log: &ActivityLog) -> anyhow::Result<()> {
        save_jsonl_atomic(&self.activities_path, log.activities())
            .context("failed to save activities.data")
    }

    #[tracing::instrument(skip(self, new, now), fields(domain = %new.domain_id))]
    pub fn add_activity(&self, new: NewActivity, now: DateTime<Utc>) -> anyhow::Result<Activity> {
        let mut log = self.load_activities()?;
        let added = log.add(new, now).clone();
        self.save_activities(&log)?;
        Ok(added)
    }

    #[tracing::instrument(skip(self, patch, now), fields(id = %id))]
    pub fn edit_activity(
        &self,
        id: Uuid,
        patch: ActivityPatch,
        now: DateTime<Utc>,
    ) -> anyhow::Result<Activity> {
        let mut log = self.load_activities()?;
        if !log.edit(id, patch, now) {
            return Err(anyhow!("activity not found: {id}"));
        }
        let edited = log
            .get(id)
            .cloned()
            .ok_or_else(|| anyhow!("activity vanished after edit: {id}"))?;
        self.save_activities(&log)?;
        Ok(edited)
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    pub fn delete_activity(&self, id: Uuid) -> anyhow::Result<()> {
        let mut log = self.load_activities()?;
        if !log.delete(id) {
            return Err(anyhow!("activity not found: {id}"));
        }
        self.save_activities(&log)
    }

    /// Resolves a full id or a unique prefix of one.
    pub fn resolve_id(&self, log: &ActivityLog, raw: &str) -> anyhow::Result<Uuid> {
        if let Ok(id) = Uuid::parse_str(raw.trim()) {
            return Ok(id);
        }
        log.find_by_prefix(raw)
            .map(|activity| activity.id)
            .ok_or_else(|| anyhow!("no unique activity matches id prefix: {raw}"))
    }
}

#[tracing::instrument(skip(path))]
fn load_jsonl(path: &Path) -> anyhow::Result<Vec<Activity>> {
    debug!(file = %path.display(), "loading jsonl");
    let file = fs::File::open(path)?;
    let reader = BufReader::new(file);

    let mut out = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let activity: Activity = serde_json::from_str(trimmed)
            .with_context(|| format!("failed parsing {} line {}", path.display(), idx + 1))?;
        out.push(activity);
    }

    debug!(count = out.len(), "loaded activities from jsonl");
    Ok(out)
}

#[tracing::instrument(skip(path, activities))]
fn save_jsonl_atomic(path: &Path, activities: &[Activity]) -> anyhow::Result<()> {
    debug!(file = %path.display(), count = activities.len(), "saving jsonl atomically");

    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut temp = NamedTempFile::new_in(dir)?;
    for activity in activities {
        let serialized = serde_json::to_string(activity)?;
        writeln!(temp, "{serialized}")?;
    }
    temp.flush()?;

    temp.persist(path)
        .map_err(|err| anyhow!("failed to persist {}: {}", path.display(), err))?;

    Ok(())
}
