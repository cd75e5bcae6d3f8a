use lifegrid_shared::ActivityLog;

const ACTIVITIES_STORAGE_KEY: &str =
  "lifegrid.activities";
const CORRUPT_BACKUP_KEY: &str =
  "lifegrid.activities.corrupt";

/// What was found under the activities
/// key at startup.
#[derive(Debug, PartialEq)]
pub(super) enum StoredActivities {
  Missing,
  Loaded(ActivityLog),
  /// The raw text could not be parsed and
  /// must be kept aside before anything
  /// overwrites it.
  Corrupt(String)
}

impl StoredActivities {
  pub(super) fn parse(
    raw: Option<String>
  ) -> Self {
    let Some(raw) = raw else {
      return Self::Missing;
    };
    match serde_json::from_str::<
      ActivityLog
    >(&raw)
    {
      | Ok(log) => Self::Loaded(log),
      | Err(error) => {
        tracing::error!(
          %error,
          "failed parsing activities \
           from local storage"
        );
        Self::Corrupt(raw)
      }
    }
  }
}

fn local_storage()
-> Option<web_sys::Storage> {
  web_sys::window().and_then(|window| {
    window.local_storage().ok().flatten()
  })
}

pub(super) fn load_activities()
-> ActivityLog {
  let stored =
    local_storage().and_then(|storage| {
      storage
        .get_item(
          ACTIVITIES_STORAGE_KEY
        )
        .ok()
        .flatten()
    });

  match StoredActivities::parse(stored) {
    | StoredActivities::Missing => {
      ActivityLog::new()
    }
    | StoredActivities::Loaded(log) => {
      tracing::info!(
        count = log.len(),
        "loaded activities from local \
         storage"
      );
      log
    }
    | StoredActivities::Corrupt(raw) => {
      backup_corrupt(&raw);
      ActivityLog::new()
    }
  }
}

fn backup_corrupt(raw: &str) {
  let Some(storage) = local_storage()
  else {
    return;
  };
  match storage
    .set_item(CORRUPT_BACKUP_KEY, raw)
  {
    | Ok(()) => {
      tracing::warn!(
        key = CORRUPT_BACKUP_KEY,
        bytes = raw.len(),
        "kept unreadable activities \
         aside; starting empty"
      );
    }
    | Err(error) => {
      tracing::error!(
        ?error,
        "failed backing up unreadable \
         activities"
      );
    }
  }
}

pub(super) fn save_activities(
  log: &ActivityLog
) {
  let Some(storage) = local_storage()
  else {
    tracing::warn!(
      "local storage unavailable; \
       activities kept in memory only"
    );
    return;
  };

  match serde_json::to_string(log) {
    | Ok(json) => {
      if let Err(error) = storage
        .set_item(
          ACTIVITIES_STORAGE_KEY,
          &json
        )
      {
        tracing::error!(
          ?error,
          "failed writing activities \
           to local storage"
        );
      }
    }
    | Err(error) => {
      tracing::error!(
        %error,
        "failed serializing activities"
      );
    }
  }
}
