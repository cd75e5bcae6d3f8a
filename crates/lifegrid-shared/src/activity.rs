use chrono::{
  DateTime,
  Utc
};
use serde::{
  Deserialize,
  Serialize
};
use tracing::{
  debug,
  warn
};
use uuid::Uuid;

use crate::week::WeekKey;

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
)]
pub struct Activity {
  pub id:          Uuid,
  pub domain_id:   String,
  pub week_number: u32,
  pub year:        i32,
  pub created_at:  DateTime<Utc>,
  #[serde(default)]
  pub modified_at: Option<DateTime<Utc>>,
  pub title:       String,
  #[serde(default)]
  pub description: String,
  #[serde(default)]
  pub completed:   bool
}

impl Activity {
  pub fn week(&self) -> WeekKey {
    WeekKey::new(
      self.week_number,
      self.year
    )
  }

  /// True when this activity belongs in
  /// the cell addressed by `domain_id`
  /// and `week`.
  pub fn is_in_cell(
    &self,
    domain_id: &str,
    week: WeekKey
  ) -> bool {
    self.domain_id == domain_id
      && self.week_number
        == week.week_number
      && self.year == week.year
  }
}

/// What the activity form produces: an
/// activity minus its id and timestamps.
/// `domain_id` is `None` when the form
/// was opened with the domain fixed.
#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  Default,
  PartialEq,
)]
pub struct ActivityDraft {
  pub title:       String,
  #[serde(default)]
  pub description: String,
  pub domain_id:   Option<String>,
  pub week_number: u32,
  pub year:        i32
}

impl ActivityDraft {
  pub fn titled(
    title: impl Into<String>
  ) -> Self {
    Self {
      title: title.into(),
      ..Self::default()
    }
  }

  /// Resolves the draft into a
  /// `NewActivity`, with `domain_id` and
  /// `week` overriding whatever the draft
  /// carried.
  pub fn into_new_activity(
    self,
    domain_id: &str,
    week: WeekKey
  ) -> NewActivity {
    NewActivity {
      title:       self.title,
      description: self.description,
      domain_id:   domain_id.to_string(),
      week_number: week.week_number,
      year:        week.year
    }
  }
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct NewActivity {
  pub title:       String,
  #[serde(default)]
  pub description: String,
  pub domain_id:   String,
  pub week_number: u32,
  pub year:        i32
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  Default,
  PartialEq,
  Eq,
)]
pub struct ActivityPatch {
  pub title:       Option<String>,
  pub description: Option<String>,
  pub completed:   Option<bool>,
  pub domain_id:   Option<String>,
  pub week_number: Option<u32>,
  pub year:        Option<i32>
}

impl ActivityPatch {
  pub fn is_empty(&self) -> bool {
    self == &Self::default()
  }
}

/// The mutation requests the grid makes
/// of whoever owns the activity list.
pub trait ActivityHandlers {
  fn add_activity(
    &mut self,
    activity: NewActivity
  );

  fn edit_activity(
    &mut self,
    id: Uuid,
    patch: ActivityPatch
  );

  fn delete_activity(
    &mut self,
    id: Uuid
  );
}

#[derive(
  Debug,
  Clone,
  Default,
  Serialize,
  Deserialize,
  PartialEq,
)]
#[serde(transparent)]
pub struct ActivityLog {
  activities: Vec<Activity>
}

impl ActivityLog {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn activities(&self) -> &[Activity] {
    &self.activities
  }

  pub fn into_vec(self) -> Vec<Activity> {
    self.activities
  }

  pub fn len(&self) -> usize {
    self.activities.len()
  }

  pub fn is_empty(&self) -> bool {
    self.activities.is_empty()
  }

  pub fn get(
    &self,
    id: Uuid
  ) -> Option<&Activity> {
    self
      .activities
      .iter()
      .find(|activity| activity.id == id)
  }

  /// Looks an activity up by a prefix of
  /// its id. `None` when nothing or more
  /// than one activity matches.
  pub fn find_by_prefix(
    &self,
    prefix: &str
  ) -> Option<&Activity> {
    let prefix =
      prefix.trim().to_ascii_lowercase();
    if prefix.is_empty() {
      return None;
    }

    let mut matches =
      self.activities.iter().filter(
        |activity| {
          activity
            .id
            .to_string()
            .starts_with(&prefix)
        }
      );
    let first = matches.next()?;
    if matches.next().is_some() {
      return None;
    }
    Some(first)
  }

  pub fn add(
    &mut self,
    new: NewActivity,
    now: DateTime<Utc>
  ) -> &Activity {
    let activity = Activity {
      id:          Uuid::new_v4(),
      domain_id:   new.domain_id,
      week_number: new.week_number,
      year:        new.year,
      created_at:  now,
      modified_at: None,
      title:       new.title,
      description: new.description,
      completed:   false
    };
    debug!(
      id = %activity.id,
      domain = %activity.domain_id,
      week = %activity.week(),
      "added activity"
    );
    let idx = self.activities.len();
    self.activities.push(activity);
    &self.activities[idx]
  }

  pub fn edit(
    &mut self,
    id: Uuid,
    patch: ActivityPatch,
    now: DateTime<Utc>
  ) -> bool {
    let Some(activity) = self
      .activities
      .iter_mut()
      .find(|activity| activity.id == id)
    else {
      warn!(%id, "edit requested for unknown activity");
      return false;
    };

    if let Some(title) = patch.title {
      activity.title = title;
    }
    if let Some(description) =
      patch.description
    {
      activity.description = description;
    }
    if let Some(completed) =
      patch.completed
    {
      activity.completed = completed;
    }
    if let Some(domain_id) =
      patch.domain_id
    {
      activity.domain_id = domain_id;
    }
    if let Some(week_number) =
      patch.week_number
    {
      activity.week_number = week_number;
    }
    if let Some(year) = patch.year {
      activity.year = year;
    }
    activity.modified_at = Some(now);
    debug!(%id, "edited activity");
    true
  }

  pub fn delete(
    &mut self,
    id: Uuid
  ) -> bool {
    let before = self.activities.len();
    self
      .activities
      .retain(|activity| activity.id != id);
    let removed =
      self.activities.len() != before;
    if removed {
      debug!(%id, "deleted activity");
    } else {
      warn!(%id, "delete requested for unknown activity");
    }
    removed
  }
}

impl From<Vec<Activity>> for ActivityLog {
  fn from(
    activities: Vec<Activity>
  ) -> Self {
    Self { activities }
  }
}

impl ActivityHandlers for ActivityLog {
  fn add_activity(
    &mut self,
    activity: NewActivity
  ) {
    self.add(activity, Utc::now());
  }

  fn edit_activity(
    &mut self,
    id: Uuid,
    patch: ActivityPatch
  ) {
    self.edit(id, patch, Utc::now());
  }

  fn delete_activity(
    &mut self,
    id: Uuid
  ) {
    self.delete(id);
  }
}
