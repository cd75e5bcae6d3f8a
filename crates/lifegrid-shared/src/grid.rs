use tracing::{
  debug,
  trace
};

use crate::activity::{
  Activity,
  ActivityDraft,
  ActivityHandlers
};
use crate::domain::{
  Domain,
  find_domain
};
use crate::week::WeekKey;

/// Activities of one domain for one week,
/// in the order they appear in
/// `activities`.
pub fn activities_for_domain<'a>(
  activities: &'a [Activity],
  domain_id: &str,
  week: WeekKey
) -> Vec<&'a Activity> {
  activities
    .iter()
    .filter(|activity| {
      activity.is_in_cell(domain_id, week)
    })
    .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridColumn<'a> {
  pub domain:     &'a Domain,
  pub activities: Vec<&'a Activity>
}

impl GridColumn<'_> {
  pub fn is_empty(&self) -> bool {
    self.activities.is_empty()
  }
}

/// One column per domain, in registry
/// order, whether or not it has any
/// activities this week.
pub fn build_grid<'a>(
  domains: &'a [Domain],
  activities: &'a [Activity],
  week: WeekKey
) -> Vec<GridColumn<'a>> {
  let columns: Vec<GridColumn<'a>> =
    domains
      .iter()
      .map(|domain| GridColumn {
        domain,
        activities: activities_for_domain(
          activities, domain.id, week
        )
      })
      .collect();

  trace!(
    %week,
    columns = columns.len(),
    visible = columns
      .iter()
      .map(|column| column.activities.len())
      .sum::<usize>(),
    "built domain grid"
  );
  columns
}

#[derive(
  Debug,
  Clone,
  Default,
  PartialEq,
  Eq,
)]
pub enum AddModal {
  #[default]
  Closed,
  Open(String)
}

impl AddModal {
  pub fn is_open(&self) -> bool {
    matches!(self, Self::Open(_))
  }

  pub fn domain_id(&self) -> Option<&str> {
    match self {
      | Self::Open(domain_id) => {
        Some(domain_id.as_str())
      }
      | Self::Closed => None
    }
  }

  pub fn domain(
    &self
  ) -> Option<&'static Domain> {
    self.domain_id().and_then(find_domain)
  }

  pub fn open(
    &mut self,
    domain_id: impl Into<String>
  ) {
    let domain_id = domain_id.into();
    debug!(domain = %domain_id, "opening add-activity modal");
    *self = Self::Open(domain_id);
  }

  pub fn close(&mut self) {
    debug!("closing add-activity modal");
    *self = Self::Closed;
  }

  /// Sends `draft` to `handlers` bound to
  /// the open domain and `week`. The modal
  /// stays open so several activities can
  /// be entered in a row. Returns whether
  /// anything was sent.
  pub fn submit<H>(
    &self,
    draft: ActivityDraft,
    week: WeekKey,
    handlers: &mut H
  ) -> bool
  where
    H: ActivityHandlers + ?Sized
  {
    let Self::Open(domain_id) = self else {
      debug!("add submitted with no domain selected; ignoring");
      return false;
    };

    handlers.add_activity(
      draft.into_new_activity(domain_id, week)
    );
    true
  }
}

#[derive(
  Debug,
  Clone,
  Default,
  PartialEq,
  Eq,
)]
pub struct HoverState {
  hovered: Option<String>
}

impl HoverState {
  pub fn hovered(&self) -> Option<&str> {
    self.hovered.as_deref()
  }

  pub fn enter(
    &mut self,
    domain_id: impl Into<String>
  ) {
    self.hovered = Some(domain_id.into());
  }

  pub fn leave(&mut self) {
    self.hovered = None;
  }

  /// A column is dimmed while another
  /// column is hovered, unless the add
  /// modal is open.
  pub fn is_dimmed(
    &self,
    domain_id: &str,
    modal: &AddModal
  ) -> bool {
    match self.hovered.as_deref() {
      | Some(hovered) => {
        hovered != domain_id
          && !modal.is_open()
      }
      | None => false
    }
  }
}

#[cfg(test)]
mod tests {
  use chrono::Utc;
  use uuid::Uuid;

  use super::*;
  use crate::activity::{
    ActivityLog,
    ActivityPatch,
    NewActivity
  };
  use crate::domain::LIFE_DOMAINS;

  fn activity(
    id: u128,
    domain_id: &str,
    week_number: u32,
    year: i32
  ) -> Activity {
    Activity {
      id: Uuid::from_u128(id),
      domain_id: domain_id.to_string(),
      week_number,
      year,
      created_at: Utc::now(),
      modified_at: None,
      title: format!("activity {id}"),
      description: String::new(),
      completed: false
    }
  }

  #[derive(Default)]
  struct RecordingHandlers {
    added:   Vec<NewActivity>,
    edited:  Vec<(Uuid, ActivityPatch)>,
    deleted: Vec<Uuid>
  }

  impl ActivityHandlers for RecordingHandlers {
    fn add_activity(
      &mut self,
      activity: NewActivity
    ) {
      self.added.push(activity);
    }

    fn edit_activity(
      &mut self,
      id: Uuid,
      patch: ActivityPatch
    ) {
      self.edited.push((id, patch));
    }

    fn delete_activity(
      &mut self,
      id: Uuid
    ) {
      self.deleted.push(id);
    }
  }

  fn column_sizes(
    activities: &[Activity],
    week: WeekKey
  ) -> Vec<(&'static str, usize)> {
    build_grid(LIFE_DOMAINS, activities, week)
      .iter()
      .map(|column| {
        (column.domain.id, column.activities.len())
      })
      .collect()
  }

  #[test]
  fn matching_week_shows_one_health_card() {
    let activities =
      vec![activity(1, "health", 3, 2024)];

    for (domain_id, count) in
      column_sizes(&activities, WeekKey::new(3, 2024))
    {
      let expected =
        usize::from(domain_id == "health");
      assert_eq!(count, expected, "{domain_id}");
    }
  }

  #[test]
  fn other_week_shows_nothing() {
    let activities =
      vec![activity(1, "health", 3, 2024)];

    assert!(
      column_sizes(&activities, WeekKey::new(4, 2024))
        .iter()
        .all(|(_, count)| *count == 0)
    );
    assert!(
      column_sizes(&activities, WeekKey::new(3, 2023))
        .iter()
        .all(|(_, count)| *count == 0)
    );
  }

  #[test]
  fn every_domain_gets_a_column_even_when_empty()
  {
    let grid = build_grid(
      LIFE_DOMAINS,
      &[],
      WeekKey::new(1, 2024)
    );

    assert_eq!(grid.len(), LIFE_DOMAINS.len());
    assert!(grid.iter().all(|c| c.is_empty()));
    let ids: Vec<&str> =
      grid.iter().map(|c| c.domain.id).collect();
    let registry: Vec<&str> =
      LIFE_DOMAINS.iter().map(|d| d.id).collect();
    assert_eq!(ids, registry);
  }

  #[test]
  fn each_activity_lands_in_at_most_one_cell() {
    let week = WeekKey::new(10, 2024);
    let activities = vec![
      activity(1, "health", 10, 2024),
      activity(2, "career", 10, 2024),
      activity(3, "career", 11, 2024),
      activity(4, "unknown", 10, 2024),
      activity(5, "family", 10, 2023),
    ];

    let grid =
      build_grid(LIFE_DOMAINS, &activities, week);
    for candidate in &activities {
      let hits = grid
        .iter()
        .filter(|column| {
          column
            .activities
            .iter()
            .any(|a| a.id == candidate.id)
        })
        .count();
      let expected = usize::from(
        candidate.week() == week
          && find_domain(&candidate.domain_id)
            .is_some()
      );
      assert_eq!(hits, expected, "{}", candidate.id);
    }
  }

  #[test]
  fn column_order_follows_input_order() {
    let activities = vec![
      activity(3, "career", 5, 2024),
      activity(1, "career", 5, 2024),
      activity(2, "career", 5, 2024),
    ];

    let ids: Vec<u128> = activities_for_domain(
      &activities,
      "career",
      WeekKey::new(5, 2024)
    )
    .iter()
    .map(|a| a.id.as_u128())
    .collect();
    assert_eq!(ids, vec![3, 1, 2]);
  }

  #[test]
  fn modal_opens_and_closes() {
    let mut modal = AddModal::default();
    assert_eq!(modal, AddModal::Closed);

    modal.open("career");
    assert_eq!(
      modal,
      AddModal::Open("career".to_string())
    );
    assert_eq!(
      modal.domain().map(|d| d.name),
      Some("Career")
    );

    modal.open("health");
    assert_eq!(modal.domain_id(), Some("health"));

    modal.close();
    assert!(!modal.is_open());
  }

  #[test]
  fn submit_injects_domain_and_week_and_stays_open()
  {
    let mut modal = AddModal::default();
    modal.open("career");
    let mut handlers =
      RecordingHandlers::default();
    let week = WeekKey::new(12, 2024);

    let sent = modal.submit(
      ActivityDraft::titled("Run 5k"),
      week,
      &mut handlers
    );

    assert!(sent);
    assert_eq!(
      handlers.added,
      vec![NewActivity {
        title:       "Run 5k".to_string(),
        description: String::new(),
        domain_id:   "career".to_string(),
        week_number: 12,
        year:        2024
      }]
    );
    assert_eq!(modal.domain_id(), Some("career"));
    assert!(handlers.edited.is_empty());
    assert!(handlers.deleted.is_empty());
  }

  #[test]
  fn submit_while_closed_is_a_no_op() {
    let modal = AddModal::Closed;
    let mut handlers =
      RecordingHandlers::default();

    let sent = modal.submit(
      ActivityDraft::titled("ignored"),
      WeekKey::new(1, 2024),
      &mut handlers
    );

    assert!(!sent);
    assert!(handlers.added.is_empty());
  }

  #[test]
  fn repeated_submits_reach_the_owning_log() {
    let mut modal = AddModal::default();
    modal.open("finance");
    let mut log = ActivityLog::new();
    let week = WeekKey::new(2, 2025);

    modal.submit(ActivityDraft::titled("budget"), week, &mut log);
    modal.submit(ActivityDraft::titled("invest"), week, &mut log);

    let column = activities_for_domain(
      log.activities(),
      "finance",
      week
    );
    assert_eq!(column.len(), 2);
    assert!(modal.is_open());
  }

  #[test]
  fn hover_dims_other_columns_only_while_modal_closed()
  {
    let mut hover = HoverState::default();
    let mut modal = AddModal::default();
    assert!(!hover.is_dimmed("health", &modal));

    hover.enter("career");
    assert!(hover.is_dimmed("health", &modal));
    assert!(!hover.is_dimmed("career", &modal));

    modal.open("family");
    assert!(!hover.is_dimmed("health", &modal));

    modal.close();
    hover.leave();
    assert!(!hover.is_dimmed("health", &modal));
    assert_eq!(hover.hovered(), None);
  }

  #[test]
  fn hover_never_changes_the_grid() {
    let activities = vec![
      activity(1, "health", 3, 2024),
      activity(2, "career", 3, 2024),
    ];
    let week = WeekKey::new(3, 2024);
    let before =
      column_sizes(&activities, week);

    let mut hover = HoverState::default();
    hover.enter("health");

    assert_eq!(column_sizes(&activities, week), before);
  }
}
