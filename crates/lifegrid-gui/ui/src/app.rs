use gloo::console::log;
use lifegrid_shared::{
  ActivityHandlers,
  ActivityLog,
  ActivityPatch,
  NewActivity
};
use uuid::Uuid;
use yew::{
  Callback,
  Html,
  function_component,
  html,
  use_effect_with,
  use_state
};

use crate::components::DomainGrid;

mod storage;

use storage::{
  load_activities,
  save_activities
};

/// Owns the activity list and hands the
/// grid read-only data plus mutation
/// callbacks.
#[function_component(App)]
pub fn app() -> Html {
  let activities =
    use_state(load_activities);
  // Storage is only written after the
  // first mutation, so a log that failed
  // to load is never replaced on mount.
  let dirty = use_state(|| false);

  {
    use_effect_with((), move |_| {
      ui_debug(
        "app.mounted",
        "frontend mounted and hooks \
         initialized"
      );
      || ()
    });
  }

  {
    use_effect_with(
      ((*activities).clone(), *dirty),
      move |(log, dirty): &(
        ActivityLog,
        bool
      )| {
        if *dirty {
          save_activities(log);
          tracing::debug!(
            count = log.len(),
            "persisted activities"
          );
        }
        || ()
      }
    );
  }

  let on_add_activity = {
    let activities = activities.clone();
    let dirty = dirty.clone();
    Callback::from(
      move |new: NewActivity| {
        let mut next =
          (*activities).clone();
        next.add_activity(new);
        activities.set(next);
        dirty.set(true);
      }
    )
  };

  let on_edit_activity = {
    let activities = activities.clone();
    let dirty = dirty.clone();
    Callback::from(
      move |(id, patch): (
        Uuid,
        ActivityPatch
      )| {
        let mut next =
          (*activities).clone();
        next.edit_activity(id, patch);
        activities.set(next);
        dirty.set(true);
      }
    )
  };

  let on_delete_activity = {
    let activities = activities.clone();
    let dirty = dirty.clone();
    Callback::from(move |id: Uuid| {
      let mut next =
        (*activities).clone();
      next.delete_activity(id);
      activities.set(next);
      dirty.set(true);
    })
  };

  html! {
      <div class="app-shell">
          <DomainGrid
              activities={activities.activities().to_vec()}
              on_add_activity={on_add_activity}
              on_edit_activity={on_edit_activity}
              on_delete_activity={on_delete_activity}
          />
      </div>
  }
}

pub(crate) fn ui_debug(
  event: &str,
  detail: &str
) {
  tracing::debug!(
    event, detail, "ui-debug"
  );
  log!(format!(
    "[ui-debug] {event}: {detail}"
  ));
}
