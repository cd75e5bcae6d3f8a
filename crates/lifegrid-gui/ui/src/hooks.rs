use chrono::NaiveDate;
use lifegrid_shared::{
  WeekKey,
  WeekSelection
};
use yew::{
  Callback,
  UseStateHandle,
  hook,
  use_state
};

/// The week cursor shared by the week
/// selector and the grid.
#[derive(Clone)]
pub struct WeekSelectionHandle {
  selection: UseStateHandle<WeekSelection>
}

impl WeekSelectionHandle {
  pub fn selection(&self) -> WeekSelection {
    *self.selection
  }

  pub fn key(&self) -> WeekKey {
    self.selection.key()
  }

  pub fn change_week(
    &self
  ) -> Callback<NaiveDate> {
    let selection = self.selection.clone();
    Callback::from(
      move |date: NaiveDate| {
        let mut next = *selection;
        next.change_week(date);
        tracing::debug!(
          week = %next.key(),
          "changed selected week"
        );
        selection.set(next);
      }
    )
  }
}

#[hook]
pub fn use_week_selection()
-> WeekSelectionHandle {
  let selection =
    use_state(WeekSelection::today);
  WeekSelectionHandle { selection }
}
