use lifegrid_shared::{
  Activity,
  ActivityDraft,
  ActivityHandlers,
  ActivityPatch,
  AddModal,
  HoverState,
  LIFE_DOMAINS,
  NewActivity,
  build_grid
};
use uuid::Uuid;
use yew::{
  Callback,
  Html,
  Properties,
  classes,
  function_component,
  html,
  use_state
};

use super::{
  ActivityCard,
  AddActivityModal,
  WeekSelector
};
use crate::app::ui_debug;
use crate::hooks::use_week_selection;

#[derive(Properties, PartialEq)]
pub struct DomainGridProps {
  /// Every activity the owner holds; the
  /// grid does its own week filtering.
  pub activities:         Vec<Activity>,
  pub on_add_activity:
    Callback<NewActivity>,
  pub on_edit_activity:
    Callback<(Uuid, ActivityPatch)>,
  pub on_delete_activity: Callback<Uuid>
}

/// Forwards grid mutation requests to the
/// owner's callbacks.
#[derive(Clone)]
struct GridCallbacks {
  on_add:    Callback<NewActivity>,
  on_edit:   Callback<(Uuid, ActivityPatch)>,
  on_delete: Callback<Uuid>
}

impl From<&DomainGridProps> for GridCallbacks {
  fn from(props: &DomainGridProps) -> Self {
    Self {
      on_add:    props.on_add_activity.clone(),
      on_edit:   props.on_edit_activity.clone(),
      on_delete: props
        .on_delete_activity
        .clone()
    }
  }
}

impl ActivityHandlers for GridCallbacks {
  fn add_activity(
    &mut self,
    activity: NewActivity
  ) {
    self.on_add.emit(activity);
  }

  fn edit_activity(
    &mut self,
    id: Uuid,
    patch: ActivityPatch
  ) {
    self.on_edit.emit((id, patch));
  }

  fn delete_activity(
    &mut self,
    id: Uuid
  ) {
    self.on_delete.emit(id);
  }
}

#[function_component(DomainGrid)]
pub fn domain_grid(
  props: &DomainGridProps
) -> Html {
  let week_selection =
    use_week_selection();
  let modal = use_state(AddModal::default);
  let hover =
    use_state(HoverState::default);
  let week = week_selection.key();

  let on_modal_close = {
    let modal = modal.clone();
    Callback::from(move |()| {
      let mut next = (*modal).clone();
      next.close();
      modal.set(next);
    })
  };

  let on_modal_submit = {
    let modal = modal.clone();
    let callbacks = GridCallbacks::from(props);
    Callback::from(
      move |draft: ActivityDraft| {
        let sent = modal.submit(
          draft,
          week,
          &mut callbacks.clone()
        );
        ui_debug(
          "modal.submit",
          if sent {
            "activity sent to owner"
          } else {
            "no domain selected"
          }
        );
      }
    )
  };

  let columns = build_grid(
    LIFE_DOMAINS,
    &props.activities,
    week
  );

  html! {
      <div class="domain-grid">
          <WeekSelector
              selection={week_selection.selection()}
              on_week_change={week_selection.change_week()}
          />

          <AddActivityModal
              modal={(*modal).clone()}
              week={week}
              on_close={on_modal_close}
              on_submit={on_modal_submit}
          />

          <div class="grid-scroll">
              <table class="grid-table">
                  <thead>
                      <tr>
                          {
                              for columns.iter().map(|column| {
                                  let domain = column.domain;
                                  let domain_id = domain.id;
                                  let dimmed = hover.is_dimmed(domain_id, &modal);
                                  let on_enter = {
                                      let hover = hover.clone();
                                      Callback::from(move |_| {
                                          let mut next = (*hover).clone();
                                          next.enter(domain_id);
                                          hover.set(next);
                                      })
                                  };
                                  let on_leave = {
                                      let hover = hover.clone();
                                      Callback::from(move |_| {
                                          let mut next = (*hover).clone();
                                          next.leave();
                                          hover.set(next);
                                      })
                                  };
                                  let on_add_click = {
                                      let modal = modal.clone();
                                      Callback::from(move |_| {
                                          let mut next = (*modal).clone();
                                          next.open(domain_id);
                                          modal.set(next);
                                      })
                                  };
                                  html! {
                                      <th
                                          key={domain_id}
                                          class={classes!(dimmed.then_some("dimmed"))}
                                          onmouseenter={on_enter}
                                          onmouseleave={on_leave}
                                      >
                                          <div class="grid-column-header">
                                              <button
                                                  type="button"
                                                  class="btn"
                                                  title={format!("Add to {}", domain.name)}
                                                  onclick={on_add_click}
                                              >
                                                  { "+" }
                                              </button>
                                              <div class="grid-domain-name">
                                                  <span>{ domain.name }</span>
                                                  <span class="grid-domain-icon">{ domain.icon.glyph() }</span>
                                              </div>
                                          </div>
                                      </th>
                                  }
                              })
                          }
                      </tr>
                  </thead>
                  <tbody>
                      <tr>
                          {
                              for columns.iter().map(|column| {
                                  let domain = column.domain;
                                  let domain_id = domain.id;
                                  let dimmed = hover.is_dimmed(domain_id, &modal);
                                  let on_enter = {
                                      let hover = hover.clone();
                                      Callback::from(move |_| {
                                          let mut next = (*hover).clone();
                                          next.enter(domain_id);
                                          hover.set(next);
                                      })
                                  };
                                  let on_leave = {
                                      let hover = hover.clone();
                                      Callback::from(move |_| {
                                          let mut next = (*hover).clone();
                                          next.leave();
                                          hover.set(next);
                                      })
                                  };
                                  html! {
                                      <td
                                          key={domain_id}
                                          class={classes!(dimmed.then_some("dimmed"))}
                                          onmouseenter={on_enter}
                                          onmouseleave={on_leave}
                                      >
                                          <div class="grid-cell-body">
                                              {
                                                  for column.activities.iter().map(|activity| html! {
                                                      <ActivityCard
                                                          key={activity.id.to_string()}
                                                          activity={(*activity).clone()}
                                                          on_edit={props.on_edit_activity.clone()}
                                                          on_delete={props.on_delete_activity.clone()}
                                                      />
                                                  })
                                              }
                                          </div>
                                      </td>
                                  }
                              })
                          }
                      </tr>
                  </tbody>
              </table>
          </div>
      </div>
  }
}
