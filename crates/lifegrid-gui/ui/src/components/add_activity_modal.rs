use lifegrid_shared::{
  ActivityDraft,
  AddModal,
  WeekKey
};
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

use super::ActivityForm;

#[derive(Properties, PartialEq)]
pub struct AddActivityModalProps {
  pub modal:     AddModal,
  pub week:      WeekKey,
  pub on_close:  Callback<()>,
  pub on_submit: Callback<ActivityDraft>
}

/// Overlay for adding activities to one
/// domain. Only the close button
/// dismisses it; submitting keeps it open.
#[function_component(AddActivityModal)]
pub fn add_activity_modal(
  props: &AddActivityModalProps
) -> Html {
  let Some(domain_id) =
    props.modal.domain_id()
  else {
    return html! {};
  };

  let heading = props
    .modal
    .domain()
    .map(|domain| {
      format!(
        "Add activity: {} {}",
        domain.icon.glyph(),
        domain.name
      )
    })
    .unwrap_or_else(|| {
      format!("Add activity: {domain_id}")
    });

  let on_close_click = {
    let on_close = props.on_close.clone();
    Callback::from(move |_| {
      on_close.emit(());
    })
  };

  html! {
      <div class="modal-backdrop">
          <div class="modal">
              <button
                  type="button"
                  class="btn modal-close"
                  title="Close"
                  onclick={on_close_click}
              >
                  { "✕" }
              </button>
              <div class="header">{ heading }</div>
              <div class="week-hint">{ props.week.to_string() }</div>
              <ActivityForm
                  key={domain_id.to_string()}
                  on_submit={props.on_submit.clone()}
                  initial_domain_id={Some(domain_id.to_string())}
                  hide_domain_select={true}
                  week={props.week}
              />
          </div>
      </div>
  }
}
