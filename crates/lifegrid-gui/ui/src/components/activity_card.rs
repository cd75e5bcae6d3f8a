use lifegrid_shared::{
  Activity,
  ActivityPatch
};
use uuid::Uuid;
use web_sys::{
  HtmlInputElement,
  HtmlTextAreaElement,
  InputEvent
};
use yew::{
  Callback,
  Html,
  Properties,
  TargetCast,
  classes,
  function_component,
  html,
  use_state
};

#[derive(Properties, PartialEq)]
pub struct ActivityCardProps {
  pub activity:  Activity,
  pub on_edit:
    Callback<(Uuid, ActivityPatch)>,
  pub on_delete: Callback<Uuid>
}

#[function_component(ActivityCard)]
pub fn activity_card(
  props: &ActivityCardProps
) -> Html {
  let activity_id = props.activity.id;
  let editing = use_state(|| false);
  let draft_title = use_state(String::new);
  let draft_desc = use_state(String::new);

  let on_toggle_done = {
    let on_edit = props.on_edit.clone();
    let completed = props.activity.completed;
    Callback::from(move |_| {
      on_edit.emit((
        activity_id,
        ActivityPatch {
          completed: Some(!completed),
          ..ActivityPatch::default()
        }
      ));
    })
  };

  let on_start_edit = {
    let editing = editing.clone();
    let draft_title = draft_title.clone();
    let draft_desc = draft_desc.clone();
    let activity = props.activity.clone();
    Callback::from(move |_| {
      draft_title
        .set(activity.title.clone());
      draft_desc.set(
        activity.description.clone()
      );
      editing.set(true);
    })
  };

  let on_cancel_edit = {
    let editing = editing.clone();
    Callback::from(move |_| {
      editing.set(false);
    })
  };

  let on_save_edit = {
    let editing = editing.clone();
    let draft_title = draft_title.clone();
    let draft_desc = draft_desc.clone();
    let on_edit = props.on_edit.clone();
    Callback::from(move |_| {
      let title =
        draft_title.trim().to_string();
      if title.is_empty() {
        tracing::debug!(
          %activity_id,
          "refusing to save blank title"
        );
        return;
      }
      on_edit.emit((
        activity_id,
        ActivityPatch {
          title: Some(title),
          description: Some(
            draft_desc.trim().to_string()
          ),
          ..ActivityPatch::default()
        }
      ));
      editing.set(false);
    })
  };

  let on_delete_click = {
    let on_delete = props.on_delete.clone();
    Callback::from(move |_| {
      on_delete.emit(activity_id);
    })
  };

  let on_title_input = {
    let draft_title = draft_title.clone();
    Callback::from(move |e: InputEvent| {
      let input: HtmlInputElement =
        e.target_unchecked_into();
      draft_title.set(input.value());
    })
  };

  let on_desc_input = {
    let draft_desc = draft_desc.clone();
    Callback::from(move |e: InputEvent| {
      let input: HtmlTextAreaElement =
        e.target_unchecked_into();
      draft_desc.set(input.value());
    })
  };

  if *editing {
    return html! {
        <div class="activity-card editing">
            <input
                value={(*draft_title).clone()}
                oninput={on_title_input}
            />
            <textarea
                value={(*draft_desc).clone()}
                oninput={on_desc_input}
                rows="2"
            />
            <div class="activity-actions">
                <button type="button" class="btn" onclick={on_save_edit}>{ "Save" }</button>
                <button type="button" class="btn" onclick={on_cancel_edit}>{ "Cancel" }</button>
            </div>
        </div>
    };
  }

  html! {
      <div class={classes!("activity-card", props.activity.completed.then_some("completed"))}>
          <label class="activity-title">
              <input
                  type="checkbox"
                  checked={props.activity.completed}
                  onchange={on_toggle_done}
              />
              { &props.activity.title }
          </label>
          {
              if props.activity.description.trim().is_empty() {
                  html! {}
              } else {
                  html! { <div class="activity-description">{ &props.activity.description }</div> }
              }
          }
          <div class="activity-actions">
              <button type="button" class="btn" onclick={on_start_edit}>{ "Edit" }</button>
              <button type="button" class="btn" onclick={on_delete_click}>{ "Delete" }</button>
          </div>
      </div>
  }
}
