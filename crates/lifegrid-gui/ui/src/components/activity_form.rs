use lifegrid_shared::{
  ActivityDraft,
  LIFE_DOMAINS,
  WeekKey
};
use web_sys::{
  HtmlInputElement,
  HtmlSelectElement,
  HtmlTextAreaElement,
  InputEvent,
  SubmitEvent
};
use yew::{
  Callback,
  Html,
  Properties,
  TargetCast,
  function_component,
  html,
  use_state
};

#[derive(Properties, PartialEq)]
pub struct ActivityFormProps {
  pub on_submit:         Callback<ActivityDraft>,
  #[prop_or_default]
  pub initial_domain_id: Option<String>,
  #[prop_or_default]
  pub hide_domain_select: bool,
  pub week:              WeekKey
}

#[function_component(ActivityForm)]
pub fn activity_form(
  props: &ActivityFormProps
) -> Html {
  let title = use_state(String::new);
  let description = use_state(String::new);
  let domain_id = {
    let initial = props
      .initial_domain_id
      .clone()
      .or_else(|| {
        LIFE_DOMAINS
          .first()
          .map(|domain| domain.id.to_string())
      })
      .unwrap_or_default();
    use_state(move || initial)
  };
  let error = use_state(|| None::<String>);

  let on_title_input = {
    let title = title.clone();
    let error = error.clone();
    Callback::from(move |e: InputEvent| {
      let input: HtmlInputElement =
        e.target_unchecked_into();
      title.set(input.value());
      error.set(None);
    })
  };

  let on_description_input = {
    let description = description.clone();
    Callback::from(move |e: InputEvent| {
      let input: HtmlTextAreaElement =
        e.target_unchecked_into();
      description.set(input.value());
    })
  };

  let on_domain_change = {
    let domain_id = domain_id.clone();
    Callback::from(
      move |e: web_sys::Event| {
        let select: HtmlSelectElement =
          e.target_unchecked_into();
        domain_id.set(select.value());
      }
    )
  };

  let onsubmit = {
    let title = title.clone();
    let description = description.clone();
    let domain_id = domain_id.clone();
    let error = error.clone();
    let on_submit = props.on_submit.clone();
    let week = props.week;
    let hide_domain_select =
      props.hide_domain_select;
    Callback::from(
      move |e: SubmitEvent| {
        e.prevent_default();
        let trimmed = title.trim().to_string();
        if trimmed.is_empty() {
          error.set(Some(
            "Title is required".to_string()
          ));
          return;
        }

        on_submit.emit(ActivityDraft {
          title:       trimmed,
          description: description
            .trim()
            .to_string(),
          domain_id:   (!hide_domain_select)
            .then(|| (*domain_id).clone()),
          week_number: week.week_number,
          year:        week.year
        });
        title.set(String::new());
        description.set(String::new());
        error.set(None);
      }
    )
  };

  html! {
      <form class="activity-form" {onsubmit}>
          <div class="field">
              <label>{ "Title" }</label>
              <input
                  value={(*title).clone()}
                  oninput={on_title_input}
                  placeholder="What did you do?"
              />
          </div>
          <div class="field">
              <label>{ "Description" }</label>
              <textarea
                  value={(*description).clone()}
                  oninput={on_description_input}
                  rows="3"
              />
          </div>
          {
              if props.hide_domain_select {
                  html! {}
              } else {
                  html! {
                      <div class="field">
                          <label>{ "Domain" }</label>
                          <select onchange={on_domain_change}>
                              {
                                  for LIFE_DOMAINS.iter().map(|domain| html! {
                                      <option
                                          value={domain.id}
                                          selected={*domain_id == domain.id}
                                      >
                                          { format!("{} {}", domain.icon.glyph(), domain.name) }
                                      </option>
                                  })
                              }
                          </select>
                      </div>
                  }
              }
          }
          {
              if let Some(message) = (*error).clone() {
                  html! { <div class="form-error">{ message }</div> }
              } else {
                  html! {}
              }
          }
          <div class="footer">
              <button type="submit" class="btn">{ "Add activity" }</button>
          </div>
      </form>
  }
}
