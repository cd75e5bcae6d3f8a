use chrono::NaiveDate;
use lifegrid_shared::WeekSelection;
use web_sys::HtmlInputElement;
use yew::{
  Callback,
  Html,
  Properties,
  TargetCast,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct WeekSelectorProps {
  pub selection:      WeekSelection,
  pub on_week_change: Callback<NaiveDate>
}

#[function_component(WeekSelector)]
pub fn week_selector(
  props: &WeekSelectorProps
) -> Html {
  let selection = props.selection;

  let on_previous = {
    let on_week_change =
      props.on_week_change.clone();
    Callback::from(move |_| {
      if let Some(previous) =
        selection.previous_week()
      {
        on_week_change
          .emit(previous.selected_date());
      }
    })
  };

  let on_next = {
    let on_week_change =
      props.on_week_change.clone();
    Callback::from(move |_| {
      if let Some(next) = selection.next_week()
      {
        on_week_change
          .emit(next.selected_date());
      }
    })
  };

  let on_today = {
    let on_week_change =
      props.on_week_change.clone();
    Callback::from(move |_| {
      on_week_change.emit(
        WeekSelection::today()
          .selected_date()
      );
    })
  };

  let on_pick_date = {
    let on_week_change =
      props.on_week_change.clone();
    Callback::from(
      move |e: web_sys::Event| {
        let input: HtmlInputElement =
          e.target_unchecked_into();
        match NaiveDate::parse_from_str(
          &input.value(),
          "%Y-%m-%d"
        ) {
          | Ok(date) => {
            on_week_change.emit(date)
          }
          | Err(error) => {
            tracing::warn!(
              %error,
              raw = %input.value(),
              "ignoring unparsable week date"
            )
          }
        }
      }
    )
  };

  html! {
      <div class="week-selector">
          <button type="button" class="btn" onclick={on_previous}>{ "‹ Previous" }</button>
          <div class="week-label">{ selection.label() }</div>
          <input
              type="date"
              value={selection.selected_date().format("%Y-%m-%d").to_string()}
              onchange={on_pick_date}
          />
          <button type="button" class="btn" onclick={on_today}>{ "This week" }</button>
          <button type="button" class="btn" onclick={on_next}>{ "Next ›" }</button>
      </div>
  }
}
