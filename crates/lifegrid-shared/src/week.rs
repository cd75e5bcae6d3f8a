use std::fmt;
use std::str::FromStr;

use chrono::{
  Datelike,
  Days,
  Local,
  NaiveDate,
  Weekday
};
use serde::{
  Deserialize,
  Serialize
};

/// An ISO-8601 week address. `year` is
/// the ISO week-based year, which differs
/// from the calendar year for a few days
/// around New Year.
#[derive(
  Debug,
  Clone,
  Copy,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
)]
pub struct WeekKey {
  pub week_number: u32,
  pub year:        i32
}

impl WeekKey {
  pub fn new(
    week_number: u32,
    year: i32
  ) -> Self {
    Self { week_number, year }
  }

  pub fn from_date(
    date: NaiveDate
  ) -> Self {
    let iso = date.iso_week();
    Self {
      week_number: iso.week(),
      year:        iso.year()
    }
  }

  /// Monday of this week, or `None` for
  /// a week number the year doesn't have.
  pub fn monday(
    &self
  ) -> Option<NaiveDate> {
    NaiveDate::from_isoywd_opt(
      self.year,
      self.week_number,
      Weekday::Mon
    )
  }
}

impl fmt::Display for WeekKey {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    write!(
      f,
      "{}-W{:02}",
      self.year, self.week_number
    )
  }
}

impl FromStr for WeekKey {
  type Err = String;

  fn from_str(
    s: &str
  ) -> Result<Self, Self::Err> {
    let trimmed = s.trim();
    let (year, week) = trimmed
      .split_once(['W', 'w'])
      .ok_or_else(|| {
        format!(
          "expected YEAR-WNN, got: {s}"
        )
      })?;
    let year = year
      .trim_end_matches('-')
      .parse::<i32>()
      .map_err(|e| {
        format!("invalid year in {s}: {e}")
      })?;
    let week_number =
      week.parse::<u32>().map_err(|e| {
        format!("invalid week in {s}: {e}")
      })?;

    let key = Self::new(week_number, year);
    if key.monday().is_none() {
      return Err(format!(
        "{year} has no ISO week \
         {week_number}"
      ));
    }
    Ok(key)
  }
}

/// The week cursor: a selected date and
/// the ISO week it falls in.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub struct WeekSelection {
  selected_date: NaiveDate
}

impl WeekSelection {
  pub fn new(
    selected_date: NaiveDate
  ) -> Self {
    Self { selected_date }
  }

  pub fn today() -> Self {
    Self::new(Local::now().date_naive())
  }

  /// Selects the Monday of `key`, falling
  /// back to `None` when the week doesn't
  /// exist.
  pub fn for_week(
    key: WeekKey
  ) -> Option<Self> {
    key.monday().map(Self::new)
  }

  pub fn selected_date(&self) -> NaiveDate {
    self.selected_date
  }

  pub fn key(&self) -> WeekKey {
    WeekKey::from_date(self.selected_date)
  }

  pub fn week_number(&self) -> u32 {
    self.key().week_number
  }

  pub fn year(&self) -> i32 {
    self.key().year
  }

  pub fn change_week(
    &mut self,
    date: NaiveDate
  ) {
    self.selected_date = date;
  }

  /// The same weekday one week later.
  /// `None` past the end of the calendar.
  pub fn next_week(&self) -> Option<Self> {
    self
      .selected_date
      .checked_add_days(Days::new(7))
      .map(Self::new)
  }

  pub fn previous_week(
    &self
  ) -> Option<Self> {
    self
      .selected_date
      .checked_sub_days(Days::new(7))
      .map(Self::new)
  }

  pub fn week_start(
    &self
  ) -> Option<NaiveDate> {
    let offset = self
      .selected_date
      .weekday()
      .num_days_from_monday();
    self.selected_date.checked_sub_days(
      Days::new(u64::from(offset))
    )
  }

  pub fn week_end(&self) -> Option<NaiveDate> {
    self
      .week_start()?
      .checked_add_days(Days::new(6))
  }

  /// Whether the whole Monday..Sunday span
  /// is representable.
  pub fn is_bounded(&self) -> bool {
    self.week_end().is_some()
  }

  pub fn label(&self) -> String {
    let key = self.key();
    match (self.week_start(), self.week_end())
    {
      | (Some(start), Some(end)) => {
        format!(
          "Week {}, {} ({} - {})",
          key.week_number,
          key.year,
          start.format("%b %-d"),
          end.format("%b %-d")
        )
      }
      | _ => {
        format!(
          "Week {}, {}",
          key.week_number, key.year
        )
      }
    }
  }
}
