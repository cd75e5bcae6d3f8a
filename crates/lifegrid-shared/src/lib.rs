mod activity;
mod domain;
mod grid;
mod week;

pub use activity::{
  Activity,
  ActivityDraft,
  ActivityHandlers,
  ActivityLog,
  ActivityPatch,
  NewActivity
};
pub use domain::{
  Domain,
  DomainIcon,
  LIFE_DOMAINS,
  find_domain
};
pub use grid::{
  AddModal,
  GridColumn,
  HoverState,
  activities_for_domain,
  build_grid
};
pub use week::{
  WeekKey,
  WeekSelection
};
