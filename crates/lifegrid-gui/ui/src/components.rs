mod activity_card;
mod activity_form;
mod add_activity_modal;
mod domain_grid;
mod week_selector;

pub use activity_card::ActivityCard;
pub use activity_form::ActivityForm;
pub use add_activity_modal::AddActivityModal;
pub use domain_grid::DomainGrid;
pub use week_selector::WeekSelector;
