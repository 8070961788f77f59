//! Application services for the task board.

mod card;
mod form;
mod store;

pub use card::{
    CARD_DATE_FORMAT, CardError, CardMode, DragPayload, EditBuffer, MISSING_DATE_LABEL,
    MenuAnchor, TaskCard, TaskCardView, drop_on,
};
pub use form::{FieldError, FormField, QuickDate, SubmitOutcome, TaskCreationForm};
pub use store::{LoadState, Outcome, TaskListStore};
