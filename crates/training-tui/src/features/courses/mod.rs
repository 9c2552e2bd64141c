//! Course-list screens: fetch-state unit, reducer and view.

mod render;
mod state;
mod update;

pub use render::render_course_screen;
pub use state::{CourseScreen, FetchAction, FetchState, FetchUnit, Screen};
pub use update::{MISSING_EMID_MESSAGE, handle_action, handle_key, refresh, show};
