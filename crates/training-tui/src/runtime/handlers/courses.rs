//! Course list fetch handler.

use std::sync::Arc;

use training_core::TrainingApi;
use training_core::api::{CourseQuery, DateWindow};

use crate::common::RequestId;
use crate::events::UiEvent;
use crate::features::courses::{FetchAction, Screen};

/// Builds the backend query for one screen.
pub fn query_for(screen: Screen, emid: String, upcoming_window_hours: u32) -> CourseQuery {
    match screen {
        Screen::Upcoming => CourseQuery::Upcoming {
            window: DateWindow::starting_now(upcoming_window_hours),
            emid,
        },
        Screen::Registered => CourseQuery::Registered { emid },
        Screen::Attended => CourseQuery::Attended { emid },
        Screen::Delivered => CourseQuery::Delivered { emid },
    }
}

/// Fetches one screen's list and tags the result with `req`.
pub async fn fetch_courses(
    api: Arc<dyn TrainingApi>,
    screen: Screen,
    req: RequestId,
    emid: String,
    upcoming_window_hours: u32,
) -> UiEvent {
    let query = query_for(screen, emid, upcoming_window_hours);
    tracing::debug!(query = query.label(), ?req, "fetching courses");
    let result = api.courses(query).await;

    UiEvent::Courses {
        screen,
        action: FetchAction::ResponseReceived { req, result },
    }
}
