//! Fetch-state model for list screens.
//!
//! `FetchUnit` drives one screen's "load a list from the network" lifecycle:
//! `NotStarted → Loading → Loaded | Failed`. Errors never discard data that
//! was already loaded; it stays available as a stale list.

use std::mem;

use enum_map::Enum;
use training_core::ApiError;
use training_core::api::ANONYMOUS_EMID;
use training_core::models::Course;

use crate::common::{LatestOnly, RequestId};

/// Load state of one list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchState<T> {
    NotStarted,
    Loading { stale: Option<Vec<T>> },
    Loaded(Vec<T>),
    Failed { error: ApiError, stale: Option<Vec<T>> },
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        FetchState::NotStarted
    }
}

impl<T> FetchState<T> {
    /// The current list, or the last loaded one while refreshing or after an error.
    pub fn items(&self) -> Option<&[T]> {
        match self {
            FetchState::NotStarted => None,
            FetchState::Loaded(items) => Some(items),
            FetchState::Loading { stale } | FetchState::Failed { stale, .. } => stale.as_deref(),
        }
    }

    pub fn is_refreshing(&self) -> bool {
        matches!(self, FetchState::Loading { .. })
    }

    pub fn is_started(&self) -> bool {
        !matches!(self, FetchState::NotStarted)
    }

    /// The error of the last completed request, if it failed.
    pub fn error(&self) -> Option<&ApiError> {
        match self {
            FetchState::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    fn take_items(&mut self) -> Option<Vec<T>> {
        match mem::take(self) {
            FetchState::NotStarted => None,
            FetchState::Loaded(items) => Some(items),
            FetchState::Loading { stale } | FetchState::Failed { stale, .. } => stale,
        }
    }
}

/// Inputs to a `FetchUnit`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchAction<T> {
    RequestRefresh,
    ResponseReceived {
        req: RequestId,
        result: Result<Vec<T>, ApiError>,
    },
}

/// Fetch-state unit: the state plus its transition function.
///
/// Duplicate requests are latest-only: a refresh while loading issues a new
/// call and any response that is not for the latest request is dropped.
#[derive(Debug, Clone)]
pub struct FetchUnit<T> {
    state: FetchState<T>,
    requests: LatestOnly,
}

impl<T> Default for FetchUnit<T> {
    fn default() -> Self {
        Self {
            state: FetchState::NotStarted,
            requests: LatestOnly::default(),
        }
    }
}

impl<T> FetchUnit<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FetchState<T> {
        &self.state
    }

    pub fn is_refreshing(&self) -> bool {
        self.state.is_refreshing()
    }

    /// Applies an action. Returns the id of the call to issue, if any.
    ///
    /// `RequestRefresh` always yields exactly one request id.
    pub fn update(&mut self, action: FetchAction<T>) -> Option<RequestId> {
        match action {
            FetchAction::RequestRefresh => {
                let stale = self.state.take_items();
                self.state = FetchState::Loading { stale };
                Some(self.requests.begin())
            }
            FetchAction::ResponseReceived { req, result } => {
                if !self.requests.finish_if_active(req) {
                    tracing::debug!(?req, "dropping superseded response");
                    return None;
                }
                self.state = match result {
                    Ok(items) => FetchState::Loaded(items),
                    Err(error) => FetchState::Failed {
                        error,
                        stale: self.state.take_items(),
                    },
                };
                None
            }
        }
    }

    /// Fails without issuing a call. Any in-flight request becomes stale.
    pub fn reject(&mut self, error: ApiError) {
        self.requests.cancel();
        let stale = self.state.take_items();
        self.state = FetchState::Failed { error, stale };
    }
}

/// The course-list screens, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Enum)]
pub enum Screen {
    #[default]
    Upcoming,
    Registered,
    Attended,
    Delivered,
}

impl Screen {
    pub const ALL: [Screen; 4] = [
        Screen::Upcoming,
        Screen::Registered,
        Screen::Attended,
        Screen::Delivered,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Screen::Upcoming => "Upcoming Courses",
            Screen::Registered => "Registered Courses",
            Screen::Attended => "Attended Courses",
            Screen::Delivered => "Delivered Courses",
        }
    }

    pub fn tab_label(self) -> &'static str {
        match self {
            Screen::Upcoming => "Upcoming",
            Screen::Registered => "Registered",
            Screen::Attended => "Attended",
            Screen::Delivered => "Delivered",
        }
    }

    /// Whether the screen lists the signed-in user's own courses.
    pub fn is_personal(self) -> bool {
        !matches!(self, Screen::Upcoming)
    }

    pub fn index(self) -> usize {
        Screen::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Screen::ALL[(self.index() + 1) % Screen::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Screen::ALL[(self.index() + Screen::ALL.len() - 1) % Screen::ALL.len()]
    }

    /// Tab for a `1`-based digit key.
    pub fn from_digit(digit: char) -> Option<Self> {
        let index = digit.to_digit(10)?.checked_sub(1)?;
        Screen::ALL.get(index as usize).copied()
    }
}

/// State of one course-list screen.
#[derive(Debug, Clone, Default)]
pub struct CourseScreen {
    pub unit: FetchUnit<Course>,
    /// Employee id the personal lists are queried with; set on login.
    pub emid: Option<String>,
    /// Selected row in the list.
    pub selected: usize,
}

impl CourseScreen {
    pub fn courses(&self) -> &[Course] {
        self.unit.state().items().unwrap_or_default()
    }

    pub fn selected_course(&self) -> Option<&Course> {
        self.courses().get(self.selected)
    }

    /// Employee id to query `screen` with, if one is available.
    pub fn query_emid(&self, screen: Screen) -> Option<String> {
        if screen.is_personal() {
            self.emid.clone().filter(|emid| !emid.trim().is_empty())
        } else {
            Some(ANONYMOUS_EMID.to_string())
        }
    }

    /// Keeps the selection inside the current list.
    pub fn clamp_selection(&mut self) {
        let len = self.courses().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn begin(unit: &mut FetchUnit<u32>) -> RequestId {
        unit.update(FetchAction::RequestRefresh).unwrap()
    }

    #[test]
    fn test_refresh_then_success_is_loaded() {
        let mut unit = FetchUnit::new();
        let req = begin(&mut unit);
        assert!(unit.is_refreshing());

        let issued = unit.update(FetchAction::ResponseReceived {
            req,
            result: Ok(vec![1, 2, 3]),
        });

        assert_eq!(issued, None);
        assert_eq!(unit.state(), &FetchState::Loaded(vec![1, 2, 3]));
        assert!(!unit.is_refreshing());
    }

    #[test]
    fn test_failure_keeps_previous_list() {
        let mut unit = FetchUnit::new();
        let req = begin(&mut unit);
        unit.update(FetchAction::ResponseReceived {
            req,
            result: Ok(vec![1, 2]),
        });

        let req = begin(&mut unit);
        assert_eq!(unit.state().items(), Some(&[1, 2][..]));
        unit.update(FetchAction::ResponseReceived {
            req,
            result: Err(ApiError::new("offline")),
        });

        assert_eq!(unit.state().items(), Some(&[1, 2][..]));
        assert_eq!(unit.state().error().map(ApiError::message), Some("offline"));
        assert!(!unit.is_refreshing());
    }

    #[test]
    fn test_failure_without_data() {
        let mut unit: FetchUnit<u32> = FetchUnit::new();
        let req = begin(&mut unit);
        unit.update(FetchAction::ResponseReceived {
            req,
            result: Err(ApiError::new("HTTP 500")),
        });

        assert_eq!(
            unit.state(),
            &FetchState::Failed {
                error: ApiError::new("HTTP 500"),
                stale: None
            }
        );
    }

    #[test]
    fn test_superseded_response_is_dropped() {
        let mut unit = FetchUnit::new();
        let first = begin(&mut unit);
        let second = begin(&mut unit);

        unit.update(FetchAction::ResponseReceived {
            req: first,
            result: Ok(vec![1]),
        });
        assert!(unit.is_refreshing());

        unit.update(FetchAction::ResponseReceived {
            req: second,
            result: Ok(vec![2]),
        });
        assert_eq!(unit.state(), &FetchState::Loaded(vec![2]));
    }

    #[test]
    fn test_late_response_after_completion_is_dropped() {
        let mut unit = FetchUnit::new();
        let req = begin(&mut unit);
        unit.update(FetchAction::ResponseReceived {
            req,
            result: Ok(vec![1]),
        });

        unit.update(FetchAction::ResponseReceived {
            req,
            result: Err(ApiError::new("late")),
        });

        assert_eq!(unit.state(), &FetchState::Loaded(vec![1]));
    }

    #[test]
    fn test_reject_keeps_data_and_voids_in_flight() {
        let mut unit = FetchUnit::new();
        let req = begin(&mut unit);
        unit.reject(ApiError::new("no employee id"));

        unit.update(FetchAction::ResponseReceived {
            req,
            result: Ok(vec![9]),
        });

        assert!(unit.state().error().is_some());
        assert_eq!(unit.state().items(), None);
    }

    #[test]
    fn test_screen_navigation_wraps() {
        assert_eq!(Screen::Upcoming.prev(), Screen::Delivered);
        assert_eq!(Screen::Delivered.next(), Screen::Upcoming);
        assert_eq!(Screen::from_digit('2'), Some(Screen::Registered));
        assert_eq!(Screen::from_digit('0'), None);
        assert_eq!(Screen::from_digit('5'), None);
    }

    #[test]
    fn test_query_emid() {
        let mut screen = CourseScreen::default();
        assert_eq!(screen.query_emid(Screen::Upcoming).as_deref(), Some("0"));
        assert_eq!(screen.query_emid(Screen::Registered), None);

        screen.emid = Some("HE170".to_string());
        assert_eq!(screen.query_emid(Screen::Attended).as_deref(), Some("HE170"));
        assert_eq!(screen.query_emid(Screen::Upcoming).as_deref(), Some("0"));
    }
}
