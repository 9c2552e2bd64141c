//! API gateway for the training backend.
//!
//! `TrainingApi` is the seam between the UI layer and the network. The live
//! implementation lives in [`http`]; demo and test fakes live in
//! [`crate::mock`].

pub mod http;

use std::fmt;

use chrono::{DateTime, Duration, Local, NaiveDate, TimeZone};
use futures_util::future::BoxFuture;

pub use http::HttpTrainingApi;

use crate::models::{Course, LoginRequest, LoginResponse};

/// Employee id the upcoming-courses listing is queried with.
pub const ANONYMOUS_EMID: &str = "0";

/// Path segment format for dates (`yyyy-MM-dd`).
const DATE_SEGMENT_FORMAT: &str = "%Y-%m-%d";

/// Failure of any backend call.
///
/// Transport errors, non-success statuses and undecodable bodies are all
/// reported the same way; the message exists for logs and display only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    message: String,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Creates an error for a non-success HTTP status.
    pub fn http_status(status: u16, body: &str) -> Self {
        let body = body.trim();
        if body.is_empty() {
            return Self::new(format!("HTTP {status}"));
        }
        let excerpt: String = body.chars().take(200).collect();
        Self::new(format!("HTTP {status}: {excerpt}"))
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

/// Inclusive date range for the upcoming-courses listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateWindow {
    /// Window from `now` to `now + hours`, in `now`'s time zone.
    ///
    /// An end past the last representable date is clamped to it.
    pub fn starting_at<Tz: TimeZone>(now: &DateTime<Tz>, hours: u32) -> Self {
        let to = now
            .clone()
            .checked_add_signed(Duration::hours(i64::from(hours)))
            .map_or(NaiveDate::MAX, |end| end.date_naive());
        Self {
            from: now.date_naive(),
            to,
        }
    }

    /// Window starting at the local wall clock.
    pub fn starting_now(hours: u32) -> Self {
        Self::starting_at(&Local::now(), hours)
    }
}

/// One of the course-list requests the backend supports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CourseQuery {
    Upcoming { window: DateWindow, emid: String },
    Registered { emid: String },
    Attended { emid: String },
    Delivered { emid: String },
}

impl CourseQuery {
    /// Path segments below the API base URL (unencoded).
    pub fn path_segments(&self) -> Vec<String> {
        match self {
            CourseQuery::Upcoming { window, emid } => vec![
                "course".to_string(),
                "recentcourses".to_string(),
                window.from.format(DATE_SEGMENT_FORMAT).to_string(),
                window.to.format(DATE_SEGMENT_FORMAT).to_string(),
                emid.clone(),
            ],
            CourseQuery::Registered { emid } => {
                vec!["course".to_string(), "myRegistered".to_string(), emid.clone()]
            }
            CourseQuery::Attended { emid } => {
                vec!["course".to_string(), "myAttended".to_string(), emid.clone()]
            }
            CourseQuery::Delivered { emid } => {
                vec!["course".to_string(), "myDelivered".to_string(), emid.clone()]
            }
        }
    }

    /// Short label used in logs.
    pub fn label(&self) -> &'static str {
        match self {
            CourseQuery::Upcoming { .. } => "upcoming",
            CourseQuery::Registered { .. } => "registered",
            CourseQuery::Attended { .. } => "attended",
            CourseQuery::Delivered { .. } => "delivered",
        }
    }
}

/// Operations offered by the training backend.
///
/// Object safe so the live client and the demo backend can be swapped at
/// startup behind an `Arc<dyn TrainingApi>`.
pub trait TrainingApi: Send + Sync {
    /// Fetches one course list.
    fn courses(&self, query: CourseQuery) -> BoxFuture<'_, Result<Vec<Course>, ApiError>>;

    /// Exchanges a service ticket for an application session.
    fn login(&self, request: LoginRequest) -> BoxFuture<'_, Result<LoginResponse, ApiError>>;
}
