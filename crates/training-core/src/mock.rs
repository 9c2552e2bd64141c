//! Demo backend and client wiring.
//!
//! `DemoTrainingApi` and `DemoTicketIssuer` serve canned data without any
//! network access. They back `--demo` mode and the test suites.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::Result;
use chrono::{DateTime, TimeZone, Utc};
use futures_util::future::BoxFuture;

use crate::api::{ApiError, CourseQuery, HttpTrainingApi, TrainingApi};
use crate::cas::{AuthError, CasTicketIssuer, Password, TicketIssuer};
use crate::config::Config;
use crate::models::{Course, LoginRequest, LoginResponse, User};

/// Ticket the demo issuer hands out.
pub const DEMO_TICKET: &str = "ST-1608-f1gUv2SjwwaSYp5kCDpX-eccb7f695a77";

const DEMO_TIMESTAMP_MS: i64 = 1_595_835_757_787;

/// The network collaborators handed to the UI and the CLI.
#[derive(Clone)]
pub struct Clients {
    pub api: Arc<dyn TrainingApi>,
    pub tickets: Arc<dyn TicketIssuer>,
}

impl Clients {
    /// HTTP clients configured from `config` (env overrides applied).
    pub fn live(config: &Config) -> Result<Self> {
        let timeout = config.request_timeout();
        let api = HttpTrainingApi::new(&config.effective_api_base_url()?, timeout)?;
        let tickets =
            CasTicketIssuer::new(&config.effective_cas_base_url()?, &config.cas_service, timeout)?;
        tracing::debug!(api = %api.base_url(), service = tickets.service(), "live clients ready");

        Ok(Self {
            api: Arc::new(api),
            tickets: Arc::new(tickets),
        })
    }

    /// Canned in-memory clients.
    pub fn demo() -> Self {
        Self {
            api: Arc::new(DemoTrainingApi::new()),
            tickets: Arc::new(DemoTicketIssuer::issuing(DEMO_TICKET)),
        }
    }
}

/// The demo user: Moony Chen, employee HE170.
pub fn demo_user() -> User {
    User {
        id: 135,
        screen_name: "Moony.Chen".to_string(),
        emid: Some("HE170".to_string()),
        first_name: "Moony".to_string(),
        last_name: "Chen".to_string(),
        active: true,
    }
}

fn demo_time() -> DateTime<Utc> {
    Utc.timestamp_millis_opt(DEMO_TIMESTAMP_MS)
        .single()
        .unwrap_or_default()
}

/// A course with placeholder details.
pub fn demo_course(id: i64, topic_name: &str) -> Course {
    Course {
        id,
        topic_name: topic_name.to_string(),
        program_name: "Mobile".to_string(),
        external_trainer: None,
        delivery_date: demo_time(),
        last_update: demo_time(),
        start_time: "14:00".to_string(),
        end_time: "16:00".to_string(),
        description: format!("An introduction to {topic_name}."),
        meeting_room: Some("R-301".to_string()),
        trainers: vec![demo_user()],
        attendees: Vec::new(),
    }
}

fn courses_for(query: &CourseQuery) -> Vec<Course> {
    let topics: &[(i64, &str)] = match query {
        CourseQuery::Upcoming { .. } => &[(1, "Swift"), (2, "Objc"), (3, "Objc++")],
        CourseQuery::Registered { .. } => &[(1, "Swift"), (4, "English"), (5, "CI&CD")],
        CourseQuery::Attended { .. } => &[(1, "raywenderlich"), (4, "pointfree"), (5, "objc")],
        CourseQuery::Delivered { .. } => &[(6, "SwiftUI"), (7, "Combine")],
    };
    topics
        .iter()
        .map(|(id, topic)| demo_course(*id, topic))
        .collect()
}

/// In-memory `TrainingApi`.
#[derive(Debug, Default)]
pub struct DemoTrainingApi {
    courses_error: Option<ApiError>,
    login_error: Option<ApiError>,
    /// Number of `login` calls received.
    pub login_calls: AtomicUsize,
    /// Number of `courses` calls received.
    pub course_calls: AtomicUsize,
}

impl DemoTrainingApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every course listing fails with `message`.
    #[must_use]
    pub fn failing_courses(mut self, message: &str) -> Self {
        self.courses_error = Some(ApiError::new(message));
        self
    }

    /// Every login fails with `message`.
    #[must_use]
    pub fn failing_login(mut self, message: &str) -> Self {
        self.login_error = Some(ApiError::new(message));
        self
    }
}

impl TrainingApi for DemoTrainingApi {
    fn courses(&self, query: CourseQuery) -> BoxFuture<'_, Result<Vec<Course>, ApiError>> {
        self.course_calls.fetch_add(1, Ordering::SeqCst);
        let result = match &self.courses_error {
            Some(error) => Err(error.clone()),
            None => Ok(courses_for(&query)),
        };
        Box::pin(async move { result })
    }

    fn login(&self, _request: LoginRequest) -> BoxFuture<'_, Result<LoginResponse, ApiError>> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        let result = match &self.login_error {
            Some(error) => Err(error.clone()),
            None => Ok(LoginResponse {
                status: 1,
                auth_id: format!("Moony.Chen{DEMO_TIMESTAMP_MS}"),
                emp: demo_user(),
            }),
        };
        Box::pin(async move { result })
    }
}

/// In-memory `TicketIssuer` with a fixed outcome.
#[derive(Debug)]
pub struct DemoTicketIssuer {
    outcome: Result<String, AuthError>,
    /// Number of `issue_ticket` calls received.
    pub calls: AtomicUsize,
}

impl DemoTicketIssuer {
    pub fn issuing(ticket: &str) -> Self {
        Self {
            outcome: Ok(ticket.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            outcome: Err(AuthError::new(message)),
            calls: AtomicUsize::new(0),
        }
    }
}

impl TicketIssuer for DemoTicketIssuer {
    fn issue_ticket<'a>(
        &'a self,
        _username: &'a str,
        _password: &'a Password,
    ) -> BoxFuture<'a, Result<String, AuthError>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let outcome = self.outcome.clone();
        Box::pin(async move { outcome })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_demo_lists_differ_per_query() {
        let api = DemoTrainingApi::new();
        let emid = "HE170".to_string();

        let registered = api
            .courses(CourseQuery::Registered { emid: emid.clone() })
            .await
            .unwrap();
        let attended = api.courses(CourseQuery::Attended { emid }).await.unwrap();

        let topics = |courses: &[Course]| -> Vec<String> {
            courses.iter().map(|c| c.topic_name.clone()).collect()
        };
        assert_eq!(topics(&registered), vec!["Swift", "English", "CI&CD"]);
        assert_eq!(topics(&attended), vec!["raywenderlich", "pointfree", "objc"]);
        assert_eq!(api.course_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failing_courses() {
        let api = DemoTrainingApi::new().failing_courses("offline");
        let err = api
            .courses(CourseQuery::Delivered {
                emid: "HE170".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.message(), "offline");
    }

    #[test]
    fn test_live_clients_reject_bad_url() {
        let config = Config {
            api_base_url: "not a url".to_string(),
            ..Default::default()
        };
        assert!(Clients::live(&config).is_err());
    }
}
