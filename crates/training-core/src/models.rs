//! Wire and domain types for the training backend.
//!
//! Every type here is decoded straight from a backend response and is
//! read-only afterwards. JSON keys are camelCase and dates travel as
//! integer milliseconds since the Unix epoch.
//!
//! Optional string fields (`emid`, `externalTrainer`, `meetingRoom`) decode
//! both a missing key and `null` as `None`, and encode `None` by omitting the
//! key. An empty string stays `Some("")` in both directions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An employee known to the training backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub screen_name: String,
    /// Employee id; the key used to query a user's course lists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emid: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub active: bool,
}

impl User {
    /// Returns "First Last", or the screen name when both are blank.
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let full = full.trim();
        if full.is_empty() {
            self.screen_name.clone()
        } else {
            full.to_string()
        }
    }
}

/// A scheduled training course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: i64,
    pub topic_name: String,
    pub program_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_trainer: Option<String>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub delivery_date: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub last_update: DateTime<Utc>,
    pub start_time: String,
    pub end_time: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meeting_room: Option<String>,
    pub trainers: Vec<User>,
    pub attendees: Vec<User>,
}

impl Course {
    /// Names of the people delivering this course, external trainer first.
    pub fn trainer_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .external_trainer
            .iter()
            .filter(|name| !name.trim().is_empty())
            .cloned()
            .collect();
        names.extend(self.trainers.iter().map(User::display_name));
        names
    }
}

/// Envelope returned by every course-list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseList {
    pub courses: Vec<Course>,
}

/// Body of `POST /user/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub service_ticket: String,
}

impl LoginRequest {
    pub fn new(service_ticket: impl Into<String>) -> Self {
        Self {
            service_ticket: service_ticket.into(),
        }
    }
}

/// Response of `POST /user/login`.
///
/// `status` is carried through but not interpreted: a response that decodes
/// is a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub status: i32,
    pub auth_id: String,
    pub emp: User,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;

    fn moony() -> User {
        User {
            id: 135,
            screen_name: "Moony.Chen".to_string(),
            emid: Some("HE170".to_string()),
            first_name: "Moony".to_string(),
            last_name: "Chen".to_string(),
            active: true,
        }
    }

    fn swift_course() -> Course {
        Course {
            id: 1,
            topic_name: "Swift".to_string(),
            program_name: "Mobile".to_string(),
            external_trainer: None,
            delivery_date: Utc.timestamp_millis_opt(1_595_835_757_787).unwrap(),
            last_update: Utc.timestamp_millis_opt(1_595_000_000_000).unwrap(),
            start_time: "14:00".to_string(),
            end_time: "16:00".to_string(),
            description: "Intro to Swift".to_string(),
            meeting_room: Some("R-301".to_string()),
            trainers: vec![moony()],
            attendees: Vec::new(),
        }
    }

    #[test]
    fn test_course_decodes_camel_case_and_millis() {
        let value = json!({
            "id": 7,
            "topicName": "Rust",
            "programName": "Backend",
            "externalTrainer": null,
            "deliveryDate": 1_595_835_757_787_i64,
            "lastUpdate": 0,
            "startTime": "09:00",
            "endTime": "11:00",
            "description": "",
            "trainers": [],
            "attendees": []
        });

        let course: Course = serde_json::from_value(value).unwrap();

        assert_eq!(course.topic_name, "Rust");
        assert_eq!(course.external_trainer, None);
        assert_eq!(course.meeting_room, None);
        assert_eq!(course.delivery_date.timestamp_millis(), 1_595_835_757_787);
        assert_eq!(course.last_update.timestamp_millis(), 0);
    }

    #[test]
    fn test_course_round_trip_preserves_fields() {
        let course = swift_course();
        let encoded = serde_json::to_value(&course).unwrap();

        assert_eq!(encoded["deliveryDate"], json!(1_595_835_757_787_i64));
        assert_eq!(encoded["meetingRoom"], json!("R-301"));
        assert!(encoded.get("externalTrainer").is_none());

        let decoded: Course = serde_json::from_value(encoded).unwrap();
        assert_eq!(decoded, course);
    }

    #[test]
    fn test_empty_optional_string_is_kept() {
        let mut user = moony();
        user.emid = Some(String::new());

        let encoded = serde_json::to_string(&user).unwrap();
        let decoded: User = serde_json::from_str(&encoded).unwrap();

        assert_eq!(decoded.emid.as_deref(), Some(""));
    }

    #[test]
    fn test_user_without_emid_decodes_to_none() {
        let user: User = serde_json::from_value(json!({
            "id": 2,
            "screenName": "x.y",
            "firstName": "X",
            "lastName": "Y",
            "active": false
        }))
        .unwrap();

        assert_eq!(user.emid, None);
    }

    #[test]
    fn test_course_missing_trainers_is_rejected() {
        let result = serde_json::from_value::<Course>(json!({
            "id": 1,
            "topicName": "Swift",
            "programName": "",
            "deliveryDate": 0,
            "lastUpdate": 0,
            "startTime": "",
            "endTime": "",
            "description": "",
            "attendees": []
        }));

        assert!(result.is_err());
    }

    #[test]
    fn test_login_response_decodes_scenario() {
        let response: LoginResponse = serde_json::from_value(json!({
            "status": 1,
            "authId": "a1",
            "emp": {
                "id": 135,
                "emid": "HE170",
                "screenName": "Moony.Chen",
                "firstName": "Moony",
                "lastName": "Chen",
                "active": true
            }
        }))
        .unwrap();

        assert_eq!(response.auth_id, "a1");
        assert_eq!(response.emp, moony());
    }

    #[test]
    fn test_login_request_encodes_service_ticket() {
        let body = serde_json::to_value(LoginRequest::new("ST-123")).unwrap();
        assert_eq!(body, json!({ "serviceTicket": "ST-123" }));
    }

    #[test]
    fn test_display_name_falls_back_to_screen_name() {
        let mut user = moony();
        assert_eq!(user.display_name(), "Moony Chen");

        user.first_name = String::new();
        user.last_name = " ".to_string();
        assert_eq!(user.display_name(), "Moony.Chen");
    }

    #[test]
    fn test_trainer_names_lists_external_first() {
        let mut course = swift_course();
        course.external_trainer = Some("Guest Speaker".to_string());

        assert_eq!(course.trainer_names(), vec!["Guest Speaker", "Moony Chen"]);
    }
}
