//! Entity schemas.
//!
//! Each struct is both the accepted request payload and the canonical record that is
//! persisted. Deserialization enforces required fields and fills defaults; the
//! `validator` derive enforces numeric bounds. Cross-entity references
//! (`trainer_id`, `client_id`) are opaque strings and are not checked for existence.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use trainerhub_core::document::Record;

fn default_sets() -> i64 {
    3
}

fn default_reps() -> i64 {
    10
}

fn default_rest_seconds() -> Option<i64> {
    Some(60)
}

fn default_status() -> String {
    SessionStatus::Scheduled.as_str().to_string()
}

/// A trainer running the practice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Trainer {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    /// Areas of expertise
    #[serde(default)]
    pub specialties: Vec<String>,
}

impl Record for Trainer {
    fn collection_name() -> &'static str {
        "trainer"
    }
}

/// A client, optionally assigned to a trainer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Client {
    pub trainer_id: Option<String>,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub goals: Option<String>,
    /// Private notes
    pub notes: Option<String>,
}

impl Record for Client {
    fn collection_name() -> &'static str {
        "client"
    }
}

/// One exercise prescription inside a program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Exercise {
    pub name: String,
    #[serde(default = "default_sets")]
    #[validate(range(min = 1, max = 10, message = "sets must be between 1 and 10"))]
    pub sets: i64,
    /// Reps per set
    #[serde(default = "default_reps")]
    #[validate(range(min = 1, max = 100, message = "reps must be between 1 and 100"))]
    pub reps: i64,
    pub tempo: Option<String>,
    /// Rest between sets. An explicit `null` is kept; only an absent field defaults to 60.
    #[serde(default = "default_rest_seconds")]
    #[validate(range(min = 0, message = "rest_seconds must not be negative"))]
    pub rest_seconds: Option<i64>,
    /// Coaching cues
    pub notes: Option<String>,
}

/// A training program, e.g. a hypertrophy block for one client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Program {
    pub trainer_id: Option<String>,
    pub client_id: Option<String>,
    pub title: String,
    /// e.g. Hypertrophy, Strength
    pub phase: Option<String>,
    #[serde(default)]
    #[validate(nested)]
    pub exercises: Vec<Exercise>,
    pub notes: Option<String>,
}

impl Record for Program {
    fn collection_name() -> &'static str {
        "program"
    }
}

/// Well-known session states.
///
/// `Session::status` stays a free-form string; these are the values the practice uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Scheduled,
    Completed,
    Cancelled,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Scheduled => "scheduled",
            SessionStatus::Completed => "completed",
            SessionStatus::Cancelled => "cancelled",
        }
    }
}

/// A booked training session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Session {
    pub trainer_id: String,
    pub client_id: String,
    pub date: NaiveDate,
    #[serde(default = "default_status")]
    pub status: String,
    /// Gym or other location
    pub location: Option<String>,
    pub notes: Option<String>,
}

impl Record for Session {
    fn collection_name() -> &'static str {
        "session"
    }
}

/// A body-composition check-in for a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Progress {
    pub client_id: String,
    pub date: NaiveDate,
    #[validate(range(min = 0.0, message = "weight_kg must not be negative"))]
    pub weight_kg: Option<f64>,
    #[validate(range(min = 0.0, max = 100.0, message = "bodyfat_pct must be between 0 and 100"))]
    pub bodyfat_pct: Option<f64>,
    /// Circumference or other metrics
    pub measurements: Option<String>,
    pub notes: Option<String>,
}

impl Record for Progress {
    fn collection_name() -> &'static str {
        "progress"
    }
}
