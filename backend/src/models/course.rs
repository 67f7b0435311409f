use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
pub enum CourseStatus {
    Published,
    Pending,
}

impl CourseStatus {
    pub const ALL: [CourseStatus; 2] = [CourseStatus::Published, CourseStatus::Pending];

    pub fn as_str(&self) -> &'static str {
        match self {
            CourseStatus::Published => "Published",
            CourseStatus::Pending => "Pending",
        }
    }

    /// Case-sensitive lookup by wire value.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Course {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub status: CourseStatus,
    pub is_premium: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Course {
    pub const DEFAULT_PAGINATION_SIZE: i64 = 15;
}

/// Validated input for creating a course.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCourse {
    pub title: String,
    pub description: Option<String>,
    pub status: CourseStatus,
    pub is_premium: bool,
}

/// Validated partial update. `None` leaves the column untouched;
/// `description: Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CourseChanges {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub status: Option<CourseStatus>,
    pub is_premium: Option<bool>,
}

impl CourseChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.is_premium.is_none()
    }

    pub fn apply_to(self, course: &mut Course) {
        if let Some(title) = self.title {
            course.title = title;
        }
        if let Some(description) = self.description {
            course.description = description;
        }
        if let Some(status) = self.status {
            course.status = status;
        }
        if let Some(is_premium) = self.is_premium {
            course.is_premium = is_premium;
        }
    }
}
