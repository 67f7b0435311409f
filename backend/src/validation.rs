//! Payload validation for course requests.
//!
//! Both request kinds share one rule set. Create makes `title`, `status` and
//! `is_premium` required. Update only checks the keys that are present.
//! A batch payload (a non-null entry at index `0`) is refused before any
//! field rule runs.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::models::{CourseChanges, CourseStatus, NewCourse};

const TITLE_MAX_CHARS: usize = 255;

const TITLE_REQUIRED: &str = "The course title is required.";
const TITLE_STRING: &str = "The title field must be a string.";
const TITLE_MAX: &str = "The course title may not be greater than 255 characters.";
const DESCRIPTION_STRING: &str = "The description field must be a string.";
const STATUS_REQUIRED: &str = "The course status is required.";
const STATUS_IN: &str = "The selected status is invalid. Must be Published or Pending.";
const PREMIUM_REQUIRED: &str = "The premium status is required.";
const PREMIUM_BOOLEAN: &str = "The premium status must be true or false.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadMode {
    Create,
    Update,
}

impl PayloadMode {
    pub fn array_rejection_message(&self) -> &'static str {
        match self {
            PayloadMode::Create => {
                "This endpoint accepts only a single course object. To create multiple courses, send individual requests."
            }
            PayloadMode::Update => {
                "This endpoint accepts only a single course object for updates. To update multiple courses, send individual requests."
            }
        }
    }

    pub fn array_rejection_error(&self) -> &'static str {
        match self {
            PayloadMode::Create => "Array of courses not supported for creation.",
            PayloadMode::Update => "Array of courses not supported for updates.",
        }
    }
}

/// Messages per field, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<&'static str, Vec<String>>);

impl FieldErrors {
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    fn record<T>(&mut self, field: &'static str, result: Result<T, &'static str>) {
        if let Err(message) = result {
            self.add(field, message);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> Vec<&'static str> {
        self.0.keys().copied().collect()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }
}

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{message}")]
    ArrayPayload {
        message: &'static str,
        error: &'static str,
    },

    #[error("invalid fields: {}", .0.fields().join(", "))]
    Fields(FieldErrors),
}

pub fn validate_create(payload: &Value) -> Result<NewCourse, ValidationError> {
    let fields = object_fields(payload, PayloadMode::Create)?;

    let title = required(fields.get("title"), TITLE_REQUIRED, title_rule);
    let description = nullable(fields.get("description"), description_rule);
    let status = required(fields.get("status"), STATUS_REQUIRED, status_rule);
    let is_premium = required(fields.get("is_premium"), PREMIUM_REQUIRED, premium_rule);

    match (title, description, status, is_premium) {
        (Ok(title), Ok(description), Ok(status), Ok(is_premium)) => Ok(NewCourse {
            title,
            description,
            status,
            is_premium,
        }),
        (title, description, status, is_premium) => {
            let mut errors = FieldErrors::default();
            errors.record("title", title);
            errors.record("description", description);
            errors.record("status", status);
            errors.record("is_premium", is_premium);
            Err(ValidationError::Fields(errors))
        }
    }
}

pub fn validate_update(payload: &Value) -> Result<CourseChanges, ValidationError> {
    let fields = object_fields(payload, PayloadMode::Update)?;

    let title = sometimes(fields.get("title"), TITLE_REQUIRED, title_rule);
    let description = match fields.get("description") {
        None => Ok(None),
        Some(value) => nullable(Some(value), description_rule).map(Some),
    };
    let status = sometimes(fields.get("status"), STATUS_REQUIRED, status_rule);
    let is_premium = sometimes(fields.get("is_premium"), PREMIUM_REQUIRED, premium_rule);

    match (title, description, status, is_premium) {
        (Ok(title), Ok(description), Ok(status), Ok(is_premium)) => Ok(CourseChanges {
            title,
            description,
            status,
            is_premium,
        }),
        (title, description, status, is_premium) => {
            let mut errors = FieldErrors::default();
            errors.record("title", title);
            errors.record("description", description);
            errors.record("status", status);
            errors.record("is_premium", is_premium);
            Err(ValidationError::Fields(errors))
        }
    }
}

/// Resolve the payload to its object fields. A payload with a non-null
/// first entry (array index 0, or an object key `"0"`) is a batch and is
/// refused. Anything else that is not an object counts as an empty object.
fn object_fields(payload: &Value, mode: PayloadMode) -> Result<Map<String, Value>, ValidationError> {
    let first = match payload {
        Value::Array(items) => items.first(),
        Value::Object(map) => map.get("0"),
        _ => None,
    };
    if first.is_some_and(|v| !normalize(v).is_null()) {
        return Err(ValidationError::ArrayPayload {
            message: mode.array_rejection_message(),
            error: mode.array_rejection_error(),
        });
    }

    match payload {
        Value::Object(map) => Ok(map
            .iter()
            .map(|(key, value)| (key.clone(), normalize(value)))
            .collect()),
        _ => Ok(Map::new()),
    }
}

/// Trim strings and turn blank ones into null.
fn normalize(value: &Value) -> Value {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Value::Null
            } else {
                Value::String(trimmed.to_string())
            }
        }
        other => other.clone(),
    }
}

fn is_missing(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::Array(items)) => items.is_empty(),
        Some(Value::Object(map)) => map.is_empty(),
        Some(_) => false,
    }
}

fn required<T>(
    value: Option<&Value>,
    missing: &'static str,
    rule: fn(&Value) -> Result<T, &'static str>,
) -> Result<T, &'static str> {
    match value {
        Some(v) if !is_missing(value) => rule(v),
        _ => Err(missing),
    }
}

fn sometimes<T>(
    value: Option<&Value>,
    missing: &'static str,
    rule: fn(&Value) -> Result<T, &'static str>,
) -> Result<Option<T>, &'static str> {
    match value {
        None => Ok(None),
        Some(_) => required(value, missing, rule).map(Some),
    }
}

fn nullable<T>(
    value: Option<&Value>,
    rule: fn(&Value) -> Result<T, &'static str>,
) -> Result<Option<T>, &'static str> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(v) => rule(v).map(Some),
    }
}

fn title_rule(value: &Value) -> Result<String, &'static str> {
    let title = value.as_str().ok_or(TITLE_STRING)?;
    if title.chars().count() > TITLE_MAX_CHARS {
        return Err(TITLE_MAX);
    }
    Ok(title.to_string())
}

fn description_rule(value: &Value) -> Result<String, &'static str> {
    value.as_str().map(str::to_string).ok_or(DESCRIPTION_STRING)
}

fn status_rule(value: &Value) -> Result<CourseStatus, &'static str> {
    value.as_str().and_then(CourseStatus::parse).ok_or(STATUS_IN)
}

/// Accepts true, false, 0, 1, "0" and "1".
fn premium_rule(value: &Value) -> Result<bool, &'static str> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::Number(n) => match n.as_i64() {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            _ => Err(PREMIUM_BOOLEAN),
        },
        Value::String(s) => match s.as_str() {
            "0" => Ok(false),
            "1" => Ok(true),
            _ => Err(PREMIUM_BOOLEAN),
        },
        _ => Err(PREMIUM_BOOLEAN),
    }
}
