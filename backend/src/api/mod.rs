pub mod response;

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, Query};
use axum::{Router, extract::State, http::StatusCode, routing::get};
use serde::Deserialize;
use serde_json::Value;
use tower_http::trace::TraceLayer;

use crate::db::StoreError;
use crate::error::AppError;
use crate::models::Course;
use crate::state::AppState;
use crate::validation::{validate_create, validate_update};
use response::{DataResponse, MessageResponse, PageResponse};

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    per_page: Option<String>,
    page: Option<String>,
}

impl ListParams {
    /// Missing, non-numeric or non-positive values fall back to the default.
    pub fn per_page(&self) -> i64 {
        positive(self.per_page.as_deref()).unwrap_or(Course::DEFAULT_PAGINATION_SIZE)
    }

    pub fn page(&self) -> i64 {
        positive(self.page.as_deref()).unwrap_or(1)
    }
}

fn positive(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|v| v.trim().parse::<i64>().ok()).filter(|v| *v >= 1)
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/courses", get(list_courses).post(create_course))
        .route(
            "/courses/{id}",
            get(show_course)
                .put(update_course)
                .patch(update_course)
                .delete(delete_course),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    sqlx::query("select 1")
        .execute(&state.db)
        .await
        .map_err(StoreError::from)
        .map_err(AppError::store("Health check failed"))?;
    Ok(StatusCode::OK)
}

/// An empty body is read as an empty object.
fn parse_payload(body: &Bytes) -> Result<Value, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_slice(body)?)
}

/// Ids that are not integers cannot name a course.
fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.parse().map_err(|_| AppError::NotFound)
}

async fn list_courses(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<PageResponse<Course>>, AppError> {
    let page = state
        .courses
        .list_courses(params.per_page(), params.page())
        .await
        .map_err(AppError::store("Failed to retrieve courses"))?;
    Ok(Json(page.into()))
}

async fn create_course(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<DataResponse<Course>>), AppError> {
    let input = validate_create(&parse_payload(&body)?)?;
    let course = state
        .courses
        .create_course(input)
        .await
        .map_err(AppError::store("Failed to create course"))?;
    Ok((
        StatusCode::CREATED,
        Json(DataResponse::with_message("Course created successfully", course)),
    ))
}

async fn show_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DataResponse<Course>>, AppError> {
    let id = parse_id(&id)?;
    let course = state
        .courses
        .get_course(id)
        .await
        .map_err(AppError::store("Failed to retrieve course"))?
        .ok_or(AppError::NotFound)?;
    Ok(Json(DataResponse::new(course)))
}

async fn update_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<DataResponse<Course>>, AppError> {
    let changes = validate_update(&parse_payload(&body)?)?;
    let id = parse_id(&id)?;
    let course = state
        .courses
        .update_course(id, changes)
        .await
        .map_err(AppError::store("Failed to update course"))?
        .ok_or(AppError::NotFound)?;
    Ok(Json(DataResponse::with_message("Course updated successfully", course)))
}

async fn delete_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = parse_id(&id)?;
    let deleted = state
        .courses
        .delete_course(id)
        .await
        .map_err(AppError::store("Failed to delete course"))?;
    if deleted {
        Ok(Json(MessageResponse::new("Course deleted successfully")))
    } else {
        Err(AppError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(per_page: Option<&str>, page: Option<&str>) -> ListParams {
        ListParams {
            per_page: per_page.map(str::to_string),
            page: page.map(str::to_string),
        }
    }

    #[test]
    fn list_params_default_when_absent_or_invalid() {
        assert_eq!(params(None, None).per_page(), 15);
        assert_eq!(params(None, None).page(), 1);
        assert_eq!(params(Some("abc"), Some("-2")).per_page(), 15);
        assert_eq!(params(Some("0"), Some("0")).page(), 1);
        assert_eq!(params(Some(" 5 "), Some("3")).per_page(), 5);
        assert_eq!(params(Some("5"), Some("3")).page(), 3);
    }

    #[test]
    fn blank_body_reads_as_null() {
        assert_eq!(parse_payload(&Bytes::from_static(b"  \n")).unwrap(), Value::Null);
        assert!(matches!(
            parse_payload(&Bytes::from_static(b"{oops")),
            Err(AppError::MalformedJson(_))
        ));
    }
}
