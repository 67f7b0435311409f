use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use super::StoreError;
use crate::models::{Course, CourseChanges, NewCourse, Page};

const COLUMNS: &str =
    "id, title, description, status, is_premium, created_at, updated_at, deleted_at";

#[async_trait]
pub trait CourseStore: Send + Sync {
    async fn paginate(&self, per_page: i64, page: i64) -> Result<Page<Course>, StoreError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Course>, StoreError>;
    async fn create(&self, input: NewCourse) -> Result<Course, StoreError>;
    async fn update(&self, course: &Course, changes: CourseChanges) -> Result<Course, StoreError>;
    async fn soft_delete(&self, course: &Course) -> Result<bool, StoreError>;
}

#[derive(Clone)]
pub struct SqliteCourseStore {
    db: SqlitePool,
}

impl SqliteCourseStore {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Looks past the soft-delete filter. Not reachable over HTTP.
    pub async fn find_including_deleted(&self, id: i64) -> Result<Option<Course>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM courses WHERE id = ?");
        let course = sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .fetch_optional(&self.db)
            .await?;
        Ok(course)
    }

    pub async fn count_including_deleted(&self) -> Result<i64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM courses")
            .fetch_one(&self.db)
            .await?;
        Ok(count)
    }
}

#[async_trait]
impl CourseStore for SqliteCourseStore {
    async fn paginate(&self, per_page: i64, page: i64) -> Result<Page<Course>, StoreError> {
        let per_page = if per_page < 1 { Course::DEFAULT_PAGINATION_SIZE } else { per_page };
        let page = page.max(1);

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM courses WHERE deleted_at IS NULL")
            .fetch_one(&self.db)
            .await?;

        let query = format!(
            "SELECT {COLUMNS} FROM courses WHERE deleted_at IS NULL ORDER BY id ASC LIMIT ? OFFSET ?"
        );
        let items = sqlx::query_as::<_, Course>(&query)
            .bind(per_page)
            .bind((page - 1).saturating_mul(per_page))
            .fetch_all(&self.db)
            .await?;

        debug!(page, per_page, total, returned = items.len(), "paginated courses");

        Ok(Page {
            items,
            total,
            per_page,
            current_page: page,
        })
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Course>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM courses WHERE id = ? AND deleted_at IS NULL");
        let course = sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .fetch_optional(&self.db)
            .await?;
        Ok(course)
    }

    async fn create(&self, input: NewCourse) -> Result<Course, StoreError> {
        let now = Utc::now();
        let query = format!(
            "INSERT INTO courses (title, description, status, is_premium, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?5)
             RETURNING {COLUMNS}"
        );
        let course = sqlx::query_as::<_, Course>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.status)
            .bind(input.is_premium)
            .bind(now)
            .fetch_one(&self.db)
            .await?;
        Ok(course)
    }

    async fn update(&self, course: &Course, changes: CourseChanges) -> Result<Course, StoreError> {
        if changes.is_empty() {
            return Ok(course.clone());
        }

        let mut current = course.clone();
        changes.apply_to(&mut current);
        current.updated_at = Utc::now();

        let query = format!(
            "UPDATE courses
             SET title = ?1,
                 description = ?2,
                 status = ?3,
                 is_premium = ?4,
                 updated_at = ?5
             WHERE id = ?6 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Course>(&query)
            .bind(&current.title)
            .bind(&current.description)
            .bind(current.status)
            .bind(current.is_premium)
            .bind(current.updated_at)
            .bind(current.id)
            .fetch_optional(&self.db)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;
        Ok(updated)
    }

    async fn soft_delete(&self, course: &Course) -> Result<bool, StoreError> {
        let now = Utc::now();
        let result = sqlx::query(
            r#"
            UPDATE courses
            SET deleted_at = ?1,
                updated_at = ?1
            WHERE id = ?2
            "#,
        )
        .bind(now)
        .bind(course.id)
        .execute(&self.db)
        .await?
        .rows_affected();

        Ok(result > 0)
    }
}
