use std::sync::Arc;

use tracing::{debug, info};

use crate::db::{CourseStore, StoreError};
use crate::models::{Course, CourseChanges, NewCourse, Page};

/// Course use cases on top of an injected store.
#[derive(Clone)]
pub struct CourseService {
    store: Arc<dyn CourseStore>,
}

impl CourseService {
    pub fn new(store: Arc<dyn CourseStore>) -> Self {
        Self { store }
    }

    pub async fn list_courses(&self, per_page: i64, page: i64) -> Result<Page<Course>, StoreError> {
        self.store.paginate(per_page, page).await
    }

    pub async fn get_course(&self, id: i64) -> Result<Option<Course>, StoreError> {
        self.store.find_by_id(id).await
    }

    pub async fn create_course(&self, input: NewCourse) -> Result<Course, StoreError> {
        let course = self.store.create(input).await?;
        info!(course_id = course.id, "course created");
        Ok(course)
    }

    /// Returns `None` when no live course has this id; the store is not touched then.
    pub async fn update_course(
        &self,
        id: i64,
        changes: CourseChanges,
    ) -> Result<Option<Course>, StoreError> {
        let Some(course) = self.store.find_by_id(id).await? else {
            debug!(course_id = id, "update skipped, course not found");
            return Ok(None);
        };

        let updated = self.store.update(&course, changes).await?;
        info!(course_id = id, "course updated");
        Ok(Some(updated))
    }

    /// Returns `false` when no live course has this id.
    pub async fn delete_course(&self, id: i64) -> Result<bool, StoreError> {
        let Some(course) = self.store.find_by_id(id).await? else {
            debug!(course_id = id, "delete skipped, course not found");
            return Ok(false);
        };

        let deleted = self.store.soft_delete(&course).await?;
        if deleted {
            info!(course_id = id, "course soft-deleted");
        }
        Ok(deleted)
    }
}
