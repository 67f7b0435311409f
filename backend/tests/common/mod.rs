#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header::CONTENT_TYPE};
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::SqlitePool;
use tower::ServiceExt;

use course_api::api::router;
use course_api::db::{self, CourseStore, SqliteCourseStore};
use course_api::models::{Course, CourseStatus, NewCourse};
use course_api::state::AppState;

pub struct TestApp {
    pub router: Router,
    pub store: SqliteCourseStore,
    pub pool: SqlitePool,
}

pub async fn spawn_app() -> TestApp {
    let pool = db::memory_pool().await.expect("Failed to create test db");
    TestApp {
        router: router(AppState::new(pool.clone())),
        store: SqliteCourseStore::new(pool.clone()),
        pool,
    }
}

impl TestApp {
    pub async fn request(&self, method: Method, uri: &str, body: Option<&Value>) -> (StatusCode, Value) {
        let raw = body.map(|b| b.to_string()).unwrap_or_default();
        self.request_raw(method, uri, raw).await
    }

    pub async fn request_raw(&self, method: Method, uri: &str, body: String) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: &Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: &Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, body: &Value) -> (StatusCode, Value) {
        self.request(Method::PATCH, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, None).await
    }
}

static SEQUENCE: AtomicUsize = AtomicUsize::new(1);

/// Builds course rows with predictable defaults, overridable per test.
#[derive(Debug, Clone)]
pub struct CourseFactory {
    title: Option<String>,
    description: Option<String>,
    status: CourseStatus,
    is_premium: bool,
    count: usize,
}

impl Default for CourseFactory {
    fn default() -> Self {
        Self {
            title: None,
            description: Some("A course seeded for tests".to_string()),
            status: CourseStatus::Published,
            is_premium: false,
            count: 1,
        }
    }
}

impl CourseFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn published(mut self) -> Self {
        self.status = CourseStatus::Published;
        self
    }

    pub fn pending(mut self) -> Self {
        self.status = CourseStatus::Pending;
        self
    }

    pub fn premium(mut self) -> Self {
        self.is_premium = true;
        self
    }

    pub fn free(mut self) -> Self {
        self.is_premium = false;
        self
    }

    pub fn count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn make(&self) -> NewCourse {
        let title = self.title.clone().unwrap_or_else(|| {
            format!("Course {}", SEQUENCE.fetch_add(1, Ordering::Relaxed))
        });
        NewCourse {
            title,
            description: self.description.clone(),
            status: self.status,
            is_premium: self.is_premium,
        }
    }

    pub async fn create(&self, store: &dyn CourseStore) -> Course {
        store.create(self.make()).await.expect("Failed to seed course")
    }

    pub async fn create_many(&self, store: &dyn CourseStore) -> Vec<Course> {
        let mut courses = Vec::with_capacity(self.count);
        for _ in 0..self.count {
            courses.push(self.create(store).await);
        }
        courses
    }
}
