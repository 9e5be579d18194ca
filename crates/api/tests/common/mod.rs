#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{HeaderValue, Method, Request};
use axum::response::Response;
use axum::Router;
use cinerate_core::error::StoreError;
use cinerate_core::movie::MovieRating;
use cinerate_core::ports::{MovieStore, UserStore};
use cinerate_core::user::{NewSession, NewUser};
use cinerate_db::{MemoryMovieStore, MemoryUserStore};
use http_body_util::BodyExt;
use tower::ServiceExt;

use cinerate_api::auth::jwt::JwtConfig;
use cinerate_api::config::{ServerConfig, StoreBackend};
use cinerate_api::router::build_app_router;
use cinerate_api::state::AppState;

pub const TEST_JWT_SECRET: &str = "integration-test-secret";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        cors_origins: vec![HeaderValue::from_static("http://localhost:3000")],
        request_timeout_secs: 30,
        store: StoreBackend::Memory,
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            access_token_expiry_mins: 60,
        },
    }
}

/// The app plus handles on its in-memory stores for direct assertions.
pub struct TestApp {
    pub router: Router,
    pub users: Arc<MemoryUserStore>,
    pub movies: Arc<MemoryMovieStore>,
}

/// Build the full application router over in-memory stores whose catalog
/// holds `titles`.
pub fn build_test_app<I, S>(titles: I) -> TestApp
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let users = Arc::new(MemoryUserStore::new());
    let movies = Arc::new(MemoryMovieStore::with_catalog(titles));

    let state = AppState::new(
        Arc::clone(&users) as Arc<dyn UserStore>,
        Arc::clone(&movies) as Arc<dyn MovieStore>,
        test_config(),
    );

    TestApp {
        router: build_app_router(state),
        users,
        movies,
    }
}

/// Build the app with a movie store whose every call fails.
pub fn build_failing_app() -> Router {
    let state = AppState::new(
        Arc::new(MemoryUserStore::new()),
        Arc::new(FailingMovieStore),
        test_config(),
    );
    build_app_router(state)
}

/// Build the app over a custom user store and an empty catalog.
pub fn build_app_with_users(users: Arc<dyn UserStore>) -> Router {
    let state = AppState::new(users, Arc::new(MemoryMovieStore::new()), test_config());
    build_app_router(state)
}

/// User store that loses every registration race: the existence check
/// passes but the insert hits the unique constraint.
pub struct RacingUserStore;

#[async_trait]
impl UserStore for RacingUserStore {
    async fn user_exists(&self, _email: &str) -> Result<bool, StoreError> {
        Ok(false)
    }

    async fn create_user(&self, user: &NewUser) -> Result<(), StoreError> {
        Err(StoreError::Duplicate(format!(
            "duplicate key value violates unique constraint \"uq_users_email\" ({})",
            user.email
        )))
    }

    async fn check_user_credentials(
        &self,
        _email: &str,
        _password: &str,
    ) -> Result<bool, StoreError> {
        Ok(false)
    }

    async fn record_session(&self, _session: &NewSession) -> Result<(), StoreError> {
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Movie store that always reports a backend failure.
pub struct FailingMovieStore;

#[async_trait]
impl MovieStore for FailingMovieStore {
    async fn find_title(&self, _name: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::backend("connection refused by db-host-7"))
    }

    async fn update_movie_rating(&self, _name: &str, _rating: i64) -> Result<f64, StoreError> {
        Err(StoreError::backend("connection refused by db-host-7"))
    }

    async fn list_movies(&self) -> Result<Vec<String>, StoreError> {
        Err(StoreError::backend("connection refused by db-host-7"))
    }

    async fn list_movie_ratings(&self) -> Result<Vec<MovieRating>, StoreError> {
        Err(StoreError::backend("connection refused by db-host-7"))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(StoreError::backend("connection refused by db-host-7"))
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    post_raw(app, uri, &body.to_string()).await
}

pub async fn post_raw(app: Router, uri: &str, body: &str) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Register a user through the API and assert it succeeded.
pub async fn register(app: &Router, name: &str, email: &str, password: &str) {
    let body = serde_json::json!({ "name": name, "email": email, "password": password });
    let response = post_json(app.clone(), "/users", body).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
}
