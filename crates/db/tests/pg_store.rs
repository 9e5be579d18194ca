//! Integration tests for the PostgreSQL store adapters.
//!
//! These need a live database (`DATABASE_URL`); run them with
//! `cargo test -p cinerate-db -- --ignored`.

use assert_matches::assert_matches;
use cinerate_core::error::StoreError;
use cinerate_core::password::hash_password;
use cinerate_core::ports::{MovieStore, UserStore};
use cinerate_core::user::{NewSession, NewUser};
use cinerate_db::repositories::{MovieRepo, SessionRepo};
use cinerate_db::{PgMovieStore, PgUserStore};
use sqlx::PgPool;

fn new_user(email: &str, password: &str) -> NewUser {
    NewUser {
        name: "Grace".to_string(),
        email: email.to_string(),
        password_hash: hash_password(password).expect("hashing should succeed"),
    }
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn create_then_exists(pool: PgPool) {
    let store = PgUserStore::new(pool);
    assert!(!store.user_exists("grace@example.com").await.unwrap());

    store
        .create_user(&new_user("grace@example.com", "hopper"))
        .await
        .unwrap();

    assert!(store.user_exists("grace@example.com").await.unwrap());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn duplicate_email_maps_to_duplicate(pool: PgPool) {
    let store = PgUserStore::new(pool);
    store
        .create_user(&new_user("grace@example.com", "hopper"))
        .await
        .unwrap();

    let second = store
        .create_user(&new_user("grace@example.com", "other"))
        .await;
    assert_matches!(second, Err(StoreError::Duplicate(_)));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn credentials_are_verified_against_hash(pool: PgPool) {
    let store = PgUserStore::new(pool);
    store
        .create_user(&new_user("grace@example.com", "hopper"))
        .await
        .unwrap();

    assert!(store
        .check_user_credentials("grace@example.com", "hopper")
        .await
        .unwrap());
    assert!(!store
        .check_user_credentials("grace@example.com", "cobol")
        .await
        .unwrap());
    assert!(!store
        .check_user_credentials("nobody@example.com", "hopper")
        .await
        .unwrap());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn session_is_recorded_for_existing_user(pool: PgPool) {
    let store = PgUserStore::new(pool.clone());
    store
        .create_user(&new_user("grace@example.com", "hopper"))
        .await
        .unwrap();

    let session = NewSession {
        email: "grace@example.com".to_string(),
        token_hash: "a".repeat(64),
        expires_at: chrono::Utc::now() + chrono::Duration::hours(1),
    };
    store.record_session(&session).await.unwrap();

    let count = SessionRepo::count_for_email(&pool, "grace@example.com")
        .await
        .unwrap();
    assert_eq!(count, 1);
}

// ---------------------------------------------------------------------------
// Movies
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn rating_folds_into_running_average(pool: PgPool) {
    MovieRepo::create(&pool, "Ran").await.unwrap();
    let store = PgMovieStore::new(pool);

    assert_eq!(store.update_movie_rating("Ran", 6).await.unwrap(), 6.0);
    assert_eq!(store.update_movie_rating("Ran", 8).await.unwrap(), 7.0);

    let ratings = store.list_movie_ratings().await.unwrap();
    let ran = ratings.iter().find(|m| m.name == "Ran").unwrap();
    assert_eq!(ran.rating_count, 2);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn rating_unknown_movie_is_not_found(pool: PgPool) {
    let store = PgMovieStore::new(pool);
    assert_matches!(
        store.update_movie_rating("No Such Film", 5).await,
        Err(StoreError::MovieNotFound(_))
    );
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn find_title_is_case_insensitive(pool: PgPool) {
    let store = PgMovieStore::new(pool);
    assert_eq!(
        store.find_title("the matrix").await.unwrap().as_deref(),
        Some("The Matrix")
    );
    assert_eq!(store.find_title("matrix").await.unwrap(), None);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn seeded_catalog_is_listed(pool: PgPool) {
    let store = PgMovieStore::new(pool);
    let names = store.list_movies().await.unwrap();

    assert_eq!(names.len(), cinerate_db::memory::SEED_CATALOG.len());
    assert!(names.contains(&"Casablanca".to_string()));
}
