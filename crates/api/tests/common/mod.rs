//! Shared helpers for the API integration tests: router construction
//! mirroring `main.rs`, HTTP convenience wrappers, and database fixtures.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, Response, StatusCode};
use axum::Router;
use chrono::NaiveDate;
use sqlx::PgPool;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use officely_api::auth::jwt::{generate_token, JwtConfig};
use officely_api::config::ServerConfig;
use officely_api::notify::RecordingDispatcher;
use officely_api::routes;
use officely_api::state::AppState;
use officely_api::storage::LocalStorage;
use officely_core::scopes::Scope;
use officely_core::types::DbId;
use officely_db::lock::PgAdvisoryLock;
use officely_db::models::image::Image;
use officely_db::models::office::Office;
use officely_db::models::tag::Tag;
use officely_db::models::user::User;
use officely_db::repositories::{ImageRepo, TagRepo, UserRepo};

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        storage_root: std::env::temp_dir().join("officely-test-storage"),
        jwt: JwtConfig {
            secret: "test-secret".to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    let (app, _) = build_test_app_recording(pool);
    app
}

/// Like [`build_test_app`], but also returns the recording notification
/// dispatcher so tests can assert on dispatched notifications.
pub fn build_test_app_recording(pool: PgPool) -> (Router, Arc<RecordingDispatcher>) {
    let config = test_config();
    let notifier = Arc::new(RecordingDispatcher::default());

    let state = AppState {
        pool: pool.clone(),
        config: Arc::new(config.clone()),
        lock: Arc::new(PgAdvisoryLock::new(pool)),
        storage: Arc::new(LocalStorage::new(config.storage_root)),
        notifier: notifier.clone(),
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    let app = Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state);

    (app, notifier)
}

// ---------------------------------------------------------------------------
// Tokens
// ---------------------------------------------------------------------------

/// Sign an access token for `user_id` carrying the given scopes, using the
/// fixed test secret.
pub fn token_for(user_id: DbId, scopes: Vec<Scope>) -> String {
    generate_token(user_id, scopes, &test_config().jwt).unwrap()
}

/// Token carrying every scope, for tests not concerned with capabilities.
pub fn full_token(user_id: DbId) -> String {
    token_for(user_id, Scope::all())
}

// ---------------------------------------------------------------------------
// HTTP helpers
// ---------------------------------------------------------------------------

/// Send a GET request to the app.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a GET request with a Bearer token.
pub async fn get_authed(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST request with a JSON body and a Bearer token.
pub async fn post_json(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a PUT request with a JSON body and a Bearer token.
pub async fn put_json(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method(Method::PUT)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a DELETE request with a Bearer token.
pub async fn delete(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    use http_body_util::BodyExt;
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap_or_else(|e| {
        panic!(
            "response body is not JSON: {e}: {}",
            String::from_utf8_lossy(&bytes)
        )
    })
}

// ---------------------------------------------------------------------------
// Date helpers
// ---------------------------------------------------------------------------

/// Today plus `n` days, in UTC.
pub fn days_ahead(n: i64) -> NaiveDate {
    chrono::Utc::now().date_naive() + chrono::Duration::days(n)
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Insert a user with a derived email address.
pub async fn create_user(pool: &PgPool, name: &str, is_admin: bool) -> User {
    let email = format!("{}@example.test", name.to_lowercase().replace(' ', "."));
    UserRepo::create(pool, name, &email, is_admin).await.unwrap()
}

/// Insert an office directly, bypassing the handler's forced-pending rule
/// so fixtures can start in any approval state.
pub async fn create_office(
    pool: &PgPool,
    user_id: DbId,
    approval_status: &str,
    hidden: bool,
) -> Office {
    sqlx::query_as::<_, Office>(
        "INSERT INTO offices
            (user_id, title, description, lat, lng, price_per_day, monthly_discount,
             approval_status, hidden)
         VALUES ($1, 'Test office', 'A test office', 52.372, 4.900, 1000, 0,
                 $2::approval_status, $3)
         RETURNING id, user_id, title, description, address_line1, lat, lng,
                   price_per_day, monthly_discount, approval_status, hidden,
                   featured_image_id, deleted_at, created_at, updated_at",
    )
    .bind(user_id)
    .bind(approval_status)
    .bind(hidden)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Insert an approved, visible office at a specific coordinate and price.
pub async fn create_office_at(
    pool: &PgPool,
    user_id: DbId,
    lat: f64,
    lng: f64,
    price_per_day: i64,
    monthly_discount: i32,
) -> Office {
    sqlx::query_as::<_, Office>(
        "INSERT INTO offices
            (user_id, title, description, lat, lng, price_per_day, monthly_discount,
             approval_status, hidden)
         VALUES ($1, 'Test office', 'A test office', $2, $3, $4, $5, 'approved', FALSE)
         RETURNING id, user_id, title, description, address_line1, lat, lng,
                   price_per_day, monthly_discount, approval_status, hidden,
                   featured_image_id, deleted_at, created_at, updated_at",
    )
    .bind(user_id)
    .bind(lat)
    .bind(lng)
    .bind(price_per_day)
    .bind(monthly_discount)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Insert a reservation directly with the given status.
pub async fn create_reservation(
    pool: &PgPool,
    office_id: DbId,
    user_id: DbId,
    start_date: NaiveDate,
    end_date: NaiveDate,
    status: &str,
) -> DbId {
    sqlx::query_scalar::<_, DbId>(
        "INSERT INTO reservations (office_id, user_id, start_date, end_date, status, price)
         VALUES ($1, $2, $3, $4, $5::reservation_status, 1000)
         RETURNING id",
    )
    .bind(office_id)
    .bind(user_id)
    .bind(start_date)
    .bind(end_date)
    .bind(status)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Insert an image row for an office.
pub async fn create_image(pool: &PgPool, office_id: DbId, path: &str) -> Image {
    ImageRepo::create(pool, office_id, path).await.unwrap()
}

/// Insert a tag.
pub async fn create_tag(pool: &PgPool, name: &str) -> Tag {
    TagRepo::create(pool, name).await.unwrap()
}

/// Mark an image as the office's featured image.
pub async fn set_featured_image(pool: &PgPool, office_id: DbId, image_id: DbId) {
    sqlx::query("UPDATE offices SET featured_image_id = $2 WHERE id = $1")
        .bind(office_id)
        .bind(image_id)
        .execute(pool)
        .await
        .unwrap();
}
