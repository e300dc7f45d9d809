// Stay Catalog - Web Server
// REST API over the catalog facade with Axum

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use serde::Serialize;
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use stay_catalog::{CatalogError, CatalogFacade, EntityKind, Patch};

/// Shared application state
#[derive(Clone)]
struct AppState {
    facade: CatalogFacade,
}

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn err(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
        }
    }
}

/// Map a catalog error to its HTTP status plus wrapped body.
/// Missing targets are 404, everything else is a caller mistake.
fn error_response(err: CatalogError) -> (StatusCode, Json<ApiResponse<Value>>) {
    let status = if err.is_not_found() {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::BAD_REQUEST
    };
    (status, Json(ApiResponse::err(err.to_string())))
}

/// The facade works on JSON objects; anything else is rejected up front.
fn object_payload(body: &Value) -> Result<Patch, (StatusCode, Json<ApiResponse<Value>>)> {
    body.as_object().cloned().ok_or((
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::err("payload must be a JSON object".to_string())),
    ))
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// POST /api/v1/users - Register an account
async fn create_user(State(state): State<AppState>, Json(body): Json<Value>) -> impl IntoResponse {
    let payload = match object_payload(&body) {
        Ok(payload) => payload,
        Err(rejection) => return rejection.into_response(),
    };
    match state.facade.create_account(&payload) {
        Ok(account) => (StatusCode::CREATED, Json(ApiResponse::ok(account))).into_response(),
        Err(err) => error_response(err).into_response(),
    }
}

/// GET /api/v1/users - All accounts
async fn list_users(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::ok(state.facade.get_all_accounts()))
}

/// GET /api/v1/users/:id - One account
async fn get_user(State(state): State<AppState>, Path(id): Path<String>) -> impl IntoResponse {
    match state.facade.get_account(&id) {
        Some(account) => (StatusCode::OK, Json(ApiResponse::ok(account))).into_response(),
        None => error_response(CatalogError::not_found(EntityKind::Account, id)).into_response(),
    }
}

/// PUT /api/v1/users/:id - Update an account, returning the new snapshot
async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    let payload = match object_payload(&body) {
        Ok(payload) => payload,
        Err(rejection) => return rejection.into_response(),
    };
    if let Err(err) = state.facade.update_account(&id, &payload) {
        return error_response(err).into_response();
    }
    match state.facade.get_account(&id) {
        Some(account) => (StatusCode::OK, Json(ApiResponse::ok(account))).into_response(),
        None => error_response(CatalogError::not_found(EntityKind::Account, id)).into_response(),
    }
}

/// POST /api/v1/amenities - Register an amenity
async fn create_amenity(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    let payload = match object_payload(&body) {
        Ok(payload) => payload,
        Err(rejection) => return rejection.into_response(),
    };
    match state.facade.create_amenity(&payload) {
        Ok(amenity) => (StatusCode::CREATED, Json(ApiResponse::ok(amenity))).into_response(),
        Err(err) => error_response(err).into_response(),
    }
}

/// GET /api/v1/amenities - All amenities
async fn list_amenities(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::ok(state.facade.get_all_amenities()))
}

/// GET /api/v1/amenities/:id - One amenity
async fn get_amenity(State(state): State<AppState>, Path(id): Path<String>) -> impl IntoResponse {
    match state.facade.get_amenity(&id) {
        Some(amenity) => (StatusCode::OK, Json(ApiResponse::ok(amenity))).into_response(),
        None => error_response(CatalogError::not_found(EntityKind::Amenity, id)).into_response(),
    }
}

/// PUT /api/v1/amenities/:id - Update an amenity
async fn update_amenity(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    let payload = match object_payload(&body) {
        Ok(payload) => payload,
        Err(rejection) => return rejection.into_response(),
    };
    if let Err(err) = state.facade.update_amenity(&id, &payload) {
        return error_response(err).into_response();
    }
    match state.facade.get_amenity(&id) {
        Some(amenity) => (StatusCode::OK, Json(ApiResponse::ok(amenity))).into_response(),
        None => error_response(CatalogError::not_found(EntityKind::Amenity, id)).into_response(),
    }
}

/// POST /api/v1/places - List a place
async fn create_place(State(state): State<AppState>, Json(body): Json<Value>) -> impl IntoResponse {
    let payload = match object_payload(&body) {
        Ok(payload) => payload,
        Err(rejection) => return rejection.into_response(),
    };
    match state.facade.create_place(&payload) {
        Ok(place) => (StatusCode::CREATED, Json(ApiResponse::ok(place))).into_response(),
        Err(err) => error_response(err).into_response(),
    }
}

/// GET /api/v1/places - All places, relations unresolved
async fn list_places(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::ok(state.facade.get_all_places()))
}

/// GET /api/v1/places/:id - One place with owner and amenities resolved
async fn get_place(State(state): State<AppState>, Path(id): Path<String>) -> impl IntoResponse {
    match state.facade.get_place(&id) {
        Some(view) => (StatusCode::OK, Json(ApiResponse::ok(view))).into_response(),
        None => error_response(CatalogError::not_found(EntityKind::Place, id)).into_response(),
    }
}

/// PUT /api/v1/places/:id - Update a place, returning the resolved view
async fn update_place(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    let payload = match object_payload(&body) {
        Ok(payload) => payload,
        Err(rejection) => return rejection.into_response(),
    };
    if let Err(err) = state.facade.update_place(&id, &payload) {
        return error_response(err).into_response();
    }
    match state.facade.get_place(&id) {
        Some(view) => (StatusCode::OK, Json(ApiResponse::ok(view))).into_response(),
        None => error_response(CatalogError::not_found(EntityKind::Place, id)).into_response(),
    }
}

/// GET /api/v1/places/:id/reviews - Reviews recorded on a place
async fn get_place_reviews(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.facade.get_reviews_by_place(&id) {
        Some(summaries) => (StatusCode::OK, Json(ApiResponse::ok(summaries))).into_response(),
        None => error_response(CatalogError::not_found(EntityKind::Place, id)).into_response(),
    }
}

/// POST /api/v1/reviews - Record a review
async fn create_review(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    let payload = match object_payload(&body) {
        Ok(payload) => payload,
        Err(rejection) => return rejection.into_response(),
    };
    match state.facade.create_review(&payload) {
        Ok(review) => (StatusCode::CREATED, Json(ApiResponse::ok(review))).into_response(),
        Err(err) => error_response(err).into_response(),
    }
}

/// GET /api/v1/reviews - All reviews
async fn list_reviews(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::ok(state.facade.get_all_reviews()))
}

/// GET /api/v1/reviews/:id - One review
async fn get_review(State(state): State<AppState>, Path(id): Path<String>) -> impl IntoResponse {
    match state.facade.get_review(&id) {
        Some(review) => (StatusCode::OK, Json(ApiResponse::ok(review))).into_response(),
        None => error_response(CatalogError::not_found(EntityKind::Review, id)).into_response(),
    }
}

/// PUT /api/v1/reviews/:id - Update a review's text or rating
async fn update_review(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    let payload = match object_payload(&body) {
        Ok(payload) => payload,
        Err(rejection) => return rejection.into_response(),
    };
    if let Err(err) = state.facade.update_review(&id, &payload) {
        return error_response(err).into_response();
    }
    match state.facade.get_review(&id) {
        Some(review) => (StatusCode::OK, Json(ApiResponse::ok(review))).into_response(),
        None => error_response(CatalogError::not_found(EntityKind::Review, id)).into_response(),
    }
}

/// DELETE /api/v1/reviews/:id - Delete a review and detach it from its place
async fn delete_review(State(state): State<AppState>, Path(id): Path<String>) -> impl IntoResponse {
    match state.facade.delete_review(&id) {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse::ok(json!({ "message": "Review deleted successfully" }))),
        )
            .into_response(),
        Err(err) => error_response(err).into_response(),
    }
}

// ============================================================================
// Main Server
// ============================================================================

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();

    println!("🌐 Stay Catalog - Web Server");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    // Create shared state
    let state = AppState {
        facade: CatalogFacade::new(),
    };

    // Build API routes
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/v1/users", get(list_users).post(create_user))
        .route("/v1/users/:id", get(get_user).put(update_user))
        .route("/v1/amenities", get(list_amenities).post(create_amenity))
        .route("/v1/amenities/:id", get(get_amenity).put(update_amenity))
        .route("/v1/places", get(list_places).post(create_place))
        .route("/v1/places/:id", get(get_place).put(update_place))
        .route("/v1/places/:id/reviews", get(get_place_reviews))
        .route("/v1/reviews", get(list_reviews).post(create_review))
        .route(
            "/v1/reviews/:id",
            get(get_review).put(update_review).delete(delete_review),
        )
        .with_state(state);

    // Build main router
    let app = Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Start server
    let addr = "0.0.0.0:3000";
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    println!("\n🚀 Server running on http://localhost:3000");
    println!("   API: http://localhost:3000/api/v1/places");
    println!("   Health: http://localhost:3000/api/health");
    println!("\n   Press Ctrl+C to stop\n");

    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}
