use axum::{
    extract::State,
    http::{Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};

use crate::errors::ServiceError;

mod documents;

pub(crate) use documents::router as document_routes;

use super::state::ServeState;

pub const ROOT_MESSAGE: &str = "TB Notification Expiry System Running";

pub fn build_router(state: ServeState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .merge(document_routes())
        .layer(cors_layer())
        .with_state(state)
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
}

async fn root_handler() -> Json<Value> {
    Json(json!({ "message": ROOT_MESSAGE }))
}

async fn health_handler(State(state): State<ServeState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "documents": state.catalog().len(),
    }))
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> axum::response::Response {
        let status = StatusCode::from_u16(self.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let message = self.user_message();
        let body = Json(json!({
            "detail": message,
            "error": {
                "code": self.code(),
                "message": message,
            }
        }));
        (status, body).into_response()
    }
}
