use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use freshness_gate::Evaluation;
use tb_expiry_core_types::RecordId;
use tracing::{debug, instrument};

use crate::catalog::UseOutcome;
use crate::errors::ServiceError;
use crate::server::ServeState;

pub(crate) fn router() -> Router<ServeState> {
    Router::new()
        .route("/documents", get(list_documents_handler))
        .route("/documents/:doc_id/use", post(use_document_handler))
}

async fn list_documents_handler(State(state): State<ServeState>) -> Json<Vec<Evaluation>> {
    let documents = state.catalog().list_documents();
    debug!(count = documents.len(), "listing documents");
    Json(documents)
}

#[instrument(skip(state))]
async fn use_document_handler(
    State(state): State<ServeState>,
    Path(doc_id): Path<String>,
) -> Result<Json<UseOutcome>, ServiceError> {
    let id: RecordId = doc_id.parse().map_err(|_| ServiceError::NotFound(None))?;
    state.catalog().use_document(id).map(Json)
}
