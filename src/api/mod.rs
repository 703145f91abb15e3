//! HTTP surface for the hierarchy engine.
//!
//! JSON endpoints mapping one-to-one onto the engine operations. The caller
//! identity arrives as a bearer subject minted by an external identity
//! provider; this boundary trusts it. `GET /documents/{id}` is the only
//! anonymous-capable route (published documents are public reads).

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{FromRequestParts, Path, Query, State};
use axum::http::{header, request::Parts, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::sync::Mutex;
use tracing::info;
use uuid::Uuid;

use crate::engine::HierarchyEngine;
use crate::error::{QuillError, Result};
use crate::model::{Document, DocumentUpdate, ReorderPosition, Workspace};

pub type SharedEngine = Arc<Mutex<HierarchyEngine>>;

impl IntoResponse for QuillError {
    fn into_response(self) -> Response {
        let status = match &self {
            QuillError::NotAuthenticated => StatusCode::UNAUTHORIZED,
            QuillError::Unauthorized => StatusCode::FORBIDDEN,
            QuillError::NotFound(_) => StatusCode::NOT_FOUND,
            QuillError::InvalidScope(_) | QuillError::InvalidInput(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Authenticated subject extracted from `Authorization: Bearer <subject>`.
pub struct AuthUser(pub String);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = QuillError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        bearer_subject(&parts.headers)
            .map(AuthUser)
            .ok_or(QuillError::NotAuthenticated)
    }
}

fn bearer_subject(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let subject = value
        .strip_prefix("Bearer ")
        .or_else(|| value.strip_prefix("bearer "))?
        .trim();
    if subject.is_empty() {
        None
    } else {
        Some(subject.to_string())
    }
}

pub fn router(engine: SharedEngine) -> Router {
    Router::new()
        .route("/documents", post(create_document).get(list_documents))
        .route("/documents/trash", get(list_trash))
        .route("/documents/reorder", post(reorder_documents))
        .route(
            "/documents/{id}",
            get(get_document).patch(update_document).delete(remove_document),
        )
        .route("/documents/{id}/archive", post(archive_document))
        .route("/documents/{id}/restore", post(restore_document))
        .route("/search", get(search))
        .route("/workspaces", post(create_workspace).get(list_workspaces))
        .route("/workspaces/{id}", delete(remove_workspace))
        .route("/workspaces/{id}/archive", post(archive_workspace))
        .with_state(engine)
}

/// Run the API until the listener fails or the process is stopped.
pub async fn serve(engine: HierarchyEngine, addr: SocketAddr) -> Result<()> {
    let shared: SharedEngine = Arc::new(Mutex::new(engine));
    let app = router(shared);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "quill api listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;
    Ok(())
}

// ----- documents -----

#[derive(Debug, Deserialize)]
struct CreateDocumentBody {
    title: Option<String>,
    parent_id: Option<Uuid>,
    workspace_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
struct CreatedResponse {
    id: Uuid,
}

async fn create_document(
    State(engine): State<SharedEngine>,
    AuthUser(user): AuthUser,
    Json(body): Json<CreateDocumentBody>,
) -> Result<impl IntoResponse> {
    let engine = engine.lock().await;
    let doc = engine.create_document(
        &user,
        body.title.as_deref().unwrap_or(""),
        body.parent_id,
        body.workspace_id,
    )?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id: doc.id })))
}

#[derive(Debug, Deserialize)]
struct ListQuery {
    parent: Option<Uuid>,
    workspace: Option<Uuid>,
}

async fn list_documents(
    State(engine): State<SharedEngine>,
    AuthUser(user): AuthUser,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Document>>> {
    let engine = engine.lock().await;
    let docs = engine.list_children(&user, query.parent.as_ref(), query.workspace.as_ref())?;
    Ok(Json(docs))
}

async fn list_trash(
    State(engine): State<SharedEngine>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<Document>>> {
    let engine = engine.lock().await;
    Ok(Json(engine.list_trash(&user)?))
}

async fn get_document(
    State(engine): State<SharedEngine>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<Document>> {
    // Anonymous reads are allowed here; the engine decides whether the
    // document is public.
    let caller = bearer_subject(&headers);
    let engine = engine.lock().await;
    Ok(Json(engine.get_document(caller.as_deref(), &id)?))
}

async fn update_document(
    State(engine): State<SharedEngine>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
    Json(update): Json<DocumentUpdate>,
) -> Result<Json<Document>> {
    let engine = engine.lock().await;
    Ok(Json(engine.update_document(&user, &id, update)?))
}

async fn archive_document(
    State(engine): State<SharedEngine>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Document>> {
    let engine = engine.lock().await;
    Ok(Json(engine.archive_document(&user, &id)?))
}

async fn restore_document(
    State(engine): State<SharedEngine>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Document>> {
    let engine = engine.lock().await;
    Ok(Json(engine.restore_document(&user, &id)?))
}

async fn remove_document(
    State(engine): State<SharedEngine>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Document>> {
    let engine = engine.lock().await;
    Ok(Json(engine.remove_document(&user, &id)?))
}

#[derive(Debug, Deserialize)]
struct ReorderBody {
    document_id: Uuid,
    target_id: Uuid,
    position: ReorderPosition,
}

#[derive(Debug, Serialize)]
struct OkResponse {
    ok: bool,
}

async fn reorder_documents(
    State(engine): State<SharedEngine>,
    AuthUser(user): AuthUser,
    Json(body): Json<ReorderBody>,
) -> Result<Json<OkResponse>> {
    let engine = engine.lock().await;
    engine.reorder_documents(&user, &body.document_id, &body.target_id, body.position)?;
    Ok(Json(OkResponse { ok: true }))
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    q: String,
}

async fn search(
    State(engine): State<SharedEngine>,
    AuthUser(user): AuthUser,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<Document>>> {
    let engine = engine.lock().await;
    Ok(Json(engine.search(&user, &query.q)?))
}

// ----- workspaces -----

#[derive(Debug, Deserialize)]
struct CreateWorkspaceBody {
    name: String,
    description: Option<String>,
    icon: Option<String>,
}

async fn create_workspace(
    State(engine): State<SharedEngine>,
    AuthUser(user): AuthUser,
    Json(body): Json<CreateWorkspaceBody>,
) -> Result<impl IntoResponse> {
    let engine = engine.lock().await;
    let ws = engine.create_workspace(&user, &body.name, body.description, body.icon)?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id: ws.id })))
}

async fn list_workspaces(
    State(engine): State<SharedEngine>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<Workspace>>> {
    let engine = engine.lock().await;
    Ok(Json(engine.list_workspaces(&user, false)?))
}

async fn archive_workspace(
    State(engine): State<SharedEngine>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Workspace>> {
    let engine = engine.lock().await;
    Ok(Json(engine.archive_workspace(&user, &id)?))
}

async fn remove_workspace(
    State(engine): State<SharedEngine>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Workspace>> {
    let engine = engine.lock().await;
    Ok(Json(engine.remove_workspace(&user, &id)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, value.parse().unwrap());
        headers
    }

    #[test]
    fn test_bearer_subject_parses() {
        assert_eq!(
            bearer_subject(&headers_with("Bearer alice")),
            Some("alice".to_string())
        );
        assert_eq!(
            bearer_subject(&headers_with("bearer bob ")),
            Some("bob".to_string())
        );
    }

    #[test]
    fn test_bearer_subject_rejects_malformed() {
        assert_eq!(bearer_subject(&HeaderMap::new()), None);
        assert_eq!(bearer_subject(&headers_with("Basic alice")), None);
        assert_eq!(bearer_subject(&headers_with("Bearer ")), None);
    }
}
