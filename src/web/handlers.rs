use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analysis::DashboardSnapshot;
use crate::error::DashboardError;
use crate::io::{EXPORT_FILE_NAME, EXPORT_MIME};
use crate::models::FilterSelection;

use super::state::AppState;

// ---------------------------------------------------------------------------
// Error wrapper
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: String,
    pub details: String,
}

#[derive(Debug)]
pub(crate) struct WebError(DashboardError);

impl From<DashboardError> for WebError {
    fn from(e: DashboardError) -> Self {
        WebError(e)
    }
}

impl std::fmt::Display for WebError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl actix_web::ResponseError for WebError {
    fn status_code(&self) -> StatusCode {
        match &self.0 {
            DashboardError::NotFound(_) => StatusCode::NOT_FOUND,
            DashboardError::Config(_) | DashboardError::Json(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        HttpResponse::build(status).json(ErrorBody {
            error: status
                .canonical_reason()
                .unwrap_or("Error")
                .to_string(),
            details: self.0.to_string(),
        })
    }
}

/// Rejects malformed filter bodies with the same JSON error shape.
pub(crate) fn json_error_handler(
    err: actix_web::error::JsonPayloadError,
    _req: &actix_web::HttpRequest,
) -> actix_web::Error {
    let details = err.to_string();
    let response = HttpResponse::BadRequest().json(ErrorBody {
        error: "Bad Request".to_string(),
        details,
    });
    actix_web::error::InternalError::from_response(err, response).into()
}

fn session_not_found(id: &Uuid) -> WebError {
    WebError(DashboardError::NotFound(format!("Session {id} not found")))
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct SessionResponse {
    pub id: Uuid,
    pub selection: FilterSelection,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dashboard: Option<DashboardSnapshot>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

pub(crate) async fn options(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.dataset().filter_options())
}

pub(crate) async fn create_session(state: web::Data<AppState>) -> HttpResponse {
    let (id, session) = state.create_session();
    HttpResponse::Created().json(SessionResponse {
        id,
        selection: session.selection().clone(),
        dashboard: Some(session.recompute()),
    })
}

pub(crate) async fn get_session(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, WebError> {
    let id = path.into_inner();
    let session = state.get_session(&id).ok_or_else(|| session_not_found(&id))?;
    Ok(HttpResponse::Ok().json(SessionResponse {
        id,
        selection: session.selection().clone(),
        dashboard: None,
    }))
}

pub(crate) async fn set_filters(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<FilterSelection>,
) -> Result<HttpResponse, WebError> {
    let id = path.into_inner();
    let selection = body.into_inner();
    let snapshot = state
        .update_session(&id, |session| {
            session.set_selection(selection);
            session.recompute()
        })
        .ok_or_else(|| session_not_found(&id))?;
    Ok(HttpResponse::Ok().json(snapshot))
}

pub(crate) async fn reset(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, WebError> {
    let id = path.into_inner();
    let snapshot = state
        .update_session(&id, |session| {
            session.reset();
            session.recompute()
        })
        .ok_or_else(|| session_not_found(&id))?;
    Ok(HttpResponse::Ok().json(snapshot))
}

pub(crate) async fn dashboard(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, WebError> {
    let id = path.into_inner();
    let session = state.get_session(&id).ok_or_else(|| session_not_found(&id))?;
    Ok(HttpResponse::Ok().json(session.recompute()))
}

pub(crate) async fn records(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, WebError> {
    let id = path.into_inner();
    let session = state.get_session(&id).ok_or_else(|| session_not_found(&id))?;
    Ok(HttpResponse::Ok().json(session.records()))
}

pub(crate) async fn export(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, WebError> {
    let id = path.into_inner();
    let session = state.get_session(&id).ok_or_else(|| session_not_found(&id))?;
    let data = session.export_csv()?;
    Ok(HttpResponse::Ok()
        .content_type(EXPORT_MIME)
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{EXPORT_FILE_NAME}\""),
        ))
        .body(data))
}
