//! REST API endpoints for alert review

use actix_web::{HttpResponse, get, put, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::api::error::{ApiError, ErrorResponse};
use crate::model::{Alert, AlertFilter, AlertStatus, StatusFilter};
use crate::service::AlertStore;

/// Query parameters for listing alerts
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListAlertsParams {
    /// Case-insensitive match against alert id, transaction id and accounts
    pub search: Option<String>,
    /// Status to keep (pending, under_review, resolved, escalated or all)
    pub status: Option<StatusFilter>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStatusRequest {
    /// One of pending, under_review, resolved or escalated. Unknown strings
    /// are `invalid_status`; a non-string value is `invalid_input`.
    pub status: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UpdateStatusResponse {
    pub success: bool,
    pub alert: Alert,
}

/// Review actions available for an alert
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AlertTransitions {
    pub id: String,
    pub status: AlertStatus,
    pub next: Vec<AlertStatus>,
    /// No further review action is possible
    pub terminal: bool,
    /// Whether other status changes are rejected
    pub enforced: bool,
}

/// List alerts
#[utoipa::path(
    get,
    path = "/v1/alerts",
    params(ListAlertsParams),
    responses(
        (status = 200, description = "Alerts in insertion order", body = Vec<Alert>),
        (status = 400, description = "Unknown status filter", body = ErrorResponse)
    ),
    tag = "alerts"
)]
#[get("/v1/alerts")]
pub async fn list_alerts(
    store: web::Data<AlertStore>,
    query: web::Query<ListAlertsParams>,
) -> HttpResponse {
    let query = query.into_inner();
    let filter = AlertFilter {
        search_term: query.search,
        status: query.status.unwrap_or_default(),
    };

    tracing::debug!(search = ?filter.search_term, status = ?filter.status, "Listing alerts");

    HttpResponse::Ok().json(store.list(&filter))
}

/// Get an alert by ID
#[utoipa::path(
    get,
    path = "/v1/alerts/{id}",
    params(
        ("id" = String, Path, description = "Alert ID")
    ),
    responses(
        (status = 200, description = "Alert retrieved", body = Alert),
        (status = 404, description = "Alert not found", body = ErrorResponse)
    ),
    tag = "alerts"
)]
#[get("/v1/alerts/{id}")]
pub async fn get_alert(
    store: web::Data<AlertStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let alert = store.get(&path.into_inner())?;
    Ok(HttpResponse::Ok().json(alert))
}

/// List the status changes offered for an alert
#[utoipa::path(
    get,
    path = "/v1/alerts/{id}/transitions",
    params(
        ("id" = String, Path, description = "Alert ID")
    ),
    responses(
        (status = 200, description = "Available transitions", body = AlertTransitions),
        (status = 404, description = "Alert not found", body = ErrorResponse)
    ),
    tag = "alerts"
)]
#[get("/v1/alerts/{id}/transitions")]
pub async fn get_alert_transitions(
    store: web::Data<AlertStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let alert = store.get(&path.into_inner())?;
    Ok(HttpResponse::Ok().json(AlertTransitions {
        next: alert.status.next_statuses(),
        terminal: alert.status.is_terminal(),
        status: alert.status,
        id: alert.id,
        enforced: store.enforces_transitions(),
    }))
}

/// Update the review status of an alert
#[utoipa::path(
    put,
    path = "/v1/alerts/{id}/status",
    params(
        ("id" = String, Path, description = "Alert ID")
    ),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = UpdateStatusResponse),
        (status = 400, description = "Unknown status", body = ErrorResponse),
        (status = 404, description = "Alert not found", body = ErrorResponse),
        (status = 409, description = "Transition not allowed", body = ErrorResponse)
    ),
    tag = "alerts"
)]
#[put("/v1/alerts/{id}/status")]
pub async fn update_alert_status(
    store: web::Data<AlertStore>,
    path: web::Path<String>,
    body: web::Json<UpdateStatusRequest>,
) -> Result<HttpResponse, ApiError> {
    let status: AlertStatus = body.status.parse()?;
    let alert = store.update_status(&path.into_inner(), status)?;

    Ok(HttpResponse::Ok().json(UpdateStatusResponse {
        success: true,
        alert,
    }))
}

/// Configure alert routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_alerts)
        .service(get_alert_transitions)
        .service(get_alert)
        .service(update_alert_status);
}
