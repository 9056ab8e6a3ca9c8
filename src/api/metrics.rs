//! Model performance endpoints

use actix_web::{HttpResponse, get, post, web};

use crate::model::{ModelMetric, RetrainResult};
use crate::service::MetricsRegistry;

/// Performance metrics of every detection model
#[utoipa::path(
    get,
    path = "/v1/metrics/models",
    responses(
        (status = 200, description = "Model metrics", body = Vec<ModelMetric>)
    ),
    tag = "metrics"
)]
#[get("/v1/metrics/models")]
pub async fn list_model_metrics(registry: web::Data<MetricsRegistry>) -> HttpResponse {
    HttpResponse::Ok().json(registry.list())
}

/// Request retraining of the detection models
///
/// Returns as soon as the request is accepted.
#[utoipa::path(
    post,
    path = "/v1/metrics/retrain",
    responses(
        (status = 200, description = "Retraining requested", body = RetrainResult)
    ),
    tag = "metrics"
)]
#[post("/v1/metrics/retrain")]
pub async fn retrain_model(registry: web::Data<MetricsRegistry>) -> HttpResponse {
    HttpResponse::Ok().json(registry.trigger_retrain())
}

/// Configure metrics routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_model_metrics).service(retrain_model);
}
