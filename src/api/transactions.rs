//! Transaction screening endpoint

use actix_web::{HttpResponse, post, web};

use crate::api::error::{ApiError, ErrorResponse};
use crate::model::{Transaction, TransactionVerdict};
use crate::service::RiskDecisionService;

/// Screen a transaction for ethical concerns
///
/// Flagged transactions receive an alert id and are filed for review.
#[utoipa::path(
    post,
    path = "/v1/transactions/check",
    request_body = Transaction,
    responses(
        (status = 200, description = "Transaction screened", body = TransactionVerdict),
        (status = 400, description = "Malformed transaction", body = ErrorResponse)
    ),
    tag = "transactions"
)]
#[post("/v1/transactions/check")]
pub async fn check_transaction(
    service: web::Data<RiskDecisionService>,
    body: web::Json<Transaction>,
) -> Result<HttpResponse, ApiError> {
    let verdict = service.check_transaction(&body)?;
    Ok(HttpResponse::Ok().json(verdict))
}

/// Configure transaction routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(check_transaction);
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::test;
    use serde_json::{Value, json};

    use crate::api::test_support::{self, init_app};

    fn body(from: &str, to: &str, amount: Value) -> Value {
        json!({
            "fromAccount": from,
            "toAccount": to,
            "paymentType": "cheque",
            "currency": "GBP",
            "amount": amount,
            "timestamp": "2023-03-20T08:00:00Z"
        })
    }

    #[actix_web::test]
    async fn test_ethical_transaction() {
        let state = test_support::state();
        let app = init_app!(state).await;

        let req = test::TestRequest::post()
            .uri("/v1/transactions/check")
            .set_json(body("1234567890", "0987654321", json!(120.5)))
            .to_request();
        let resp: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(resp, json!({ "isEthical": true, "confidence": 0.95 }));
        assert_eq!(state.alerts.len(), 5);
    }

    #[actix_web::test]
    async fn test_flagged_transaction_files_alert() {
        let state = test_support::state();
        let app = init_app!(state).await;

        let req = test::TestRequest::post()
            .uri("/v1/transactions/check")
            .set_json(body("99900011", "0987654321", json!("75.00")))
            .to_request();
        let resp: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(resp["isEthical"], false);
        assert_eq!(resp["confidence"], 0.87);
        assert_eq!(resp["reason"], "High-value transaction with suspicious pattern");
        let alert_id = resp["alertId"].as_str().unwrap();

        let req = test::TestRequest::get()
            .uri(&format!("/v1/alerts/{}", alert_id))
            .to_request();
        let alert: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(alert["status"], "pending");
        assert_eq!(alert["fromAccount"], "99900011");
        assert_eq!(alert["currency"], "GBP");
    }

    #[actix_web::test]
    async fn test_invalid_input() {
        let state = test_support::state();
        let app = init_app!(state).await;

        let cases = [
            body("1234567890", "0987654321", json!(0)),
            body("123", "0987654321", json!(10)),
            body("1234567890", "0987654321", json!("lots")),
            json!({ "fromAccount": "1234567890" }),
        ];

        for case in cases {
            let req = test::TestRequest::post()
                .uri("/v1/transactions/check")
                .set_json(&case)
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{case}");

            let err: Value = test::read_body_json(resp).await;
            assert_eq!(err["error"], "invalid_input");
            assert!(err["request_id"].as_str().is_some());
        }
    }
}
