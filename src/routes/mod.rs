// Route exports
pub mod matches;

use actix_web::{error, http::StatusCode, web, HttpResponse};
use crate::services::MatchStore;

pub use matches::AppState;

pub fn configure_routes<S: MatchStore + 'static>(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(matches::configure::<S>),
    );
}

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST))
            .json(self)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Matcher;
    use crate::services::{MemoryStore, Processor};
    use actix_web::{test, App};
    use std::sync::Arc;

    #[actix_web::test]
    async fn test_malformed_json_is_bad_request() {
        let state = AppState {
            processor: Arc::new(Processor::new(Arc::new(MemoryStore::new()), Matcher::new())),
        };
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
                .configure(configure_routes::<MemoryStore>),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/listings/matches")
            .insert_header(("content-type", "application/json"))
            .set_payload("{\"latitude\": ")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
