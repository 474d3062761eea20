use actix_web::{web, HttpResponse, Responder};
use crate::models::{ErrorResponse, HealthResponse, MatchesResponse, NewListing, NewRequirement};
use crate::services::{MatchStore, ProcessError, Processor};
use std::sync::Arc;

/// Application state shared across all handlers
pub struct AppState<S> {
    pub processor: Arc<Processor<S>>,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            processor: Arc::clone(&self.processor),
        }
    }
}

/// Configure all match-related routes
pub fn configure<S: MatchStore + 'static>(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check::<S>))
        .route("/listings/matches", web::post().to(match_listing::<S>))
        .route("/requirements/matches", web::post().to(match_requirement::<S>));
}

/// Health check endpoint
async fn health_check<S: MatchStore + 'static>(state: web::Data<AppState<S>>) -> impl Responder {
    let store_healthy = state.processor.store().health_check().await.unwrap_or(false);

    let status = if store_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Match a new listing against stored requirements
///
/// POST /api/v1/listings/matches
///
/// Request body:
/// ```json
/// {
///   "latitude": 40.0,
///   "longitude": -73.0,
///   "price": 500000,
///   "bedrooms": 3,
///   "bathrooms": 2
/// }
/// ```
async fn match_listing<S: MatchStore + 'static>(
    state: web::Data<AppState<S>>,
    req: web::Json<NewListing>,
) -> impl Responder {
    match state.processor.match_listing(req.into_inner()).await {
        Ok(result) => HttpResponse::Ok().json(MatchesResponse {
            matches: result.matches,
            total_candidates: result.total_candidates,
        }),
        Err(e) => error_response(e),
    }
}

/// Match a new requirement against stored listings
///
/// POST /api/v1/requirements/matches
///
/// Request body (each min/max pair needs at least one bound):
/// ```json
/// {
///   "latitude": 40.0,
///   "longitude": -73.0,
///   "minBudget": 450000,
///   "maxBudget": 550000,
///   "minBedrooms": 2,
///   "maxBathrooms": 3
/// }
/// ```
async fn match_requirement<S: MatchStore + 'static>(
    state: web::Data<AppState<S>>,
    req: web::Json<NewRequirement>,
) -> impl Responder {
    match state.processor.match_requirement(req.into_inner()).await {
        Ok(result) => HttpResponse::Ok().json(MatchesResponse {
            matches: result.matches,
            total_candidates: result.total_candidates,
        }),
        Err(e) => error_response(e),
    }
}

fn error_response(err: ProcessError) -> HttpResponse {
    match err {
        ProcessError::Validation(errors) => HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        }),
        ProcessError::Store(e) => {
            tracing::error!("Store failure while matching: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Store failure".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}
