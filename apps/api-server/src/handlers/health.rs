//! Health check endpoint.

use actix_web::{HttpResponse, web};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// Active post store backend ("postgres" or "in-memory").
    pub store: &'static str,
    pub timestamp: String,
}

/// Health check endpoint - reports server status and which store
/// backend the engine is running on.
///
/// GET /api/health
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let response = HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        store: state.store_backend,
        timestamp: chrono::Utc::now().to_rfc3339(),
    };

    HttpResponse::Ok().json(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, test};

    #[actix_web::test]
    async fn health_reports_the_active_store_backend() {
        // No database configured, so the in-memory store is wired in.
        let state = AppState::new(None).await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .route("/api/health", web::get().to(health_check)),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/health").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["status"], "ok");
        assert_eq!(body["store"], "in-memory");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }
}
