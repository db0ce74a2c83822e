pub mod db_prefill;
pub mod handicap;
pub mod rounds;

use actix_web::{HttpResponse, web};
use serde_json::json;

use crate::error::CoreError;

/// Registers every route. Expects `Data<dyn Storage>` in app data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(HttpResponse::Ok))
        .route("/handicap", web::get().to(handicap::handicap))
        .route("/history", web::get().to(handicap::history))
        .route("/rounds", web::post().to(rounds::create))
        .route("/rounds/batch", web::post().to(rounds::create_batch))
        .route("/rounds/delete", web::post().to(rounds::delete_batch))
        .route("/rounds/{round_id}", web::delete().to(rounds::delete));
}

#[must_use]
pub fn error_response(err: &CoreError) -> HttpResponse {
    let body = json!({"error": err.to_string()});
    match err {
        CoreError::Validation(_) | CoreError::Parse(_) => HttpResponse::BadRequest().json(body),
        CoreError::NotFound(_) => HttpResponse::NotFound().json(body),
        CoreError::Storage(_) | CoreError::Other(_) => {
            log::error!("request failed: {err}");
            HttpResponse::InternalServerError().json(body)
        }
    }
}
