use actix_web::web::{self, Data};
use actix_web::HttpResponse;
use serde_json::json;
use std::collections::HashMap;

use super::error_response;
use crate::service::{current_handicap, player_history};
use crate::storage::Storage;
use crate::view::history::render_history_page;

fn user_param(query: &HashMap<String, String>) -> Option<String> {
    query
        .get("user")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn missing_user() -> HttpResponse {
    HttpResponse::BadRequest().json(json!({"error": "user parameter is required"}))
}

pub async fn handicap(
    query: web::Query<HashMap<String, String>>,
    storage: Data<dyn Storage>,
) -> HttpResponse {
    let Some(user_id) = user_param(&query) else {
        return missing_user();
    };

    match current_handicap(storage.get_ref(), &user_id).await {
        Ok(player) => HttpResponse::Ok().json(json!({
            "user_id": player.user_id,
            "name": player.name,
            "handicap_index": player.handicap_index,
        })),
        Err(e) => error_response(&e),
    }
}

pub async fn history(
    query: web::Query<HashMap<String, String>>,
    storage: Data<dyn Storage>,
) -> HttpResponse {
    let Some(user_id) = user_param(&query) else {
        return missing_user();
    };

    let json = match query.get("json").map(String::as_str) {
        Some("1") => true,
        Some("0") | None => false,
        Some(other) => other.parse().unwrap_or(false),
    };

    let player = match current_handicap(storage.get_ref(), &user_id).await {
        Ok(player) => player,
        Err(e) => return error_response(&e),
    };
    match player_history(storage.get_ref(), &player).await {
        Ok(history) if json => HttpResponse::Ok().json(history),
        Ok(history) => HttpResponse::Ok()
            .content_type("text/html")
            .body(render_history_page(&player, &history).into_string()),
        Err(e) => error_response(&e),
    }
}
