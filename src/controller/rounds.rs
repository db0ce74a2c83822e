use actix_web::web::{self, Data};
use actix_web::HttpResponse;
use serde::Deserialize;

use super::error_response;
use crate::model::NewRound;
use crate::service;
use crate::storage::Storage;

#[derive(Deserialize, Debug)]
pub struct DeleteRoundsRequest {
    pub round_ids: Vec<i64>,
}

pub async fn create(body: web::Json<NewRound>, storage: Data<dyn Storage>) -> HttpResponse {
    match service::create_round(storage.get_ref(), body.into_inner()).await {
        Ok(mutation) => HttpResponse::Created().json(mutation),
        Err(e) => error_response(&e),
    }
}

pub async fn create_batch(
    body: web::Json<Vec<NewRound>>,
    storage: Data<dyn Storage>,
) -> HttpResponse {
    match service::create_rounds_batch(storage.get_ref(), body.into_inner()).await {
        Ok(batch) => HttpResponse::Created().json(batch),
        Err(e) => error_response(&e),
    }
}

pub async fn delete(path: web::Path<i64>, storage: Data<dyn Storage>) -> HttpResponse {
    match service::delete_round(storage.get_ref(), path.into_inner()).await {
        Ok(mutation) => HttpResponse::Ok().json(mutation),
        Err(e) => error_response(&e),
    }
}

pub async fn delete_batch(
    body: web::Json<DeleteRoundsRequest>,
    storage: Data<dyn Storage>,
) -> HttpResponse {
    match service::delete_rounds_batch(storage.get_ref(), &body.round_ids).await {
        Ok(batch) => HttpResponse::Ok().json(batch),
        Err(e) => error_response(&e),
    }
}
