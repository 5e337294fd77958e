use actix_web::{
    dev::{ServiceFactory, ServiceRequest},
    web, App, Error,
};
use rusty_paths::{PathStats, PathStore};
use serde::Serialize;

use crate::error::ApiError;

pub fn services<S, T>(app: App<T>) -> App<T>
where
    S: PathStore + 'static,
    T: ServiceFactory<ServiceRequest, Config = (), Error = Error, InitError = ()>,
{
    app.route("/api/stats", web::get().to(get_stats::<S>))
        .route("/api/areas", web::get().to(get_areas::<S>))
}

#[derive(Debug, Serialize)]
pub struct Areas {
    pub areas: Vec<String>,
}

async fn get_stats<S: PathStore>(store: web::Data<S>) -> Result<web::Json<PathStats>, ApiError> {
    let stats = store.stats().await.map_err(ApiError::store)?;
    Ok(web::Json(stats))
}

async fn get_areas<S: PathStore>(store: web::Data<S>) -> Result<web::Json<Areas>, ApiError> {
    let areas = store.areas().await.map_err(ApiError::store)?;
    Ok(web::Json(Areas { areas }))
}
