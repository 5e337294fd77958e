use actix_web::{
    dev::{ServiceFactory, ServiceRequest},
    web, App, Error,
};
use rusty_paths::{FeatureCollection, PathStore};
use serde::Serialize;

use super::get_filter;
use crate::error::ApiError;

pub fn services<S, T>(app: App<T>) -> App<T>
where
    S: PathStore + 'static,
    T: ServiceFactory<ServiceRequest, Config = (), Error = Error, InitError = ()>,
{
    app.route("/api/paths", web::get().to(list_paths::<S>))
        .route("/api/path-types", web::get().to(list_path_types::<S>))
}

#[derive(Debug, Serialize)]
pub struct PathTypes {
    pub path_types: Vec<String>,
}

// http://127.0.0.1:8080/api/paths?area=Chilterns&path_type=Bridleway&path_type=Byway
async fn list_paths<S: PathStore>(
    store: web::Data<S>,
    query: web::Query<Vec<(String, String)>>,
) -> Result<web::Json<FeatureCollection>, ApiError> {
    let filter = get_filter(&query);
    let paths = store.paths(&filter).await.map_err(ApiError::store)?;
    Ok(web::Json(paths.into_iter().collect()))
}

async fn list_path_types<S: PathStore>(
    store: web::Data<S>,
) -> Result<web::Json<PathTypes>, ApiError> {
    let path_types = store.path_types().await.map_err(ApiError::store)?;
    Ok(web::Json(PathTypes { path_types }))
}
