use std::path::PathBuf;

use actix_files::{Files, NamedFile};
use actix_web::{
    dev::{ServiceFactory, ServiceRequest},
    get, web, App, Error, HttpResponse, Responder,
};
use serde::Serialize;

/// Root of the built frontend: `index.html` plus an `assets/` directory.
#[derive(Debug, Clone)]
pub struct StaticDir(pub PathBuf);

pub fn services<T: ServiceFactory<ServiceRequest, Config = (), Error = Error, InitError = ()>>(
    app: App<T>,
) -> App<T> {
    app.service(health).service(index)
}

/// The asset service needs the directory at construction time, so it is
/// mounted separately from [`services`].
pub fn assets<T: ServiceFactory<ServiceRequest, Config = (), Error = Error, InitError = ()>>(
    app: App<T>,
    dir: &StaticDir,
) -> App<T> {
    app.service(Files::new("/assets", dir.0.join("assets")))
}

#[derive(Debug, Serialize)]
struct Health {
    status: &'static str,
}

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(Health { status: "ok" })
}

#[get("/")]
async fn index(dir: web::Data<StaticDir>) -> actix_web::Result<NamedFile> {
    Ok(NamedFile::open_async(dir.0.join("index.html")).await?)
}
