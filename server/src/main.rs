use actix_web::{middleware::Logger, web, App, HttpServer};
use atlas::PgPathStore;

mod config;
mod endpoints;
mod error;

use config::ServerConfig;
use endpoints::site::{self, StaticDir};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let conf = ServerConfig::from_env().map_err(std::io::Error::other)?;

    // lazy pool: the first request opens the connection
    let pool = atlas::bind(&conf.database_url, Some(conf.max_connections))
        .await
        .map_err(std::io::Error::other)?;
    let store = web::Data::new(PgPathStore::new(pool));
    let static_dir = StaticDir(conf.static_dir.clone());

    log::info!(
        "Serving paths on {}:{} with frontend from {}",
        conf.bind_address,
        conf.port,
        conf.static_dir.display()
    );

    HttpServer::new(move || {
        let app = App::new()
            .app_data(store.clone())
            .app_data(web::Data::new(static_dir.clone()));
        let app = endpoints::services::<PgPathStore, _>(app);
        site::assets(app, &static_dir).wrap(Logger::default())
    })
    .bind((conf.bind_address.as_str(), conf.port))?
    .run()
    .await
}
