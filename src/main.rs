use std::env;

use actix_files::Files;
use actix_web::{App, HttpServer, middleware::Logger, web};
use adboard::{config::Catalog, db, routes::build_app, types::AppState};
use dotenvy::dotenv;
use log::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let catalog = Catalog::from_env()?;
    info!(
        "Loaded catalog: {} sources, {} locations, {} home types",
        catalog.sources.len(),
        catalog.locations.len(),
        catalog.home_types.len()
    );

    let db = db::get_database().await;
    info!("Connecting to Database");
    let conn = db.connect()?;
    info!("Connected to Database. Migrating");
    db::migrate_db(conn).await?;
    info!("Migrated Database");

    let app_data = web::Data::new(AppState { db, catalog });

    let port = env::var("PORT")
        .ok()
        .and_then(|port| port.parse().ok())
        .unwrap_or(8000u16);

    HttpServer::new(move || {
        build_app(App::new().wrap(Logger::default()), app_data.clone())
            .service(Files::new("/static", "./static"))
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await?;

    Ok(())
}
