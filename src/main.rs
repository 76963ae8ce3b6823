mod db;
mod errors;
mod middleware;
mod models;
mod routes;
mod seed;
mod services;
mod utils;

use actix_web::{web, App, HttpServer};
use std::env;
use std::path::PathBuf;

use crate::utils::upload::UploadConfig;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();

    println!("🔌 Connecting to database...");
    let db = db::establish_connection()
        .await
        .expect("Failed to connect to database");
    db::init_schema(&db).await.expect("Failed to create schema");
    seed::seed_initial_data(&db)
        .await
        .expect("Failed to seed initial data");
    println!("✅ Database ready!");

    let upload_dir =
        PathBuf::from(env::var("UPLOAD_DIR").unwrap_or_else(|_| "static/uploads".to_string()));
    std::fs::create_dir_all(&upload_dir)?;
    let upload_config = UploadConfig { dir: upload_dir };

    println!("🚀 Starting server on http://127.0.0.1:8080");

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(db.clone()))
            .app_data(web::Data::new(upload_config.clone()))
            .configure(routes::configure_routes)
    })
    .bind(("127.0.0.1", 8080))?
    .run()
    .await
}
