pub mod auth;
pub mod clients;
pub mod dashboard;
pub mod health;
pub mod products;
pub mod sales;

use actix_web::web;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(health::health_check)
            .configure(auth::auth_routes)
            .configure(products::product_routes)
            .configure(clients::client_routes)
            .configure(sales::sale_routes)
            .configure(dashboard::dashboard_routes),
    );
}
