use actix_web::{get, web, HttpResponse};
use sea_orm::DatabaseConnection;

use crate::middleware::rbac::{self, Operation};
use crate::middleware::AuthUser;
use crate::services::sale_service::SaleService;

/// GET /api/dashboard - Les quatre compteurs du tableau de bord (ADMIN)
#[get("")]
pub async fn dashboard(auth_user: AuthUser, db: web::Data<DatabaseConnection>) -> HttpResponse {
    if let Err(denied) = rbac::check(&auth_user, Operation::ViewDashboard) {
        return denied;
    }

    match SaleService::dashboard_counts(db.get_ref()).await {
        Ok(counts) => HttpResponse::Ok().json(counts),
        Err(err) => err.to_response(),
    }
}

pub fn dashboard_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/dashboard").service(dashboard));
}
