use actix_web::{get, post, web, HttpResponse};
use sea_orm::DatabaseConnection;

use crate::middleware::rbac::{self, Operation};
use crate::middleware::AuthUser;
use crate::models::dto::RecordSaleRequest;
use crate::models::users::Role;
use crate::services::catalog_service::CatalogService;
use crate::services::client_service::ClientService;
use crate::services::sale_service::SaleService;

/// POST /api/sales - Enregistrer une vente (vendeur ou admin).
/// Le corps porte soit `client_id`, soit `new_client` pour la création en
/// ligne. Toute la transaction est atomique côté service.
#[post("")]
pub async fn record_sale(
    auth_user: AuthUser,
    body: web::Json<RecordSaleRequest>,
    db: web::Data<DatabaseConnection>,
) -> HttpResponse {
    if let Err(denied) = rbac::check(&auth_user, Operation::RecordSale) {
        return denied;
    }

    match SaleService::record_sale(db.get_ref(), auth_user.user_id, &body).await {
        Ok(sale) => HttpResponse::Created().json(serde_json::json!({
            "message": "Vente enregistrée ✅",
            "sale": sale,
        })),
        Err(err) => err.to_response(),
    }
}

/// GET /api/sales - L'admin voit toutes les ventes, le vendeur les siennes
/// (même route que la page "Mes ventes" / "Toutes les ventes" d'origine).
#[get("")]
pub async fn list_sales(auth_user: AuthUser, db: web::Data<DatabaseConnection>) -> HttpResponse {
    let result = match auth_user.role {
        Role::Admin => match rbac::check(&auth_user, Operation::ViewAllSales) {
            Ok(()) => SaleService::list_all_sales(db.get_ref()).await.map(|sales| {
                serde_json::json!({ "title": "Toutes les ventes", "sales": sales })
            }),
            Err(denied) => return denied,
        },
        Role::Vendeur => match rbac::check(&auth_user, Operation::ViewOwnSales) {
            Ok(()) => SaleService::list_sales_for_seller(db.get_ref(), auth_user.user_id)
                .await
                .map(|sales| serde_json::json!({ "title": "Mes ventes", "sales": sales })),
            Err(denied) => return denied,
        },
    };

    match result {
        Ok(body) => HttpResponse::Ok().json(body),
        Err(err) => err.to_response(),
    }
}

/// GET /api/sales/form-data - Produits et clients triés alphabétiquement
/// pour alimenter le formulaire de vente.
#[get("/form-data")]
pub async fn sale_form_data(auth_user: AuthUser, db: web::Data<DatabaseConnection>) -> HttpResponse {
    if let Err(denied) = rbac::check(&auth_user, Operation::RecordSale) {
        return denied;
    }

    let products = match CatalogService::list_alphabetical(db.get_ref()).await {
        Ok(products) => products,
        Err(err) => return err.to_response(),
    };
    let clients = match ClientService::list_alphabetical(db.get_ref()).await {
        Ok(clients) => clients,
        Err(err) => return err.to_response(),
    };

    HttpResponse::Ok().json(serde_json::json!({
        "products": products,
        "clients": clients,
    }))
}

pub fn sale_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/sales")
            .service(record_sale)
            .service(list_sales)
            .service(sale_form_data),
    );
}
