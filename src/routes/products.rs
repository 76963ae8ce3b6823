use actix_web::{delete, get, post, put, web, HttpResponse};
use sea_orm::DatabaseConnection;
use serde::Deserialize;

use crate::middleware::rbac::{self, Operation};
use crate::middleware::AuthUser;
use crate::models::dto::ProductPayload;
use crate::services::catalog_service::CatalogService;
use crate::utils::upload::{store_attachment, UploadConfig};

#[derive(Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

/// GET /api/products?q= - Liste/recherche du catalogue (ADMIN)
#[get("")]
pub async fn list_products(
    auth_user: AuthUser,
    query: web::Query<SearchQuery>,
    db: web::Data<DatabaseConnection>,
) -> HttpResponse {
    if let Err(denied) = rbac::check(&auth_user, Operation::ManageCatalog) {
        return denied;
    }

    match CatalogService::search(db.get_ref(), query.q.as_deref()).await {
        Ok(items) => HttpResponse::Ok().json(items),
        Err(err) => err.to_response(),
    }
}

/// GET /api/products/{id} - Un produit seul, pour le formulaire d'édition (ADMIN)
#[get("/{id}")]
pub async fn get_product(
    auth_user: AuthUser,
    path: web::Path<i32>,
    db: web::Data<DatabaseConnection>,
) -> HttpResponse {
    if let Err(denied) = rbac::check(&auth_user, Operation::ManageCatalog) {
        return denied;
    }

    match CatalogService::find_by_id(db.get_ref(), path.into_inner()).await {
        Ok(Some(product)) => HttpResponse::Ok().json(product),
        Ok(None) => crate::errors::ShopError::NotFound("Produit").to_response(),
        Err(err) => err.to_response(),
    }
}

/// POST /api/products - Ajouter un produit (ADMIN).
/// L'image éventuelle est écrite sur disque AVANT l'insertion en base;
/// seul le nom stocké est persisté.
#[post("")]
pub async fn create_product(
    auth_user: AuthUser,
    body: web::Json<ProductPayload>,
    db: web::Data<DatabaseConnection>,
    upload: web::Data<UploadConfig>,
) -> HttpResponse {
    if let Err(denied) = rbac::check(&auth_user, Operation::ManageCatalog) {
        return denied;
    }

    let image_filename = match &body.image {
        Some(attachment) => match store_attachment(&upload.dir, attachment) {
            Ok(name) => Some(name),
            Err(err) => return err.to_response(),
        },
        None => None,
    };

    match CatalogService::create(db.get_ref(), &body, image_filename).await {
        Ok(product) => HttpResponse::Created().json(serde_json::json!({
            "message": "Produit ajouté.",
            "product": product,
        })),
        Err(err) => err.to_response(),
    }
}

/// PUT /api/products/{id} - Modifier un produit (ADMIN)
#[put("/{id}")]
pub async fn update_product(
    auth_user: AuthUser,
    path: web::Path<i32>,
    body: web::Json<ProductPayload>,
    db: web::Data<DatabaseConnection>,
    upload: web::Data<UploadConfig>,
) -> HttpResponse {
    if let Err(denied) = rbac::check(&auth_user, Operation::ManageCatalog) {
        return denied;
    }

    let image_filename = match &body.image {
        Some(attachment) => match store_attachment(&upload.dir, attachment) {
            Ok(name) => Some(name),
            Err(err) => return err.to_response(),
        },
        None => None,
    };

    match CatalogService::update(db.get_ref(), path.into_inner(), &body, image_filename).await {
        Ok(product) => HttpResponse::Ok().json(serde_json::json!({
            "message": "Produit modifié.",
            "product": product,
        })),
        Err(err) => err.to_response(),
    }
}

/// DELETE /api/products/{id} - Supprimer un produit (ADMIN).
/// Refusé si des ventes historiques le référencent.
#[delete("/{id}")]
pub async fn delete_product(
    auth_user: AuthUser,
    path: web::Path<i32>,
    db: web::Data<DatabaseConnection>,
) -> HttpResponse {
    if let Err(denied) = rbac::check(&auth_user, Operation::ManageCatalog) {
        return denied;
    }

    match CatalogService::delete(db.get_ref(), path.into_inner()).await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "message": "Produit supprimé.",
        })),
        Err(err) => err.to_response(),
    }
}

pub fn product_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/products")
            .service(list_products)
            .service(get_product)
            .service(create_product)
            .service(update_product)
            .service(delete_product),
    );
}
