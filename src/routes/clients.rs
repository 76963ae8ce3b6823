use actix_web::{delete, get, post, put, web, HttpResponse};
use sea_orm::DatabaseConnection;

use crate::middleware::rbac::{self, Operation};
use crate::middleware::AuthUser;
use crate::models::dto::ClientPayload;
use crate::services::client_service::ClientService;

/// GET /api/clients - Liste des clients, plus récents d'abord (ADMIN)
#[get("")]
pub async fn list_clients(auth_user: AuthUser, db: web::Data<DatabaseConnection>) -> HttpResponse {
    if let Err(denied) = rbac::check(&auth_user, Operation::ManageClients) {
        return denied;
    }

    match ClientService::list(db.get_ref()).await {
        Ok(items) => HttpResponse::Ok().json(items),
        Err(err) => err.to_response(),
    }
}

/// POST /api/clients - Ajouter un client (ADMIN)
#[post("")]
pub async fn create_client(
    auth_user: AuthUser,
    body: web::Json<ClientPayload>,
    db: web::Data<DatabaseConnection>,
) -> HttpResponse {
    if let Err(denied) = rbac::check(&auth_user, Operation::ManageClients) {
        return denied;
    }

    match ClientService::create(db.get_ref(), &body).await {
        Ok(client) => HttpResponse::Created().json(serde_json::json!({
            "message": "Client ajouté.",
            "client": client,
        })),
        Err(err) => err.to_response(),
    }
}

/// PUT /api/clients/{id} - Modifier un client (ADMIN)
#[put("/{id}")]
pub async fn update_client(
    auth_user: AuthUser,
    path: web::Path<i32>,
    body: web::Json<ClientPayload>,
    db: web::Data<DatabaseConnection>,
) -> HttpResponse {
    if let Err(denied) = rbac::check(&auth_user, Operation::ManageClients) {
        return denied;
    }

    match ClientService::update(db.get_ref(), path.into_inner(), &body).await {
        Ok(client) => HttpResponse::Ok().json(serde_json::json!({
            "message": "Client modifié.",
            "client": client,
        })),
        Err(err) => err.to_response(),
    }
}

/// DELETE /api/clients/{id} - Supprimer un client (ADMIN).
/// Refusé si des ventes historiques le référencent.
#[delete("/{id}")]
pub async fn delete_client(
    auth_user: AuthUser,
    path: web::Path<i32>,
    db: web::Data<DatabaseConnection>,
) -> HttpResponse {
    if let Err(denied) = rbac::check(&auth_user, Operation::ManageClients) {
        return denied;
    }

    match ClientService::delete(db.get_ref(), path.into_inner()).await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "message": "Client supprimé.",
        })),
        Err(err) => err.to_response(),
    }
}

pub fn client_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/clients")
            .service(list_clients)
            .service(create_client)
            .service(update_client)
            .service(delete_client),
    );
}
