use actix_web::{get, post, web, HttpResponse};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};

use crate::errors::ShopError;
use crate::middleware::AuthUser;
use crate::models::users::Role;
use crate::services::identity_service::IdentityService;
use crate::utils::jwt;

// DTO pour l'inscription
#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: Option<String>,
    pub password: String,
    pub confirm_password: Option<String>,
    pub role: Option<String>, // vendeur par défaut
}

// DTO pour la connexion
#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

// Réponse après login/register
#[derive(Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user_id: i32,
    pub username: String,
    pub role: Role,
}

/// POST /api/auth/register - Créer un compte (PUBLIC).
/// Le compte est connecté dans la foulée (token retourné): l'inscription est
/// le point d'entrée voulu pour les nouveaux venus, pas le login.
#[post("/register")]
pub async fn register(
    body: web::Json<RegisterRequest>,
    db: web::Data<DatabaseConnection>,
) -> HttpResponse {
    // 1. Confirmation du mot de passe, comme le formulaire d'origine
    if let Some(confirm) = &body.confirm_password {
        if confirm != &body.password {
            return HttpResponse::BadRequest().json(serde_json::json!({
                "error": "validation_failed",
                "message": "Les mots de passe ne correspondent pas.",
            }));
        }
    }

    let role = Role::parse_or_vendeur(body.role.as_deref().unwrap_or("vendeur"));

    // 2. Créer le compte
    let user = match IdentityService::register(
        db.get_ref(),
        &body.username,
        body.email.as_deref(),
        &body.password,
        role,
    )
    .await
    {
        Ok(user) => user,
        Err(err) => return err.to_response(),
    };

    // 3. Générer le JWT
    let token = match jwt::generate_token(user.id, &user.username, user.role()) {
        Ok(token) => token,
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "internal_error",
                "message": format!("Failed to generate token: {}", e),
            }));
        }
    };

    HttpResponse::Created().json(AuthResponse {
        token,
        user_id: user.id,
        role: user.role(),
        username: user.username,
    })
}

/// POST /api/auth/login - Se connecter (PUBLIC)
#[post("/login")]
pub async fn login(
    body: web::Json<LoginRequest>,
    db: web::Data<DatabaseConnection>,
) -> HttpResponse {
    let user = match IdentityService::authenticate(db.get_ref(), &body.username, &body.password)
        .await
    {
        Ok(user) => user,
        Err(err) => return err.to_response(),
    };

    let token = match jwt::generate_token(user.id, &user.username, user.role()) {
        Ok(token) => token,
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "internal_error",
                "message": format!("Failed to generate token: {}", e),
            }));
        }
    };

    HttpResponse::Ok().json(AuthResponse {
        token,
        user_id: user.id,
        role: user.role(),
        username: user.username,
    })
}

/// GET /api/auth/me - Le principal courant, relu en base (PROTÉGÉE)
#[get("/me")]
pub async fn me(auth_user: AuthUser, db: web::Data<DatabaseConnection>) -> HttpResponse {
    match IdentityService::find_by_id(db.get_ref(), auth_user.user_id).await {
        Ok(Some(user)) => HttpResponse::Ok().json(serde_json::json!({
            "user_id": user.id,
            "username": user.username,
            "email": user.email,
            "role": user.role(),
        })),
        Ok(None) => ShopError::NotFound("Utilisateur").to_response(),
        Err(err) => err.to_response(),
    }
}

pub fn auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(register)
            .service(login)
            .service(me),
    );
}
