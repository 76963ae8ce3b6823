use actix_web::{dev::Payload, Error, FromRequest, HttpRequest, HttpResponse};
use futures::future::{ready, Ready};
use serde::{Deserialize, Serialize};

use crate::models::users::Role;
use crate::utils::jwt;

/// Le principal authentifié, extrait du token Bearer.
/// Utilisé comme extracteur dans toutes les routes protégées.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub user_id: i32,
    pub username: String,
    pub role: Role,
}

/// Un principal anonyme (pas de token, token illisible ou expiré) est
/// renvoyé vers l'inscription, jamais vers le login: choix produit d'origine
/// pour accélérer l'embarquement, à préserver tel quel.
fn anonymous_response(message: &str) -> HttpResponse {
    HttpResponse::Unauthorized().json(serde_json::json!({
        "error": "authentication_required",
        "message": message,
        "redirect": "/auth/register",
    }))
}

impl FromRequest for AuthUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        // 1. Extraire le header Authorization
        let auth_header = match req.headers().get("Authorization") {
            Some(header) => header,
            None => {
                let response = anonymous_response("Authentification requise.");
                return ready(Err(
                    actix_web::error::InternalError::from_response("", response).into()
                ));
            }
        };

        // 2. Convertir le header en string
        let auth_str = match auth_header.to_str() {
            Ok(s) => s,
            Err(_) => {
                let response = anonymous_response("Header Authorization invalide.");
                return ready(Err(
                    actix_web::error::InternalError::from_response("", response).into()
                ));
            }
        };

        // 3. Extraire le token (format: "Bearer <token>")
        let token = match auth_str.strip_prefix("Bearer ") {
            Some(t) => t,
            None => {
                let response = anonymous_response("Format attendu: Bearer <token>.");
                return ready(Err(
                    actix_web::error::InternalError::from_response("", response).into()
                ));
            }
        };

        // 4. Vérifier le token JWT
        let claims = match jwt::verify_token(token) {
            Ok(claims) => claims,
            Err(_) => {
                let response = anonymous_response("Session invalide ou expirée.");
                return ready(Err(
                    actix_web::error::InternalError::from_response("", response).into()
                ));
            }
        };

        // 5. Créer et retourner le principal
        ready(Ok(AuthUser {
            user_id: claims.sub,
            username: claims.username,
            role: Role::parse_or_vendeur(&claims.role),
        }))
    }
}
