use actix_web::HttpResponse;
use sea_orm::DbErr;
use thiserror::Error;

/// Erreurs métier du backend. Toutes sont récupérables à la frontière de la
/// requête: l'opération échoue, l'appelant reçoit une catégorie stable et un
/// message lisible, et aucun état partiel ne survit (les chemins mutants
/// tournent dans une transaction).
#[derive(Error, Debug)]
pub enum ShopError {
    #[error("Erreur base de données: {0}")]
    Database(#[from] DbErr),

    #[error("Nom d'utilisateur ou email déjà utilisé.")]
    DuplicateIdentity,

    #[error("Identifiants invalides.")]
    InvalidCredentials,

    #[error("{0} introuvable.")]
    NotFound(&'static str),

    #[error("La quantité doit être positive.")]
    InvalidQuantity,

    #[error("Stock insuffisant.")]
    InsufficientStock,

    #[error("{0}")]
    Validation(String),

    #[error("{0} référencé par des ventes existantes, suppression refusée.")]
    StillReferenced(&'static str),

    #[error("Erreur interne: {0}")]
    Internal(String),
}

impl ShopError {
    /// Code de catégorie stable, exposé dans le JSON pour le front.
    pub fn category(&self) -> &'static str {
        match self {
            ShopError::Database(_) => "database_error",
            ShopError::DuplicateIdentity => "duplicate_identity",
            ShopError::InvalidCredentials => "invalid_credentials",
            ShopError::NotFound(_) => "not_found",
            ShopError::InvalidQuantity => "invalid_quantity",
            ShopError::InsufficientStock => "insufficient_stock",
            ShopError::Validation(_) => "validation_failed",
            ShopError::StillReferenced(_) => "still_referenced",
            ShopError::Internal(_) => "internal_error",
        }
    }

    /// Construit la réponse HTTP correspondante. Les routes restent des
    /// wrappers minces: `match` sur le service puis `err.to_response()`.
    pub fn to_response(&self) -> HttpResponse {
        let body = serde_json::json!({
            "error": self.category(),
            "message": self.to_string(),
        });

        match self {
            ShopError::Database(_) => HttpResponse::InternalServerError().json(body),
            ShopError::DuplicateIdentity => HttpResponse::Conflict().json(body),
            ShopError::InvalidCredentials => HttpResponse::Unauthorized().json(body),
            ShopError::NotFound(_) => HttpResponse::NotFound().json(body),
            ShopError::InvalidQuantity => HttpResponse::BadRequest().json(body),
            ShopError::InsufficientStock => HttpResponse::Conflict().json(body),
            ShopError::Validation(_) => HttpResponse::BadRequest().json(body),
            ShopError::StillReferenced(_) => HttpResponse::Conflict().json(body),
            ShopError::Internal(_) => HttpResponse::InternalServerError().json(body),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories_are_stable() {
        assert_eq!(ShopError::InsufficientStock.category(), "insufficient_stock");
        assert_eq!(ShopError::InvalidQuantity.category(), "invalid_quantity");
        assert_eq!(ShopError::DuplicateIdentity.category(), "duplicate_identity");
    }

    #[test]
    fn test_messages_are_human_readable() {
        assert_eq!(ShopError::InsufficientStock.to_string(), "Stock insuffisant.");
        assert_eq!(
            ShopError::NotFound("Produit").to_string(),
            "Produit introuvable."
        );
    }
}
