use actix_web::HttpResponse;

use crate::middleware::AuthUser;
use crate::models::users::Role;

/// Les opérations protégées du backend. La table `authorize` est pure et
/// testable sans contexte de requête.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ManageCatalog,
    ManageClients,
    ViewDashboard,
    RecordSale,
    ViewOwnSales,
    ViewAllSales,
}

/// L'admin a tous les droits; le vendeur enregistre des ventes et consulte
/// les siennes, rien d'autre.
pub fn authorize(role: Role, operation: Operation) -> bool {
    match role {
        Role::Admin => true,
        Role::Vendeur => matches!(operation, Operation::RecordSale | Operation::ViewOwnSales),
    }
}

/// Garde de route. Un principal authentifié mais du mauvais rôle reçoit un
/// avertissement visible et un renvoi vers son accueil ("/"): asymétrie
/// voulue avec le cas anonyme, qui lui est renvoyé vers l'inscription
/// (voir l'extracteur `AuthUser`).
pub fn check(user: &AuthUser, operation: Operation) -> Result<(), HttpResponse> {
    if authorize(user.role, operation) {
        Ok(())
    } else {
        Err(HttpResponse::Forbidden().json(serde_json::json!({
            "error": "access_denied",
            "message": "Accès refusé.",
            "redirect": "/",
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_is_allowed_everything() {
        for op in [
            Operation::ManageCatalog,
            Operation::ManageClients,
            Operation::ViewDashboard,
            Operation::RecordSale,
            Operation::ViewOwnSales,
            Operation::ViewAllSales,
        ] {
            assert!(authorize(Role::Admin, op), "admin refusé sur {:?}", op);
        }
    }

    #[test]
    fn test_vendeur_has_sales_rights_only() {
        assert!(authorize(Role::Vendeur, Operation::RecordSale));
        assert!(authorize(Role::Vendeur, Operation::ViewOwnSales));

        assert!(!authorize(Role::Vendeur, Operation::ManageCatalog));
        assert!(!authorize(Role::Vendeur, Operation::ManageClients));
        assert!(!authorize(Role::Vendeur, Operation::ViewDashboard));
        assert!(!authorize(Role::Vendeur, Operation::ViewAllSales));
    }

    #[test]
    fn test_check_denies_with_home_redirect() {
        let vendeur = AuthUser {
            user_id: 2,
            username: "vendeur".to_string(),
            role: Role::Vendeur,
        };

        assert!(check(&vendeur, Operation::RecordSale).is_ok());

        let denied = check(&vendeur, Operation::ManageCatalog);
        assert!(denied.is_err());
        assert_eq!(
            denied.unwrap_err().status(),
            actix_web::http::StatusCode::FORBIDDEN
        );
    }
}
