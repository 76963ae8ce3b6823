use sea_orm::{ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, QueryFilter, Set};

use crate::errors::ShopError;
use crate::models::users::{self, Column as UserColumn, Entity as Users, Role};
use crate::utils::password;

pub struct IdentityService;

impl IdentityService {
    /// Crée un compte. Échoue en `DuplicateIdentity` si le nom d'utilisateur
    /// OU l'email est déjà pris; le compte existant n'est jamais modifié.
    /// Le mot de passe n'est persisté que sous forme de hash salé.
    pub async fn register<C: ConnectionTrait>(
        db: &C,
        username: &str,
        email: Option<&str>,
        password_clear: &str,
        role: Role,
    ) -> Result<users::Model, ShopError> {
        let username = username.trim();
        let email = email.map(str::trim).filter(|e| !e.is_empty());

        if username.is_empty() || password_clear.is_empty() {
            return Err(ShopError::Validation(
                "Veuillez remplir tous les champs.".to_string(),
            ));
        }

        // Unicité sur username OU email, comme le formulaire d'origine
        let mut condition = Condition::any().add(UserColumn::Username.eq(username));
        if let Some(email) = email {
            condition = condition.add(UserColumn::Email.eq(email));
        }

        if Users::find().filter(condition).one(db).await?.is_some() {
            return Err(ShopError::DuplicateIdentity);
        }

        let password_hash =
            password::hash_password(password_clear).map_err(ShopError::Internal)?;

        let new_user = users::ActiveModel {
            username: Set(username.to_string()),
            email: Set(email.map(str::to_string)),
            password_hash: Set(password_hash),
            role: Set(role.as_str().to_string()),
            ..Default::default()
        };

        Ok(new_user.insert(db).await?)
    }

    /// Vérifie les identifiants. Un seul message d'échec, que le compte
    /// n'existe pas ou que le mot de passe soit faux, pas d'oracle.
    pub async fn authenticate<C: ConnectionTrait>(
        db: &C,
        username: &str,
        password_clear: &str,
    ) -> Result<users::Model, ShopError> {
        let user = Users::find()
            .filter(UserColumn::Username.eq(username.trim()))
            .one(db)
            .await?;

        let user = match user {
            Some(user) => user,
            None => return Err(ShopError::InvalidCredentials),
        };

        let is_valid =
            password::verify_password(password_clear, &user.password_hash).unwrap_or(false);

        if is_valid {
            Ok(user)
        } else {
            Err(ShopError::InvalidCredentials)
        }
    }

    pub async fn find_by_id<C: ConnectionTrait>(
        db: &C,
        id: i32,
    ) -> Result<Option<users::Model>, ShopError> {
        Ok(Users::find_by_id(id).one(db).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::setup_db;

    #[tokio::test]
    async fn test_register_then_authenticate() {
        let db = setup_db().await;

        let user = IdentityService::register(&db, "zara", Some("zara@mail.com"), "secret", Role::Vendeur)
            .await
            .unwrap();
        assert_eq!(user.username, "zara");
        assert_eq!(user.role(), Role::Vendeur);
        assert_ne!(user.password_hash, "secret");

        let logged = IdentityService::authenticate(&db, "zara", "secret")
            .await
            .unwrap();
        assert_eq!(logged.id, user.id);
    }

    #[tokio::test]
    async fn test_duplicate_username_is_rejected_and_existing_account_untouched() {
        let db = setup_db().await;

        let original =
            IdentityService::register(&db, "admin", Some("admin@mail.com"), "admin123", Role::Admin)
                .await
                .unwrap();

        let result =
            IdentityService::register(&db, "admin", Some("autre@mail.com"), "pwned", Role::Vendeur)
                .await;
        assert!(matches!(result, Err(ShopError::DuplicateIdentity)));

        // Le compte d'origine est intact: mêmes identifiants, même rôle
        let unchanged = IdentityService::authenticate(&db, "admin", "admin123")
            .await
            .unwrap();
        assert_eq!(unchanged.id, original.id);
        assert_eq!(unchanged.role(), Role::Admin);
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected() {
        let db = setup_db().await;

        IdentityService::register(&db, "a", Some("same@mail.com"), "pw", Role::Vendeur)
            .await
            .unwrap();
        let result =
            IdentityService::register(&db, "b", Some("same@mail.com"), "pw", Role::Vendeur).await;
        assert!(matches!(result, Err(ShopError::DuplicateIdentity)));
    }

    #[tokio::test]
    async fn test_authenticate_does_not_leak_which_part_failed() {
        let db = setup_db().await;

        IdentityService::register(&db, "seller", None, "bon-mdp", Role::Vendeur)
            .await
            .unwrap();

        let unknown_user = IdentityService::authenticate(&db, "inconnu", "bon-mdp").await;
        let wrong_password = IdentityService::authenticate(&db, "seller", "mauvais").await;

        assert!(matches!(unknown_user, Err(ShopError::InvalidCredentials)));
        assert!(matches!(wrong_password, Err(ShopError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_register_requires_username_and_password() {
        let db = setup_db().await;

        let result = IdentityService::register(&db, "  ", None, "pw", Role::Vendeur).await;
        assert!(matches!(result, Err(ShopError::Validation(_))));

        let result = IdentityService::register(&db, "user", None, "", Role::Vendeur).await;
        assert!(matches!(result, Err(ShopError::Validation(_))));
    }
}
