// Données de démarrage (équivalent du seed_initial_data d'origine):
// un admin et un vendeur aux identifiants connus, un petit catalogue
// et deux clients. Idempotent: ne crée que ce qui manque.

use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, Set};

use crate::errors::ShopError;
use crate::models::users::{Column as UserColumn, Entity as Users, Role};
use crate::models::{client, product};
use crate::services::identity_service::IdentityService;

pub async fn seed_initial_data(db: &DatabaseConnection) -> Result<(), ShopError> {
    ensure_account(db, "admin", "admin@example.com", "admin123", Role::Admin).await?;
    ensure_account(db, "vendeur", "vendeur@example.com", "vendeur123", Role::Vendeur).await?;

    if product::Entity::find().count(db).await? == 0 {
        let starter = [
            ("T-shirt Neon", "T-shirt noir avec motif néon", Decimal::new(150, 1), 50),
            ("Casquette Glow", "Casquette logo ShopApp", Decimal::new(120, 1), 30),
            ("Sac Tote", "Sac en toile robuste", Decimal::new(85, 1), 40),
        ];
        for (name, description, price, stock) in starter {
            product::ActiveModel {
                name: Set(name.to_string()),
                description: Set(Some(description.to_string())),
                price: Set(price),
                stock: Set(stock),
                image_filename: Set(Some("placeholder_product.png".to_string())),
                ..Default::default()
            }
            .insert(db)
            .await?;
        }
        println!("🌱 Catalogue de départ créé (3 produits)");
    }

    if client::Entity::find().count(db).await? == 0 {
        let starter = [
            ("Alice", "alice@mail.com", "01010101", "Centre-ville"),
            ("Bob", "bob@mail.com", "02020202", "Quartier Nord"),
        ];
        for (name, email, phone, address) in starter {
            client::ActiveModel {
                name: Set(name.to_string()),
                email: Set(Some(email.to_string())),
                phone: Set(Some(phone.to_string())),
                address: Set(Some(address.to_string())),
                ..Default::default()
            }
            .insert(db)
            .await?;
        }
        println!("🌱 Clients de départ créés (Alice, Bob)");
    }

    Ok(())
}

async fn ensure_account(
    db: &DatabaseConnection,
    username: &str,
    email: &str,
    password: &str,
    role: Role,
) -> Result<(), ShopError> {
    let exists = Users::find()
        .filter(UserColumn::Username.eq(username))
        .one(db)
        .await?
        .is_some();

    if !exists {
        IdentityService::register(db, username, Some(email), password, role).await?;
        println!("🌱 Compte {} créé ({})", username, role.as_str());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::setup_db;

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let db = setup_db().await;

        seed_initial_data(&db).await.unwrap();
        seed_initial_data(&db).await.unwrap();

        assert_eq!(Users::find().count(&db).await.unwrap(), 2);
        assert_eq!(product::Entity::find().count(&db).await.unwrap(), 3);
        assert_eq!(client::Entity::find().count(&db).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_seeded_accounts_can_log_in_with_known_credentials() {
        let db = setup_db().await;
        seed_initial_data(&db).await.unwrap();

        let admin = IdentityService::authenticate(&db, "admin", "admin123")
            .await
            .unwrap();
        assert_eq!(admin.role(), Role::Admin);

        let vendeur = IdentityService::authenticate(&db, "vendeur", "vendeur123")
            .await
            .unwrap();
        assert_eq!(vendeur.role(), Role::Vendeur);
    }
}
