// Outils partagés par les tests de services: base SQLite en mémoire
// (une seule connexion, sinon chaque connexion du pool aurait sa propre
// base :memory:) avec le schéma construit depuis les entités.

use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use crate::models::dto::{ClientPayload, ProductPayload};
use crate::models::users::Role;
use crate::models::{client, product, users};
use crate::services::catalog_service::CatalogService;
use crate::services::client_service::ClientService;
use crate::services::identity_service::IdentityService;

pub async fn setup_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:".to_string());
    options.max_connections(1);

    let db = Database::connect(options)
        .await
        .expect("Failed to open in-memory database");
    crate::db::init_schema(&db)
        .await
        .expect("Failed to create schema");
    db
}

pub fn product_payload(name: &str, price: &str, stock: &str) -> ProductPayload {
    ProductPayload {
        name: name.to_string(),
        description: None,
        price: Some(price.to_string()),
        stock: Some(stock.to_string()),
        image: None,
    }
}

pub fn client_payload(name: &str) -> ClientPayload {
    ClientPayload {
        name: name.to_string(),
        email: None,
        phone: None,
        address: None,
    }
}

pub async fn seed_product(
    db: &DatabaseConnection,
    name: &str,
    price: &str,
    stock: &str,
) -> product::Model {
    CatalogService::create(db, &product_payload(name, price, stock), None)
        .await
        .expect("Failed to seed product")
}

pub async fn seed_client(db: &DatabaseConnection, name: &str) -> client::Model {
    ClientService::create(db, &client_payload(name))
        .await
        .expect("Failed to seed client")
}

pub async fn seed_seller(db: &DatabaseConnection, username: &str) -> users::Model {
    IdentityService::register(db, username, None, "vendeur123", Role::Vendeur)
        .await
        .expect("Failed to seed seller")
}
