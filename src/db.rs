// Connexion BD + création du schéma au démarrage

use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbErr, Schema};
use std::env;

use crate::models::{client, product, sale, users};

/// Ouvre la connexion. `DATABASE_URL` dans .env, sinon un fichier SQLite
/// local (équivalent du shop.db d'origine).
pub async fn establish_connection() -> Result<DatabaseConnection, DbErr> {
    let database_url =
        env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://shop.db?mode=rwc".to_string());

    Database::connect(&database_url).await
}

/// Crée les tables manquantes à partir des entités (idempotent).
pub async fn init_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let mut stmts = vec![
        schema.create_table_from_entity(users::Entity),
        schema.create_table_from_entity(product::Entity),
        schema.create_table_from_entity(client::Entity),
        schema.create_table_from_entity(sale::Entity),
    ];

    for stmt in stmts.iter_mut() {
        stmt.if_not_exists();
        db.execute(backend.build(&*stmt)).await?;
    }

    Ok(())
}
