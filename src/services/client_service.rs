use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use crate::errors::ShopError;
use crate::models::client::{self, Column as ClientColumn, Entity as Client};
use crate::models::dto::ClientPayload;
use crate::models::sale::{Column as SaleColumn, Entity as Sale};

fn optional(field: &Option<String>) -> Option<String> {
    field
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

pub struct ClientService;

impl ClientService {
    /// Crée un client. Seul le nom est requis; les coordonnées sont du texte
    /// libre optionnel. Sert aussi à la création en ligne depuis le
    /// formulaire de vente (même validation).
    pub async fn create<C: ConnectionTrait>(
        db: &C,
        payload: &ClientPayload,
    ) -> Result<client::Model, ShopError> {
        let name = payload.name.trim();
        if name.is_empty() {
            return Err(ShopError::Validation(
                "Veuillez entrer le nom du nouveau client.".to_string(),
            ));
        }

        let new_client = client::ActiveModel {
            name: Set(name.to_string()),
            email: Set(optional(&payload.email)),
            phone: Set(optional(&payload.phone)),
            address: Set(optional(&payload.address)),
            ..Default::default()
        };

        Ok(new_client.insert(db).await?)
    }

    /// Liste pour la page de gestion: plus récents d'abord.
    pub async fn list<C: ConnectionTrait>(db: &C) -> Result<Vec<client::Model>, ShopError> {
        Ok(Client::find()
            .order_by_desc(ClientColumn::Id)
            .all(db)
            .await?)
    }

    /// Liste pour le formulaire de vente: ordre alphabétique.
    pub async fn list_alphabetical<C: ConnectionTrait>(
        db: &C,
    ) -> Result<Vec<client::Model>, ShopError> {
        Ok(Client::find().order_by_asc(ClientColumn::Name).all(db).await?)
    }

    pub async fn update<C: ConnectionTrait>(
        db: &C,
        id: i32,
        payload: &ClientPayload,
    ) -> Result<client::Model, ShopError> {
        let existing = Client::find_by_id(id)
            .one(db)
            .await?
            .ok_or(ShopError::NotFound("Client"))?;

        let name = payload.name.trim();
        if name.is_empty() {
            return Err(ShopError::Validation(
                "Veuillez entrer le nom du client.".to_string(),
            ));
        }

        let mut active: client::ActiveModel = existing.into();
        active.name = Set(name.to_string());
        active.email = Set(optional(&payload.email));
        active.phone = Set(optional(&payload.phone));
        active.address = Set(optional(&payload.address));

        Ok(active.update(db).await?)
    }

    /// Suppression refusée tant que des ventes référencent le client
    /// (renforcement assumé: le registre des ventes reste résoluble).
    pub async fn delete<C: ConnectionTrait>(db: &C, id: i32) -> Result<(), ShopError> {
        let existing = Client::find_by_id(id)
            .one(db)
            .await?
            .ok_or(ShopError::NotFound("Client"))?;

        let references = Sale::find()
            .filter(SaleColumn::ClientId.eq(id))
            .count(db)
            .await?;
        if references > 0 {
            return Err(ShopError::StillReferenced("Client"));
        }

        existing.delete(db).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{client_payload, setup_db};

    #[tokio::test]
    async fn test_create_requires_a_name() {
        let db = setup_db().await;

        let mut payload = client_payload("");
        payload.email = Some("x@mail.com".to_string());

        let result = ClientService::create(&db, &payload).await;
        assert!(matches!(result, Err(ShopError::Validation(_))));
    }

    #[tokio::test]
    async fn test_blank_optional_fields_become_none() {
        let db = setup_db().await;

        let mut payload = client_payload("Alice");
        payload.email = Some("  ".to_string());
        payload.phone = Some("01010101".to_string());

        let created = ClientService::create(&db, &payload).await.unwrap();
        assert_eq!(created.email, None);
        assert_eq!(created.phone.as_deref(), Some("01010101"));
    }

    #[tokio::test]
    async fn test_list_is_newest_first_and_form_list_alphabetical() {
        let db = setup_db().await;

        ClientService::create(&db, &client_payload("Bob")).await.unwrap();
        ClientService::create(&db, &client_payload("Alice")).await.unwrap();

        let listing = ClientService::list(&db).await.unwrap();
        assert_eq!(listing[0].name, "Alice"); // créée en dernier

        let form = ClientService::list_alphabetical(&db).await.unwrap();
        assert_eq!(form[0].name, "Alice");
        assert_eq!(form[1].name, "Bob");
    }

    #[tokio::test]
    async fn test_update_unknown_client_is_not_found() {
        let db = setup_db().await;

        let result = ClientService::update(&db, 999, &client_payload("X")).await;
        assert!(matches!(result, Err(ShopError::NotFound("Client"))));
    }

    #[tokio::test]
    async fn test_delete_without_sales_succeeds() {
        let db = setup_db().await;

        let created = ClientService::create(&db, &client_payload("Éphémère"))
            .await
            .unwrap();
        ClientService::delete(&db, created.id).await.unwrap();

        assert!(ClientService::list(&db).await.unwrap().is_empty());
    }
}
