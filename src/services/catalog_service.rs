use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use crate::errors::ShopError;
use crate::models::dto::ProductPayload;
use crate::models::product::{self, Column as ProductColumn, Entity as Product};
use crate::models::sale::{Column as SaleColumn, Entity as Sale};
use crate::utils::parsing::parse_or_default;

/// Prix et stock arrivent en texte libre: politique `parse_or_default`
/// (0 en cas d'échec), puis clamp à zéro: l'invariant stock >= 0 et
/// prix >= 0 tient dès la saisie.
fn parse_price(input: Option<&str>) -> Decimal {
    parse_or_default::<Decimal>(input.unwrap_or("")).max(Decimal::ZERO)
}

fn parse_stock(input: Option<&str>) -> i32 {
    parse_or_default::<i32>(input.unwrap_or("")).max(0)
}

pub struct CatalogService;

impl CatalogService {
    /// `image_filename` est le nom retourné par le collaborateur d'upload,
    /// déjà écrit sur disque, et on ne persiste que la référence.
    pub async fn create<C: ConnectionTrait>(
        db: &C,
        payload: &ProductPayload,
        image_filename: Option<String>,
    ) -> Result<product::Model, ShopError> {
        let name = payload.name.trim();
        if name.is_empty() {
            return Err(ShopError::Validation(
                "Veuillez entrer le nom du produit.".to_string(),
            ));
        }

        let new_product = product::ActiveModel {
            name: Set(name.to_string()),
            description: Set(payload
                .description
                .as_deref()
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(str::to_string)),
            price: Set(parse_price(payload.price.as_deref())),
            stock: Set(parse_stock(payload.stock.as_deref())),
            image_filename: Set(image_filename),
            ..Default::default()
        };

        Ok(new_product.insert(db).await?)
    }

    /// L'image n'est remplacée que si un nouveau fichier a été fourni,
    /// comme le formulaire d'édition d'origine.
    pub async fn update<C: ConnectionTrait>(
        db: &C,
        id: i32,
        payload: &ProductPayload,
        image_filename: Option<String>,
    ) -> Result<product::Model, ShopError> {
        let existing = Product::find_by_id(id)
            .one(db)
            .await?
            .ok_or(ShopError::NotFound("Produit"))?;

        let name = payload.name.trim();
        if name.is_empty() {
            return Err(ShopError::Validation(
                "Veuillez entrer le nom du produit.".to_string(),
            ));
        }

        let mut active: product::ActiveModel = existing.into();
        active.name = Set(name.to_string());
        active.description = Set(payload
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string));
        active.price = Set(parse_price(payload.price.as_deref()));
        active.stock = Set(parse_stock(payload.stock.as_deref()));
        if image_filename.is_some() {
            active.image_filename = Set(image_filename);
        }

        Ok(active.update(db).await?)
    }

    /// Suppression refusée tant que des ventes référencent le produit: les
    /// lignes du registre restent résolubles (renforcement assumé du modèle
    /// d'origine, qui tolérait les références pendantes).
    pub async fn delete<C: ConnectionTrait>(db: &C, id: i32) -> Result<(), ShopError> {
        let existing = Product::find_by_id(id)
            .one(db)
            .await?
            .ok_or(ShopError::NotFound("Produit"))?;

        let references = Sale::find()
            .filter(SaleColumn::ProductId.eq(id))
            .count(db)
            .await?;
        if references > 0 {
            return Err(ShopError::StillReferenced("Produit"));
        }

        existing.delete(db).await?;
        Ok(())
    }

    /// Recherche par sous-chaîne insensible à la casse sur le nom (LIKE),
    /// plus récents d'abord.
    pub async fn search<C: ConnectionTrait>(
        db: &C,
        query: Option<&str>,
    ) -> Result<Vec<product::Model>, ShopError> {
        let mut find = Product::find();

        if let Some(q) = query.map(str::trim).filter(|q| !q.is_empty()) {
            find = find.filter(ProductColumn::Name.contains(q));
        }

        Ok(find.order_by_desc(ProductColumn::Id).all(db).await?)
    }

    /// Liste pour le formulaire de vente: ordre alphabétique.
    pub async fn list_alphabetical<C: ConnectionTrait>(
        db: &C,
    ) -> Result<Vec<product::Model>, ShopError> {
        Ok(Product::find()
            .order_by_asc(ProductColumn::Name)
            .all(db)
            .await?)
    }

    pub async fn find_by_id<C: ConnectionTrait>(
        db: &C,
        id: i32,
    ) -> Result<Option<product::Model>, ShopError> {
        Ok(Product::find_by_id(id).one(db).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{product_payload, setup_db};

    #[tokio::test]
    async fn test_create_parses_price_and_stock() {
        let db = setup_db().await;

        let created =
            CatalogService::create(&db, &product_payload("T-shirt Neon", "15.0", "50"), None)
                .await
                .unwrap();

        assert_eq!(created.price, Decimal::new(150, 1));
        assert_eq!(created.stock, 50);
        assert_eq!(created.image_filename, None);
    }

    #[tokio::test]
    async fn test_permissive_parsing_defaults_to_zero() {
        let db = setup_db().await;

        let created =
            CatalogService::create(&db, &product_payload("Mystère", "pas-un-prix", "beaucoup"), None)
                .await
                .unwrap();

        assert_eq!(created.price, Decimal::ZERO);
        assert_eq!(created.stock, 0);
    }

    #[tokio::test]
    async fn test_negative_inputs_are_clamped() {
        let db = setup_db().await;

        let created = CatalogService::create(&db, &product_payload("Louche", "-5.0", "-3"), None)
            .await
            .unwrap();

        assert_eq!(created.price, Decimal::ZERO);
        assert_eq!(created.stock, 0);
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_and_newest_first() {
        let db = setup_db().await;

        CatalogService::create(&db, &product_payload("Casquette Glow", "12.0", "30"), None)
            .await
            .unwrap();
        CatalogService::create(&db, &product_payload("Casque Audio", "40.0", "10"), None)
            .await
            .unwrap();
        CatalogService::create(&db, &product_payload("Sac Tote", "8.5", "40"), None)
            .await
            .unwrap();

        let hits = CatalogService::search(&db, Some("casq")).await.unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].name, "Casque Audio"); // id le plus récent d'abord

        let all = CatalogService::search(&db, None).await.unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].name, "Sac Tote");
    }

    #[tokio::test]
    async fn test_update_keeps_image_when_none_provided() {
        let db = setup_db().await;

        let created = CatalogService::create(
            &db,
            &product_payload("Avec image", "1.0", "1"),
            Some("photo.png".to_string()),
        )
        .await
        .unwrap();

        let updated = CatalogService::update(
            &db,
            created.id,
            &product_payload("Avec image", "2.0", "2"),
            None,
        )
        .await
        .unwrap();

        assert_eq!(updated.image_filename.as_deref(), Some("photo.png"));
        assert_eq!(updated.price, Decimal::new(20, 1));
    }

    #[tokio::test]
    async fn test_update_and_delete_unknown_product() {
        let db = setup_db().await;

        let update = CatalogService::update(&db, 42, &product_payload("X", "1", "1"), None).await;
        assert!(matches!(update, Err(ShopError::NotFound("Produit"))));

        let delete = CatalogService::delete(&db, 42).await;
        assert!(matches!(delete, Err(ShopError::NotFound("Produit"))));
    }
}
