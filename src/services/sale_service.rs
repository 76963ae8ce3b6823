use chrono::Utc;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use std::collections::HashMap;

use crate::errors::ShopError;
use crate::models::client::{Column as ClientColumn, Entity as Client};
use crate::models::dto::{DashboardCounts, RecordSaleRequest, SaleResponse};
use crate::models::product::{Column as ProductColumn, Entity as Product};
use crate::models::sale::{self, Column as SaleColumn, Entity as Sale};
use crate::models::users::{Column as UserColumn, Entity as Users};
use crate::services::client_service::ClientService;

pub struct SaleService;

impl SaleService {
    /// Enregistre une vente. Tout tourne dans UNE transaction: résolution du
    /// client (création en ligne comprise), validations, décrément du stock
    /// et insertion de la ligne de registre. Le moindre échec annule tout,
    /// en particulier, un client créé en ligne ne survit pas à une quantité
    /// ou un stock invalide (le flush précoce du code d'origine n'est
    /// volontairement pas reproduit).
    pub async fn record_sale(
        db: &DatabaseConnection,
        seller_id: i32,
        request: &RecordSaleRequest,
    ) -> Result<sale::Model, ShopError> {
        let txn = db.begin().await?;

        match Self::record_sale_in_txn(&txn, seller_id, request).await {
            Ok(sale) => {
                txn.commit().await?;
                Ok(sale)
            }
            Err(err) => {
                txn.rollback().await?;
                Err(err)
            }
        }
    }

    async fn record_sale_in_txn(
        txn: &DatabaseTransaction,
        seller_id: i32,
        request: &RecordSaleRequest,
    ) -> Result<sale::Model, ShopError> {
        // 1. Résoudre le client. La création en ligne se fait d'abord, dans
        //    la transaction: son id est visible pour la ligne de vente, et
        //    il disparaît avec le rollback si la suite échoue.
        let client_id = match &request.new_client {
            Some(payload) => ClientService::create(txn, payload).await?.id,
            None => {
                let id = request.client_id.ok_or_else(|| {
                    ShopError::Validation("Veuillez choisir un client.".to_string())
                })?;
                Client::find_by_id(id)
                    .one(txn)
                    .await?
                    .ok_or(ShopError::NotFound("Client"))?
                    .id
            }
        };

        // 2. Validations
        if request.quantity <= 0 {
            return Err(ShopError::InvalidQuantity);
        }

        let product = Product::find_by_id(request.product_id)
            .one(txn)
            .await?
            .ok_or(ShopError::NotFound("Produit"))?;

        if product.stock < request.quantity {
            return Err(ShopError::InsufficientStock);
        }

        // 3. Total figé au prix courant, arrondi demi-supérieur à 2 décimales
        let total = (product.price * Decimal::from(request.quantity))
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

        // 4. Décrément conditionnel: `stock = stock - q WHERE stock >= q`.
        //    Deux ventes concurrentes passant chacune le check de l'étape 2
        //    ne peuvent pas survendre: la seconde voit 0 ligne affectée.
        let update = Product::update_many()
            .col_expr(
                ProductColumn::Stock,
                Expr::col(ProductColumn::Stock).sub(request.quantity),
            )
            .filter(ProductColumn::Id.eq(product.id))
            .filter(ProductColumn::Stock.gte(request.quantity))
            .exec(txn)
            .await?;

        if update.rows_affected == 0 {
            return Err(ShopError::InsufficientStock);
        }

        // 5. La ligne de registre, immuable une fois commitée
        let new_sale = sale::ActiveModel {
            client_id: Set(client_id),
            product_id: Set(product.id),
            user_id: Set(seller_id),
            quantity: Set(request.quantity),
            total: Set(total),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        Ok(new_sale.insert(txn).await?)
    }

    /// Les ventes d'un vendeur, plus récentes d'abord.
    pub async fn list_sales_for_seller(
        db: &DatabaseConnection,
        seller_id: i32,
    ) -> Result<Vec<SaleResponse>, ShopError> {
        let sales = Sale::find()
            .filter(SaleColumn::UserId.eq(seller_id))
            .order_by_desc(SaleColumn::CreatedAt)
            .order_by_desc(SaleColumn::Id)
            .all(db)
            .await?;

        Self::with_display_names(db, sales).await
    }

    /// Toutes les ventes (vue admin), plus récentes d'abord.
    pub async fn list_all_sales(db: &DatabaseConnection) -> Result<Vec<SaleResponse>, ShopError> {
        let sales = Sale::find()
            .order_by_desc(SaleColumn::CreatedAt)
            .order_by_desc(SaleColumn::Id)
            .all(db)
            .await?;

        Self::with_display_names(db, sales).await
    }

    /// Somme des totaux du registre; zéro sans aucune vente.
    pub async fn aggregate_revenue<C: ConnectionTrait>(db: &C) -> Result<Decimal, ShopError> {
        let sales = Sale::find().all(db).await?;
        Ok(sales.iter().fold(Decimal::ZERO, |acc, s| acc + s.total))
    }

    pub async fn dashboard_counts(db: &DatabaseConnection) -> Result<DashboardCounts, ShopError> {
        Ok(DashboardCounts {
            products_count: Product::find().count(db).await?,
            clients_count: Client::find().count(db).await?,
            sales_count: Sale::find().count(db).await?,
            revenue: Self::aggregate_revenue(db).await?.to_f64().unwrap_or(0.0),
        })
    }

    /// Enrichit les lignes brutes des noms affichables. Trois requêtes en
    /// lot plutôt qu'une jointure triple, dans des HashMap par id.
    async fn with_display_names(
        db: &DatabaseConnection,
        sales: Vec<sale::Model>,
    ) -> Result<Vec<SaleResponse>, ShopError> {
        let client_ids: Vec<i32> = sales.iter().map(|s| s.client_id).collect();
        let product_ids: Vec<i32> = sales.iter().map(|s| s.product_id).collect();
        let seller_ids: Vec<i32> = sales.iter().map(|s| s.user_id).collect();

        let clients: HashMap<i32, String> = Client::find()
            .filter(ClientColumn::Id.is_in(client_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect();

        let products: HashMap<i32, String> = Product::find()
            .filter(ProductColumn::Id.is_in(product_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|p| (p.id, p.name))
            .collect();

        let sellers: HashMap<i32, String> = Users::find()
            .filter(UserColumn::Id.is_in(seller_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|u| (u.id, u.username))
            .collect();

        let lookup = |map: &HashMap<i32, String>, id: i32| {
            map.get(&id).cloned().unwrap_or_else(|| "—".to_string())
        };

        Ok(sales
            .into_iter()
            .map(|s| SaleResponse {
                id: s.id,
                client_id: s.client_id,
                client_name: lookup(&clients, s.client_id),
                product_id: s.product_id,
                product_name: lookup(&products, s.product_id),
                seller_id: s.user_id,
                seller_name: lookup(&sellers, s.user_id),
                quantity: s.quantity,
                total: s.total.to_f64().unwrap_or(0.0),
                created_at: s.created_at,
            })
            .collect())
    }
}
