use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// DTO partagés entre routes et services
// ============================================================================

/// Pièce jointe image envoyée en base64 dans le JSON. Le fichier est écrit
/// sur disque AVANT l'écriture en base; seul le nom stocké est persisté.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageAttachment {
    pub filename: String,
    pub content_base64: String,
}

/// Payload de création/modification d'un produit. Le prix et le stock
/// arrivent en texte libre et passent par `parse_or_default` (politique
/// permissive: 0 en cas d'échec de parsing, jamais une erreur).
#[derive(Debug, Clone, Deserialize)]
pub struct ProductPayload {
    pub name: String,
    pub description: Option<String>,
    pub price: Option<String>,
    pub stock: Option<String>,
    pub image: Option<ImageAttachment>,
}

/// Payload de création/modification d'un client. Seul le nom est requis.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientPayload {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Requête d'enregistrement d'une vente.
///
/// Le client est soit `client_id` (client existant), soit `new_client`
/// (création en ligne depuis le formulaire de vente). Si les deux sont
/// fournis, `new_client` gagne, même sémantique que le `client_id == "new"`
/// du formulaire d'origine.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordSaleRequest {
    pub product_id: i32,
    pub quantity: i32,
    pub client_id: Option<i32>,
    pub new_client: Option<ClientPayload>,
}

/// Une vente enrichie des noms affichables (la couche de présentation ne
/// reçoit que des données, jamais de markup).
#[derive(Debug, Clone, Serialize)]
pub struct SaleResponse {
    pub id: i32,
    pub client_id: i32,
    pub client_name: String,
    pub product_id: i32,
    pub product_name: String,
    pub seller_id: i32,
    pub seller_name: String,
    pub quantity: i32,
    pub total: f64,
    pub created_at: DateTime<Utc>,
}

/// Les quatre compteurs du tableau de bord admin.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DashboardCounts {
    pub products_count: u64,
    pub clients_count: u64,
    pub sales_count: u64,
    pub revenue: f64,
}
