// ============================================================================
// MODELS
// ============================================================================
//
// Point d'entrée pour tous les modèles de données.
// Chaque modèle correspond à une table SQLite avec SeaORM.
//
// Liste des modules:
//   - users   : Comptes du personnel (admin / vendeur)
//   - product : Catalogue produits (prix, stock, image)
//   - client  : Fichier clients
//   - sale    : Registre des ventes (immuable)
//   - dto     : Data Transfer Objects pour les requêtes/réponses API
//   - health  : Health check API
//
// Les relations entre tables sont définies dans chaque modèle.
// ============================================================================

pub mod client;
pub mod dto;
pub mod health;
pub mod product;
pub mod sale;
pub mod users;
