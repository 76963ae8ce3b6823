use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub username: String,
    #[sea_orm(unique)]
    pub email: Option<String>,
    #[serde(skip_serializing)] // Ne jamais exposer le hash en JSON
    pub password_hash: String, // Format: pbkdf2:sha256:iterations$salt$hash
    pub role: String, // "admin" ou "vendeur"
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::sale::Entity")]
    Sale,
}

impl Related<super::sale::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sale.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Rôle d'un utilisateur. Deux valeurs seulement: l'admin gère le catalogue,
/// les clients et voit toutes les ventes; le vendeur enregistre des ventes et
/// ne voit que les siennes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Vendeur,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Vendeur => "vendeur",
        }
    }

    /// Rôle par défaut à l'inscription: vendeur.
    pub fn parse_or_vendeur(s: &str) -> Role {
        match s {
            "admin" => Role::Admin,
            _ => Role::Vendeur,
        }
    }
}

impl Model {
    pub fn role(&self) -> Role {
        Role::parse_or_vendeur(&self.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        assert_eq!(Role::parse_or_vendeur("admin"), Role::Admin);
        assert_eq!(Role::parse_or_vendeur("vendeur"), Role::Vendeur);
        assert_eq!(Role::Admin.as_str(), "admin");
    }

    #[test]
    fn test_unknown_role_defaults_to_vendeur() {
        assert_eq!(Role::parse_or_vendeur("superuser"), Role::Vendeur);
        assert_eq!(Role::parse_or_vendeur(""), Role::Vendeur);
    }
}
