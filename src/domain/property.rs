//! Property ("imóvel") row

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// A property as stored in the `properties` table. Address fields keep the
/// original service's Portuguese names, which are also the wire names.
#[derive(Debug, Clone, FromRow)]
pub struct Property {
    pub id: Uuid,
    pub user_id: Uuid,
    pub nome: String,
    pub cep: Option<String>,
    pub rua: Option<String>,
    pub numero: Option<String>,
    pub bairro: Option<String>,
    pub cidade: Option<String>,
    pub estado: Option<String>,
    pub tipo: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
