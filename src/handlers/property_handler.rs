//! Property Handlers
//!
//! Property registration and deletion. Deletion enforces the dependent-
//! records rule: a property referenced by any expense record stays put.

use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::Property;
use crate::error::AppError;

use super::{CreatePropertyCommand, DeletePropertyCommand};

const PROPERTY_COLUMNS: &str =
    "id, user_id, nome, cep, rua, numero, bairro, cidade, estado, tipo, created_at, updated_at";

// =========================================================================
// CreatePropertyHandler
// =========================================================================

/// Handler for property registration
pub struct CreatePropertyHandler {
    pool: PgPool,
}

impl CreatePropertyHandler {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Execute the create property command
    pub async fn execute(&self, command: CreatePropertyCommand) -> Result<Property, AppError> {
        // The owner row must still exist for the token's email.
        let owner_id: Option<Uuid> = sqlx::query_scalar("SELECT id FROM users WHERE email = $1")
            .bind(&command.owner_email)
            .fetch_optional(&self.pool)
            .await?;

        let owner_id = owner_id.ok_or_else(|| AppError::UserNotFound(command.owner_email.clone()))?;

        let property: Property = sqlx::query_as(&format!(
            r#"
            INSERT INTO properties
                (id, user_id, nome, cep, rua, numero, bairro, cidade, estado, tipo,
                 created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, NOW(), NOW())
            RETURNING {PROPERTY_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(owner_id)
        .bind(&command.nome)
        .bind(&command.cep)
        .bind(&command.rua)
        .bind(&command.numero)
        .bind(&command.bairro)
        .bind(&command.cidade)
        .bind(&command.estado)
        .bind(&command.tipo)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(property_id = %property.id, owner = %owner_id, "property created");

        Ok(property)
    }
}

// =========================================================================
// DeletePropertyHandler
// =========================================================================

/// Handler for property deletion
pub struct DeletePropertyHandler {
    pool: PgPool,
}

impl DeletePropertyHandler {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Execute the delete property command
    pub async fn execute(&self, command: DeletePropertyCommand) -> Result<(), AppError> {
        let dependents: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM expense_records WHERE property_id = $1")
                .bind(command.property_id)
                .fetch_one(&self.pool)
                .await?;

        if dependents > 0 {
            return Err(AppError::PropertyHasLinkedRecords);
        }

        // The count and the delete are not one transaction; a record created
        // in between trips the foreign key instead of being orphaned.
        let result = sqlx::query("DELETE FROM properties WHERE id = $1")
            .bind(command.property_id)
            .execute(&self.pool)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                    AppError::PropertyHasLinkedRecords
                }
                _ => AppError::Database(e),
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::PropertyNotFound(command.property_id.to_string()));
        }

        tracing::info!(property_id = %command.property_id, "property deleted");

        Ok(())
    }
}
