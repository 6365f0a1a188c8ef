//! Expense Record Handlers
//!
//! Creation, partial update and deletion of expense records. Update and
//! delete load the record first and apply the ownership rule before touching
//! anything.

use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{ensure_owner, ExpenseRecord};
use crate::error::AppError;

use super::{CreateExpenseCommand, DeleteExpenseCommand, UpdateExpenseCommand};

const EXPENSE_COLUMNS: &str = "id, user_id, property_id, title, value, purchase_date, \
     category, subcategory, observation, file_path, created_at, updated_at";

// =========================================================================
// CreateExpenseHandler
// =========================================================================

/// Handler for expense record creation
pub struct CreateExpenseHandler {
    pool: PgPool,
}

impl CreateExpenseHandler {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Execute the create expense command
    pub async fn execute(&self, command: CreateExpenseCommand) -> Result<ExpenseRecord, AppError> {
        // The property reference must resolve before anything is persisted.
        let property_exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM properties WHERE id = $1)")
                .bind(command.property_id)
                .fetch_one(&self.pool)
                .await?;

        if !property_exists {
            return Err(AppError::InvalidRequest(
                "Imóvel informado não existe.".to_string(),
            ));
        }

        let record: ExpenseRecord = sqlx::query_as(&format!(
            r#"
            INSERT INTO expense_records
                (id, user_id, property_id, title, value, purchase_date,
                 category, subcategory, observation, file_path, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, NOW(), NOW())
            RETURNING {EXPENSE_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(command.owner)
        .bind(command.property_id)
        .bind(&command.title)
        .bind(command.value)
        .bind(command.purchase_date)
        .bind(&command.category)
        .bind(&command.subcategory)
        .bind(&command.observation)
        .bind(&command.file_path)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(expense_id = %record.id, owner = %record.user_id, "expense record created");

        Ok(record)
    }
}

// =========================================================================
// UpdateExpenseHandler
// =========================================================================

/// Handler for partial expense updates (title and/or value only)
pub struct UpdateExpenseHandler {
    pool: PgPool,
}

impl UpdateExpenseHandler {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Execute the update expense command
    pub async fn execute(&self, command: UpdateExpenseCommand) -> Result<ExpenseRecord, AppError> {
        command.validate()?;

        let record: Option<ExpenseRecord> = sqlx::query_as(&format!(
            "SELECT {EXPENSE_COLUMNS} FROM expense_records WHERE id = $1"
        ))
        .bind(command.expense_id)
        .fetch_optional(&self.pool)
        .await?;

        let record =
            record.ok_or_else(|| AppError::ExpenseRecordNotFound(command.expense_id.to_string()))?;

        ensure_owner(record.user_id, command.requested_by)?;

        let updated: ExpenseRecord = sqlx::query_as(&format!(
            r#"
            UPDATE expense_records
            SET title = COALESCE($2, title),
                value = COALESCE($3, value),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {EXPENSE_COLUMNS}
            "#
        ))
        .bind(command.expense_id)
        .bind(command.title.as_deref())
        .bind(command.value)
        .fetch_one(&self.pool)
        .await?;

        Ok(updated)
    }
}

// =========================================================================
// DeleteExpenseHandler
// =========================================================================

/// Handler for expense deletion
pub struct DeleteExpenseHandler {
    pool: PgPool,
}

impl DeleteExpenseHandler {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Execute the delete expense command, returning the deleted id
    pub async fn execute(&self, command: DeleteExpenseCommand) -> Result<Uuid, AppError> {
        let owner: Option<Uuid> =
            sqlx::query_scalar("SELECT user_id FROM expense_records WHERE id = $1")
                .bind(command.expense_id)
                .fetch_optional(&self.pool)
                .await?;

        let owner =
            owner.ok_or_else(|| AppError::ExpenseRecordNotFound(command.expense_id.to_string()))?;

        ensure_owner(owner, command.requested_by)?;

        sqlx::query("DELETE FROM expense_records WHERE id = $1")
            .bind(command.expense_id)
            .execute(&self.pool)
            .await?;

        tracing::info!(expense_id = %command.expense_id, "expense record deleted");

        Ok(command.expense_id)
    }
}
