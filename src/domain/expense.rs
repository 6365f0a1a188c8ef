//! Expense record ("arquivo") row

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

/// An expense receipt record as stored in `expense_records`.
///
/// `user_id` is the owner stamped at creation time; `property_id` must
/// reference an existing property of that owner. `file_path` is the relative
/// path returned by the upload endpoint, if the client attached one.
#[derive(Debug, Clone, FromRow)]
pub struct ExpenseRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub property_id: Uuid,
    pub title: String,
    pub value: Decimal,
    pub purchase_date: NaiveDate,
    pub category: String,
    pub subcategory: String,
    pub observation: Option<String>,
    pub file_path: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
