//! Expense record ("arquivo") endpoints
//!
//! Listing is scoped to the authenticated owner with an optional property
//! filter; mutation and deletion go through the ownership rule in the
//! handlers. Wire names are camelCase (`purchaseDate`, `filePath`).

use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::ExpenseRecord;
use crate::error::AppError;
use crate::handlers::{
    CreateExpenseCommand, CreateExpenseHandler, DeleteExpenseCommand, DeleteExpenseHandler,
    UpdateExpenseCommand, UpdateExpenseHandler,
};

use super::middleware::CurrentUser;
use super::AppState;

// =========================================================================
// Request/Response types
// =========================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseResponse {
    pub id: Uuid,
    #[serde(rename = "user")]
    pub user_id: Uuid,
    #[serde(rename = "property")]
    pub property_id: Uuid,
    pub title: String,
    pub value: Decimal,
    pub purchase_date: NaiveDate,
    pub category: String,
    pub subcategory: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ExpenseRecord> for ExpenseResponse {
    fn from(record: ExpenseRecord) -> Self {
        Self {
            id: record.id,
            user_id: record.user_id,
            property_id: record.property_id,
            title: record.title,
            value: record.value,
            purchase_date: record.purchase_date,
            category: record.category,
            subcategory: record.subcategory,
            observation: record.observation,
            file_path: record.file_path,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListExpensesQuery {
    #[serde(rename = "propertyId", default)]
    pub property_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateExpenseRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub value: Option<Decimal>,
    #[serde(default)]
    pub purchase_date: Option<NaiveDate>,
    #[serde(default)]
    pub property: Option<Uuid>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub subcategory: Option<String>,
    #[serde(default)]
    pub observation: Option<String>,
    #[serde(default)]
    pub file_path: Option<String>,
}

impl CreateExpenseRequest {
    /// Validate the required-field set, naming every absent field. The owner
    /// is stamped from the authenticated identity, never from the body.
    fn into_command(self, owner: Uuid) -> Result<CreateExpenseCommand, AppError> {
        match (
            self.title,
            self.value,
            self.purchase_date,
            self.property,
            self.category,
            self.subcategory,
        ) {
            (
                Some(title),
                Some(value),
                Some(purchase_date),
                Some(property),
                Some(category),
                Some(subcategory),
            ) => {
                let mut command = CreateExpenseCommand::new(
                    owner,
                    title,
                    value,
                    purchase_date,
                    property,
                    category,
                    subcategory,
                );
                if let Some(observation) = self.observation {
                    command = command.with_observation(observation);
                }
                if let Some(file_path) = self.file_path {
                    command = command.with_file_path(file_path);
                }
                Ok(command)
            }
            (title, value, purchase_date, property, category, subcategory) => {
                let mut missing = Vec::new();
                if title.is_none() {
                    missing.push("title".to_string());
                }
                if value.is_none() {
                    missing.push("value".to_string());
                }
                if purchase_date.is_none() {
                    missing.push("purchaseDate".to_string());
                }
                if property.is_none() {
                    missing.push("property".to_string());
                }
                if category.is_none() {
                    missing.push("category".to_string());
                }
                if subcategory.is_none() {
                    missing.push("subcategory".to_string());
                }
                Err(AppError::MissingFields(missing))
            }
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateExpenseRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub value: Option<Decimal>,
}

#[derive(Debug, Serialize)]
pub struct DeleteExpenseResponse {
    pub id: Uuid,
    pub message: String,
}

const EXPENSE_COLUMNS: &str = "id, user_id, property_id, title, value, purchase_date, \
     category, subcategory, observation, file_path, created_at, updated_at";

// =========================================================================
// GET /api/uploads
// =========================================================================

/// List the owner's expense records, newest first, optionally narrowed to
/// one property
pub async fn list_expenses(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Query(query): Query<ListExpensesQuery>,
) -> Result<Json<Vec<ExpenseResponse>>, AppError> {
    let records: Vec<ExpenseRecord> = match query.property_id {
        Some(property_id) => {
            sqlx::query_as(&format!(
                r#"
                SELECT {EXPENSE_COLUMNS} FROM expense_records
                WHERE user_id = $1 AND property_id = $2
                ORDER BY created_at DESC
                "#
            ))
            .bind(current.id)
            .bind(property_id)
            .fetch_all(&state.pool)
            .await?
        }
        None => {
            sqlx::query_as(&format!(
                r#"
                SELECT {EXPENSE_COLUMNS} FROM expense_records
                WHERE user_id = $1
                ORDER BY created_at DESC
                "#
            ))
            .bind(current.id)
            .fetch_all(&state.pool)
            .await?
        }
    };

    Ok(Json(records.into_iter().map(Into::into).collect()))
}

// =========================================================================
// POST /api/uploads
// =========================================================================

/// Create an expense record owned by the authenticated user
pub async fn create_expense(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(request): Json<CreateExpenseRequest>,
) -> Result<(StatusCode, Json<ExpenseResponse>), AppError> {
    let command = request.into_command(current.id)?;

    let handler = CreateExpenseHandler::new(state.pool.clone());
    let record = handler.execute(command).await?;

    Ok((StatusCode::CREATED, Json(record.into())))
}

// =========================================================================
// PUT /api/uploads/:id
// =========================================================================

/// Update title and/or value of an owned expense record
pub async fn update_expense(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateExpenseRequest>,
) -> Result<Json<ExpenseResponse>, AppError> {
    let handler = UpdateExpenseHandler::new(state.pool.clone());
    let record = handler
        .execute(UpdateExpenseCommand::new(
            id,
            current.id,
            request.title,
            request.value,
        ))
        .await?;

    Ok(Json(record.into()))
}

// =========================================================================
// DELETE /api/uploads/:id
// =========================================================================

/// Delete an owned expense record
pub async fn delete_expense(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteExpenseResponse>, AppError> {
    let handler = DeleteExpenseHandler::new(state.pool.clone());
    let deleted_id = handler
        .execute(DeleteExpenseCommand::new(id, current.id))
        .await?;

    Ok(Json(DeleteExpenseResponse {
        id: deleted_id,
        message: "Arquivo removido com sucesso".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_create_expense_request_deserialize() {
        let request: CreateExpenseRequest = serde_json::from_str(
            r#"{
                "title": "Tinta para parede",
                "value": 150.75,
                "purchaseDate": "2025-01-15",
                "property": "550e8400-e29b-41d4-a716-446655440000",
                "category": "Reforma",
                "subcategory": "Pintura",
                "filePath": "550e8400/123-456.pdf"
            }"#,
        )
        .unwrap();

        assert_eq!(request.title.as_deref(), Some("Tinta para parede"));
        assert_eq!(request.value, Some(dec!(150.75)));
        assert_eq!(
            request.purchase_date,
            NaiveDate::from_ymd_opt(2025, 1, 15)
        );
        assert_eq!(request.file_path.as_deref(), Some("550e8400/123-456.pdf"));
        assert!(request.observation.is_none());
    }

    #[test]
    fn test_into_command_names_missing_fields() {
        let request: CreateExpenseRequest =
            serde_json::from_str(r#"{"title": "Tinta"}"#).unwrap();

        match request.into_command(Uuid::new_v4()) {
            Err(AppError::MissingFields(fields)) => {
                assert_eq!(
                    fields,
                    vec![
                        "value".to_string(),
                        "purchaseDate".to_string(),
                        "property".to_string(),
                        "category".to_string(),
                        "subcategory".to_string(),
                    ]
                );
            }
            other => panic!("Expected MissingFields, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_into_command_stamps_owner() {
        let owner = Uuid::new_v4();
        let request: CreateExpenseRequest = serde_json::from_str(
            r#"{
                "title": "Tinta",
                "value": 10,
                "purchaseDate": "2025-01-15",
                "property": "550e8400-e29b-41d4-a716-446655440000",
                "category": "Reforma",
                "subcategory": "Pintura"
            }"#,
        )
        .unwrap();

        let command = request.into_command(owner).unwrap();
        assert_eq!(command.owner, owner);
    }

    #[test]
    fn test_list_query_accepts_property_filter() {
        let query: ListExpensesQuery = serde_json::from_str(
            r#"{"propertyId": "550e8400-e29b-41d4-a716-446655440000"}"#,
        )
        .unwrap();
        assert!(query.property_id.is_some());

        let empty: ListExpensesQuery = serde_json::from_str("{}").unwrap();
        assert!(empty.property_id.is_none());
    }

    #[test]
    fn test_expense_response_wire_names() {
        let response = ExpenseResponse {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            property_id: Uuid::new_v4(),
            title: "Tinta".to_string(),
            value: dec!(150.75),
            purchase_date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            category: "Reforma".to_string(),
            subcategory: "Pintura".to_string(),
            observation: None,
            file_path: Some("abc/1-2.pdf".to_string()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_value(&response).unwrap();

        assert!(json.get("user").is_some());
        assert!(json.get("property").is_some());
        assert!(json.get("purchaseDate").is_some());
        assert_eq!(json["filePath"], "abc/1-2.pdf");
        assert!(json.get("observation").is_none());
        assert!(json.get("user_id").is_none());
    }
}
