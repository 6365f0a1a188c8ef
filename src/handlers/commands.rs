//! Command definitions
//!
//! Commands represent intentions to change the system state. Owner fields
//! are always filled from the authenticated identity by the API layer,
//! never from a request body.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::AppError;

/// Command to create a user profile (internal identity-issuance path)
#[derive(Debug, Clone)]
pub struct CreateProfileCommand {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl CreateProfileCommand {
    pub fn new(name: String, email: String, password: String) -> Self {
        Self {
            name,
            email,
            password,
        }
    }
}

/// Command to change the authenticated user's password
#[derive(Debug, Clone)]
pub struct ChangePasswordCommand {
    /// Account email from the verified token
    pub email: String,
    pub current_password: String,
    pub new_password: String,
}

impl ChangePasswordCommand {
    pub fn new(email: String, current_password: String, new_password: String) -> Self {
        Self {
            email,
            current_password,
            new_password,
        }
    }
}

/// Command to create an expense record
#[derive(Debug, Clone)]
pub struct CreateExpenseCommand {
    /// Owner stamped on the record (authenticated identity)
    pub owner: Uuid,
    pub title: String,
    pub value: Decimal,
    pub purchase_date: NaiveDate,
    pub property_id: Uuid,
    pub category: String,
    pub subcategory: String,
    pub observation: Option<String>,
    pub file_path: Option<String>,
}

impl CreateExpenseCommand {
    pub fn new(
        owner: Uuid,
        title: String,
        value: Decimal,
        purchase_date: NaiveDate,
        property_id: Uuid,
        category: String,
        subcategory: String,
    ) -> Self {
        Self {
            owner,
            title,
            value,
            purchase_date,
            property_id,
            category,
            subcategory,
            observation: None,
            file_path: None,
        }
    }

    pub fn with_observation(mut self, observation: String) -> Self {
        self.observation = Some(observation);
        self
    }

    pub fn with_file_path(mut self, file_path: String) -> Self {
        self.file_path = Some(file_path);
        self
    }
}

/// Command to update title and/or value of an expense record
#[derive(Debug, Clone)]
pub struct UpdateExpenseCommand {
    pub expense_id: Uuid,
    /// Authenticated identity asking for the change
    pub requested_by: Uuid,
    pub title: Option<String>,
    pub value: Option<Decimal>,
}

impl UpdateExpenseCommand {
    pub fn new(
        expense_id: Uuid,
        requested_by: Uuid,
        title: Option<String>,
        value: Option<Decimal>,
    ) -> Self {
        Self {
            expense_id,
            requested_by,
            title,
            value,
        }
    }

    /// At least one updatable field must be present.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.title.is_none() && self.value.is_none() {
            return Err(AppError::InvalidRequest(
                "Informe pelo menos um campo para atualizar".to_string(),
            ));
        }
        Ok(())
    }
}

/// Command to delete an expense record
#[derive(Debug, Clone)]
pub struct DeleteExpenseCommand {
    pub expense_id: Uuid,
    pub requested_by: Uuid,
}

impl DeleteExpenseCommand {
    pub fn new(expense_id: Uuid, requested_by: Uuid) -> Self {
        Self {
            expense_id,
            requested_by,
        }
    }
}

/// Command to register a property for the authenticated owner
#[derive(Debug, Clone)]
pub struct CreatePropertyCommand {
    /// Account email from the verified token; resolved to the owner row
    pub owner_email: String,
    pub nome: String,
    pub cep: Option<String>,
    pub rua: Option<String>,
    pub numero: Option<String>,
    pub bairro: Option<String>,
    pub cidade: Option<String>,
    pub estado: Option<String>,
    pub tipo: Option<String>,
}

/// Command to delete a property, subject to the dependent-records rule
#[derive(Debug, Clone)]
pub struct DeletePropertyCommand {
    pub property_id: Uuid,
}

impl DeletePropertyCommand {
    pub fn new(property_id: Uuid) -> Self {
        Self { property_id }
    }
}
