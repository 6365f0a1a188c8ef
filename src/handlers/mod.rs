//! Command handlers
//!
//! One handler struct per state-changing operation. Handlers own a pool,
//! run the operation's checks (ownership, referential integrity, credential
//! verification) and persist the outcome.

mod commands;
mod expense_handler;
mod profile_handler;
mod property_handler;


pub use commands::*;
pub use expense_handler::{CreateExpenseHandler, DeleteExpenseHandler, UpdateExpenseHandler};
pub use profile_handler::{ChangePasswordHandler, CreateProfileHandler};
pub use property_handler::{CreatePropertyHandler, DeletePropertyHandler};
