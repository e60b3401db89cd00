pub mod cli;
pub mod commands;
pub mod config;
pub mod dialog;
pub mod directory;
pub mod error;
pub mod form;
pub mod paths;

pub use config::Config;
pub use dialog::Dialog;
pub use directory::{HttpDirectory, StaticDirectory, User, UserSource};
pub use error::{MailformError, Result};
pub use form::{
    FormController, FormErrors, FormState, FormValues, RecipientSet, ValidatedForm, suggest,
    validate,
};
