//! Compose form: autocomplete, recipient selection and validation.

pub mod autocomplete;
pub mod controller;
pub mod recipients;
pub mod validator;

pub use autocomplete::suggest;
pub use controller::{CloseHandler, FetchKind, FetchTicket, FormController, FormState};
pub use recipients::RecipientSet;
pub use validator::{Field, FormErrors, FormValues, ValidatedForm, is_valid_email, validate};
