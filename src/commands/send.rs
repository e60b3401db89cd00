//! One-shot form submission.

use serde_json::json;
use unicase::UniCase;

use super::{CommandOutput, format_errors, format_submitted, load_directory_client};
use crate::cli::OutputOptions;
use crate::directory::User;
use crate::error::{MailformError, Result};
use crate::form::FormController;

/// Field values for `mailform send`
#[derive(Debug, Clone, Default)]
pub struct SendOptions {
    pub to: Vec<String>,
    pub all: bool,
    pub subject: String,
    pub description: String,
}

/// Type `query` into the recipient input and pick the user it denotes.
///
/// An exact email match wins; otherwise the query must leave exactly one
/// suggestion.
pub fn resolve_recipient(form: &mut FormController, query: &str) -> Result<User> {
    form.set_query(query);
    let candidates = form.visible_suggestions();

    if let Some(exact) = candidates
        .iter()
        .find(|u| UniCase::new(u.email.as_str()) == UniCase::new(query))
    {
        return Ok(exact.clone());
    }

    match candidates {
        [] => Err(MailformError::NoMatchingRecipient(query.to_string())),
        [only] => Ok(only.clone()),
        many => Err(MailformError::AmbiguousRecipient {
            query: query.to_string(),
            candidates: many
                .iter()
                .map(|u| u.email.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        }),
    }
}

/// Fill the form from `options` and submit it
pub async fn cmd_send(options: SendOptions, output: OutputOptions) -> Result<()> {
    let directory = load_directory_client()?;
    let mut form = FormController::new(1);
    form.load_directory(&directory).await;

    if options.all {
        form.enter_all(&directory).await;
    }

    for query in &options.to {
        let user = resolve_recipient(&mut form, query)?;
        form.select(user);
    }

    form.set_subject(options.subject);
    form.set_description(options.description);

    match form.submit() {
        Ok(payload) => CommandOutput::new(json!(payload))
            .with_text(format_submitted(&payload))
            .print(output),
        Err(errors) => {
            if output.json {
                println!("{}", serde_json::to_string_pretty(&json!({ "errors": errors }))?);
            } else {
                println!("{}", format_errors(&errors));
            }
            Err(MailformError::InvalidForm(errors))
        }
    }
}
