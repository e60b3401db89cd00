mod compose;
mod config;
mod send;
mod users;

pub use compose::{SessionCommand, cmd_compose, run_session};
pub use config::{cmd_config_get, cmd_config_set, cmd_config_show};
pub use send::{SendOptions, cmd_send, resolve_recipient};
pub use users::{cmd_suggest, cmd_users};

use owo_colors::{OwoColorize, Stream};

use crate::cli::OutputOptions;
use crate::config::Config;
use crate::directory::{HttpDirectory, User};
use crate::error::Result;
use crate::form::{FormController, FormErrors, FormState, ValidatedForm};

/// A command result that can be printed as text or JSON
pub struct CommandOutput {
    json: serde_json::Value,
    text: Option<String>,
}

impl CommandOutput {
    pub fn new(json: serde_json::Value) -> Self {
        Self { json, text: None }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn print(self, output: OutputOptions) -> Result<()> {
        match self.text {
            Some(text) if !output.json => println!("{text}"),
            _ => println!("{}", serde_json::to_string_pretty(&self.json)?),
        }
        Ok(())
    }
}

/// Build the directory client from the on-disk config
pub(crate) fn load_directory_client() -> Result<HttpDirectory> {
    let config = Config::load()?;
    HttpDirectory::from_config(&config)
}

/// Format a user for single-line display, optionally numbered from 1
pub fn format_user_line(user: &User, number: Option<usize>) -> String {
    let prefix = number.map(|n| format!("{n:>3}. ")).unwrap_or_default();
    format!(
        "{}{} <{}>",
        prefix,
        user.name,
        user.email
            .if_supports_color(Stream::Stdout, |e| e.cyan())
    )
}

pub fn format_user_list(users: &[User], numbered: bool) -> String {
    users
        .iter()
        .enumerate()
        .map(|(i, user)| format_user_line(user, numbered.then_some(i + 1)))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_errors(errors: &FormErrors) -> String {
    errors
        .iter()
        .map(|(field, msg)| {
            format!(
                "{}: {}",
                field.if_supports_color(Stream::Stdout, |f| f.red()),
                msg
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_submitted(payload: &ValidatedForm) -> String {
    let mut text = format!(
        "{}\n{} {}\n{} {}\n{}",
        "Submitted Data".if_supports_color(Stream::Stdout, |t| t.green()),
        "Subject:".if_supports_color(Stream::Stdout, |t| t.bold()),
        payload.subject,
        "Description:".if_supports_color(Stream::Stdout, |t| t.bold()),
        payload.description,
        "Recipients:".if_supports_color(Stream::Stdout, |t| t.bold()),
    );
    for recipient in &payload.recipients {
        text.push_str(&format!("\n  - {}", recipient.email));
    }
    text
}

/// Render the whole form the way the dialog shows it
pub fn format_form(form: &FormController) -> String {
    let mut lines = Vec::new();

    let recipients: Vec<&str> = form.recipients().iter().map(|u| u.email.as_str()).collect();
    lines.push(format!(
        "{} {}",
        "To:".if_supports_color(Stream::Stdout, |t| t.bold()),
        if recipients.is_empty() {
            "(none)".to_string()
        } else {
            recipients.join(", ")
        }
    ));
    lines.push(format!(
        "{} {}",
        "Search:".if_supports_color(Stream::Stdout, |t| t.bold()),
        form.query()
    ));
    lines.push(format!(
        "{} {}",
        "Subject:".if_supports_color(Stream::Stdout, |t| t.bold()),
        form.values().subject
    ));
    lines.push(format!(
        "{} {}",
        "Body:".if_supports_color(Stream::Stdout, |t| t.bold()),
        form.values().description
    ));
    if form.is_loading() {
        lines.push("Loading...".to_string());
    }
    if form.state() == FormState::Invalid && !form.errors().is_empty() {
        lines.push(format_errors(form.errors()));
    }
    if let Some(payload) = form.submitted() {
        lines.push(format_submitted(payload));
    }

    lines.join("\n")
}
