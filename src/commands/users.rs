//! Directory listing commands.
//!
//! - `users`: print the whole directory
//! - `suggest`: print the users the autocomplete would offer for a query

use serde_json::json;

use super::{CommandOutput, format_user_list, load_directory_client};
use crate::cli::OutputOptions;
use crate::directory::UserSource;
use crate::error::Result;
use crate::form::suggest;

/// List every user in the directory
pub async fn cmd_users(output: OutputOptions) -> Result<()> {
    let directory = load_directory_client()?;
    let users = directory.fetch_users().await;

    let text = if users.is_empty() {
        "No users found.".to_string()
    } else {
        format_user_list(&users, false)
    };

    CommandOutput::new(json!(users)).with_text(text).print(output)
}

/// List the users matching `query`
pub async fn cmd_suggest(query: &str, output: OutputOptions) -> Result<()> {
    let directory = load_directory_client()?;
    let users = directory.fetch_users().await;
    let matches = suggest(&users, query);

    let text = if matches.is_empty() {
        format!("No users match '{query}'.")
    } else {
        format_user_list(&matches, true)
    };

    CommandOutput::new(json!(matches)).with_text(text).print(output)
}
