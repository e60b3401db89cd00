//! Interactive compose session.
//!
//! Reads one command per line and applies it to the form in the dialog:
//!
//! ```text
//! to <text>        type into the recipient search box
//! pick <n>         add the n-th suggestion (1-based)
//! remove <email>   drop a recipient
//! all              make every directory user a recipient
//! clear            remove all recipients
//! subject <text>   set the subject
//! body <text>      set the message body
//! show             print the form
//! submit           validate and submit
//! cancel           reset the form
//! close            close the dialog and exit
//! ```

use std::io::{self, BufRead, Write};

use super::{
    format_errors, format_form, format_submitted, format_user_list, load_directory_client,
};
use crate::dialog::Dialog;
use crate::directory::UserSource;
use crate::error::Result;
use crate::form::FormController;

const HELP: &str = "Commands: to <text>, pick <n>, remove <email>, all, clear, \
subject <text>, body <text>, show, submit, cancel, close, help";

/// One line of input, parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    To(String),
    Pick(usize),
    Remove(String),
    All,
    Clear,
    Subject(String),
    Body(String),
    Show,
    Submit,
    Cancel,
    Close,
    Help,
}

impl SessionCommand {
    pub fn parse(line: &str) -> std::result::Result<Self, String> {
        let line = line.trim();
        let (verb, arg) = match line.split_once(char::is_whitespace) {
            Some((verb, arg)) => (verb, arg.trim()),
            None => (line, ""),
        };

        let command = match verb.to_lowercase().as_str() {
            "to" => SessionCommand::To(arg.to_string()),
            "pick" => {
                let n: usize = arg
                    .parse()
                    .map_err(|_| format!("pick expects a suggestion number, got '{arg}'"))?;
                if n == 0 {
                    return Err("suggestions are numbered from 1".to_string());
                }
                SessionCommand::Pick(n)
            }
            "remove" | "rm" if !arg.is_empty() => SessionCommand::Remove(arg.to_string()),
            "remove" | "rm" => return Err("remove expects an email address".to_string()),
            "all" => SessionCommand::All,
            "clear" => SessionCommand::Clear,
            "subject" => SessionCommand::Subject(arg.to_string()),
            "body" => SessionCommand::Body(arg.to_string()),
            "show" => SessionCommand::Show,
            "submit" | "send" => SessionCommand::Submit,
            "cancel" => SessionCommand::Cancel,
            "close" | "quit" | "exit" => SessionCommand::Close,
            "help" | "?" => SessionCommand::Help,
            other => return Err(format!("unknown command '{other}'. {HELP}")),
        };
        Ok(command)
    }
}

/// Apply one command to the form, writing feedback to `out`
async fn execute<S, W>(
    form: &mut FormController,
    source: &S,
    command: SessionCommand,
    out: &mut W,
) -> Result<()>
where
    S: UserSource,
    W: Write,
{
    match command {
        SessionCommand::To(text) => {
            form.set_query(text);
            let visible = form.visible_suggestions();
            if !visible.is_empty() {
                writeln!(out, "{}", format_user_list(visible, true))?;
            } else if !form.query().is_empty() {
                writeln!(out, "No suggestions.")?;
            }
        }
        SessionCommand::Pick(n) => match form.select_suggestion(n - 1) {
            Some(user) => writeln!(out, "Added {user}")?,
            None => writeln!(out, "No suggestion {n}.")?,
        },
        SessionCommand::Remove(email) => {
            if form.remove_recipient(&email) {
                writeln!(out, "Removed {email}")?;
            } else {
                writeln!(out, "{email} is not a recipient.")?;
            }
        }
        SessionCommand::All => {
            writeln!(out, "Loading...")?;
            if form.enter_all(source).await {
                writeln!(out, "{} recipients.", form.recipients().len())?;
            }
        }
        SessionCommand::Clear => {
            form.clear_recipients();
            writeln!(out, "Recipients cleared.")?;
        }
        SessionCommand::Subject(text) => form.set_subject(text),
        SessionCommand::Body(text) => form.set_description(text),
        SessionCommand::Show => writeln!(out, "{}", format_form(form))?,
        SessionCommand::Submit => match form.submit() {
            Ok(payload) => writeln!(out, "{}", format_submitted(&payload))?,
            Err(errors) => writeln!(out, "{}", format_errors(&errors))?,
        },
        SessionCommand::Cancel => {
            form.cancel();
            writeln!(out, "Form cleared.")?;
        }
        SessionCommand::Close => form.request_close(),
        SessionCommand::Help => writeln!(out, "{HELP}")?,
    }
    Ok(())
}

/// Run a compose session until `close` or end of input
pub async fn run_session<S, R, W>(source: &S, input: R, out: &mut W, prompt: bool) -> Result<()>
where
    S: UserSource,
    R: BufRead,
    W: Write,
{
    let mut dialog = Dialog::new();
    dialog.open_with(source).await;

    writeln!(out, "{HELP}")?;
    let mut lines = input.lines();

    loop {
        if prompt {
            write!(out, "> ")?;
            out.flush()?;
        }

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let Some(form) = dialog.form_mut() else {
            break;
        };

        match SessionCommand::parse(&line) {
            Ok(command) => execute(form, source, command, out).await?,
            Err(message) => writeln!(out, "{message}")?,
        }

        if dialog.apply_close_request() {
            break;
        }
    }

    dialog.close();
    Ok(())
}

/// Run the interactive session on stdin/stdout
pub async fn cmd_compose() -> Result<()> {
    let directory = load_directory_client()?;
    let prompt = atty::is(atty::Stream::Stdin);
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    run_session(&directory, stdin.lock(), &mut stdout, prompt).await
}
