//! Form session controller.
//!
//! Owns every piece of form state as a plain field and re-derives the
//! suggestion list right after each mutation that can change it. Directory
//! fetches are split into a `begin_*` call that hands out a [`FetchTicket`]
//! and [`FormController::complete_fetch`], which applies the result only if
//! the ticket still belongs to this session.

use serde::Serialize;
use tracing::debug;

use crate::directory::{User, UserSource};

use super::autocomplete::suggest;
use super::recipients::RecipientSet;
use super::validator::{Field, FormErrors, FormValues, ValidatedForm, validate};

/// Callback invoked when the form asks its container to close
pub type CloseHandler = Box<dyn FnMut()>;

/// Where the form is in its submit cycle.
///
/// Validation runs synchronously inside [`FormController::submit`], so
/// there is no observable in-between state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FormState {
    #[default]
    Editing,
    /// Last submit failed; errors are shown until the fields are edited
    Invalid,
    /// Last submit succeeded; the payload is shown
    Submitted,
}

/// What a fetch result will be used for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    /// Populate the directory used for suggestions
    Directory,
    /// Overwrite the recipients with the whole directory
    EnterAll,
}

/// Proof that a fetch was started by a particular form session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    session: u64,
    kind: FetchKind,
}

impl FetchTicket {
    pub fn kind(&self) -> FetchKind {
        self.kind
    }

    pub fn session(&self) -> u64 {
        self.session
    }
}

pub struct FormController {
    session: u64,
    values: FormValues,
    errors: FormErrors,
    recipients: RecipientSet,
    directory: Vec<User>,
    suggestions: Vec<User>,
    submitted: Option<ValidatedForm>,
    state: FormState,
    /// Set while an "enter all" fetch is in flight
    loading: bool,
    on_close: Option<CloseHandler>,
}

impl Default for FormController {
    fn default() -> Self {
        Self::new(0)
    }
}

impl FormController {
    pub fn new(session: u64) -> Self {
        Self {
            session,
            values: FormValues::default(),
            errors: FormErrors::default(),
            recipients: RecipientSet::new(),
            directory: Vec::new(),
            suggestions: Vec::new(),
            submitted: None,
            state: FormState::Editing,
            loading: false,
            on_close: None,
        }
    }

    /// Attach the close capability
    pub fn with_on_close(mut self, on_close: impl FnMut() + 'static) -> Self {
        self.on_close = Some(Box::new(on_close));
        self
    }

    pub fn session(&self) -> u64 {
        self.session
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn query(&self) -> &str {
        &self.values.email
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    pub fn recipients(&self) -> &RecipientSet {
        &self.recipients
    }

    pub fn directory(&self) -> &[User] {
        &self.directory
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn submitted(&self) -> Option<&ValidatedForm> {
        self.submitted.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Every directory entry matching the current query
    pub fn suggestions(&self) -> &[User] {
        &self.suggestions
    }

    /// Suggestions to display: none while the query is empty
    pub fn visible_suggestions(&self) -> &[User] {
        if self.values.email.is_empty() {
            &[]
        } else {
            &self.suggestions
        }
    }

    fn recompute_suggestions(&mut self) {
        self.suggestions = suggest(&self.directory, &self.values.email);
    }

    // ------------------------------------------------------------------
    // Field editing
    // ------------------------------------------------------------------

    /// Replace a field's contents, clearing that field's error.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        self.values.set(field, value.into());
        self.errors.clear(field);
        self.state = FormState::Editing;
        if field == Field::Email {
            self.recompute_suggestions();
        }
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.set_field(Field::Email, query);
    }

    pub fn set_subject(&mut self, subject: impl Into<String>) {
        self.set_field(Field::Subject, subject);
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.set_field(Field::Description, description);
    }

    // ------------------------------------------------------------------
    // Recipients
    // ------------------------------------------------------------------

    /// Add `user` as a recipient and put their address in the query buffer.
    pub fn select(&mut self, user: User) {
        let email = user.email.clone();
        if !self.recipients.add(user) {
            debug!("{email} is already a recipient");
        }
        self.set_query(email);
    }

    /// Select the `index`-th visible suggestion.
    ///
    /// Returns the selected user, or `None` when there is no such
    /// suggestion.
    pub fn select_suggestion(&mut self, index: usize) -> Option<User> {
        let Some(user) = self.visible_suggestions().get(index).cloned() else {
            debug!("no suggestion at index {index}");
            return None;
        };
        self.select(user.clone());
        Some(user)
    }

    pub fn remove_recipient(&mut self, email: &str) -> bool {
        self.recipients.remove_email(email)
    }

    /// Empty the recipient list, leaving the fields alone
    pub fn clear_recipients(&mut self) {
        self.recipients.clear();
    }

    // ------------------------------------------------------------------
    // Directory fetches
    // ------------------------------------------------------------------

    /// Start loading the directory for suggestions
    pub fn begin_directory_load(&self) -> FetchTicket {
        FetchTicket {
            session: self.session,
            kind: FetchKind::Directory,
        }
    }

    /// Start an "enter all" fetch.
    ///
    /// Returns `None` while a previous one is still in flight.
    pub fn begin_enter_all(&mut self) -> Option<FetchTicket> {
        if self.loading {
            debug!("enter all already in progress");
            return None;
        }
        self.loading = true;
        Some(FetchTicket {
            session: self.session,
            kind: FetchKind::EnterAll,
        })
    }

    /// Apply a fetch result. Results from another session are dropped.
    ///
    /// Returns whether the result was applied.
    pub fn complete_fetch(&mut self, ticket: FetchTicket, users: Vec<User>) -> bool {
        if ticket.session != self.session {
            debug!(
                ticket_session = ticket.session,
                session = self.session,
                "discarding fetch result from another session"
            );
            return false;
        }

        match ticket.kind {
            FetchKind::Directory => {
                self.directory = users;
                self.recompute_suggestions();
            }
            FetchKind::EnterAll => {
                self.loading = false;
                self.recipients.add_all(users);
            }
        }
        true
    }

    /// Fetch the directory from `source` and apply it
    pub async fn load_directory<S: UserSource>(&mut self, source: &S) {
        let ticket = self.begin_directory_load();
        let users = source.fetch_users().await;
        self.complete_fetch(ticket, users);
    }

    /// Fetch every user from `source` and make them the recipients.
    ///
    /// Returns false if a fetch was already in flight.
    pub async fn enter_all<S: UserSource>(&mut self, source: &S) -> bool {
        let Some(ticket) = self.begin_enter_all() else {
            return false;
        };
        let users = source.fetch_users().await;
        self.complete_fetch(ticket, users)
    }

    // ------------------------------------------------------------------
    // Submit / cancel / close
    // ------------------------------------------------------------------

    /// Validate and, on success, commit the message.
    ///
    /// A successful submit resets the fields and recipients; the payload
    /// stays available through [`FormController::submitted`].
    pub fn submit(&mut self) -> std::result::Result<ValidatedForm, FormErrors> {
        match validate(&self.values, &self.recipients) {
            Ok(form) => {
                self.submitted = Some(form.clone());
                self.recipients.clear();
                self.values = FormValues::default();
                self.errors = FormErrors::default();
                self.state = FormState::Submitted;
                self.recompute_suggestions();
                Ok(form)
            }
            Err(errors) => {
                self.errors = errors.clone();
                self.state = FormState::Invalid;
                Err(errors)
            }
        }
    }

    /// Clear fields, recipients, errors and any submitted payload
    pub fn cancel(&mut self) {
        self.values = FormValues::default();
        self.errors = FormErrors::default();
        self.recipients.clear();
        self.submitted = None;
        self.state = FormState::Editing;
        self.recompute_suggestions();
    }

    /// Ask the container to close the form
    pub fn request_close(&mut self) {
        match self.on_close.as_mut() {
            Some(on_close) => on_close(),
            None => debug!("close requested with no close handler"),
        }
    }
}
