//! Modal container for the compose form.
//!
//! Each open starts a new form session; closing tears the session down.
//! Fetch results that arrive for a torn-down session are dropped.

use std::cell::Cell;
use std::rc::Rc;

use tracing::debug;

use crate::directory::{User, UserSource};
use crate::form::{FetchTicket, FormController};

#[derive(Default)]
pub struct Dialog {
    form: Option<FormController>,
    sessions_opened: u64,
    close_requested: Rc<Cell<bool>>,
}

impl Dialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.form.is_some()
    }

    /// Open the dialog with a fresh form.
    ///
    /// Returns the ticket for the form's initial directory load. Opening an
    /// already open dialog keeps the current form.
    pub fn open(&mut self) -> FetchTicket {
        if let Some(form) = &self.form {
            return form.begin_directory_load();
        }

        self.sessions_opened += 1;
        self.close_requested.set(false);

        let flag = Rc::clone(&self.close_requested);
        let form = FormController::new(self.sessions_opened).with_on_close(move || flag.set(true));
        let ticket = form.begin_directory_load();
        self.form = Some(form);
        ticket
    }

    /// Open the dialog and load the directory from `source`
    pub async fn open_with<S: UserSource>(&mut self, source: &S) {
        let ticket = self.open();
        let users = source.fetch_users().await;
        self.deliver(ticket, users);
    }

    /// Close the dialog, discarding the form session
    pub fn close(&mut self) {
        if self.form.take().is_some() {
            debug!(session = self.sessions_opened, "dialog closed");
        }
        self.close_requested.set(false);
    }

    /// Close the dialog if the form asked for it. Returns whether it closed.
    pub fn apply_close_request(&mut self) -> bool {
        if self.close_requested.get() {
            self.close();
            return true;
        }
        false
    }

    pub fn form(&self) -> Option<&FormController> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut FormController> {
        self.form.as_mut()
    }

    /// Route a fetch result to the open form, if it still belongs there
    pub fn deliver(&mut self, ticket: FetchTicket, users: Vec<User>) -> bool {
        match self.form.as_mut() {
            Some(form) => form.complete_fetch(ticket, users),
            None => {
                debug!(
                    session = ticket.session(),
                    "dropping fetch result for closed dialog"
                );
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::StaticDirectory;

    fn users() -> Vec<User> {
        vec![User::new(1, "Ann", "ann@x.com")]
    }

    #[test]
    fn test_open_and_close() {
        let mut dialog = Dialog::new();
        assert!(!dialog.is_open());

        let ticket = dialog.open();
        assert!(dialog.is_open());
        assert!(dialog.deliver(ticket, users()));
        assert_eq!(dialog.form().unwrap().directory().len(), 1);

        dialog.close();
        assert!(!dialog.is_open());
        assert!(dialog.form().is_none());
    }

    #[test]
    fn test_result_after_close_is_dropped() {
        let mut dialog = Dialog::new();
        let ticket = dialog.open();
        dialog.close();

        assert!(!dialog.deliver(ticket, users()));
    }

    #[test]
    fn test_result_for_previous_session_is_dropped() {
        let mut dialog = Dialog::new();
        let stale = dialog.open();
        dialog.close();

        let fresh = dialog.open();
        assert!(!dialog.deliver(stale, users()));
        assert!(dialog.form().unwrap().directory().is_empty());
        assert!(dialog.deliver(fresh, users()));
    }

    #[test]
    fn test_enter_all_in_flight_across_reopen() {
        let mut dialog = Dialog::new();
        dialog.open();
        let ticket = dialog.form_mut().unwrap().begin_enter_all().unwrap();
        dialog.close();
        dialog.open();

        assert!(!dialog.deliver(ticket, users()));
        let form = dialog.form().unwrap();
        assert!(form.recipients().is_empty());
        assert!(!form.is_loading());
    }

    #[test]
    fn test_reopen_keeps_current_form() {
        let mut dialog = Dialog::new();
        dialog.open();
        dialog.form_mut().unwrap().set_subject("draft");

        dialog.open();
        assert_eq!(dialog.form().unwrap().values().subject, "draft");
    }

    #[test]
    fn test_form_close_request() {
        let mut dialog = Dialog::new();
        dialog.open();
        assert!(!dialog.apply_close_request());

        dialog.form_mut().unwrap().request_close();
        assert!(dialog.apply_close_request());
        assert!(!dialog.is_open());
    }

    #[tokio::test]
    async fn test_open_with_source() {
        let mut dialog = Dialog::new();
        dialog.open_with(&StaticDirectory::new(users())).await;
        assert_eq!(dialog.form().unwrap().directory(), users().as_slice());
    }
}
