//! The list of selected recipients.
//!
//! Recipients are kept in selection order and are unique by email address.
//! Emails compare case-insensitively, so `Ann@X.com` and `ann@x.com` are the
//! same recipient.

use serde::Serialize;
use unicase::UniCase;

use crate::directory::User;

/// Insertion-ordered set of users keyed by email
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RecipientSet {
    users: Vec<User>,
}

fn same_email(a: &str, b: &str) -> bool {
    UniCase::new(a) == UniCase::new(b)
}

impl RecipientSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `user` unless a recipient with the same email is present.
    ///
    /// Returns true if the set changed.
    pub fn add(&mut self, user: User) -> bool {
        if self.contains_email(&user.email) {
            return false;
        }
        self.users.push(user);
        true
    }

    /// Remove the recipient whose email matches `user`'s.
    pub fn remove(&mut self, user: &User) -> bool {
        self.remove_email(&user.email)
    }

    /// Remove the recipient with the given email, if any.
    pub fn remove_email(&mut self, email: &str) -> bool {
        let before = self.users.len();
        self.users.retain(|u| !same_email(&u.email, email));
        self.users.len() != before
    }

    /// Replace the whole set with `users`.
    ///
    /// This overwrites rather than merges. Duplicate emails inside `users`
    /// collapse onto their first occurrence.
    pub fn add_all(&mut self, users: impl IntoIterator<Item = User>) {
        self.users.clear();
        for user in users {
            self.add(user);
        }
    }

    pub fn clear(&mut self) {
        self.users.clear();
    }

    pub fn contains_email(&self, email: &str) -> bool {
        self.users.iter().any(|u| same_email(&u.email, email))
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, User> {
        self.users.iter()
    }

    pub fn as_slice(&self) -> &[User] {
        &self.users
    }

    pub fn to_vec(&self) -> Vec<User> {
        self.users.clone()
    }
}

impl<'a> IntoIterator for &'a RecipientSet {
    type Item = &'a User;
    type IntoIter = std::slice::Iter<'a, User>;

    fn into_iter(self) -> Self::IntoIter {
        self.users.iter()
    }
}
