//! Suggestion filtering for the recipient input.
//!
//! Plain case-insensitive substring matching over name and email. There is
//! no scoring: results keep directory order.

use unicase::UniCase;

use crate::directory::User;

/// Users whose name or email contains `query`, ignoring case.
///
/// The empty query matches every user; whether to show the list is up to
/// the caller.
pub fn suggest(all_users: &[User], query: &str) -> Vec<User> {
    let needle = UniCase::new(query).to_folded_case();
    all_users
        .iter()
        .filter(|user| matches_query(user, &needle))
        .cloned()
        .collect()
}

/// `needle` must already be case-folded.
fn matches_query(user: &User, needle: &str) -> bool {
    contains_folded(&user.email, needle) || contains_folded(&user.name, needle)
}

/// Case-folded substring match, consistent with recipient identity.
fn contains_folded(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    UniCase::new(haystack).to_folded_case().contains(needle)
}
