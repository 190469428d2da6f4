use dioxus::prelude::*;

use crate::client::store;

/// Whether the dashboard holds a delegated token.
#[derive(Clone, Debug, PartialEq)]
pub enum Session {
    /// Local storage not read yet.
    Loading,
    SignedOut,
    SignedIn(String),
}

impl Session {
    pub fn token(&self) -> Option<&str> {
        match self {
            Session::SignedIn(token) => Some(token),
            _ => None,
        }
    }
}

/// Forgets the token; protected routes then redirect to the login view.
pub fn sign_out(mut session: Signal<Session>) {
    store::clear_token();
    session.set(Session::SignedOut);
}
