//! # Auth State
//!
//! The signed-in session plus the plumbing that carries auth results
//! back to whichever login view is open.
//!
//! Each time a login view opens it gets a fresh [`ViewGuard`]; closing
//! it dismisses the guard, so a response that arrives afterwards is
//! dropped instead of popping an alert over an unrelated screen.

use std::cell::RefCell;

use chrono::Utc;
use od_auth::{AuthEvent, AuthEvents, AuthFlow, AuthProvider, AuthUser, Session, Ticket, ViewGuard};
use tracing::{debug, info};

/// Auth handle for the UI thread.
pub struct AuthState<P> {
    flow: AuthFlow<P>,
    events: RefCell<AuthEvents>,
    view: RefCell<ViewGuard>,
    session: RefCell<Option<Session>>,
}

impl<P: AuthProvider + 'static> AuthState<P> {
    pub fn new(provider: P) -> Self {
        let (flow, events) = AuthFlow::new(provider);
        AuthState {
            flow,
            events: RefCell::new(events),
            view: RefCell::new(ViewGuard::new()),
            session: RefCell::new(None),
        }
    }

    pub fn flow(&self) -> &AuthFlow<P> {
        &self.flow
    }

    /// A login view opened. Results for earlier views stop counting.
    pub fn open_view(&self) {
        let mut view = self.view.borrow_mut();
        view.dismiss();
        *view = ViewGuard::new();
    }

    /// The login view closed.
    pub fn dismiss_view(&self) {
        self.view.borrow().dismiss();
    }

    /// Ticket for a request sent from the open view.
    pub fn ticket(&self) -> Ticket {
        self.view.borrow().ticket()
    }

    /// Collects finished requests for the open view, keeping any session
    /// they carry.
    pub fn drain(&self) -> Vec<AuthEvent> {
        let view = self.view.borrow().clone();
        let events = self.events.borrow_mut().drain_for(&view);

        for event in &events {
            if let Ok(outcome) = &event.result {
                if let Some(session) = &outcome.session {
                    info!(user_id = %session.user.id, "session stored");
                    *self.session.borrow_mut() = Some(session.clone());
                }
            }
        }
        events
    }

    /// The signed-in user, unless the session has expired.
    pub fn current_user(&self) -> Option<AuthUser> {
        let mut session = self.session.borrow_mut();
        if session.as_ref().is_some_and(|s| s.is_expired(Utc::now())) {
            debug!("session expired");
            *session = None;
        }
        session.as_ref().map(|s| s.user.clone())
    }

    pub fn sign_out(&self) {
        if self.session.borrow_mut().take().is_some() {
            info!("signed out");
        }
    }
}

impl<P> std::fmt::Debug for AuthState<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthState")
            .field("signed_in", &self.session.borrow().is_some())
            .finish_non_exhaustive()
    }
}
