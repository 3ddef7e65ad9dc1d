//! Route-gating predicate for authenticated views.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use crate::session::store::SessionSnapshot;

/// Three-way gate in front of a protected view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteGate {
    /// Bootstrap has not settled; render nothing and do not redirect.
    Pending,
    /// Settled and unauthenticated; send the user to the login view.
    RedirectToLogin,
    /// Authenticated; render the guarded content.
    Render,
}

/// Gate a snapshot. `loading` is checked first so the bootstrap window
/// never produces a flash-redirect to login.
#[must_use]
pub fn route_gate(snapshot: &SessionSnapshot) -> RouteGate {
    if snapshot.loading {
        RouteGate::Pending
    } else if snapshot.is_authenticated {
        RouteGate::Render
    } else {
        RouteGate::RedirectToLogin
    }
}
