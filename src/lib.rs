//! Native client for the valuation-platform REST backend.
//!
//! ARCHITECTURE
//! ============
//! `net` owns the HTTP transport: a configured request client with uniform
//! response classification, user-facing notifications, and a session-expiry
//! event. `session` owns the authenticated identity: credential persistence,
//! the lifecycle operations (bootstrap, login, register, logout, verify,
//! profile update), and the route-gating predicate. `views` are thin
//! consumers that call an endpoint and format the typed response.
//!
//! DESIGN
//! ======
//! Credentials are threaded into each request explicitly rather than stored
//! as mutable client-wide default headers, and the hard 401 teardown is
//! delivered as an observer event the session layer subscribes to, so the
//! transport layer never reaches into navigation or session state directly.

pub mod net;
pub mod session;
pub mod views;

#[cfg(test)]
pub(crate) mod testsupport;
