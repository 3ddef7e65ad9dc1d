//! HTTP transport modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! `http` issues the requests and classifies responses, `error` defines the
//! failure taxonomy, `notify` is the user-facing message sink, and `types`
//! holds the wire schema for every consumed endpoint.

pub mod error;
pub mod http;
pub mod notify;
pub mod types;
