//! User-facing message sink.
//!
//! SYSTEM CONTEXT
//! ==============
//! The transport layer issues exactly one notification per failed request;
//! views may add their own rendering but never suppress or repeat it. The
//! CLI installs [`StderrNotifier`]; tests install a recording sink.

/// Sink for transient user-visible messages.
pub trait Notifier: Send + Sync {
    /// Surface an error message to the user.
    fn error(&self, message: &str);
}

/// Notifier that writes messages to stderr, keeping stdout clean for
/// command output.
#[derive(Clone, Copy, Debug, Default)]
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn error(&self, message: &str) {
        eprintln!("error: {message}");
    }
}
