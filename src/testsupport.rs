//! Shared fixtures for the sibling test modules: recording sinks for
//! notifications and redirects, and an in-process stub backend.

use std::sync::Mutex;

use axum::Router;

use crate::net::notify::Notifier;
use crate::session::store::Navigator;

/// Notifier that records every message for assertion.
#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn error(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_owned());
    }
}

/// Navigator that records forced login redirects.
#[derive(Default)]
pub struct RecordingNavigator {
    redirects: Mutex<usize>,
}

impl RecordingNavigator {
    pub fn redirects(&self) -> usize {
        *self.redirects.lock().unwrap()
    }
}

impl Navigator for RecordingNavigator {
    fn to_login(&self) {
        *self.redirects.lock().unwrap() += 1;
    }
}

/// Serve `router` on an ephemeral port and return its base URL.
pub async fn spawn_stub(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    format!("http://{addr}")
}

/// An address guaranteed to refuse connections: bind an ephemeral port,
/// then drop the listener before anyone connects.
pub async fn unreachable_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}
