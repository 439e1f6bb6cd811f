//! In-process stand-ins for the generator server, used by unit tests.

use axum::Router;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Bind `app` to an ephemeral local port and return its base URL
pub async fn spawn_stub(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// URL on which nothing is listening
pub async fn dead_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// Records every JSON body a stub handler receives
#[derive(Clone, Default)]
pub struct Recorder {
    hits: Arc<AtomicUsize>,
    bodies: Arc<Mutex<Vec<serde_json::Value>>>,
}

impl Recorder {
    pub fn record(&self, body: serde_json::Value) {
        self.hits.fetch_add(1, Ordering::SeqCst);
        self.bodies.lock().unwrap().push(body);
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn last(&self) -> serde_json::Value {
        self.bodies.lock().unwrap().last().cloned().unwrap()
    }
}
