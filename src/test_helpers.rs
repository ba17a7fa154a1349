//! Shared fixtures for unit tests.

use axum::Router;

use crate::state::{RobotRecord, RobotStatus};

pub(crate) fn robot(id: &str, status: RobotStatus, battery: f64) -> RobotRecord {
    RobotRecord {
        id: id.to_owned(),
        status,
        battery,
        cpu: 25.0,
        ram: 1024.0,
        last_updated: "2024-01-01T00:00:00Z".to_owned(),
        location: None,
    }
}

/// Serve `router` on an ephemeral localhost port and return its base URL.
pub(crate) async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("test listener address");
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    format!("http://{addr}")
}
