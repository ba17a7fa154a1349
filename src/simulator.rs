//! Fleet simulator — a stand-in for the fleet server.
//!
//! DESIGN
//! ======
//! Serves the two endpoints the client consumes: `GET /robots` returns the
//! current fleet, `GET /updates` upgrades to a WebSocket that re-randomizes
//! every robot each tick and pushes the whole fleet as one JSON text frame.
//! All connections share one fleet, so a snapshot taken between ticks
//! matches the last pushed payload.

use std::sync::Arc;
use std::time::Duration;

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::Response;
use axum::routing::get;
use rand::Rng;
use serde_json::json;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};
use uuid::Uuid;

use crate::config::{SNAPSHOT_PATH, UPDATES_PATH};
use crate::state::{LOW_BATTERY_THRESHOLD, RobotRecord, RobotStatus};

pub const DEFAULT_FLEET_SIZE: usize = 10;
pub const DEFAULT_TICK_MS: u64 = 5000;

#[derive(Clone)]
pub struct SimulatorState {
    robots: Arc<RwLock<Vec<RobotRecord>>>,
    tick: Duration,
}

impl SimulatorState {
    #[must_use]
    pub fn new(fleet_size: usize, tick: Duration) -> Self {
        Self { robots: Arc::new(RwLock::new(seed_fleet(fleet_size))), tick }
    }

    pub async fn robots(&self) -> Vec<RobotRecord> {
        self.robots.read().await.clone()
    }
}

pub fn router(state: SimulatorState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(SNAPSHOT_PATH, get(list_robots))
        .route(UPDATES_PATH, get(handle_updates))
        .layer(cors)
        .with_state(state)
}

/// Serve the simulator until the listener fails.
///
/// # Errors
///
/// Returns the I/O error that stopped the server.
pub async fn serve(listener: tokio::net::TcpListener, state: SimulatorState) -> std::io::Result<()> {
    let addr = listener.local_addr()?;
    info!(%addr, tick_ms = state.tick.as_millis(), "fleet simulator listening");
    axum::serve(listener, router(state)).await
}

/// Fresh fleet: every robot online with healthy battery.
#[must_use]
pub fn seed_fleet(count: usize) -> Vec<RobotRecord> {
    let mut rng = rand::rng();
    let now = now_timestamp();
    (0..count)
        .map(|_| RobotRecord {
            id: Uuid::new_v4().to_string(),
            status: RobotStatus::Online,
            battery: f64::from(rng.random_range(20..=100_i32)),
            cpu: f64::from(rng.random_range(10..=100_i32)),
            ram: f64::from(rng.random_range(100..=16000_i32)),
            last_updated: now.clone(),
            location: Some(random_location(&mut rng)),
        })
        .collect()
}

/// Advance every robot by one tick. Robots below the low-battery line go offline.
pub fn tick_fleet(robots: &mut [RobotRecord]) {
    let mut rng = rand::rng();
    let now = now_timestamp();
    for robot in robots {
        robot.battery = f64::from(rng.random_range(10..=100_i32));
        robot.cpu = f64::from(rng.random_range(10..=100_i32));
        robot.ram = f64::from(rng.random_range(100..=16000_i32));
        robot.status = if robot.battery < LOW_BATTERY_THRESHOLD {
            RobotStatus::Offline
        } else {
            RobotStatus::Online
        };
        robot.last_updated.clone_from(&now);
        robot.location = Some(random_location(&mut rng));
    }
}

fn random_location(rng: &mut impl Rng) -> serde_json::Value {
    json!([rng.random_range(-90.0..=90.0), rng.random_range(-180.0..=180.0)])
}

fn now_timestamp() -> String {
    OffsetDateTime::now_utc().format(&Rfc3339).unwrap_or_default()
}

async fn list_robots(State(state): State<SimulatorState>) -> Json<Vec<RobotRecord>> {
    Json(state.robots().await)
}

async fn handle_updates(State(state): State<SimulatorState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| stream_updates(socket, state))
}

async fn stream_updates(mut socket: WebSocket, state: SimulatorState) {
    info!("simulator: update stream opened");

    loop {
        let payload = {
            let mut robots = state.robots.write().await;
            tick_fleet(&mut robots);
            serde_json::to_string(&*robots)
        };
        let payload = match payload {
            Ok(payload) => payload,
            Err(e) => {
                error!(error = %e, "simulator: fleet serialization failed");
                break;
            }
        };
        if socket.send(Message::Text(payload.into())).await.is_err() {
            break;
        }
        if !wait_for_tick(&mut socket, state.tick).await {
            break;
        }
    }

    info!("simulator: update stream closed");
}

/// Sleep one tick while draining inbound frames. `false` once the peer is gone.
async fn wait_for_tick(socket: &mut WebSocket, tick: Duration) -> bool {
    let sleep = tokio::time::sleep(tick);
    tokio::pin!(sleep);

    loop {
        tokio::select! {
            () = &mut sleep => return true,
            msg = socket.recv() => match msg {
                None | Some(Err(_) | Ok(Message::Close(_))) => return false,
                Some(Ok(_)) => {}
            },
        }
    }
}

#[cfg(test)]
#[path = "simulator_test.rs"]
mod tests;
