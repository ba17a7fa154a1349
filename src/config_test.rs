use super::*;
use std::sync::Mutex;

/// Serializes tests that touch `FLEET_*` variables.
static ENV_LOCK: Mutex<()> = Mutex::new(());

/// # Safety
/// Callers must hold `ENV_LOCK`.
unsafe fn clear_fleet_env() {
    unsafe {
        std::env::remove_var("FLEET_BASE_URL");
        std::env::remove_var("FLEET_SNAPSHOT_TIMEOUT_SECS");
    }
}

// =============================================================================
// from_env
// =============================================================================

#[test]
fn from_env_uses_defaults() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    unsafe { clear_fleet_env() };

    let cfg = ClientConfig::from_env();
    assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
    assert_eq!(cfg.reconnect_delay, Duration::from_millis(5000));
    assert_eq!(cfg.snapshot_timeout, Duration::from_secs(DEFAULT_SNAPSHOT_TIMEOUT_SECS));
}

#[test]
fn from_env_reads_overrides() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    unsafe {
        clear_fleet_env();
        std::env::set_var("FLEET_BASE_URL", "https://fleet.example.test/");
        std::env::set_var("FLEET_SNAPSHOT_TIMEOUT_SECS", "3");
    }

    let cfg = ClientConfig::from_env();
    assert_eq!(cfg.base_url, "https://fleet.example.test");
    assert_eq!(cfg.snapshot_timeout, Duration::from_secs(3));
    assert_eq!(cfg.reconnect_delay, Duration::from_millis(DEFAULT_RECONNECT_DELAY_MS));

    unsafe { clear_fleet_env() };
}

#[test]
fn env_parse_invalid_returns_default() {
    unsafe { std::env::set_var("__FLEET_TEST_EP_INVALID__", "soon") };
    let val: u64 = env_parse("__FLEET_TEST_EP_INVALID__", 7);
    assert_eq!(val, 7);
    unsafe { std::env::remove_var("__FLEET_TEST_EP_INVALID__") };
}

// =============================================================================
// endpoint urls
// =============================================================================

#[test]
fn snapshot_url_appends_robots_path() {
    let cfg = ClientConfig::new("http://127.0.0.1:8000/");
    assert_eq!(cfg.snapshot_url(), "http://127.0.0.1:8000/robots");
}

#[test]
fn updates_url_swaps_http_for_ws() {
    let cfg = ClientConfig::new("http://127.0.0.1:8000");
    assert_eq!(cfg.updates_url().as_deref(), Ok("ws://127.0.0.1:8000/updates"));
}

#[test]
fn updates_url_swaps_https_for_wss() {
    let cfg = ClientConfig::new("https://fleet.example.test");
    assert_eq!(cfg.updates_url().as_deref(), Ok("wss://fleet.example.test/updates"));
}

#[test]
fn updates_url_rejects_other_schemes() {
    let cfg = ClientConfig::new("ftp://fleet.example.test");
    assert_eq!(
        cfg.updates_url(),
        Err(ConfigError::InvalidBaseUrl("ftp://fleet.example.test".to_owned()))
    );
}

#[test]
fn builders_override_timing() {
    let cfg = ClientConfig::default()
        .with_reconnect_delay(Duration::from_millis(50))
        .with_snapshot_timeout(Duration::from_secs(1));
    assert_eq!(cfg.reconnect_delay, Duration::from_millis(50));
    assert_eq!(cfg.snapshot_timeout, Duration::from_secs(1));
}
