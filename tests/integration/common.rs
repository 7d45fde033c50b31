use chrono::{TimeDelta, Utc};
use seniorvu::{ConfigPatch, HttpConfig, SeniorVu};
use wiremock::MockServer;

/// Install a test-friendly tracing subscriber once per process.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

/// Transport settings used by every test client.
pub fn http_config() -> HttpConfig {
    HttpConfig::default().with_tracing(false)
}

/// A client pointed at `server` with no session.
pub fn client(server: &MockServer) -> SeniorVu {
    init_tracing();
    SeniorVu::with_http_config(ConfigPatch::new().base_url(server.uri()), http_config())
        .expect("client should build")
}

/// A client pointed at `server` holding a token that will not need a refresh.
pub fn authenticated_client(server: &MockServer, token: &str) -> SeniorVu {
    init_tracing();
    SeniorVu::with_http_config(
        ConfigPatch::new()
            .base_url(server.uri())
            .token(token)
            .expire_at(Utc::now() + TimeDelta::days(30)),
        http_config(),
    )
    .expect("client should build")
}
