//! Text-generation providers.

pub mod gemini;
pub mod traits;

pub use gemini::GeminiClient;
pub use traits::TextGenerator;

use reqwest::Client;
use std::time::Duration;

/// Shared HTTP client for provider calls: bounded request timeout plus a
/// keep-alive pool so repeated submissions reuse the connection.
pub fn build_http_client(timeout: Duration) -> Client {
    Client::builder()
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(10))
        .pool_idle_timeout(Duration::from_secs(90))
        .tcp_keepalive(Duration::from_secs(60))
        .build()
        .unwrap_or_else(|_| Client::new())
}
