use crate::error::TransportError;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// `text/plain` keeps the POST a "simple" request, so browsers and proxies
/// that honour CORS do not issue a preflight round trip.
pub const TELEMETRY_CONTENT_TYPE: &str = "text/plain";

/// One fully-built telemetry delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryRequest {
    pub url: String,
    pub content_type: &'static str,
    pub body: String,
}

/// Fire one request and report whether it was accepted.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post(&self, request: TelemetryRequest) -> Result<(), TransportError>;
}

pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::with_timeout(30)
    }

    pub fn with_timeout(timeout_secs: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(&self, request: TelemetryRequest) -> Result<(), TransportError> {
        let response = self
            .client
            .post(&request.url)
            .header(reqwest::header::CONTENT_TYPE, request.content_type)
            .body(request.body)
            .send()
            .await
            .map_err(|e| TransportError::Request {
                url: redact_token(&request.url),
                message: e.without_url().to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                url: redact_token(&request.url),
                status: status.as_u16(),
            });
        }
        Ok(())
    }
}

/// Keep access tokens out of logged error messages.
fn redact_token(url: &str) -> String {
    let Some((base, query)) = url.split_once('?') else {
        return url.to_string();
    };
    let params: Vec<&str> = query
        .split('&')
        .map(|param| {
            if param.starts_with("access_token=") {
                "access_token=[REDACTED]"
            } else {
                param
            }
        })
        .collect();
    format!("{base}?{}", params.join("&"))
}
