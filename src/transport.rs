use std::future::Future;
use std::time::Duration;

use reqwest::StatusCode;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::TransportError;
use crate::settings::Settings;

/// Query parameters for one API call, in the order they are sent.
pub type Params<'a> = [(&'a str, String)];

/// The one seam between the resolver and the network: GET the API endpoint
/// with a parameter set and hand back the decoded JSON body.
pub trait Transport {
    fn get_json(&self, params: &Params<'_>) -> impl Future<Output = Result<Value, TransportError>> + Send;
}

/// `reqwest`-backed transport against a single MediaWiki `api.php` endpoint.
pub struct HttpTransport {
    client: reqwest::Client,
    api_url: String,
    max_retries: u32,
    backoff: Duration,
}

impl HttpTransport {
    pub fn new(settings: &Settings) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .user_agent(settings.user_agent.clone())
            .timeout(Duration::from_millis(settings.timeout_ms))
            .build()?;

        Ok(Self {
            client,
            api_url: settings.api_url.clone(),
            max_retries: settings.max_retries,
            backoff: Duration::from_millis(settings.backoff_ms),
        })
    }

    async fn get_once(&self, query: &[(&str, String)]) -> Result<Value, TransportError> {
        let response = self.client.get(&self.api_url).query(query).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status));
        }

        let body = response.text().await?;
        let payload: Value = serde_json::from_str(&body)?;
        if let Some(error) = payload.get("error") {
            let field = |name: &str| {
                error
                    .get(name)
                    .and_then(Value::as_str)
                    .unwrap_or("unknown")
                    .to_string()
            };
            return Err(TransportError::Api {
                code: field("code"),
                info: field("info"),
            });
        }
        Ok(payload)
    }
}

impl Transport for HttpTransport {
    async fn get_json(&self, params: &Params<'_>) -> Result<Value, TransportError> {
        let mut query: Vec<(&str, String)> = Vec::with_capacity(params.len() + 1);
        query.push(("format", "json".to_string()));
        query.extend(params.iter().cloned());

        let mut attempt = 0;
        loop {
            debug!("GET {} {:?}", self.api_url, query);
            match self.get_once(&query).await {
                Err(e) if attempt < self.max_retries && is_retryable(&e) => {
                    let backoff = backoff_for(self.backoff, attempt);
                    warn!(
                        "API call failed: {} (attempt {}/{}), backing off {:.1}s",
                        e,
                        attempt + 1,
                        self.max_retries,
                        backoff.as_secs_f64()
                    );
                    tokio::time::sleep(backoff).await;
                    attempt += 1;
                }
                result => return result,
            }
        }
    }
}

/// `base * 2^attempt`, saturating instead of overflowing on large attempt counts.
fn backoff_for(base: Duration, attempt: u32) -> Duration {
    base.saturating_mul(2u32.saturating_pow(attempt))
}

fn is_retryable(e: &TransportError) -> bool {
    match e {
        TransportError::Status(s) => *s == StatusCode::TOO_MANY_REQUESTS || s.is_server_error(),
        TransportError::Http(e) => e.is_timeout() || e.is_connect(),
        _ => false,
    }
}
