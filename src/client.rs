use std::thread;
use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, RETRY_AFTER};
use reqwest::Method;
use serde_json::{json, Value};

use crate::config::ClientConfig;
use crate::error::{AsanaError, Result};
use crate::resources::Sections;
use crate::transport::{Params, RequestOptions, Transport};

const MAX_BACKOFF_MS: u64 = 30_000;

/// Maximum length of an error body written to the log.
const MAX_LOG_BODY_LENGTH: usize = 200;

// ---------------------------------------------------------------------------
// Public client
// ---------------------------------------------------------------------------

/// Blocking HTTP transport for the Asana REST API.
///
/// ```no_run
/// use asana_client::{AsanaClient, Params, RequestOptions};
///
/// let client = AsanaClient::new("https://app.asana.com/api/1.0", Some("0/token")).unwrap();
/// let sections = client
///     .sections()
///     .list_by_project("1200000000000001", &Params::new(), &RequestOptions::default())
///     .unwrap();
/// println!("{sections:#}");
/// ```
pub struct AsanaClient {
    base_url: String,
    http: Client,
    max_retries: u32,
    retry_backoff_ms: u64,
}

impl AsanaClient {
    /// Create a new client.
    ///
    /// * `base_url` – API root, e.g. `https://app.asana.com/api/1.0`
    /// * `token`    – optional bearer token (personal access token or OAuth)
    pub fn new(base_url: &str, token: Option<&str>) -> Result<Self> {
        let mut config = ClientConfig::new(base_url);
        if let Some(tok) = token {
            config = config.with_access_token(tok);
        }
        Self::from_config(&config)
    }

    /// Create a client from environment variables, see [`ClientConfig::from_env`].
    pub fn from_env() -> Result<Self> {
        Self::from_config(&ClientConfig::from_env()?)
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(tok) = &config.access_token {
            let val = HeaderValue::from_str(&format!("Bearer {tok}")).map_err(|e| {
                AsanaError::Configuration {
                    message: format!("Invalid token header value: {e}"),
                }
            })?;
            headers.insert(AUTHORIZATION, val);
        }

        let http = Client::builder()
            .default_headers(headers)
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
            max_retries: config.max_retries,
            retry_backoff_ms: config.retry_backoff_ms,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // -- resource accessors --------------------------------------------------

    pub fn sections(&self) -> Sections<'_, Self> {
        Sections::new(self)
    }

    // -- request plumbing ----------------------------------------------------

    /// Build the full URL for a given path.
    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Send a request, retrying rate-limited and server-failed attempts.
    fn request(
        &self,
        method: Method,
        path: &str,
        params: &Params,
        options: &RequestOptions,
    ) -> Result<Value> {
        let max_retries = options.max_retries.unwrap_or(self.max_retries);
        let mut attempt = 0;

        loop {
            tracing::debug!(%method, path, attempt, "sending request");
            let response = self.build(method.clone(), path, params, options)?.send()?;

            match handle_response(response, options) {
                Err(err) if err.is_retryable() && attempt < max_retries => {
                    let delay = retry_delay(&err, attempt, self.retry_backoff_ms);
                    tracing::warn!(
                        %method,
                        path,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        "retrying after error: {err}"
                    );
                    thread::sleep(delay);
                    attempt += 1;
                }
                other => return other,
            }
        }
    }

    fn build(
        &self,
        method: Method,
        path: &str,
        params: &Params,
        options: &RequestOptions,
    ) -> Result<RequestBuilder> {
        let mut query: Vec<(String, String)> = Vec::new();
        let mut builder = if method == Method::GET || method == Method::DELETE {
            query.extend(params.iter().map(|(k, v)| (k.clone(), query_value(v))));
            self.http.request(method, self.url(path))
        } else {
            self.http
                .request(method, self.url(path))
                .json(&json!({ "data": params }))
        };

        query.extend(option_query(options));
        if !query.is_empty() {
            builder = builder.query(&query);
        }

        let mut headers = HeaderMap::new();
        for (name, value) in &options.headers {
            let header_name =
                HeaderName::from_bytes(name.as_bytes()).map_err(|e| AsanaError::Configuration {
                    message: format!("Invalid header name {name:?}: {e}"),
                })?;
            let header_value = HeaderValue::from_str(value).map_err(|e| {
                AsanaError::Configuration {
                    message: format!("Invalid value for header {name:?}: {e}"),
                }
            })?;
            headers.insert(header_name, header_value);
        }
        if !headers.is_empty() {
            builder = builder.headers(headers);
        }

        Ok(builder)
    }
}

impl Transport for AsanaClient {
    fn get(&self, path: &str, params: &Params, options: &RequestOptions) -> Result<Value> {
        self.request(Method::GET, path, params, options)
    }

    fn post(&self, path: &str, params: &Params, options: &RequestOptions) -> Result<Value> {
        self.request(Method::POST, path, params, options)
    }

    fn put(&self, path: &str, params: &Params, options: &RequestOptions) -> Result<Value> {
        self.request(Method::PUT, path, params, options)
    }

    fn delete(&self, path: &str, params: &Params, options: &RequestOptions) -> Result<Value> {
        self.request(Method::DELETE, path, params, options)
    }
}

// ---------------------------------------------------------------------------
// Internal response handling
// ---------------------------------------------------------------------------

/// Map the status code to a result, unwrapping the `{ "data": ... }` envelope.
fn handle_response(response: Response, options: &RequestOptions) -> Result<Value> {
    let status = response.status().as_u16();
    let retry_after = response
        .headers()
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok());

    if status == 204 {
        return Ok(Value::Null);
    }

    let text = response.text()?;

    if (200..300).contains(&status) {
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        let body: Value = serde_json::from_str(&text)?;
        return Ok(unwrap_envelope(body, options.full_payload));
    }

    tracing::debug!(status, body = %sanitize_for_log(&text), "request failed");

    // Fall back to an empty body when the error is not JSON.
    let body: Value = serde_json::from_str(&text).unwrap_or_default();
    Err(error_for_status(status, &body, retry_after))
}

fn unwrap_envelope(body: Value, full_payload: bool) -> Value {
    if full_payload {
        return body;
    }
    match body {
        Value::Object(mut map) => match map.remove("data") {
            Some(data) => data,
            None => Value::Object(map),
        },
        other => other,
    }
}

fn error_for_status(status: u16, body: &Value, retry_after: Option<u64>) -> AsanaError {
    let errors = body.get("errors").cloned();
    let msg = errors
        .as_ref()
        .and_then(|e| e.as_array())
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.get("message").and_then(|m| m.as_str()))
                .collect::<Vec<_>>()
                .join("; ")
        })
        .unwrap_or_default();

    let message = |default: &str| {
        if msg.is_empty() {
            default.to_string()
        } else {
            msg.clone()
        }
    };

    match status {
        400 => AsanaError::InvalidRequest {
            message: message("Invalid request"),
            errors,
        },
        401 => AsanaError::NoAuthorization {
            message: message("Not authorized"),
        },
        402 => AsanaError::PremiumOnly {
            message: message("Premium only"),
        },
        403 => AsanaError::Forbidden {
            message: message("Forbidden"),
        },
        404 => AsanaError::NotFound {
            message: message("Not found"),
        },
        429 => AsanaError::RateLimitEnforced {
            message: message("Rate limit enforced"),
            retry_after,
        },
        500..=599 => AsanaError::ServerError {
            status,
            message: message("Server error"),
        },
        _ => AsanaError::Api {
            status,
            message: message(&format!("HTTP {status}")),
        },
    }
}

fn retry_delay(err: &AsanaError, attempt: u32, backoff_ms: u64) -> Duration {
    if let AsanaError::RateLimitEnforced {
        retry_after: Some(secs),
        ..
    } = err
    {
        return Duration::from_millis(secs.saturating_mul(1000).min(MAX_BACKOFF_MS));
    }
    let factor = 1u64 << attempt.min(16);
    Duration::from_millis(backoff_ms.saturating_mul(factor).min(MAX_BACKOFF_MS))
}

fn query_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn option_query(options: &RequestOptions) -> Vec<(String, String)> {
    let mut query = Vec::new();
    if !options.fields.is_empty() {
        query.push(("opt_fields".to_string(), options.fields.join(",")));
    }
    if !options.expand.is_empty() {
        query.push(("opt_expand".to_string(), options.expand.join(",")));
    }
    if options.pretty {
        query.push(("opt_pretty".to_string(), "true".to_string()));
    }
    query
}

/// Truncate long bodies and drop control characters before logging.
fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        let cut = (0..=MAX_LOG_BODY_LENGTH)
            .rev()
            .find(|i| body.is_char_boundary(*i))
            .unwrap_or(0);
        format!("{}... [truncated, {} bytes total]", &body[..cut], body.len())
    } else {
        body.to_string()
    };
    truncated.replace(|c: char| c.is_control(), "")
}
