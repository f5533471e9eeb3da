//! Client for the FortiOS CMDB REST API

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Certificate, Client, Method, StatusCode};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::envelope::{Envelope, ReadOutcome};
use crate::error::{Error, Result};
use crate::path::CmdbPath;

/// Maximum length of response body to log
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Truncate a response body for logging
fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        let mut end = MAX_LOG_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... [truncated, {} bytes total]", &body[..end], body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

enum Body<'a> {
    Empty,
    Json(&'a Map<String, Value>),
    Raw(&'a str),
}

/// Client wrapper for one FortiGate
#[derive(Clone)]
pub struct FortiClient {
    http: Client,
    config: ClientConfig,
    base_url: String,
}

impl FortiClient {
    /// Build a client from validated settings
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let mut builder = Client::builder()
            .user_agent(concat!("fortios-sdk/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .danger_accept_invalid_certs(config.insecure);

        if let Some(path) = &config.cabundlefile {
            let pem = std::fs::read(path)?;
            builder = builder.add_root_certificate(Certificate::from_pem(&pem)?);
        }

        let http = builder.build()?;
        let base_url = config.base_url();

        Ok(Self {
            http,
            config,
            base_url,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    // CMDB operations

    /// POST a new entry into a table
    pub async fn create(&self, path: &CmdbPath, object: &Map<String, Value>) -> Result<Envelope> {
        let value = self
            .request(Method::POST, &path.collection(), Body::Json(object))
            .await?;
        Envelope::from_value(value)?.into_result()
    }

    /// PUT an entry; singletons pass no mkey and target the table path
    pub async fn update(
        &self,
        path: &CmdbPath,
        mkey: Option<&str>,
        object: &Map<String, Value>,
    ) -> Result<Envelope> {
        let url = match mkey {
            Some(mkey) => path.item(mkey),
            None => path.collection(),
        };
        let value = self.request(Method::PUT, &url, Body::Json(object)).await?;
        Envelope::from_value(value)?.into_result()
    }

    /// DELETE an entry
    pub async fn delete(&self, path: &CmdbPath, mkey: &str) -> Result<Envelope> {
        let value = self
            .request(Method::DELETE, &path.item(mkey), Body::Empty)
            .await?;
        Envelope::from_value(value)?.into_result()
    }

    /// GET an entry; singletons pass no mkey
    pub async fn read(&self, path: &CmdbPath, mkey: Option<&str>) -> Result<ReadOutcome> {
        let url = match mkey {
            Some(mkey) => path.item(mkey),
            None => path.collection(),
        };
        let value = self.request(Method::GET, &url, Body::Empty).await?;
        Envelope::from_value(value)?.into_read_outcome()
    }

    /// Send an arbitrary request and hand back the raw body
    pub async fn raw(
        &self,
        method: &str,
        path: &str,
        specialparams: Option<&str>,
        json: Option<&str>,
    ) -> Result<String> {
        let method = Method::from_bytes(method.trim().to_uppercase().as_bytes())
            .map_err(|_| Error::InvalidConfig(format!("invalid HTTP method: {}", method)))?;

        let mut url = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{}", path)
        };
        if let Some(params) = specialparams.filter(|p| !p.is_empty()) {
            url.push(if url.contains('?') { '&' } else { '?' });
            url.push_str(params.trim_start_matches('?'));
        }

        let body = match json.filter(|j| !j.trim().is_empty()) {
            Some(json) => Body::Raw(json),
            None => Body::Empty,
        };

        let (status, text) = self.send(&method, &url, &body).await?;
        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
                body: sanitize_for_log(&text),
            });
        }
        Ok(text)
    }

    // Transport

    async fn request(&self, method: Method, path: &str, body: Body<'_>) -> Result<Value> {
        let (status, text) = self.send(&method, path, &body).await?;

        match serde_json::from_str::<Value>(&text) {
            Ok(value) => Ok(value),
            Err(_) if !status.is_success() => Err(Error::Http {
                status: status.as_u16(),
                body: sanitize_for_log(&text),
            }),
            Err(_) if text.trim().is_empty() => Err(Error::UnexpectedResponse),
            Err(e) => Err(Error::Decode(e)),
        }
    }

    /// Issue the request, re-sending on transport failure up to the
    /// configured attempt count.
    async fn send(&self, method: &Method, path: &str, body: &Body<'_>) -> Result<(StatusCode, String)> {
        let attempts = self.config.attempts();
        let mut attempt = 1;

        loop {
            match self.send_once(method, path, body).await {
                Ok(reply) => return Ok(reply),
                Err(e) if attempt < attempts && e.is_retryable() => {
                    warn!(
                        "{} {} failed (attempt {}/{}): {}",
                        method, path, attempt, attempts, e
                    );
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn send_once(&self, method: &Method, path: &str, body: &Body<'_>) -> Result<(StatusCode, String)> {
        debug!("{} {}", method, path);

        let url = format!("{}{}", self.base_url, path);
        let mut request = self
            .http
            .request(method.clone(), url)
            .bearer_auth(&self.config.token);

        if let Some(vdom) = &self.config.vdom {
            request = request.query(&[("vdom", vdom.as_str())]);
        }

        request = match body {
            Body::Empty => request,
            Body::Json(object) => request.json(object),
            Body::Raw(text) => request
                .header(CONTENT_TYPE, "application/json")
                .body(text.to_string()),
        };

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        debug!("FortiOS response {}: {}", status, sanitize_for_log(&text));

        Ok((status, text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_truncates_long_bodies() {
        let body = "x".repeat(500);
        let logged = sanitize_for_log(&body);
        assert!(logged.starts_with(&"x".repeat(200)));
        assert!(logged.contains("500 bytes total"));
    }

    #[test]
    fn test_sanitize_strips_control_characters() {
        assert_eq!(sanitize_for_log("a\nb\tc d"), "abc d");
    }

    #[test]
    fn test_new_rejects_missing_token() {
        let result = FortiClient::new(ClientConfig::new("fgt.example", ""));
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_new_reports_unreadable_ca_bundle() {
        let mut config = ClientConfig::new("fgt.example", "tok");
        config.cabundlefile = Some("/nonexistent/fortios/ca.pem".into());
        assert!(matches!(FortiClient::new(config), Err(Error::Io(_))));
    }
}
