/*
[INPUT]:  HTTP configuration (base URL, timeouts, client certificate paths)
[OUTPUT]: Configured reqwest client ready for renewal API calls
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing client behavior
*/

use crate::http::{RenewalError, Result};
use reqwest::{Certificate, Client, Identity, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use std::path::PathBuf;
use std::time::Duration;

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub identity: Option<ClientIdentity>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            identity: None,
        }
    }
}

/// PEM files presenting the caller to the renewal service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIdentity {
    pub cert_path: PathBuf,
    pub key_path: PathBuf,
    /// Extra root certificates trusted in addition to the bundled roots
    pub ca_bundle_path: Option<PathBuf>,
}

impl ClientIdentity {
    /// Read certificate and key into a single rustls identity.
    ///
    /// reqwest expects the private key and the certificate chain in one PEM buffer.
    pub fn load_identity(&self) -> Result<Identity> {
        let mut pem = read_pem(&self.cert_path)?;
        if !pem.ends_with(b"\n") {
            pem.push(b'\n');
        }
        pem.extend(read_pem(&self.key_path)?);
        Identity::from_pem(&pem).map_err(|err| {
            RenewalError::Identity(format!(
                "{} / {}: {err}",
                self.cert_path.display(),
                self.key_path.display()
            ))
        })
    }

    /// Parse every certificate found in the optional CA bundle
    pub fn load_roots(&self) -> Result<Vec<Certificate>> {
        let Some(path) = self.ca_bundle_path.as_ref() else {
            return Ok(Vec::new());
        };
        let pem = read_pem(path)?;
        Certificate::from_pem_bundle(&pem)
            .map_err(|err| RenewalError::Identity(format!("{}: {err}", path.display())))
    }
}

fn read_pem(path: &PathBuf) -> Result<Vec<u8>> {
    std::fs::read(path)
        .map_err(|err| RenewalError::Identity(format!("read {}: {err}", path.display())))
}

/// Main HTTP client for the renewal service
#[derive(Debug, Clone)]
pub struct RenewalClient {
    http_client: Client,
    base_url: Url,
    timeout: Duration,
}

impl RenewalClient {
    /// Create a new client with default configuration
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_config(ClientConfig::default(), base_url)
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig, base_url: &str) -> Result<Self> {
        let mut builder = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout);

        if let Some(identity) = config.identity.as_ref() {
            builder = builder.identity(identity.load_identity()?);
            for root in identity.load_roots()? {
                builder = builder.add_root_certificate(root);
            }
            tracing::debug!(
                cert = %identity.cert_path.display(),
                "client certificate loaded"
            );
        }

        let http_client = builder.build()?;

        Ok(Self {
            http_client,
            base_url: Url::parse(base_url)?,
            timeout: config.timeout,
        })
    }

    /// Base URL every endpoint is joined onto
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build full URL from path segments; each segment is percent-encoded
    pub(crate) fn endpoint_url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| RenewalError::UrlParse(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Build request builder for an endpoint
    pub(crate) fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder> {
        let url = self.endpoint_url(segments)?;
        Ok(self.http_client.request(method, url))
    }

    /// Send a request and decode a JSON body, mapping non-2xx statuses to API errors
    pub(crate) async fn send_json<T>(&self, builder: RequestBuilder) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let response = builder.send().await.map_err(|err| {
            if err.is_timeout() {
                RenewalError::Timeout {
                    duration: self.timeout.as_secs(),
                }
            } else {
                RenewalError::Http(err)
            }
        })?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "renewal service returned error status");
            let message = if body.trim().is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_string()
            } else {
                body
            };
            return Err(RenewalError::api_error(status, message));
        }

        serde_json::from_str(&body).map_err(RenewalError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_has_no_identity() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
        assert!(config.identity.is_none());
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let result = RenewalClient::new("not a url");
        assert!(matches!(result, Err(RenewalError::UrlParse(_))));
    }

    #[test]
    fn test_endpoint_url_keeps_base_path_and_encodes_segments() {
        let client = RenewalClient::new("https://renewals.example.com/portal/").expect("client");
        let url = client
            .endpoint_url(&["api", "renewals", "A 1/x", "submissions", "count"])
            .expect("url");
        assert_eq!(
            url.as_str(),
            "https://renewals.example.com/portal/api/renewals/A%201%2Fx/submissions/count"
        );
    }

    #[test]
    fn test_missing_identity_file_is_reported() {
        let identity = ClientIdentity {
            cert_path: PathBuf::from("/nonexistent/client.crt"),
            key_path: PathBuf::from("/nonexistent/client.key"),
            ca_bundle_path: None,
        };
        let config = ClientConfig {
            identity: Some(identity),
            ..ClientConfig::default()
        };

        let err = RenewalClient::with_config(config, "https://renewals.example.com")
            .expect_err("missing files must fail");
        assert!(matches!(err, RenewalError::Identity(_)));
    }

    #[test]
    fn test_roots_empty_without_bundle() {
        let identity = ClientIdentity {
            cert_path: PathBuf::from("client.crt"),
            key_path: PathBuf::from("client.key"),
            ca_bundle_path: None,
        };
        assert!(identity.load_roots().expect("no bundle").is_empty());
    }
}
