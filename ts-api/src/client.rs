//! HTTP client for the Telesocial REST API.
//!
//! Handles host normalization, API key transport and redaction, proxy and
//! TLS settings, timeouts, and the request/decode/last-message lifecycle
//! shared by every endpoint.

use std::sync::Arc;
use std::time::Duration;

use regex::Regex;
use reqwest::{Client, Method, Proxy, RequestBuilder, Response};
use tokio::sync::RwLock;
use tracing::{debug, warn};
use url::Url;

use ts_core::config::{ProxyConfig, ProxyKind, ServerConfig};
use ts_core::constants;
use ts_core::error::{TsError, TsResult};

use crate::response::{decode_envelope, ServerResponse};

/// Connector for a Telesocial server.
///
/// Every operation sends exactly one request and never retries; callers
/// decide whether to re-send on a 200-band error.
#[derive(Clone)]
pub struct ApiClient {
    inner: Client,
    /// Normalized server root, always ending in `/`.
    server_root: Url,
    /// Key as configured, sent as `appkey`.
    api_key: String,
    /// Case-insensitive matcher for the raw and URL-encoded key.
    key_pattern: Regex,
    /// Most recent server message, already redacted.
    last_message: Arc<RwLock<Option<String>>>,
}

impl ApiClient {
    /// Create a new ApiClient from server configuration.
    pub fn new(config: &ServerConfig) -> TsResult<Self> {
        let host = config.normalized_host()?;
        let api_key = config.require_api_key()?.to_string();

        let server_root = Url::parse(&host)
            .map_err(|e| TsError::Config(format!("invalid server host {host}: {e}")))?;
        if server_root.cannot_be_a_base() {
            return Err(TsError::Config(format!("invalid server host {host}")));
        }

        let mut builder = Client::builder()
            .user_agent(constants::USER_AGENT)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .redirect(reqwest::redirect::Policy::none());

        if config.accept_invalid_certs {
            warn!("TLS certificate verification disabled");
            builder = builder.danger_accept_invalid_certs(true);
        }

        if let Some(proxy) = &config.proxy {
            builder = builder.proxy(build_proxy(proxy)?);
        }

        let inner = builder
            .build()
            .map_err(|e| TsError::Config(format!("failed to build HTTP client: {e}")))?;

        let encoded_key: String = url::form_urlencoded::byte_serialize(api_key.as_bytes()).collect();
        let key_pattern = redaction_pattern(&api_key, &encoded_key)?;

        debug!("client ready for {}", server_root);

        Ok(Self {
            inner,
            server_root,
            api_key,
            key_pattern,
            last_message: Arc::new(RwLock::new(None)),
        })
    }

    /// The normalized server root.
    pub fn server_root(&self) -> &str {
        self.server_root.as_str()
    }

    /// Most recent message from the server, with the API key masked.
    pub async fn last_message(&self) -> Option<String> {
        self.last_message.read().await.clone()
    }

    /// Mask every occurrence of the API key (raw or URL-encoded, any case)
    /// with asterisks of the same length.
    pub fn redact(&self, text: &str) -> String {
        self.key_pattern
            .replace_all(text, |caps: &regex::Captures<'_>| "*".repeat(caps[0].len()))
            .into_owned()
    }

    /// Build `<root>/api/rest/<segments...>`, percent-encoding each segment.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> TsResult<Url> {
        let mut url = self
            .server_root
            .join(constants::API_ROOT)
            .map_err(|e| TsError::Config(format!("invalid endpoint: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| TsError::Config("server host cannot carry a path".into()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Resolve a URI against the server root. Absolute URIs pass through.
    pub(crate) fn resolve(&self, uri: &str) -> TsResult<Url> {
        self.server_root
            .join(uri.trim())
            .map_err(|e| TsError::InvalidParameter(format!("invalid download URI: {e}")))
    }

    /// Internal: build a request. POST parameters go in a form body, other
    /// methods carry them in the query string. `appkey` always comes first.
    fn build_request(&self, method: Method, url: Url, params: &[(&str, &str)]) -> RequestBuilder {
        let mut pairs: Vec<(&str, &str)> = Vec::with_capacity(params.len() + 1);
        pairs.push(("appkey", self.api_key.as_str()));
        pairs.extend_from_slice(params);

        if method == Method::POST {
            self.inner.post(url).form(&pairs)
        } else {
            self.inner.request(method, url).query(&pairs)
        }
    }

    /// Send one request and return the raw response.
    async fn send(&self, method: Method, url: Url, params: &[(&str, &str)]) -> TsResult<Response> {
        // The key travels in the body or query, never in the logged path.
        debug!("{} {}", method, url.path());
        self.build_request(method, url, params)
            .send()
            .await
            .map_err(|e| self.classify_error(e))
    }

    /// Issue a call and decode the envelope under `tag`.
    ///
    /// The HTTP status line is only logged; the embedded `status` decides
    /// the outcome. Updates the last message when the reply carries one.
    pub(crate) async fn call(
        &self,
        method: Method,
        segments: &[&str],
        params: &[(&str, &str)],
        tag: &str,
    ) -> TsResult<ServerResponse> {
        let url = self.endpoint(segments)?;
        let response = self.send(method, url, params).await?;
        let http_status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| self.classify_error(e))?;

        let mut decoded = match decode_envelope(&body, tag) {
            Ok(decoded) => decoded,
            Err(e) => {
                warn!("undecodable {} reply (http {})", tag, http_status.as_u16());
                return Err(e);
            }
        };

        if decoded.is_error_response() {
            debug!("no {} in reply, using {}", tag, constants::tags::ERROR);
        }

        if let Some(message) = decoded.message.take() {
            let redacted = self.redact(&message);
            *self.last_message.write().await = Some(redacted.clone());
            decoded.message = Some(redacted);
        }

        debug!(
            "{} status={} (http {})",
            decoded.tag,
            decoded.status,
            http_status.as_u16()
        );
        Ok(decoded)
    }

    /// GET an endpoint and return the body as text, without JSON decoding.
    pub(crate) async fn get_text(&self, segments: &[&str]) -> TsResult<String> {
        let url = self.endpoint(segments)?;
        let response = self.send(Method::GET, url, &[]).await?;
        response.text().await.map_err(|e| self.classify_error(e))
    }

    /// GET an arbitrary URL with no `appkey` (download links are pre-signed).
    pub(crate) async fn get_raw(&self, url: Url) -> TsResult<Response> {
        debug!("GET {}", url.path());
        let response = self
            .inner
            .get(url)
            .send()
            .await
            .map_err(|e| self.classify_error(e))?;
        if !response.status().is_success() {
            return Err(TsError::Http(format!(
                "download failed with status {}",
                response.status()
            )));
        }
        Ok(response)
    }

    /// Classify a reqwest error. The message is redacted because reqwest
    /// errors can embed the request URL.
    pub(crate) fn classify_error(&self, e: reqwest::Error) -> TsError {
        let text = self.redact(&e.to_string());
        if e.is_timeout() {
            TsError::Timeout(text)
        } else if e.is_connect() {
            TsError::Http(format!("connection failed: {text}"))
        } else {
            TsError::Http(text)
        }
    }
}

fn build_proxy(config: &ProxyConfig) -> TsResult<Proxy> {
    let scheme = match config.kind {
        ProxyKind::Http => "http",
        ProxyKind::Socks5 => "socks5",
    };
    let address = match config.port {
        Some(port) => format!("{scheme}://{}:{port}", config.host),
        None => format!("{scheme}://{}", config.host),
    };

    let mut proxy = Proxy::all(&address)
        .map_err(|e| TsError::Config(format!("invalid proxy {address}: {e}")))?;
    if let Some(user) = &config.username {
        proxy = proxy.basic_auth(user, config.password.as_deref().unwrap_or(""));
    }
    Ok(proxy)
}

fn redaction_pattern(raw: &str, encoded: &str) -> TsResult<Regex> {
    let mut alternatives = vec![regex::escape(raw)];
    if encoded != raw {
        alternatives.push(regex::escape(encoded));
    }
    // Longest first so the encoded form is masked whole.
    alternatives.sort_by_key(|a| std::cmp::Reverse(a.len()));
    Regex::new(&format!("(?i){}", alternatives.join("|")))
        .map_err(|e| TsError::Config(format!("failed to build key matcher: {e}")))
}
