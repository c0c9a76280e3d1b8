//! Main ODataClient

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use reqwest::Method;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderValue;
use tracing::debug;
use url::Url;

use crate::error::ApiError;
use crate::error::Error;

/// The main client for interacting with an OData-flavored REST backend.
///
/// This client is cheap to clone (uses `Arc` internally) and can be shared
/// across threads safely. Requests carry cookie-based credentials: the
/// underlying HTTP client keeps a cookie jar, so a session cookie set by the
/// server is attached to every subsequent request. No token header is part
/// of this client's contract.
///
/// The client owns no request state beyond the cookie jar. It performs no
/// retries and no caching; read requests are idempotent and safe for a
/// caller-side request layer to re-issue or supersede by request key.
///
/// # Example
///
/// ```ignore
/// use gridata_lib::ODataClient;
///
/// let client = ODataClient::builder()
///     .base_url("https://api.example.com")
///     .build();
///
/// let employees = client.resource("employees");
/// ```
#[derive(Clone)]
pub struct ODataClient {
    inner: Arc<ODataClientInner>,
}

struct ODataClientInner {
    base_url: String,
    http_client: Client,
    timeout: Option<Duration>,
}

/// Request body handed to [`ODataClient::request`].
pub(crate) enum Payload {
    /// No body.
    None,
    /// JSON body with `Content-Type: application/json`.
    Json(String),
    /// Multipart form body; the form sets its own content type and boundary.
    Multipart(reqwest::multipart::Form),
}

impl ODataClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> ODataClientBuilder<Missing> {
        ODataClientBuilder::new()
    }

    /// Returns the base URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    fn default_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("OData-Version", HeaderValue::from_static("4.0"));
        headers.insert("Accept", HeaderValue::from_static("application/json"));
        headers
    }

    /// Makes an HTTP request and maps the outcome into the error taxonomy.
    ///
    /// This is the low-level request method used by all resource operations.
    /// Network failures become [`ApiError::Network`] (or [`ApiError::Timeout`]
    /// when a configured timeout elapsed); non-2xx responses become
    /// [`ApiError::Http`] with the body surfaced verbatim as the message.
    pub(crate) async fn request(
        &self,
        method: Method,
        url: &str,
        payload: Payload,
    ) -> Result<reqwest::Response, Error> {
        let parsed = Url::parse(url).map_err(|_| ApiError::InvalidUrl(url.to_string()))?;

        debug!(method = %method, url = %parsed, "issuing request");

        let mut request = self
            .inner
            .http_client
            .request(method, parsed)
            .headers(self.default_headers());

        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        request = match payload {
            Payload::None => request,
            Payload::Json(body) => request
                .header("Content-Type", HeaderValue::from_static("application/json"))
                .body(body),
            Payload::Multipart(form) => request.multipart(form),
        };

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                match self.inner.timeout {
                    Some(timeout) => ApiError::Timeout(timeout),
                    None => ApiError::Network(e),
                }
            } else {
                ApiError::Network(e)
            }
        })?;

        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(Error::Api(ApiError::http(status.as_u16(), body)))
        }
    }
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing an [`ODataClient`].
///
/// Uses the typestate pattern to ensure the base URL is set at compile time.
///
/// # Example
///
/// ```ignore
/// let client = ODataClient::builder()
///     .base_url("https://api.example.com")
///     .timeout(Duration::from_secs(30))
///     .build();
/// ```
pub struct ODataClientBuilder<BaseUrl> {
    base_url: BaseUrl,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    http_client: Option<Client>,
}

impl ODataClientBuilder<Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: Missing,
            timeout: None,
            connect_timeout: None,
            http_client: None,
        }
    }

    /// Sets the backend base URL.
    ///
    /// All request paths (`odata/{resource}/...`) are relative to this URL.
    pub fn base_url(self, url: impl Into<String>) -> ODataClientBuilder<Set<String>> {
        ODataClientBuilder {
            base_url: Set(url.into()),
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
        }
    }
}

impl Default for ODataClientBuilder<Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U> ODataClientBuilder<U> {
    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    ///
    /// This is applied when building the HTTP client.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets a custom HTTP client.
    ///
    /// If not set, a default client with a cookie jar is created. A custom
    /// client must bring its own cookie store if credentialed sessions are
    /// needed.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

impl ODataClientBuilder<Set<String>> {
    /// Builds the [`ODataClient`].
    ///
    /// This method is only available once `base_url` has been set.
    pub fn build(self) -> ODataClient {
        let http_client = self.http_client.unwrap_or_else(|| {
            let mut builder = Client::builder().cookie_store(true);
            if let Some(timeout) = self.connect_timeout {
                builder = builder.connect_timeout(timeout);
            }
            builder.build().expect("Failed to build HTTP client")
        });

        ODataClient {
            inner: Arc::new(ODataClientInner {
                base_url: self.base_url.0.trim_end_matches('/').to_string(),
                http_client,
                timeout: self.timeout,
            }),
        }
    }
}
