// RouterOS REST HTTP client
//
// Wraps `reqwest::Client` with RouterOS-specific URL construction, basic
// auth, error-body parsing, and response normalization. All endpoint
// groups (system, interface, dhcp) are implemented as inherent methods in
// separate files to keep this module focused on transport mechanics.

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// RouterOS error body: `{ "error": 400, "message": "...", "detail": "..." }`
#[derive(Debug, serde::Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    detail: Option<String>,
}

/// Raw HTTP client for a single RouterOS device's REST API.
///
/// Exposes the two primitives the device offers -- a bulk resource fetch
/// ([`get`](Self::get)) and an action invocation ([`call`](Self::call)) --
/// plus typed accessors built on top of them. Responses are normalized to
/// `Vec<T>` before the caller sees them: RouterOS returns a JSON array for
/// collection paths and a bare object for singleton paths.
pub struct RosClient {
    http: reqwest::Client,
    base_url: Url,
    username: String,
    password: SecretString,
}

impl RosClient {
    /// Create a new client from a device base URL and credentials.
    ///
    /// The `base_url` is the device root (e.g. `https://192.168.88.1`);
    /// the `/rest` prefix is appended per request.
    pub fn new(
        base_url: Url,
        username: String,
        password: SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self {
            http,
            base_url,
            username,
            password,
        })
    }

    /// The device base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build a full URL for a REST resource path: `{base}/rest/{path}`
    pub(crate) fn rest_url(&self, path: &str) -> Result<Url, Error> {
        let full = format!(
            "{}/rest/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_matches('/')
        );
        Url::parse(&full).map_err(Error::InvalidUrl)
    }

    // ── RPC primitives ───────────────────────────────────────────────

    /// Fetch a resource collection: `GET /rest/{path}`.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, Error> {
        let url = self.rest_url(path)?;
        debug!("GET {url}");

        let resp = self
            .http
            .get(url)
            .basic_auth(&self.username, Some(self.password.expose_secret()))
            .send()
            .await
            .map_err(Error::Transport)?;

        self.parse_response(resp).await
    }

    /// Invoke an action on a resource: `POST /rest/{path}/{action}`.
    pub async fn call<T: DeserializeOwned>(
        &self,
        path: &str,
        action: &str,
        params: &impl Serialize,
    ) -> Result<Vec<T>, Error> {
        let url = self.rest_url(&format!("{}/{action}", path.trim_matches('/')))?;
        debug!("POST {url}");

        let resp = self
            .http
            .post(url)
            .basic_auth(&self.username, Some(self.password.expose_secret()))
            .json(params)
            .send()
            .await
            .map_err(Error::Transport)?;

        self.parse_response(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    /// Map HTTP/API failures and normalize the payload to a `Vec<T>`.
    async fn parse_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<Vec<T>, Error> {
        let status = resp.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(Error::Authentication {
                status: status.as_u16(),
            });
        }

        let body = resp.text().await.map_err(Error::Transport)?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .ok()
                .and_then(|e| e.detail.or(e.message))
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("request failed")
                        .to_owned()
                });
            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }

        let value: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| Error::Deserialization {
                message: e.to_string(),
                body: body.clone(),
            })?;

        // Collection paths answer with an array, singleton paths (e.g.
        // system/resource) with a bare object.
        let items = match value {
            serde_json::Value::Array(items) => items,
            other => vec![other],
        };

        items
            .into_iter()
            .map(|item| {
                serde_json::from_value(item).map_err(|e| Error::Deserialization {
                    message: e.to_string(),
                    body: body.clone(),
                })
            })
            .collect()
    }
}
