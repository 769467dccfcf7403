//! Client configuration and API token handling.
//!
//! A Hatchet API token is a JWT whose claims carry the tenant id (`sub`)
//! and the API address (`server_url`). Explicit settings take precedence
//! over the claims. The signature is not checked here; Hatchet does that.

use std::fmt;
use std::time::Duration;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde::Deserialize;

use crate::error::ClientError;

/// Environment variable holding the API token.
pub const TOKEN_ENV: &str = "HATCHET_CLIENT_TOKEN";

/// Environment variable overriding the API address.
pub const SERVER_URL_ENV: &str = "HATCHET_CLIENT_SERVER_URL";

/// Environment variable overriding the tenant id.
pub const TENANT_ID_ENV: &str = "HATCHET_CLIENT_TENANT_ID";

/// Default per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Claims read from the API token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TokenClaims {
    /// Tenant the token was issued for.
    #[serde(default)]
    pub sub: Option<String>,

    /// Address of the Hatchet API.
    #[serde(default)]
    pub server_url: Option<String>,
}

impl TokenClaims {
    /// Decode the payload segment of a JWT.
    pub fn decode(token: &str) -> Result<Self, ClientError> {
        let parts: Vec<&str> = token.split('.').collect();
        if parts.len() != 3 {
            return Err(ClientError::Config(format!(
                "{} is not a JWT (expected 3 segments, got {})",
                TOKEN_ENV,
                parts.len()
            )));
        }

        let payload = URL_SAFE_NO_PAD
            .decode(parts[1].trim_end_matches('='))
            .map_err(|e| ClientError::Config(format!("invalid token payload encoding: {}", e)))?;

        serde_json::from_slice(&payload)
            .map_err(|e| ClientError::Config(format!("invalid token claims: {}", e)))
    }
}

/// Settings needed to talk to a Hatchet tenant.
#[derive(Clone)]
pub struct ClientConfig {
    /// Bearer token sent with every request.
    pub token: String,

    /// Base address of the Hatchet API, without trailing slash.
    pub server_url: String,

    /// Tenant whose workflows and runs are queried.
    pub tenant_id: String,

    /// Per-request timeout.
    pub request_timeout: Duration,
}

impl ClientConfig {
    /// Build a config from a token plus optional explicit overrides.
    ///
    /// Claims are only decoded when an override is missing.
    pub fn resolve(
        token: Option<String>,
        server_url: Option<String>,
        tenant_id: Option<String>,
    ) -> Result<Self, ClientError> {
        let token = non_empty(token).ok_or_else(|| {
            ClientError::Config(format!("{} environment variable is not set", TOKEN_ENV))
        })?;
        let server_url = non_empty(server_url);
        let tenant_id = non_empty(tenant_id);

        let claims = if server_url.is_none() || tenant_id.is_none() {
            TokenClaims::decode(&token)?
        } else {
            TokenClaims::default()
        };

        let server_url = server_url.or(claims.server_url).ok_or_else(|| {
            ClientError::Config(format!(
                "no server URL: set {} or use a token with a server_url claim",
                SERVER_URL_ENV
            ))
        })?;
        let tenant_id = tenant_id.or(claims.sub).ok_or_else(|| {
            ClientError::Config(format!(
                "no tenant id: set {} or use a token with a sub claim",
                TENANT_ID_ENV
            ))
        })?;

        Ok(Self {
            token,
            server_url: normalize_server_url(&server_url),
            tenant_id,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        })
    }

    /// Builder method to set the request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("token", &"<redacted>")
            .field("server_url", &self.server_url)
            .field("tenant_id", &self.tenant_id)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Hatchet tokens may carry a bare host; assume TLS in that case.
fn normalize_server_url(url: &str) -> String {
    let url = url.trim_end_matches('/');
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{}", url)
    }
}
