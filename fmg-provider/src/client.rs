// FortiManager JSON-RPC client
//
// Every call is a POST to `{base}/jsonrpc` carrying one method and one
// `params` entry. The first entry of `result` holds the status and payload.
// Calls are made once; failures propagate to the caller unchanged.

use std::sync::atomic::{AtomicU64, Ordering};

use log::{debug, trace};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::{Value as Json, json};
use tokio::sync::RwLock;
use url::Url;

use crate::config::{Credentials, ProviderConfig};
use crate::error::Error;

/// JSON-RPC methods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RpcMethod {
    Get,
    Set,
    Add,
    Update,
    Delete,
    Exec,
}

impl RpcMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            RpcMethod::Get => "get",
            RpcMethod::Set => "set",
            RpcMethod::Add => "add",
            RpcMethod::Update => "update",
            RpcMethod::Delete => "delete",
            RpcMethod::Exec => "exec",
        }
    }
}

#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    id: u64,
    method: &'a str,
    params: [RpcParams<'a>; 1],
    #[serde(skip_serializing_if = "Option::is_none")]
    session: Option<&'a str>,
    verbose: u8,
}

#[derive(Debug, Serialize)]
struct RpcParams<'a> {
    url: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a Json>,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Vec<RpcResult>,
    #[serde(default)]
    session: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RpcResult {
    status: RpcStatus,
    #[serde(default)]
    data: Option<Json>,
}

#[derive(Debug, Deserialize)]
struct RpcStatus {
    code: i64,
    #[serde(default)]
    message: String,
}

/// Client for the FortiManager JSON-RPC API
pub struct FortiClient {
    http: reqwest::Client,
    endpoint: Url,
    credentials: Credentials,
    session: RwLock<Option<SecretString>>,
    next_id: AtomicU64,
}

impl FortiClient {
    /// Build a client from resolved provider configuration
    pub fn new(config: &ProviderConfig) -> Result<Self, Error> {
        let mut builder = reqwest::Client::builder().user_agent("fmg/0.1.0");

        if let Some(path) = &config.cabundlefile {
            let pem = std::fs::read(path)
                .map_err(|e| Error::Tls(format!("failed to read CA bundle: {e}")))?;
            let cert = reqwest::Certificate::from_pem(&pem)
                .map_err(|e| Error::Tls(format!("invalid CA bundle: {e}")))?;
            builder = builder.add_root_certificate(cert);
        }
        if config.insecure {
            builder = builder.danger_accept_invalid_certs(true);
        }

        if let Credentials::Token(token) = &config.credentials {
            let mut headers = reqwest::header::HeaderMap::new();
            let mut value =
                reqwest::header::HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
                    .map_err(|e| Error::Config(format!("invalid token: {e}")))?;
            value.set_sensitive(true);
            headers.insert(reqwest::header::AUTHORIZATION, value);
            builder = builder.default_headers(headers);
        }

        let http = builder
            .build()
            .map_err(|e| Error::Tls(format!("failed to build HTTP client: {e}")))?;

        Ok(Self::with_client(
            http,
            config.base_url()?,
            config.credentials.clone(),
        ))
    }

    /// Build a client around an existing `reqwest::Client`
    pub fn with_client(http: reqwest::Client, base_url: Url, credentials: Credentials) -> Self {
        let session = match &credentials {
            Credentials::Session(s) => Some(s.clone()),
            _ => None,
        };
        let endpoint = jsonrpc_endpoint(&base_url);
        Self {
            http,
            endpoint,
            credentials,
            session: RwLock::new(session),
            next_id: AtomicU64::new(1),
        }
    }

    /// The JSON-RPC endpoint URL
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    // ── Session ─────────────────────────────────────────────────────

    /// Establish a session when logging in with username and password.
    ///
    /// Token and pre-established session credentials need no login.
    pub async fn login(&self) -> Result<(), Error> {
        let (username, password) = match &self.credentials {
            Credentials::Login { username, password } => (username, password),
            Credentials::Token(_) | Credentials::Session(_) => return Ok(()),
        };

        debug!("login as {}", username);
        let data = json!({ "user": username, "passwd": password.expose_secret() });
        let response = self
            .send(RpcMethod::Exec, "/sys/login/user", Some(&data), None)
            .await?;

        let status = first_status(&response, "/sys/login/user")?;
        if status.code != 0 {
            return Err(Error::Authentication {
                message: status.message.clone(),
            });
        }

        let session = response.session.ok_or_else(|| Error::Authentication {
            message: "login response carried no session".into(),
        })?;
        *self.session.write().await = Some(SecretString::from(session));
        Ok(())
    }

    /// Close the session opened by [`login`](Self::login)
    pub async fn logout(&self) -> Result<(), Error> {
        if !matches!(self.credentials, Credentials::Login { .. }) {
            return Ok(());
        }
        if self.session.read().await.is_none() {
            return Ok(());
        }
        debug!("logout");
        self.call(RpcMethod::Exec, "/sys/logout", None).await?;
        *self.session.write().await = None;
        Ok(())
    }

    // ── Object operations ───────────────────────────────────────────

    /// Create or update an object with `set`, `add` or `update`
    pub async fn create_update(
        &self,
        method: RpcMethod,
        url: &str,
        data: &Json,
    ) -> Result<Option<Json>, Error> {
        self.call(method, url, Some(data)).await
    }

    /// Read an object. A missing object is `Ok(None)`.
    pub async fn read(&self, url: &str) -> Result<Option<Json>, Error> {
        match self.call(RpcMethod::Get, url, None).await {
            Ok(data) => Ok(data.filter(|d| !d.is_null())),
            Err(e) if e.is_not_found() => {
                debug!("{} does not exist", url);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Delete an object
    pub async fn delete(&self, url: &str) -> Result<(), Error> {
        self.call(RpcMethod::Delete, url, None).await.map(|_| ())
    }

    // ── Workspace ───────────────────────────────────────────────────

    pub async fn lock_adom(&self, adom: &str) -> Result<(), Error> {
        self.workspace(adom, "lock").await
    }

    pub async fn commit_adom(&self, adom: &str) -> Result<(), Error> {
        self.workspace(adom, "commit").await
    }

    pub async fn unlock_adom(&self, adom: &str) -> Result<(), Error> {
        self.workspace(adom, "unlock").await
    }

    async fn workspace(&self, adom: &str, action: &str) -> Result<(), Error> {
        let url = if adom == "global" {
            format!("/dvmdb/global/workspace/{}", action)
        } else {
            format!("/dvmdb/adom/{}/workspace/{}", adom, action)
        };
        self.call(RpcMethod::Exec, &url, None).await.map(|_| ())
    }

    // ── Transport ───────────────────────────────────────────────────

    /// Issue one JSON-RPC call and return the payload of its first result
    pub async fn call(
        &self,
        method: RpcMethod,
        url: &str,
        data: Option<&Json>,
    ) -> Result<Option<Json>, Error> {
        let session = self.session.read().await.clone();
        if matches!(self.credentials, Credentials::Login { .. }) && session.is_none() {
            return Err(Error::Authentication {
                message: "not logged in".into(),
            });
        }

        let response = self
            .send(method, url, data, session.as_ref().map(|s| s.expose_secret()))
            .await?;

        let result = response
            .result
            .into_iter()
            .next()
            .ok_or_else(|| Error::Deserialization {
                message: format!("empty result for {}", url),
                body: String::new(),
            })?;

        if result.status.code != 0 {
            return Err(Error::Api {
                code: result.status.code,
                message: result.status.message,
                url: url.to_string(),
            });
        }

        Ok(result.data)
    }

    async fn send(
        &self,
        method: RpcMethod,
        url: &str,
        data: Option<&Json>,
        session: Option<&str>,
    ) -> Result<RpcResponse, Error> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = RpcRequest {
            id,
            method: method.as_str(),
            params: [RpcParams { url, data }],
            session,
            verbose: 1,
        };

        debug!("{} {} (id {})", method.as_str(), url, id);
        if url != "/sys/login/user" {
            trace!("request data: {:?}", data);
        }

        let resp = self
            .http
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(Error::Authentication {
                message: "session expired or invalid credentials".into(),
            });
        }

        let body = resp.text().await.map_err(Error::Transport)?;
        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
                body,
            });
        }
        trace!("response body: {}", body);

        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body,
        })
    }
}

fn first_status<'a>(response: &'a RpcResponse, url: &str) -> Result<&'a RpcStatus, Error> {
    response
        .result
        .first()
        .map(|r| &r.status)
        .ok_or_else(|| Error::Deserialization {
            message: format!("empty result for {}", url),
            body: String::new(),
        })
}

/// `jsonrpc` under the base path, keeping any prefix such as `/fmg`
fn jsonrpc_endpoint(base_url: &Url) -> Url {
    let mut base = base_url.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join("jsonrpc").unwrap_or(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_keeps_base_path() {
        let endpoint = |base: &str| jsonrpc_endpoint(&Url::parse(base).unwrap()).to_string();
        assert_eq!(endpoint("https://fmg.example.com"), "https://fmg.example.com/jsonrpc");
        assert_eq!(endpoint("https://fmg.example.com/"), "https://fmg.example.com/jsonrpc");
        assert_eq!(endpoint("https://proxy/fmg"), "https://proxy/fmg/jsonrpc");
        assert_eq!(endpoint("https://proxy/fmg/"), "https://proxy/fmg/jsonrpc");
    }

    #[test]
    fn request_serialization() {
        let data = json!({"fosid": 1});
        let request = RpcRequest {
            id: 7,
            method: RpcMethod::Add.as_str(),
            params: [RpcParams {
                url: "/pm/config/device/FGT/vdom/root/firewall/dnstranslation",
                data: Some(&data),
            }],
            session: Some("abc"),
            verbose: 1,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "id": 7,
                "method": "add",
                "params": [{
                    "url": "/pm/config/device/FGT/vdom/root/firewall/dnstranslation",
                    "data": {"fosid": 1}
                }],
                "session": "abc",
                "verbose": 1
            })
        );
    }

    #[test]
    fn request_without_data_or_session() {
        let request = RpcRequest {
            id: 1,
            method: "get",
            params: [RpcParams {
                url: "/sys/status",
                data: None,
            }],
            session: None,
            verbose: 1,
        };
        let v = serde_json::to_value(&request).unwrap();
        assert!(v.get("session").is_none());
        assert!(v["params"][0].get("data").is_none());
    }

    #[test]
    fn response_parsing() {
        let response: RpcResponse = serde_json::from_value(json!({
            "id": 1,
            "result": [{"status": {"code": -3, "message": "Object does not exist"}, "url": "/x"}]
        }))
        .unwrap();
        assert_eq!(response.result[0].status.code, -3);
        assert!(response.result[0].data.is_none());
    }

    #[test]
    fn endpoint_is_jsonrpc() {
        let client = FortiClient::with_client(
            reqwest::Client::new(),
            Url::parse("https://fmg.example.com").unwrap(),
            Credentials::Token(SecretString::from("t".to_string())),
        );
        assert_eq!(client.endpoint().as_str(), "https://fmg.example.com/jsonrpc");
    }
}
