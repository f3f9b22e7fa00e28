use std::{fmt::Debug, net::IpAddr, time::Duration};

use slog::{debug, o};
use url::Url;

use crate::error::{ApiError, Error, Result};
use crate::lookup::LookupResponse;

pub const DEFAULT_BASE_URL: &str = "https://iplocate.io/api";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Blocking client for the IPLocate API.
///
/// Configure it with the `with_*` methods before sharing it. Lookups only need `&self`,
/// so a configured client can be used from several threads at once.
#[derive(Clone)]
pub struct Client {
    base_url: String,
    api_key: Option<String>,
    timeout: Option<Duration>,
    http_agent: ureq::Agent,
    log: slog::Logger,
}

impl Client {
    /// Wraps `http_agent`, or builds an agent with [`DEFAULT_TIMEOUT`] if none is given.
    ///
    /// A caller provided agent keeps its own timeout until [`Client::with_timeout`] is used.
    pub fn new(http_agent: Option<ureq::Agent>) -> Self {
        let (http_agent, timeout) = match http_agent {
            Some(agent) => (agent, None),
            None => (make_http_agent(DEFAULT_TIMEOUT), Some(DEFAULT_TIMEOUT)),
        };
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            api_key: None,
            timeout,
            http_agent,
            log: slog::Logger::root(slog::Discard, o!()),
        }
    }

    /// An empty key counts as no key, requests then go out unauthenticated.
    pub fn with_api_key<S: Into<String>>(mut self, api_key: S) -> Self {
        self.api_key = Some(api_key.into()).filter(|k| !k.is_empty());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_base_url<S: AsRef<str>>(mut self, base_url: S) -> Self {
        let base_url = base_url.as_ref();
        self.base_url = base_url.strip_suffix('/').unwrap_or(base_url).to_owned();
        self
    }

    pub fn with_logger(mut self, log: &slog::Logger) -> Self {
        self.log = log.new(o!("component" => "iplocate"));
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    /// The per request timeout, `None` if the wrapped agent's own setting applies.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Geolocation and threat data for `ip`, which has to be an IPv4 or IPv6 address.
    pub fn lookup(&self, ip: &str) -> Result<LookupResponse> {
        if ip.parse::<IpAddr>().is_err() {
            return Err(Error::InvalidAddress(ip.to_owned()));
        }
        self.lookup_address(ip)
    }

    pub fn lookup_ip(&self, ip: IpAddr) -> Result<LookupResponse> {
        self.lookup_address(&ip.to_string())
    }

    /// Geolocation and threat data for the address this request originates from.
    pub fn lookup_self(&self) -> Result<LookupResponse> {
        let endpoint = self.endpoint()?;
        self.do_request(endpoint)
    }

    fn endpoint(&self) -> Result<Url> {
        Ok(Url::parse(&format!("{}/lookup/", self.base_url))?)
    }

    fn lookup_address(&self, ip: &str) -> Result<LookupResponse> {
        let mut endpoint = self.endpoint()?;
        endpoint
            .path_segments_mut()
            .map_err(|_| Error::InvalidBaseUrl(self.base_url.clone()))?
            .pop_if_empty()
            .push(ip);
        self.do_request(endpoint)
    }

    fn do_request(&self, endpoint: Url) -> Result<LookupResponse> {
        debug!(self.log, "network: lookup"; "endpoint" => endpoint.as_str(), "authenticated" => self.api_key.is_some());

        let mut request = self
            .http_agent
            .request_url("GET", &endpoint)
            .set("User-Agent", USER_AGENT)
            .set("Accept", "application/json");
        if let Some(api_key) = &self.api_key {
            request = request.query("apikey", api_key);
        }
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        // ureq reports non-2xx codes as errors, but the body is still needed
        let resp = match request.call() {
            Ok(resp) => resp,
            Err(ureq::Error::Status(_, resp)) => resp,
            Err(ureq::Error::Transport(transport)) => return Err(transport.into()),
        };
        let status = resp.status();
        let body = resp.into_string().map_err(Error::Body)?;

        debug!(self.log, "network: lookup response"; "status" => status, "bytes" => body.len());

        if status != 200 {
            return Err(match serde_json::from_str::<ApiError>(&body) {
                Ok(api_error) => ApiError {
                    status_code: status,
                    ..api_error
                }
                .into(),
                Err(_) => Error::UnexpectedResponse { status, body },
            });
        }

        serde_json::from_str(&body).map_err(Error::Decode)
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

fn make_http_agent(timeout: Duration) -> ureq::Agent {
    ureq::AgentBuilder::new()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
}
