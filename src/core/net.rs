// src/core/net.rs

// Blocking HTTP GET behind a small trait, so the run loop can be driven
// by a scripted transport in tests.

use std::time::Duration;

use ureq::{Agent, http::header::SET_COOKIE};

use crate::config::consts::USER_AGENT;

/// What the rest of the crate needs from a response.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
    /// Raw `Set-Cookie` header values, in order.
    pub set_cookies: Vec<String>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool { (200..300).contains(&self.status) }
}

/// One GET. Non-success statuses are returned as responses, not errors;
/// `Err` means the request never produced a response (DNS, TLS, timeout…).
pub trait Transport {
    fn get(
        &mut self,
        url: &str,
        query: &[(&str, &str)],
        cookie: Option<&str>,
    ) -> Result<HttpResponse, String>;
}

/// `ureq` agent, reused for every request of a run.
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    pub fn new(timeout: Duration) -> Self {
        let agent: Agent = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .user_agent(USER_AGENT)
            .build()
            .into();
        Self { agent }
    }
}

impl Transport for UreqTransport {
    fn get(
        &mut self,
        url: &str,
        query: &[(&str, &str)],
        cookie: Option<&str>,
    ) -> Result<HttpResponse, String> {
        let mut req = self.agent.get(url);
        for (k, v) in query {
            req = req.query(*k, *v);
        }
        if let Some(c) = cookie {
            req = req.header("Cookie", c);
        }

        let response = req.call().map_err(|e| e.to_string())?;
        let status = response.status().as_u16();
        let set_cookies = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .map(str::to_string)
            .collect();
        let body = response
            .into_body()
            .read_to_string()
            .map_err(|e| format!("reading body: {e}"))?;

        Ok(HttpResponse { status, body, set_cookies })
    }
}
