// src/session.rs
use tracing::{debug, info, warn};

use crate::core::net::{HttpResponse, Transport};
use crate::credentials::{self, Endpoints, Token};
use crate::error::{CredentialError, FetchError};

/// Everything a run shares between its requests: the reusable transport,
/// the API endpoints and the current token. Owned by the run loop and
/// lent to each component; only `refresh` replaces the token.
pub struct Session<T: Transport> {
    transport: T,
    endpoints: Endpoints,
    token: Token,
    refreshes: usize,
}

impl<T: Transport> Session<T> {
    /// Acquire the first token. Failing here ends the run.
    pub fn open(mut transport: T, endpoints: Endpoints) -> Result<Self, CredentialError> {
        let token = credentials::acquire(&mut transport, &endpoints)?;
        info!("session opened against {}", endpoints.cookie());
        Ok(Self { transport, endpoints, token, refreshes: 0 })
    }

    pub fn endpoints(&self) -> &Endpoints { &self.endpoints }
    pub fn token(&self) -> &Token { &self.token }
    pub fn transport(&self) -> &T { &self.transport }

    /// How many times the token was re-acquired after expiring.
    pub fn refreshes(&self) -> usize { self.refreshes }

    /// Authenticated API request.
    pub fn get_api(&mut self, url: &str, query: &[(&str, &str)]) -> Result<HttpResponse, FetchError> {
        self.get_with_refresh(url, query, true)
    }

    /// Encyclopedia page; the API cookie isn't sent, but a 403 still
    /// triggers the refresh-and-retry policy.
    pub fn get_page(&mut self, url: &str) -> Result<HttpResponse, FetchError> {
        self.get_with_refresh(url, &[], false)
    }

    fn get_with_refresh(
        &mut self,
        url: &str,
        query: &[(&str, &str)],
        with_cookie: bool,
    ) -> Result<HttpResponse, FetchError> {
        let first = self.send(url, query, with_cookie)?;
        if !credentials::is_expired(first.status) {
            return ensure_success(url, first);
        }

        warn!("{url}: forbidden, refreshing session token");
        self.refresh()
            .map_err(|source| FetchError::Credential { url: url.to_string(), source })?;

        let retry = self.send(url, query, with_cookie)?;
        if credentials::is_expired(retry.status) {
            return Err(FetchError::Expired { url: url.to_string() });
        }
        ensure_success(url, retry)
    }

    fn send(&mut self, url: &str, query: &[(&str, &str)], with_cookie: bool) -> Result<HttpResponse, FetchError> {
        let cookie = with_cookie.then(|| self.token.as_str());
        debug!("GET {url} {query:?}");
        self.transport
            .get(url, query, cookie)
            .map_err(|reason| FetchError::transient(url, reason))
    }

    fn refresh(&mut self) -> Result<(), CredentialError> {
        self.token = credentials::acquire(&mut self.transport, &self.endpoints)?;
        self.refreshes += 1;
        Ok(())
    }
}

fn ensure_success(url: &str, resp: HttpResponse) -> Result<HttpResponse, FetchError> {
    if resp.is_success() {
        Ok(resp)
    } else {
        Err(FetchError::transient(url, format!("HTTP {}", resp.status)))
    }
}
