// src/credentials.rs
//
// Session token lifecycle against the leaders API: `/cookie` hands out a
// short-lived cookie; any 403 downstream means it has expired.

use std::fmt;

use tracing::debug;

use crate::config::consts::{API_ROOT, COOKIE_PATH, COUNTRIES_PATH, LEADERS_PATH, STATUS_PATH};
use crate::core::net::Transport;
use crate::error::CredentialError;

const FORBIDDEN: u16 = 403;

/// Opaque `name=value` cookie pair(s), ready for a `Cookie` header.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    pub fn as_str(&self) -> &str { &self.0 }

    /// Keep only the `name=value` part of each `Set-Cookie` value.
    pub fn from_set_cookies<S: AsRef<str>>(headers: &[S]) -> Option<Self> {
        let pairs: Vec<&str> = headers
            .iter()
            .filter_map(|h| h.as_ref().split(';').next())
            .map(str::trim)
            .filter(|pair| pair.contains('=') && !pair.starts_with('='))
            .collect();
        if pairs.is_empty() { None } else { Some(Token(pairs.join("; "))) }
    }
}

// Cookie values stay out of logs.
impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.0.split('=').next().unwrap_or_default();
        write!(f, "Token({name}=…)")
    }
}

/// API base URL plus the fixed endpoint paths.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoints {
    root: String,
}

impl Endpoints {
    pub fn new(root: &str) -> Self { Self { root: root.trim_end_matches('/').to_string() } }
    pub fn status(&self) -> String { join!(&self.root, STATUS_PATH) }
    pub fn cookie(&self) -> String { join!(&self.root, COOKIE_PATH) }
    pub fn countries(&self) -> String { join!(&self.root, COUNTRIES_PATH) }
    pub fn leaders(&self) -> String { join!(&self.root, LEADERS_PATH) }
}

impl Default for Endpoints {
    fn default() -> Self { Self::new(API_ROOT) }
}

/// Fetch a fresh token from `/cookie`.
pub fn acquire<T: Transport + ?Sized>(
    transport: &mut T,
    endpoints: &Endpoints,
) -> Result<Token, CredentialError> {
    let url = endpoints.cookie();
    let resp = transport
        .get(&url, &[], None)
        .map_err(|reason| CredentialError::Unreachable { url: url.clone(), reason })?;

    if !resp.is_success() {
        return Err(CredentialError::Status { url, status: resp.status });
    }
    let token = Token::from_set_cookies(resp.set_cookies.as_slice()).ok_or(CredentialError::NoCookie { url })?;
    debug!("acquired session token {token:?}");
    Ok(token)
}

/// A forbidden status from any downstream call means the token expired.
pub fn is_expired(status: u16) -> bool {
    status == FORBIDDEN
}
