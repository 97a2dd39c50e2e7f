// src/sources/api.rs
//
// JSON endpoints of the leaders API.
//   /status                 plain-text liveness message
//   /countries              ["be", "fr", …]
//   /leaders?country=<code> [{ id, first_name, …, wikipedia_url }, …]

use tracing::warn;

use crate::core::net::Transport;
use crate::credentials::Endpoints;
use crate::data::{ApiLeader, Country, LeaderRecord};
use crate::error::{FetchError, RecordError};
use crate::session::Session;

/// Leaders of one country, plus payload entries that failed validation.
#[derive(Debug, Default)]
pub struct LeaderBatch {
    pub leaders: Vec<LeaderRecord>,
    pub rejected: Vec<RecordError>,
}

/// Liveness check. Needs no token, so it runs before a session exists.
pub fn check_status<T: Transport + ?Sized>(
    transport: &mut T,
    endpoints: &Endpoints,
) -> Result<String, FetchError> {
    let url = endpoints.status();
    let resp = transport.get(&url, &[], None).map_err(|e| FetchError::transient(&url, e))?;
    if !resp.is_success() {
        return Err(FetchError::transient(&url, format!("HTTP {}", resp.status)));
    }
    Ok(resp.body.trim().trim_matches('"').to_string())
}

pub fn list_countries<T: Transport>(session: &mut Session<T>) -> Result<Vec<Country>, FetchError> {
    let url = session.endpoints().countries();
    let resp = session.get_api(&url, &[])?;
    parse_countries(&resp.body).map_err(|e| FetchError::transient(&url, format!("bad JSON: {e}")))
}

pub fn leaders_for<T: Transport>(
    session: &mut Session<T>,
    country: &Country,
) -> Result<LeaderBatch, FetchError> {
    let url = session.endpoints().leaders();
    let resp = session.get_api(&url, &[("country", country.as_str())])?;
    let batch = parse_leaders(&resp.body)
        .map_err(|e| FetchError::transient(&url, format!("bad JSON for {country}: {e}")))?;
    for err in &batch.rejected {
        warn!("{country}: skipping leader: {err}");
    }
    Ok(batch)
}

pub fn parse_countries(body: &str) -> Result<Vec<Country>, serde_json::Error> {
    serde_json::from_str(body)
}

pub fn parse_leaders(body: &str) -> Result<LeaderBatch, serde_json::Error> {
    let raw: Vec<ApiLeader> = serde_json::from_str(body)?;
    let mut batch = LeaderBatch::default();
    for item in raw {
        match LeaderRecord::from_api(item) {
            Ok(rec) => batch.leaders.push(rec),
            Err(e) => batch.rejected.push(e),
        }
    }
    Ok(batch)
}
