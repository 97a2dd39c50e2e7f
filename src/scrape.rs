// src/scrape.rs
//
// The run loop: one country at a time, one leader at a time.
// Failures are contained per country (empty list under its key) and per
// leader (record dropped); both end up in `RunReport::omissions`.

use std::fmt;

use tracing::{info, warn};

use crate::{
    config::options::ScrapeOptions,
    core::{net::Transport, sanitize},
    data::{Country, LeaderRecord, LeadersByCountry, Paragraph, total_leaders},
    error::ScrapeError,
    progress::Progress,
    session::Session,
    sources::{api, wikipedia},
};

/// Something left out of the output, and why.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Omission {
    pub country: Country,
    /// `None` when the whole country's list was lost.
    pub leader: Option<String>,
    pub reason: String,
}

impl fmt::Display for Omission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.leader {
            Some(l) => write!(f, "{} / {}: {}", self.country, l, self.reason),
            None => write!(f, "{}: {}", self.country, self.reason),
        }
    }
}

#[derive(Debug, Default)]
pub struct RunReport {
    pub leaders: LeadersByCountry,
    pub omissions: Vec<Omission>,
    pub token_refreshes: usize,
}

impl RunReport {
    pub fn total_leaders(&self) -> usize { total_leaders(&self.leaders) }

    pub fn paragraphs_found(&self) -> usize {
        self.leaders
            .values()
            .flatten()
            .filter(|l| l.first_paragraph.is_available())
            .count()
    }
}

/// Fetch every selected country's leaders and enrich each with its cleaned
/// lead paragraph. Only a failed country listing aborts.
pub fn collect_leaders<T: Transport>(
    session: &mut Session<T>,
    opts: &ScrapeOptions,
    mut progress: Option<&mut dyn Progress>,
) -> Result<RunReport, ScrapeError> {
    let refreshes_before = session.refreshes();
    let mut countries = api::list_countries(session).map_err(ScrapeError::Countries)?;
    countries.retain(|c| opts.countries.includes(c));
    info!("{} countries to process", countries.len());

    if let Some(p) = progress.as_deref_mut() {
        p.begin(countries.len());
    }

    let mut report = RunReport::default();

    for country in countries {
        if let Some(p) = progress.as_deref_mut() {
            p.log(&format!("Fetching leaders for {country}…"));
        }

        let batch = match api::leaders_for(session, &country) {
            Ok(batch) => batch,
            Err(e) => {
                warn!("{country}: leader list unavailable: {e}");
                if let Some(p) = progress.as_deref_mut() {
                    p.item_failed(&country, &e.to_string());
                }
                report.omissions.push(Omission { country: country.clone(), leader: None, reason: e.to_string() });
                report.leaders.insert(country, Vec::new());
                continue;
            }
        };

        for rejected in batch.rejected {
            report.omissions.push(Omission {
                country: country.clone(),
                leader: None,
                reason: rejected.to_string(),
            });
        }

        let take = opts.limit.unwrap_or(usize::MAX);
        let mut kept = Vec::with_capacity(batch.leaders.len().min(take));
        for mut leader in batch.leaders.into_iter().take(take) {
            match enrich(session, &mut leader) {
                Ok(()) => kept.push(leader),
                Err(reason) => {
                    warn!("{country}: skipping {}: {reason}", leader.full_name());
                    report.omissions.push(Omission {
                        country: country.clone(),
                        leader: Some(leader.full_name()),
                        reason,
                    });
                }
            }
        }

        info!("{country}: {} leaders", kept.len());
        if let Some(p) = progress.as_deref_mut() {
            p.item_done(&country, kept.len());
        }
        report.leaders.insert(country, kept);
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }

    report.token_refreshes = session.refreshes() - refreshes_before;
    Ok(report)
}

/// Fill in the leader's paragraph. A page without a qualifying paragraph is
/// not an error; a page that can't be fetched is.
fn enrich<T: Transport>(session: &mut Session<T>, leader: &mut LeaderRecord) -> Result<(), String> {
    let raw = wikipedia::first_paragraph(session, &leader.wikipedia_url).map_err(|e| e.to_string())?;
    leader.first_paragraph = match raw {
        Some(text) => Paragraph::from_cleaned(sanitize::clean(&text)),
        None => Paragraph::Unavailable,
    };
    Ok(())
}
