// src/config/options.rs
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::consts::*;
use crate::data::Country;

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct AppOptions {
    pub scrape: ScrapeOptions,
    pub export: ExportOptions,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CountrySelector {
    All,
    Only(Vec<Country>),
}

impl CountrySelector {
    /// Build from user input; an empty list means all countries.
    pub fn from_codes<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut picked: Vec<Country> = codes
            .into_iter()
            .map(|c| c.as_ref().trim().to_ascii_lowercase())
            .filter(|c| !c.is_empty())
            .map(Country::new)
            .collect();
        picked.sort_unstable();
        picked.dedup();
        if picked.is_empty() { CountrySelector::All } else { CountrySelector::Only(picked) }
    }

    pub fn includes(&self, country: &Country) -> bool {
        match self {
            CountrySelector::All => true,
            CountrySelector::Only(list) => list.binary_search(country).is_ok(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrapeOptions {
    pub api_root: String,
    pub timeout: Duration,
    pub countries: CountrySelector,
    /// Enrich at most this many leaders per country.
    pub limit: Option<usize>,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            api_root: s!(API_ROOT),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            countries: CountrySelector::All,
            limit: None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self { ExportFormat::Json => "json", ExportFormat::Csv => "csv" }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ExportOptions {
    pub format: ExportFormat,
    out_path: OutputPath,
}

impl ExportOptions {
    /// Final file path. A user-supplied extension wins over the format's.
    pub fn out_path(&self) -> PathBuf {
        let mut name = self.out_path.file_stem.clone();
        name.push(".");
        match &self.out_path.ext {
            Some(ext) => name.push(ext),
            None => name.push(self.format.ext()),
        }
        self.out_path.dir.join(name)
    }

    /// Accepts a file path, or a directory (existing, or ending in a separator)
    /// in which case the default file stem is used.
    pub fn set_path(&mut self, text: &str) {
        let s = text.trim();
        if s.is_empty() {
            self.out_path = OutputPath::default();
            return;
        }
        let p = Path::new(s);
        if looks_like_dir_hint(p) || p.is_dir() {
            self.out_path = OutputPath { dir: p.to_path_buf(), ..OutputPath::default() };
            return;
        }

        self.out_path.dir = p.parent().map(Path::to_path_buf).unwrap_or_default();
        if let Some(stem) = p.file_stem() {
            self.out_path.file_stem = stem.to_os_string();
        }
        self.out_path.ext = p.extension().map(|e| e.to_os_string());
    }
}

fn looks_like_dir_hint(p: &Path) -> bool {
    let s = p.to_string_lossy();
    s.ends_with('/') || s.ends_with('\\')
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct OutputPath {
    dir: PathBuf,
    file_stem: OsString, // without extension
    ext: Option<OsString>,
}

impl Default for OutputPath {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_OUT_DIR),
            file_stem: OsString::from(DEFAULT_FILE),
            ext: None,
        }
    }
}
