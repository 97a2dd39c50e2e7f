// src/progress.rs
use crate::data::Country;

/// Lightweight progress reporting used by the scrape loop.
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the number of countries to process.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One country finished; `leaders` is how many records it kept.
    fn item_done(&mut self, _country: &Country, _leaders: usize) {}

    /// The country's leader list could not be fetched.
    fn item_failed(&mut self, _country: &Country, _reason: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
