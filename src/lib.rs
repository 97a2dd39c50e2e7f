// src/lib.rs

#[macro_use]
pub mod macros;

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod credentials;
pub mod data;
pub mod error;
pub mod export;
pub mod file;
pub mod log;
pub mod progress;
pub mod scrape;
pub mod session;
pub mod sources;
