// src/config/consts.rs

// Upstream API
pub const API_ROOT: &str = "https://country-leaders.onrender.com";
pub const STATUS_PATH: &str = "/status";
pub const COOKIE_PATH: &str = "/cookie";
pub const COUNTRIES_PATH: &str = "/countries";
pub const LEADERS_PATH: &str = "/leaders";

// Net config
pub const USER_AGENT: &str = concat!("leaders_scrape/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

// Export
pub const DEFAULT_OUT_DIR: &str = "out";
pub const DEFAULT_FILE: &str = "leaders";
