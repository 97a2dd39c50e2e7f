//! # Upstream sources
//!
//! Knows how to read the two upstream sources. Each module covers one source
//! and encodes *where the ground truth lives* and *how to extract it*.
//!
//! - `api` – the leaders API: liveness, country list, leaders per country.
//!   Payloads are validated into `LeaderRecord`s here.
//! - `wikipedia` – a leader's encyclopedia page: picks the raw lead paragraph.
//!
//! ## What does **not** live here
//! - Token lifecycle (`credentials`, `session`).
//! - Cleaning the paragraph (`core::sanitize::clean`).
//! - Iteration, failure containment and grouping (`scrape`).
//! - Output (`export`, `file`).
//!
//! ## Typical call chain
//! ```text
//! cli → scrape::collect_leaders → sources::api::leaders_for(session, country)
//!                               → sources::wikipedia::first_paragraph(session, url)
//!                               → core::sanitize::clean
//!     → file::save_and_verify
//! ```
//!
//! ## Testing notes
//! Both sources have pure entry points (`parse_*`, `extract_first_paragraph`)
//! that are tested offline against captured fixtures.
pub mod api;
pub mod wikipedia;
