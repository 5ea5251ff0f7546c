//! # TFT Stats Core
//!
//! Data-fetch and tooltip engine behind the TFT Stats pages.
//!
//! ## Architecture
//!
//! ```text
//! tftstats-core/src/
//! ├── query/      # QueryCache: single-flight fetches, stale-while-revalidate, retry/backoff
//! ├── view.rs     # RawBundle -> GameDataBundle normalisation and derived flags
//! ├── tooltip/    # Placement geometry, content templates, TooltipManager lifecycle
//! ├── modules/    # Config file loading, tracing setup
//! └── error.rs    # AppError / AppResult
//! ```
//!
//! Pages subscribe to the comps bundle through one shared
//! [`query::QueryCache`], render from a [`view::GameDataView`], and route
//! every hover through one shared [`tooltip::TooltipManager`].

#![allow(
    clippy::significant_drop_tightening,
    reason = "Mutex guards are held for the whole state transition on purpose"
)]
#![allow(clippy::module_name_repetitions, reason = "QueryCache in query:: reads better at call sites")]
// Test-only lints: allow panic!, float comparisons, etc. in test code
#![cfg_attr(
    test,
    allow(clippy::panic, clippy::float_cmp, clippy::unwrap_used, clippy::expect_used)
)]

pub mod error;
pub mod modules;
pub mod query;
pub mod tooltip;
pub mod view;

// Re-export commonly used types
pub use error::{AppError, AppResult};
pub use query::{QueryCache, QueryKey, QueryOptions, QueryResult, QueryStatus, QuerySubscription};
pub use tooltip::{TooltipManager, TooltipOptions};
pub use view::{normalize, GameDataView};
