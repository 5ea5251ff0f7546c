//! Application configuration models.

mod app;
mod sections;

pub use app::AppConfig;
pub use sections::{CacheSettings, ClientSettings, TooltipSettings};
