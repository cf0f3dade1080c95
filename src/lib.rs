pub mod analytics;
pub mod config;
pub mod export;
pub mod ingest;
pub mod report;
pub mod types;

pub use analytics::{analyze, AnalyticsBundle};
pub use config::AnalyticsConfig;
pub use types::{Period, TradeRecord};
