//! Shared building blocks for the Trader DNA analytics engine.
//!
//! Holds the value types every component consumes (return series, trade
//! ledger records), the engine-wide configuration, the error type and the
//! small statistics toolkit the calculators are written against.

pub mod config;
pub mod error;
pub mod locale;
pub mod stats;
pub mod types;

pub use config::{DecayConfig, EngineConfig, TagThresholds};
pub use error::*;
pub use locale::{format_usd, Locale};
pub use types::*;
