//! Reporting: presentation-policy formatting of computed metrics.
//!
//! We keep formatting code in one place so:
//! - the metrics engine stays free of presentation concerns
//! - output changes are localized (the CLI and the TUI share these helpers)

pub mod format;

pub use format::*;
