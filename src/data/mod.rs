//! Data acquisition.
//!
//! - default-source fetch (`client`): local `data/dashboard_data.csv` or an
//!   HTTP URL from the environment
//! - seeded demo-dataset generation (`sample`)

pub mod client;
pub mod sample;

pub use client::*;
pub use sample::*;
