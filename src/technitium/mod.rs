//! Technitium DNS Server HTTP API binding.
pub mod client;
pub mod types;

pub use client::TechnitiumClient;
