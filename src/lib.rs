//! Named Claude API profiles and the switch that activates them.
//!
//! - [`store`] persists the profile list and enforces a single active entry.
//! - [`activation`] projects the active profile onto the host: persistent
//!   environment variables on Windows, `~/.claude/settings.json` elsewhere.
//! - [`service`] serializes mutations and runs them off the caller's thread.

pub mod activation;
pub mod cli;
pub mod config;
pub mod fsutil;
pub mod logging;
pub mod service;
pub mod store;
