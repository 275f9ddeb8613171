//! Configuration Module
//!
//! Client settings and the fixed protocol constants.

pub mod client;

pub use client::{default_user_agent, ClientConfig, DEFAULT_BASE_URL, LIBRARY_VERSION, MEDIA_TYPE};
