//! Core BookVerse client library (config, session, API client, catalog).

pub mod api;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod session;
