///! linkdex backend
///!
///! HTTP JSON API for a categorised link directory: category/page
///! browsing, web search through an external provider, per-session visit
///! counting and tracked-link redirects.

pub mod config;
pub mod error;
pub mod logging;
pub mod module;
pub mod service;
pub mod session;
