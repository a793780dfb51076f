//! Caching, rate-limited HTTP proxy for a single upstream JSON API.
//!
//! Read path for `GET /proxy`: volatile in-memory cache, then on-disk
//! snapshot, then a live upstream fetch, with fixed-window admission control
//! protecting the upstream.

pub mod app;
pub mod cache;
pub mod cli;
pub mod config;
pub mod logging;
pub mod snapshot;
pub mod state;
pub mod upstream;
pub mod web;
