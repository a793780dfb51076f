//! Web API module for the todoproxy application.

pub mod error;
pub mod middleware;
pub mod proxy;
pub mod routes;
pub mod status;

pub use routes::*;
