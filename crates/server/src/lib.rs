pub mod config;
pub mod error;
pub mod metrics;
pub mod middleware;
pub mod rest;
pub mod shutdown;
pub mod store;
pub mod trigger;
