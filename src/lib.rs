//! Library exports for routerelay, shared between the binary and tests.

pub mod config;
pub mod error;
pub mod metrics;
pub mod models;
pub mod routes;
pub mod schedule;
pub mod startup;
pub mod state;
pub mod upstream;
pub mod utils;
