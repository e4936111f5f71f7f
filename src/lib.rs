//! Bikawo backend functions
//!
//! This library provides the serverless functions behind the Bikawo
//! services marketplace: the mission-timeout sweep, rate-limit checks, the
//! external jobs proxy and text-to-speech generation. Persistence and
//! locking are delegated to the managed backend.

pub mod app_state;
pub mod config;
pub mod models;
pub mod routes;
pub mod services;
