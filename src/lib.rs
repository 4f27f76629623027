//! # NGO Collaboration API Library
//!
//! Backend for NGOs to publish projects, ask for collaboration and record
//! commitments from other NGOs.

pub mod auth;
pub mod config;
pub mod coverage;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod seeds;
pub mod server;
pub mod telemetry;
pub use migration;
