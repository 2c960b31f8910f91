//! Trend and timing signal monitor for equities and market indices.
//!
//! The evaluation core lives in [`signals`] and [`indicators`]; everything else
//! (market data, notifications, explanations, scheduling, HTTP) is a thin
//! collaborator around it.

pub mod agents;
pub mod common;
pub mod config;
pub mod core;
pub mod error;
pub mod indicators;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod notifiers;
pub mod services;
pub mod signals;
