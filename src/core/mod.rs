//! Core application primitives (monitor, scheduler, HTTP server)

pub mod bootstrap;
pub mod http;
pub mod monitor;
pub mod scheduler;

pub use bootstrap::Components;
pub use http::*;
pub use monitor::*;
pub use scheduler::*;
