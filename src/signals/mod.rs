//! Signal evaluation: structure and timing signals and the engine that merges them.

pub mod engine;
pub mod structure;
pub mod timing;

pub use engine::SignalEngine;
pub use structure::StructureSignal;
pub use timing::TimingSignal;
