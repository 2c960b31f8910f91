//! Rolling-window indicators over daily price bars.
//!
//! Each calculator reads the tail of the series and returns `None` when the
//! series is shorter than its window.

pub mod momentum;
pub mod structure;
pub mod trend;
pub mod volume;

pub use momentum::*;
pub use structure::*;
pub use trend::*;
pub use volume::*;
