//! Momentum indicators: RSI, CCI

pub mod cci;
pub mod rsi;

pub use cci::*;
pub use rsi::*;
