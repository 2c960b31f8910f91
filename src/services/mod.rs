//! Collaborators around the evaluation core: market data and watchlists.

pub mod market_data;
pub mod sina;
pub mod symbols;
pub mod watchlist;

pub use market_data::{MarketDataProvider, StaticMarketDataProvider};
pub use sina::SinaMarketDataProvider;
