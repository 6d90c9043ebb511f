//! DEX screens built on the feedback [`System`](crate::feedback::System)
//!
//! - `market`: the tradable pair list (reducer, interactor, presenter)
//! - `repository`: local pair storage with the per-pair checked flag
//! - `chart`: candle loading for the selected pair

pub mod chart;
pub mod market;
pub mod repository;

pub use chart::{CandlesRepository, DexChartInteractor};
pub use market::{DexMarketInteractor, DexMarketPresenter, MarketInteractor};
pub use repository::{LocalPairsRepository, PairsRepository};
