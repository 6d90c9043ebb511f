//! # wallet-nav-core - Core Domain Types
//!
//! Foundation crate for the wallet navigation core. Provides domain types,
//! error handling and logging setup.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, chrono, thiserror, tracing).
//!
//! ## Public API
//!
//! ### Domain Types (`types`)
//! - [`Wallet`] - An account (address, public key)
//! - [`Display`] - The exclusive top-level display (hello, enter, passcode, slide)
//! - [`AppPhase`] - Application lifecycle phase
//!
//! ### DEX Types (`dex`)
//! - [`SmartPair`], [`Asset`], [`InfoPair`] - Market pair list rows
//! - [`Candle`], [`TimeFrame`] - Chart data
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum with `fatal` vs `recoverable` classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use wallet_nav_core::prelude::*;
//! ```

pub mod dex;
pub mod error;
pub mod logging;
pub mod types;

/// Prelude for common imports used throughout all wallet-nav crates
pub mod prelude {
    pub use super::error::{Error, Result, ResultExt};
    pub use tracing::{debug, error, info, instrument, trace, warn};
}

pub use dex::{Asset, Candle, InfoPair, SmartPair, TimeFrame};
pub use error::{Error, Result, ResultExt};
pub use types::{AppPhase, Display, Wallet};
