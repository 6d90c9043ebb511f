//! wallet-nav Library
//!
//! Headless front end for the wallet navigation core.

pub mod headless;

// Re-export main entry points
pub use headless::run_headless;
