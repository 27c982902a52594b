//! Shared tuning values for the portfolio engine.
//!
//! Timing, colours, reveal thresholds and asset locations live here so the
//! engine and any tooling read the same numbers.

pub mod layout;
pub mod loader;
pub mod palette;
pub mod path;
pub mod reveal;
