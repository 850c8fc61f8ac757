//! Domain models of the rate panel.
//!
//! - `rate` — trend color, per-symbol rate entry and price text formatting.
//! - `card` — rendered price cards and the grid that holds them.
pub mod card;
pub mod rate;
