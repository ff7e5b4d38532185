//! Read-only views over a selection: typography facts and inline assets.

pub mod assets;
pub mod typography;

pub use assets::{extract_assets, Asset};
pub use typography::{typography_for, Typography};
