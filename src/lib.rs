//! Computed style → utility classes, and DOM snapshot → JSX.
//!
//! The core contract is four functions: [`extract`] captures a snapshot of
//! a styled element, [`classes_for`] translates a style map into utility
//! classes, and [`markup_for`] / [`logic_for`] generate markup and
//! interaction boilerplate from a snapshot.

pub mod codegen;
pub mod dom;
pub mod engine;
pub mod inspect;
pub mod net;
pub mod style;
pub mod translate;

pub use codegen::{logic_for, markup_for};
pub use dom::extract::extract;
pub use translate::classes_for;
