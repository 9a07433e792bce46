//! Type system utilities and aliases.
//!
//! ## Modules
//!
//! - [`aliases`]: `Shared<T>` alias for single-threaded UI state.

pub mod aliases;

pub use aliases::*;
