//! basic implementors of the nixdata storage interface

/// row-major vec-backed store
mod store;
pub use store::*;
