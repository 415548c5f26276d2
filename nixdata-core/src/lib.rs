/// n-d size vectors and the `ndsize!` constructor
pub mod shape;

/// SI prefixed unit strings and scaling between compatible units
pub mod unit;

/// per-axis semantics: sampled, range and set dimensions
pub mod dimension;

/// error taxonomy of the resolution engine
pub mod error;

/// storage backend interface consumed by the engine
pub mod store;

/// data arrays, tags, multi tags and features
pub mod entity;

/// deferred-read windows over data arrays
pub mod view;

/// region resolution: physical positions to indices, tags to windows
pub mod access;

/// re-exports of commonly used items
pub mod prelude;
