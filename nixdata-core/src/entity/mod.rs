/// data arrays with per-axis dimension descriptors
mod array;
pub use array::*;

/// point-plus-extent annotations
mod tag;
pub use tag::*;

/// repeated annotations backed by positions arrays
mod multi_tag;
pub use multi_tag::*;

/// side data attached to tags
mod feature;
pub use feature::*;
