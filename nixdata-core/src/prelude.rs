//! A prelude module re-exporting commonly used items.

pub use crate::access::*;
pub use crate::dimension::*;
pub use crate::entity::*;
pub use crate::error::DataError;
pub use crate::shape::NdSize;
pub use crate::store::DataStore;
pub use crate::unit::UnitError;
pub use crate::view::DataView;

pub use crate::ndsize;
