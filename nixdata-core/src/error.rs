use thiserror::Error;

/// failure kinds shared by the resolution engine and its storage backends
///
/// Unit scaling failures surface as `IncompatibleDimensions`: the index
/// mappers wrap the scaler's `UnitError` before it reaches a caller.
/// Dimension construction failures stay `DimensionError`; they happen before
/// any entity exists.
#[derive(Debug, Error)]
pub enum DataError {
    /// an index exceeds a collection extent, or a resolved window leaves the
    /// data extent
    #[error("out of bounds: {0}")]
    OutOfBounds(String),

    /// rank mismatch between annotation and data, mismatched or missing
    /// units, or a unit applied to a set dimension
    #[error("incompatible dimensions: {0}")]
    IncompatibleDimensions(String),

    /// a required entity is absent
    #[error("entity is not initialized")]
    UninitializedEntity,

    /// a windowed operation against zero-rank data, or a window whose rank
    /// does not match the data
    #[error("invalid rank: {0}")]
    InvalidRank(String),
}
