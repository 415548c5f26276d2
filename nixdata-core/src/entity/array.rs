use uuid::Uuid;

use crate::dimension::Dimension;
use crate::error::DataError;
use crate::shape::NdSize;
use crate::store::DataStore;

/// typed n-d numeric container owning its per-axis dimension descriptors
///
/// The container never copies its storage; reads go through bounded windows.
/// Axes are addressed 1-based in the external convention.
#[derive(Debug, Clone)]
pub struct DataArray<S> {
    id: Uuid,
    name: String,
    store: S,
    dimensions: Vec<Dimension>,
}

impl<S: DataStore> DataArray<S> {
    /// builds an array over `store`; fails when the descriptor count does
    /// not match the store rank
    pub fn new(
        name: impl Into<String>,
        store: S,
        dimensions: Vec<Dimension>,
    ) -> Result<Self, DataError> {
        let name = name.into();
        if dimensions.len() != store.rank() {
            return Err(DataError::IncompatibleDimensions(format!(
                "array `{}` carries {} dimension descriptors for data of rank {}",
                name,
                dimensions.len(),
                store.rank()
            )));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            name,
            store,
            dimensions,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dimension_count(&self) -> usize {
        self.dimensions.len()
    }

    /// descriptor of the axis numbered `index`, 1-based
    pub fn dimension(&self, index: usize) -> Result<&Dimension, DataError> {
        if index == 0 || index > self.dimensions.len() {
            return Err(DataError::OutOfBounds(format!(
                "dimension {} of array `{}` with {} dimensions",
                index,
                self.name,
                self.dimensions.len()
            )));
        }
        Ok(&self.dimensions[index - 1])
    }

    pub fn dimensions(&self) -> &[Dimension] {
        &self.dimensions
    }

    pub fn data_extent(&self) -> NdSize {
        self.store.extent()
    }

    /// reads the `(offset, count)` window through the backing store
    pub fn read_into(
        &self,
        offset: &NdSize,
        count: &NdSize,
        out: &mut Vec<f64>,
    ) -> Result<(), DataError> {
        self.store.read_into(offset, count, out)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
