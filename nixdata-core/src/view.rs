//! Deferred-read windows. A view owns no data; it binds an array handle to a
//! resolved `(offset, count)` window and reads through the array on demand.

use std::sync::Arc;

use crate::access;
use crate::entity::DataArray;
use crate::error::DataError;
use crate::shape::NdSize;
use crate::store::DataStore;

/// lightweight handle over the `(offset, count)` window of an array
#[derive(Debug, Clone)]
pub struct DataView<S> {
    array: Arc<DataArray<S>>,
    offset: NdSize,
    count: NdSize,
}

impl<S: DataStore> DataView<S> {
    /// binds a view to `array`; fails with `OutOfBounds` when the window
    /// leaves the array extent
    pub fn new(
        array: Arc<DataArray<S>>,
        offset: NdSize,
        count: NdSize,
    ) -> Result<Self, DataError> {
        if !access::position_and_extent_in_data(&array, &offset, &count) {
            return Err(DataError::OutOfBounds(format!(
                "data slice (offset {:?}, count {:?}) out of the extent {:?} of array `{}`",
                offset.as_slice(),
                count.as_slice(),
                array.data_extent().as_slice(),
                array.name()
            )));
        }
        Ok(Self {
            array,
            offset,
            count,
        })
    }

    /// view covering the entire extent of `array`
    pub fn full(array: Arc<DataArray<S>>) -> Self {
        let count = array.data_extent();
        let offset = NdSize::new(count.rank(), 0);
        Self {
            array,
            offset,
            count,
        }
    }

    pub fn array(&self) -> &Arc<DataArray<S>> {
        &self.array
    }

    pub fn offset(&self) -> &NdSize {
        &self.offset
    }

    pub fn count(&self) -> &NdSize {
        &self.count
    }

    /// extent of the window, i.e. the view's own shape
    pub fn data_extent(&self) -> NdSize {
        self.count.clone()
    }

    /// materializes the window
    pub fn read(&self) -> Result<Vec<f64>, DataError> {
        let mut out = Vec::new();
        self.read_into(&mut out)?;
        Ok(out)
    }

    /// reads the window into `out`, replacing its contents
    pub fn read_into(&self, out: &mut Vec<f64>) -> Result<(), DataError> {
        self.array.read_into(&self.offset, &self.count, out)
    }
}
