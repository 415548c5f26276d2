//! ndarray-backed storage for nixdata

use itertools::izip;
use ndarray::{ArrayD, SliceInfoElem};
use num_traits::ToPrimitive;

use nixdata_core::error::DataError;
use nixdata_core::shape::NdSize;
use nixdata_core::store::DataStore;

/// dense n-d store over `ndarray::ArrayD`, generic over the element type
///
/// Windows are read through `ndarray` slicing; elements are converted with
/// `ToPrimitive`, and a value with no f64 image reads as NaN.
#[derive(Debug, Clone, PartialEq)]
pub struct NdDenseStore<E> {
    data: ArrayD<E>,
}

impl<E> NdDenseStore<E> {
    pub fn from_raw(data: ArrayD<E>) -> Self {
        Self { data }
    }

    pub fn into_raw(self) -> ArrayD<E> {
        self.data
    }

    pub fn data(&self) -> &ArrayD<E> {
        &self.data
    }
}

impl<E> From<ArrayD<E>> for NdDenseStore<E> {
    fn from(data: ArrayD<E>) -> Self {
        Self { data }
    }
}

impl<E: Clone + ToPrimitive> DataStore for NdDenseStore<E> {
    fn extent(&self) -> NdSize {
        NdSize::from_raw(self.data.shape().to_vec())
    }

    fn read_into(
        &self,
        offset: &NdSize,
        count: &NdSize,
        out: &mut Vec<f64>,
    ) -> Result<(), DataError> {
        let rank = self.data.ndim();
        if rank == 0 {
            return Err(DataError::InvalidRank(
                "cannot read a window of zero-rank data".into(),
            ));
        }
        if offset.rank() != rank || count.rank() != rank {
            return Err(DataError::InvalidRank(format!(
                "window of rank {}/{} against data of rank {}",
                offset.rank(),
                count.rank(),
                rank
            )));
        }
        let shape = self.data.shape();
        if izip!(offset.iter(), count.iter(), shape.iter()).any(|(o, c, e)| o + c > *e) {
            return Err(DataError::OutOfBounds(format!(
                "window (offset {:?}, count {:?}) leaves the data extent {:?}",
                offset.as_slice(),
                count.as_slice(),
                shape
            )));
        }

        let info: Vec<SliceInfoElem> = izip!(offset.iter(), count.iter())
            .map(|(&o, &c)| SliceInfoElem::Slice {
                start: o as isize,
                end: Some((o + c) as isize),
                step: 1,
            })
            .collect();
        let window = self.data.slice(info.as_slice());

        out.clear();
        out.reserve(window.len());
        out.extend(window.iter().map(|e| e.to_f64().unwrap_or(f64::NAN)));
        Ok(())
    }
}
