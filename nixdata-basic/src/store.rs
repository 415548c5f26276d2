use itertools::izip;

use nixdata_core::error::DataError;
use nixdata_core::shape::NdSize;
use nixdata_core::store::DataStore;

/// n-d store over a row-major `Vec<f64>`
#[derive(Debug, Clone, PartialEq)]
pub struct VecStore {
    data: Vec<f64>,
    extent: NdSize,
}

impl VecStore {
    /// builds a store over row-major `data` of shape `extent`; fails when
    /// the element count and shape disagree
    pub fn from_raw(data: Vec<f64>, extent: NdSize) -> Result<Self, DataError> {
        if data.len() != extent.nelms() {
            return Err(DataError::IncompatibleDimensions(format!(
                "{} elements cannot fill a store of shape {:?}",
                data.len(),
                extent.as_slice()
            )));
        }
        Ok(Self { data, extent })
    }

    /// rank-1 store over `data`
    pub fn vector(data: Vec<f64>) -> Self {
        let extent = NdSize::from_raw(vec![data.len()]);
        Self { data, extent }
    }

    pub fn into_raw(self) -> (Vec<f64>, NdSize) {
        (self.data, self.extent)
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }
}

impl DataStore for VecStore {
    fn extent(&self) -> NdSize {
        self.extent.clone()
    }

    fn read_into(
        &self,
        offset: &NdSize,
        count: &NdSize,
        out: &mut Vec<f64>,
    ) -> Result<(), DataError> {
        let rank = self.extent.rank();
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
        if izip!(offset.iter(), count.iter(), self.extent.iter()).any(|(o, c, e)| o + c > *e) {
            return Err(DataError::OutOfBounds(format!(
                "window (offset {:?}, count {:?}) leaves the data extent {:?}",
                offset.as_slice(),
                count.as_slice(),
                self.extent.as_slice()
            )));
        }

        out.clear();
        if count.nelms() == 0 {
            return Ok(());
        }
        out.reserve(count.nelms());

        // row-major strides
        let mut strides = vec![1usize; rank];
        for axis in (0..rank - 1).rev() {
            strides[axis] = strides[axis + 1] * self.extent[axis + 1];
        }

        // copy one innermost run per combination of the outer axes
        let run = count[rank - 1];
        let mut cursor = vec![0usize; rank - 1];
        'rows: loop {
            let mut base = offset[rank - 1];
            for axis in 0..rank - 1 {
                base += (offset[axis] + cursor[axis]) * strides[axis];
            }
            out.extend_from_slice(&self.data[base..base + run]);
            for axis in (0..rank - 1).rev() {
                cursor[axis] += 1;
                if cursor[axis] < count[axis] {
                    continue 'rows;
                }
                cursor[axis] = 0;
            }
            break;
        }
        Ok(())
    }
}
