//! N-d sizes. Components are 0-indexed here; the external dimension
//! convention of data arrays is 1-based.

use core::ops::{Add, Index, IndexMut, Sub};

use serde::{Deserialize, Serialize};

/// finite ordered sequence of non-negative extents; rank = component count
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NdSize(Vec<usize>);

impl NdSize {
    /// a size of the given rank with every component set to `fill`
    pub fn new(rank: usize, fill: usize) -> Self {
        Self(vec![fill; rank])
    }

    pub fn from_raw(components: Vec<usize>) -> Self {
        Self(components)
    }

    pub fn into_raw(self) -> Vec<usize> {
        self.0
    }

    pub fn rank(&self) -> usize {
        self.0.len()
    }

    /// total element count; an extent of 0 in any axis makes this 0
    pub fn nelms(&self) -> usize {
        self.0.iter().product()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn iter(&self) -> core::slice::Iter<'_, usize> {
        self.0.iter()
    }
}

impl From<Vec<usize>> for NdSize {
    fn from(components: Vec<usize>) -> Self {
        Self(components)
    }
}

impl FromIterator<usize> for NdSize {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Index<usize> for NdSize {
    type Output = usize;

    fn index(&self, axis: usize) -> &usize {
        &self.0[axis]
    }
}

impl IndexMut<usize> for NdSize {
    fn index_mut(&mut self, axis: usize) -> &mut usize {
        &mut self.0[axis]
    }
}

/// elementwise sum; panics on rank mismatch
impl Add for &NdSize {
    type Output = NdSize;

    fn add(self, rhs: &NdSize) -> NdSize {
        assert_eq!(self.rank(), rhs.rank(), "rank mismatch in NdSize arithmetic");
        self.iter().zip(rhs.iter()).map(|(a, b)| a + b).collect()
    }
}

/// elementwise difference, saturating at 0 per component; panics on rank
/// mismatch
impl Sub for &NdSize {
    type Output = NdSize;

    fn sub(self, rhs: &NdSize) -> NdSize {
        assert_eq!(self.rank(), rhs.rank(), "rank mismatch in NdSize arithmetic");
        self.iter()
            .zip(rhs.iter())
            .map(|(a, b)| a.saturating_sub(*b))
            .collect()
    }
}

/// adds the scalar to every component
impl Add<usize> for &NdSize {
    type Output = NdSize;

    fn add(self, rhs: usize) -> NdSize {
        self.iter().map(|c| c + rhs).collect()
    }
}

/// subtracts the scalar from every component, saturating at 0
impl Sub<usize> for &NdSize {
    type Output = NdSize;

    fn sub(self, rhs: usize) -> NdSize {
        self.iter().map(|c| c.saturating_sub(rhs)).collect()
    }
}

#[macro_export]
macro_rules! ndsize {
    ( $( $x:expr ),* $(,)? ) => {
        $crate::shape::NdSize::from_raw(::std::vec![$($x),*])
    };
}
