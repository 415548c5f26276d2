use std::sync::Arc;

use uuid::Uuid;

use crate::access;
use crate::entity::{DataArray, Feature};
use crate::error::DataError;
use crate::store::DataStore;
use crate::view::DataView;

/// repeated point-plus-extent annotation
///
/// The `positions` array holds one point per row: shape `[M]` against rank-1
/// data, or `[M, rank]` in general. An optional `extents` array of the same
/// shape turns points into regions.
#[derive(Debug, Clone)]
pub struct MultiTag<S> {
    id: Uuid,
    name: String,
    positions: Arc<DataArray<S>>,
    extents: Option<Arc<DataArray<S>>>,
    units: Vec<String>,
    references: Vec<Arc<DataArray<S>>>,
    features: Vec<Feature<S>>,
}

impl<S: DataStore> MultiTag<S> {
    pub fn new(name: impl Into<String>, positions: Arc<DataArray<S>>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            positions,
            extents: None,
            units: Vec::new(),
            references: Vec::new(),
            features: Vec::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn positions(&self) -> &Arc<DataArray<S>> {
        &self.positions
    }

    pub fn extents(&self) -> Option<&Arc<DataArray<S>>> {
        self.extents.as_ref()
    }

    pub fn set_extents(&mut self, extents: Arc<DataArray<S>>) {
        self.extents = Some(extents);
    }

    pub fn clear_extents(&mut self) {
        self.extents = None;
    }

    pub fn units(&self) -> &[String] {
        &self.units
    }

    pub fn set_units(&mut self, units: Vec<String>) {
        self.units = units;
    }

    pub fn add_reference(&mut self, array: Arc<DataArray<S>>) {
        self.references.push(array);
    }

    pub fn references(&self) -> &[Arc<DataArray<S>>] {
        &self.references
    }

    pub fn reference_count(&self) -> usize {
        self.references.len()
    }

    pub fn add_feature(&mut self, feature: Feature<S>) {
        self.features.push(feature);
    }

    pub fn feature_count(&self) -> usize {
        self.features.len()
    }

    pub fn get_feature(&self, index: usize) -> Result<&Feature<S>, DataError> {
        self.features.get(index).ok_or_else(|| {
            DataError::OutOfBounds(format!(
                "feature index {} is out of bounds of multi tag `{}` ({} features)",
                index,
                self.name,
                self.features.len()
            ))
        })
    }

    /// resolved slice of reference `reference_index` at point `position_index`
    pub fn retrieve_data(
        &self,
        position_index: usize,
        reference_index: usize,
    ) -> Result<DataView<S>, DataError> {
        access::retrieve_data_at(self, position_index, reference_index)
    }

    /// slice of the data of feature `feature_index` at point `position_index`
    pub fn retrieve_feature_data(
        &self,
        position_index: usize,
        feature_index: usize,
    ) -> Result<DataView<S>, DataError> {
        access::retrieve_feature_data_at(self, position_index, feature_index)
    }
}
