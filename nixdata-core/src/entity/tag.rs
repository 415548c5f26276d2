use std::sync::Arc;

use uuid::Uuid;

use crate::access;
use crate::entity::{DataArray, Feature};
use crate::error::DataError;
use crate::store::DataStore;
use crate::view::DataView;

/// point-plus-extent annotation in physical coordinates
///
/// `position` has one component per axis of the annotated arrays; `extent`
/// is either empty (a point) or matches `position`; `units` may be shorter
/// than the rank, missing entries default to "none".
#[derive(Debug, Clone)]
pub struct Tag<S> {
    id: Uuid,
    name: String,
    position: Vec<f64>,
    extent: Vec<f64>,
    units: Vec<String>,
    references: Vec<Arc<DataArray<S>>>,
    features: Vec<Feature<S>>,
}

impl<S: DataStore> Tag<S> {
    pub fn new(name: impl Into<String>, position: Vec<f64>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            position,
            extent: Vec::new(),
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

    pub fn position(&self) -> &[f64] {
        &self.position
    }

    pub fn extent(&self) -> &[f64] {
        &self.extent
    }

    pub fn units(&self) -> &[String] {
        &self.units
    }

    pub fn set_extent(&mut self, extent: Vec<f64>) {
        self.extent = extent;
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
                "feature index {} is out of bounds of tag `{}` ({} features)",
                index,
                self.name,
                self.features.len()
            ))
        })
    }

    /// resolved slice of the referenced array `reference_index`
    pub fn retrieve_data(&self, reference_index: usize) -> Result<DataView<S>, DataError> {
        access::retrieve_data(self, reference_index)
    }

    /// slice of the data of feature `feature_index` per its link kind
    pub fn retrieve_feature_data(&self, feature_index: usize) -> Result<DataView<S>, DataError> {
        access::retrieve_feature_data(self, feature_index)
    }
}
