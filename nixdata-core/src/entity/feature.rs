use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::DataArray;
use crate::error::DataError;
use crate::store::DataStore;

/// how a feature's data relates to the geometry of its tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LinkType {
    /// the tag geometry slices the feature data
    Tagged,
    /// one row of the feature data per tagged point
    Indexed,
    /// the feature data is returned whole
    Untagged,
}

/// side data attached to a tag
#[derive(Debug, Clone)]
pub struct Feature<S> {
    id: Uuid,
    link_type: LinkType,
    data: Option<Arc<DataArray<S>>>,
}

impl<S: DataStore> Feature<S> {
    pub fn new(link_type: LinkType, data: Arc<DataArray<S>>) -> Self {
        Self {
            id: Uuid::new_v4(),
            link_type,
            data: Some(data),
        }
    }

    /// a feature whose data has not been set
    pub fn unset(link_type: LinkType) -> Self {
        Self {
            id: Uuid::new_v4(),
            link_type,
            data: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn link_type(&self) -> LinkType {
        self.link_type
    }

    /// the feature's data array; fails with `UninitializedEntity` when absent
    pub fn data(&self) -> Result<&Arc<DataArray<S>>, DataError> {
        self.data.as_ref().ok_or(DataError::UninitializedEntity)
    }
}
