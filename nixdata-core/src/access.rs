//! Region resolution. The functions here mediate between the physical
//! positions carried by tags and the integer `(offset, count)` windows
//! understood by the storage backend, honoring per-axis semantics and unit
//! scaling. Validation always precedes any read.

use std::sync::Arc;

use itertools::izip;
use tracing::trace;

use crate::dimension::{Dimension, RangeDimension, SampledDimension, SetDimension};
use crate::entity::{DataArray, LinkType, MultiTag, Tag};
use crate::error::DataError;
use crate::shape::NdSize;
use crate::store::DataStore;
use crate::unit;
use crate::view::DataView;

/// index on a sampled axis for `position` given in `unit`
///
/// The position unit and the dimension unit must either both be given or
/// both be absent; when both are present the position is scaled into the
/// dimension's unit first.
pub fn position_to_index_sampled(
    position: f64,
    unit: &str,
    dimension: &SampledDimension,
) -> Result<usize, DataError> {
    let scaling = match (dimension.unit(), unit::is_none(unit)) {
        (Some(dim_unit), false) => unit::scaling(unit, dim_unit).map_err(|err| {
            DataError::IncompatibleDimensions(format!(
                "cannot scale position into the unit of the sampled dimension: {err}"
            ))
        })?,
        (None, true) => 1.0,
        _ => {
            return Err(DataError::IncompatibleDimensions(format!(
                "units of position (`{unit}`) and sampled dimension must both be given"
            )));
        }
    };
    Ok(dimension.index_of(position * scaling))
}

/// index on a categorical axis; set dimensions are unitless and reject any
/// caller unit
pub fn position_to_index_set(
    position: f64,
    unit: &str,
    dimension: &SetDimension,
) -> Result<usize, DataError> {
    if !unit::is_none(unit) {
        return Err(DataError::IncompatibleDimensions(format!(
            "cannot apply a position with unit (`{unit}`) to a set dimension"
        )));
    }
    let index = dimension.index_of(position);
    if !dimension.labels().is_empty() && index >= dimension.labels().len() {
        return Err(DataError::OutOfBounds(format!(
            "position {position} is out of bounds of the set dimension ({} labels)",
            dimension.labels().len()
        )));
    }
    Ok(index)
}

/// index on a range axis; a dimension without a unit tolerates caller units
pub fn position_to_index_range(
    position: f64,
    unit: &str,
    dimension: &RangeDimension,
) -> Result<usize, DataError> {
    let scaling = match (dimension.unit(), unit::is_none(unit)) {
        (Some(dim_unit), false) => unit::scaling(unit, dim_unit).map_err(|err| {
            DataError::IncompatibleDimensions(format!(
                "cannot scale position into the unit of the range dimension: {err}"
            ))
        })?,
        _ => 1.0,
    };
    Ok(dimension.index_of(position * scaling))
}

/// axis index for `position` given in `unit`, dispatching on the axis kind
pub fn position_to_index(
    position: f64,
    unit: &str,
    dimension: &Dimension,
) -> Result<usize, DataError> {
    match dimension {
        Dimension::Sampled(dim) => position_to_index_sampled(position, unit, dim),
        Dimension::Range(dim) => position_to_index_range(position, unit, dim),
        Dimension::Set(dim) => position_to_index_set(position, unit, dim),
    }
}

/// resolves a tag's annotation against `array` into an `(offset, count)`
/// window
///
/// An empty tag extent selects a single sample per axis; a non-empty extent
/// resolves to at least one sample per axis even when it is narrower than
/// the axis resolution.
pub fn offset_and_count<S: DataStore>(
    tag: &Tag<S>,
    array: &DataArray<S>,
) -> Result<(NdSize, NdSize), DataError> {
    let position = tag.position();
    let extent = tag.extent();
    let units = tag.units();
    let rank = array.dimension_count();

    if position.len() != rank || (!extent.is_empty() && extent.len() != rank) {
        return Err(DataError::IncompatibleDimensions(format!(
            "tag `{}` annotates {} axes with {} extents but array `{}` has rank {}",
            tag.name(),
            position.len(),
            extent.len(),
            array.name(),
            rank
        )));
    }

    let mut offset = NdSize::new(rank, 0);
    let mut count = NdSize::new(rank, 1);
    for (axis, &pos) in position.iter().enumerate() {
        let dimension = array.dimension(axis + 1)?;
        let unit = units
            .get(axis)
            .map(String::as_str)
            .unwrap_or(unit::NONE_UNIT);
        offset[axis] = position_to_index(pos, unit, dimension)?;
        if let Some(&ext) = extent.get(axis) {
            let end = position_to_index(pos + ext, unit, dimension)?;
            count[axis] = end.saturating_sub(offset[axis]).max(1);
        }
    }
    trace!(
        "resolved tag `{}` against array `{}`: offset {:?}, count {:?}",
        tag.name(),
        array.name(),
        offset.as_slice(),
        count.as_slice()
    );
    Ok((offset, count))
}

/// resolves point `index` of a multi tag against `array` into an
/// `(offset, count)` window
///
/// When the positions row is shorter than the array rank, trailing axes get
/// offset 0 and count 1.
pub fn offset_and_count_at<S: DataStore>(
    tag: &MultiTag<S>,
    array: &DataArray<S>,
    index: usize,
) -> Result<(NdSize, NdSize), DataError> {
    let positions = tag.positions();
    let position_size = positions.data_extent();
    let extent_size = tag.extents().map(|extents| extents.data_extent());
    let rank = array.dimension_count();

    if position_size.rank() == 0 || position_size.rank() > 2 {
        return Err(DataError::IncompatibleDimensions(format!(
            "positions of multi tag `{}` must have rank 1 or 2, got {}",
            tag.name(),
            position_size.rank()
        )));
    }
    if index >= position_size[0] {
        return Err(DataError::OutOfBounds(format!(
            "index {} is out of bounds of the positions of multi tag `{}` ({} points)",
            index,
            tag.name(),
            position_size[0]
        )));
    }
    if let Some(extent_size) = &extent_size {
        if index >= extent_size[0] {
            return Err(DataError::OutOfBounds(format!(
                "index {} is out of bounds of the extents of multi tag `{}` ({} points)",
                index,
                tag.name(),
                extent_size[0]
            )));
        }
    }
    if position_size.rank() == 1 && rank != 1 {
        return Err(DataError::IncompatibleDimensions(format!(
            "one-dimensional positions of multi tag `{}` cannot annotate array `{}` of rank {}",
            tag.name(),
            array.name(),
            rank
        )));
    }
    if position_size.rank() > 1 && position_size[1] > rank {
        return Err(DataError::IncompatibleDimensions(format!(
            "positions of multi tag `{}` annotate {} axes but array `{}` has rank {}",
            tag.name(),
            position_size[1],
            array.name(),
            rank
        )));
    }
    if let Some(extent_size) = &extent_size {
        if extent_size.rank() > 1 && extent_size[1] > rank {
            return Err(DataError::IncompatibleDimensions(format!(
                "extents of multi tag `{}` annotate {} axes but array `{}` has rank {}",
                tag.name(),
                extent_size[1],
                array.name(),
                rank
            )));
        }
    }

    // row `index` of the positions (and extents) array
    let (row_offset, row_count) = if position_size.rank() == 1 {
        (NdSize::from_raw(vec![index]), NdSize::from_raw(vec![1]))
    } else {
        (
            NdSize::from_raw(vec![index, 0]),
            NdSize::from_raw(vec![1, position_size[1]]),
        )
    };

    let units = tag.units();
    let mut row = Vec::new();
    positions.read_into(&row_offset, &row_count, &mut row)?;

    let mut data_offset = NdSize::new(rank, 0);
    let mut data_count = NdSize::new(rank, 1);
    for (axis, &pos) in row.iter().enumerate() {
        let dimension = array.dimension(axis + 1)?;
        let unit = units
            .get(axis)
            .map(String::as_str)
            .unwrap_or(unit::NONE_UNIT);
        data_offset[axis] = position_to_index(pos, unit, dimension)?;
    }

    if let Some(extents) = tag.extents() {
        let mut extent_row = Vec::new();
        extents.read_into(&row_offset, &row_count, &mut extent_row)?;
        for (axis, (&pos, &ext)) in row.iter().zip(extent_row.iter()).enumerate() {
            let dimension = array.dimension(axis + 1)?;
            let unit = units
                .get(axis)
                .map(String::as_str)
                .unwrap_or(unit::NONE_UNIT);
            let end = position_to_index(pos + ext, unit, dimension)?;
            data_count[axis] = end.saturating_sub(data_offset[axis]).max(1);
        }
    }

    trace!(
        "resolved point {} of multi tag `{}` against array `{}`: offset {:?}, count {:?}",
        index,
        tag.name(),
        array.name(),
        data_offset.as_slice(),
        data_count.as_slice()
    );
    Ok((data_offset, data_count))
}

/// true when `position` addresses an element inside `array`
pub fn position_in_data<S: DataStore>(array: &DataArray<S>, position: &NdSize) -> bool {
    let extent = array.data_extent();
    position.rank() == extent.rank()
        && izip!(position.iter(), extent.iter()).all(|(pos, ext)| pos < ext)
}

/// true when the `(offset, count)` window lies fully inside `array`; windows
/// with a zero count component are never in bounds
pub fn position_and_extent_in_data<S: DataStore>(
    array: &DataArray<S>,
    offset: &NdSize,
    count: &NdSize,
) -> bool {
    if offset.rank() != count.rank() || count.iter().any(|&c| c == 0) {
        return false;
    }
    position_in_data(array, &(&(offset + count) - 1))
}

/// resolved slice of the referenced array `reference_index` of `tag`
pub fn retrieve_data<S: DataStore>(
    tag: &Tag<S>,
    reference_index: usize,
) -> Result<DataView<S>, DataError> {
    let references = tag.references();
    if references.is_empty() {
        return Err(DataError::OutOfBounds(format!(
            "tag `{}` has no references",
            tag.name()
        )));
    }
    if reference_index >= references.len() {
        return Err(DataError::OutOfBounds(format!(
            "reference index {} is out of bounds of tag `{}` ({} references)",
            reference_index,
            tag.name(),
            references.len()
        )));
    }
    let array = &references[reference_index];
    let (offset, count) = offset_and_count(tag, array)?;
    DataView::new(Arc::clone(array), offset, count)
}

/// resolved slice of reference `reference_index` at point `position_index`
pub fn retrieve_data_at<S: DataStore>(
    tag: &MultiTag<S>,
    position_index: usize,
    reference_index: usize,
) -> Result<DataView<S>, DataError> {
    let references = tag.references();
    if references.is_empty() {
        return Err(DataError::OutOfBounds(format!(
            "multi tag `{}` has no references",
            tag.name()
        )));
    }
    if reference_index >= references.len() {
        return Err(DataError::OutOfBounds(format!(
            "reference index {} is out of bounds of multi tag `{}` ({} references)",
            reference_index,
            tag.name(),
            references.len()
        )));
    }
    let array = &references[reference_index];
    let (offset, count) = offset_and_count_at(tag, array, position_index)?;
    DataView::new(Arc::clone(array), offset, count)
}

/// slice of the data of feature `feature_index` of `tag`
///
/// Tagged features are sliced by the tag geometry; Indexed and Untagged
/// features return the entire data.
pub fn retrieve_feature_data<S: DataStore>(
    tag: &Tag<S>,
    feature_index: usize,
) -> Result<DataView<S>, DataError> {
    if tag.feature_count() == 0 {
        return Err(DataError::OutOfBounds(format!(
            "tag `{}` has no features",
            tag.name()
        )));
    }
    let feature = tag.get_feature(feature_index)?;
    let data = Arc::clone(feature.data()?);
    match feature.link_type() {
        LinkType::Tagged => {
            let (offset, count) = offset_and_count(tag, &data)?;
            DataView::new(data, offset, count)
        }
        LinkType::Indexed | LinkType::Untagged => Ok(DataView::full(data)),
    }
}

/// slice of the data of feature `feature_index` at point `position_index`
///
/// Tagged features are sliced by the point geometry; Indexed features
/// return row `position_index` of the data; Untagged features return the
/// entire data.
pub fn retrieve_feature_data_at<S: DataStore>(
    tag: &MultiTag<S>,
    position_index: usize,
    feature_index: usize,
) -> Result<DataView<S>, DataError> {
    if tag.feature_count() == 0 {
        return Err(DataError::OutOfBounds(format!(
            "multi tag `{}` has no features",
            tag.name()
        )));
    }
    let feature = tag.get_feature(feature_index)?;
    let data = Arc::clone(feature.data()?);
    match feature.link_type() {
        LinkType::Tagged => {
            let (offset, count) = offset_and_count_at(tag, &data, position_index)?;
            DataView::new(data, offset, count)
        }
        LinkType::Indexed => {
            let extent = data.data_extent();
            if extent.rank() == 0 {
                return Err(DataError::InvalidRank(format!(
                    "feature data `{}` has zero rank",
                    data.name()
                )));
            }
            if position_index >= extent[0] {
                return Err(DataError::OutOfBounds(format!(
                    "position {} is larger than the data stored in feature `{}` ({} rows)",
                    position_index,
                    data.name(),
                    extent[0]
                )));
            }
            let mut offset = NdSize::new(extent.rank(), 0);
            offset[0] = position_index;
            let mut count = extent;
            count[0] = 1;
            DataView::new(data, offset, count)
        }
        LinkType::Untagged => Ok(DataView::full(data)),
    }
}
