use std::sync::Arc;

use anyhow::Result;
use ndarray::{ArrayD, IxDyn};

use nixdata_core::access::{offset_and_count, offset_and_count_at, position_to_index};
use nixdata_core::dimension::{Dimension, RangeDimension, SampledDimension, SetDimension};
use nixdata_core::entity::{DataArray, Feature, LinkType, MultiTag, Tag};
use nixdata_core::error::DataError;
use nixdata_core::ndsize;
use nixdata_ndarray::NdDenseStore;

type Array = DataArray<NdDenseStore<f64>>;

/// rank-1 array of 1000 samples at 1 kHz; values equal their index
fn kilohertz_trace() -> Result<Arc<Array>> {
    let data = ArrayD::from_shape_fn(IxDyn(&[1000]), |ix| ix[0] as f64);
    let dim = SampledDimension::new(0.001)?.with_unit("s");
    Ok(Arc::new(DataArray::new(
        "trace",
        NdDenseStore::from_raw(data),
        vec![dim.into()],
    )?))
}

fn unlabeled_grid(rows: usize, cols: usize) -> Result<Arc<Array>> {
    let data = ArrayD::from_shape_fn(IxDyn(&[rows, cols]), |ix| (ix[0] * cols + ix[1]) as f64);
    let dims: Vec<Dimension> = vec![
        SampledDimension::new(1.0)?.into(),
        SampledDimension::new(1.0)?.into(),
    ];
    Ok(Arc::new(DataArray::new(
        "grid",
        NdDenseStore::from_raw(data),
        dims,
    )?))
}

fn point_table(rows: Vec<[f64; 2]>) -> Result<Arc<Array>> {
    let flat: Vec<f64> = rows.iter().flatten().copied().collect();
    let data = ArrayD::from_shape_vec(IxDyn(&[rows.len(), 2]), flat)?;
    Ok(Arc::new(DataArray::new(
        "points",
        NdDenseStore::from_raw(data),
        vec![
            SetDimension::default().into(),
            SetDimension::default().into(),
        ],
    )?))
}

#[test]
fn sampled_axis_with_matching_units() -> Result<()> {
    let array = kilohertz_trace()?;
    let mut tag = Tag::new("roi", vec![0.5]);
    tag.set_extent(vec![0.1]);
    tag.set_units(vec!["s".into()]);
    tag.add_reference(Arc::clone(&array));

    let (offset, count) = offset_and_count(&tag, &array)?;
    assert_eq!(offset, ndsize![500]);
    assert_eq!(count, ndsize![100]);

    let view = tag.retrieve_data(0)?;
    let values = view.read()?;
    assert_eq!(values.len(), 100);
    assert_eq!(values[0], 500.0);
    assert_eq!(values[99], 599.0);
    Ok(())
}

#[test]
fn sampled_axis_scales_caller_units() -> Result<()> {
    let array = kilohertz_trace()?;
    let mut tag = Tag::new("roi", vec![500.0]);
    tag.set_extent(vec![100.0]);
    tag.set_units(vec!["ms".into()]);
    tag.add_reference(Arc::clone(&array));

    let (offset, count) = offset_and_count(&tag, &array)?;
    assert_eq!(offset, ndsize![500]);
    assert_eq!(count, ndsize![100]);
    Ok(())
}

#[test]
fn set_dimension_rejects_caller_units() -> Result<()> {
    let data = ArrayD::from_shape_vec(IxDyn(&[4]), vec![10.0, 11.0, 12.0, 13.0])?;
    let labels = SetDimension::new(vec!["a".into(), "b".into(), "c".into(), "d".into()]);
    let array = Arc::new(DataArray::new(
        "categories",
        NdDenseStore::from_raw(data),
        vec![labels.into()],
    )?);

    let mut tag = Tag::new("pick", vec![2.0]);
    tag.set_units(vec!["Hz".into()]);
    tag.add_reference(Arc::clone(&array));

    assert!(matches!(
        tag.retrieve_data(0),
        Err(DataError::IncompatibleDimensions(_))
    ));
    Ok(())
}

#[test]
fn set_dimension_without_units_rounds() -> Result<()> {
    let data = ArrayD::from_shape_vec(IxDyn(&[4]), vec![10.0, 11.0, 12.0, 13.0])?;
    let labels = SetDimension::new(vec!["a".into(), "b".into(), "c".into(), "d".into()]);
    let array = Arc::new(DataArray::new(
        "categories",
        NdDenseStore::from_raw(data),
        vec![labels.into()],
    )?);

    let mut tag = Tag::new("pick", vec![2.4]);
    tag.set_units(vec!["none".into()]);
    tag.add_reference(Arc::clone(&array));

    let (offset, count) = offset_and_count(&tag, &array)?;
    assert_eq!(offset, ndsize![2]);
    assert_eq!(count, ndsize![1]);

    assert_eq!(tag.retrieve_data(0)?.read()?, vec![12.0]);
    Ok(())
}

#[test]
fn multi_tag_with_two_dimensional_positions() -> Result<()> {
    let array = unlabeled_grid(100, 100)?;
    let positions = point_table(vec![[0.0, 0.0], [10.0, 20.0], [50.0, 60.0]])?;
    let extents = point_table(vec![[1.0, 1.0], [5.0, 7.0], [2.0, 2.0]])?;

    let mut tag = MultiTag::new("events", positions);
    tag.set_extents(extents);
    tag.add_reference(Arc::clone(&array));

    let (offset, count) = offset_and_count_at(&tag, &array, 1)?;
    assert_eq!(offset, ndsize![10, 20]);
    assert_eq!(count, ndsize![5, 7]);

    let view = tag.retrieve_data(1, 0)?;
    let values = view.read()?;
    assert_eq!(values.len(), 35);
    assert_eq!(values[0], (10 * 100 + 20) as f64);
    Ok(())
}

#[test]
fn out_of_extent_window_resolves_but_does_not_read() -> Result<()> {
    let data = ArrayD::from_shape_fn(IxDyn(&[100]), |ix| ix[0] as f64);
    let array = Arc::new(DataArray::new(
        "short",
        NdDenseStore::from_raw(data),
        vec![SampledDimension::new(1.0)?.into()],
    )?);

    let mut tag = Tag::new("tail", vec![95.0]);
    tag.set_extent(vec![20.0]);
    tag.set_units(vec!["none".into()]);
    tag.add_reference(Arc::clone(&array));

    let (offset, count) = offset_and_count(&tag, &array)?;
    assert_eq!(offset, ndsize![95]);
    assert_eq!(count, ndsize![20]);

    assert!(matches!(
        tag.retrieve_data(0),
        Err(DataError::OutOfBounds(_))
    ));
    Ok(())
}

#[test]
fn empty_extent_selects_one_sample_per_axis() -> Result<()> {
    let array = unlabeled_grid(10, 10)?;
    let mut tag = Tag::new("point", vec![3.0, 4.0]);
    tag.add_reference(Arc::clone(&array));

    let (offset, count) = offset_and_count(&tag, &array)?;
    assert_eq!(offset, ndsize![3, 4]);
    assert_eq!(count, ndsize![1, 1]);

    assert_eq!(tag.retrieve_data(0)?.read()?, vec![34.0]);
    Ok(())
}

#[test]
fn zero_width_extent_selects_one_sample() -> Result<()> {
    let array = kilohertz_trace()?;
    let mut tag = Tag::new("sliver", vec![0.5]);
    tag.set_extent(vec![0.0002]);
    tag.set_units(vec!["s".into()]);
    tag.add_reference(Arc::clone(&array));

    let (_, count) = offset_and_count(&tag, &array)?;
    assert_eq!(count, ndsize![1]);
    Ok(())
}

#[test]
fn one_dimensional_positions_against_a_grid_are_rejected() -> Result<()> {
    let positions = Arc::new(DataArray::new(
        "positions",
        NdDenseStore::from_raw(ArrayD::from_shape_vec(IxDyn(&[2]), vec![1.0, 4.0])?),
        vec![SetDimension::default().into()],
    )?);
    let tag = MultiTag::new("events", positions);

    let grid = unlabeled_grid(4, 5)?;
    assert!(matches!(
        offset_and_count_at(&tag, &grid, 0),
        Err(DataError::IncompatibleDimensions(_))
    ));
    Ok(())
}

#[test]
fn range_dimension_resolves_ticks_exactly() -> Result<()> {
    let ticks = vec![0.1, 0.4, 0.45, 1.0, 2.5];
    let data = ArrayD::from_shape_fn(IxDyn(&[5]), |ix| ix[0] as f64);
    let dim = RangeDimension::new(ticks.clone())?.with_unit("s");
    let array = Arc::new(DataArray::new(
        "irregular",
        NdDenseStore::from_raw(data),
        vec![dim.clone().into()],
    )?);

    let wrapped: Dimension = dim.into();
    for (k, &tick) in ticks.iter().enumerate() {
        assert_eq!(position_to_index(tick, "s", &wrapped)?, k);
    }

    let mut tag = Tag::new("burst", vec![0.4]);
    tag.set_extent(vec![0.6]);
    tag.set_units(vec!["s".into()]);
    tag.add_reference(Arc::clone(&array));

    let (offset, count) = offset_and_count(&tag, &array)?;
    assert_eq!(offset, ndsize![1]);
    assert_eq!(count, ndsize![2]);
    Ok(())
}

#[test]
fn resolution_is_deterministic() -> Result<()> {
    let array = kilohertz_trace()?;
    let mut tag = Tag::new("roi", vec![0.123]);
    tag.set_extent(vec![0.456]);
    tag.set_units(vec!["s".into()]);

    let first = offset_and_count(&tag, &array)?;
    let second = offset_and_count(&tag, &array)?;
    assert_eq!(first, second);

    // rank is preserved through resolution
    assert_eq!(first.0.rank(), array.dimension_count());
    assert_eq!(first.1.rank(), array.dimension_count());
    Ok(())
}

#[test]
fn tagged_feature_is_sliced_by_tag_geometry() -> Result<()> {
    let array = kilohertz_trace()?;
    let side = kilohertz_trace()?;
    let mut tag = Tag::new("roi", vec![0.5]);
    tag.set_extent(vec![0.01]);
    tag.set_units(vec!["s".into()]);
    tag.add_reference(array);
    tag.add_feature(Feature::new(LinkType::Tagged, side));

    let view = tag.retrieve_feature_data(0)?;
    assert_eq!(view.offset(), &ndsize![500]);
    assert_eq!(view.count(), &ndsize![10]);
    Ok(())
}

#[test]
fn indexed_feature_slices_one_row_per_point() -> Result<()> {
    let positions = Arc::new(DataArray::new(
        "positions",
        NdDenseStore::from_raw(ArrayD::from_shape_vec(
            IxDyn(&[3]),
            vec![0.0, 1.0, 2.0],
        )?),
        vec![SetDimension::default().into()],
    )?);
    let rows = unlabeled_grid(3, 4)?;

    let mut tag = MultiTag::new("events", positions);
    tag.add_feature(Feature::new(LinkType::Indexed, rows));

    let view = tag.retrieve_feature_data(2, 0)?;
    assert_eq!(view.offset(), &ndsize![2, 0]);
    assert_eq!(view.count(), &ndsize![1, 4]);
    assert_eq!(view.read()?, vec![8.0, 9.0, 10.0, 11.0]);

    // strictly past the last row
    assert!(matches!(
        tag.retrieve_feature_data(3, 0),
        Err(DataError::OutOfBounds(_))
    ));
    Ok(())
}

#[test]
fn untagged_feature_returns_the_whole_data() -> Result<()> {
    let positions = Arc::new(DataArray::new(
        "positions",
        NdDenseStore::from_raw(ArrayD::from_shape_vec(IxDyn(&[1]), vec![0.0])?),
        vec![SetDimension::default().into()],
    )?);
    let whole = unlabeled_grid(2, 3)?;

    let mut tag = MultiTag::new("events", positions);
    tag.add_feature(Feature::new(LinkType::Untagged, whole));

    let view = tag.retrieve_feature_data(0, 0)?;
    assert_eq!(view.offset(), &ndsize![0, 0]);
    assert_eq!(view.count(), &ndsize![2, 3]);
    assert_eq!(view.read()?.len(), 6);
    Ok(())
}

#[test]
fn unset_feature_data_is_reported() -> Result<()> {
    let array = kilohertz_trace()?;
    let mut tag = Tag::new("roi", vec![0.5]);
    tag.add_reference(array);
    tag.add_feature(Feature::unset(LinkType::Tagged));

    assert!(matches!(
        tag.retrieve_feature_data(0),
        Err(DataError::UninitializedEntity)
    ));
    Ok(())
}
