//! Per-axis semantics of a data array. Every axis carries exactly one
//! descriptor: a uniform grid (sampled), an irregular grid (range) or a
//! categorical axis (set).

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DimensionError {
    #[error("sampling interval must be a positive finite number, got {0}")]
    InvalidInterval(f64),

    #[error("range dimension requires at least one tick")]
    EmptyTicks,

    #[error("range ticks must be non-decreasing")]
    UnsortedTicks,
}

/// uniform grid: sample `k` sits at `offset + k * sampling_interval`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampledDimension {
    sampling_interval: f64,
    offset: f64,
    unit: Option<String>,
    label: Option<String>,
}

impl SampledDimension {
    pub fn new(sampling_interval: f64) -> Result<Self, DimensionError> {
        if !sampling_interval.is_finite() || sampling_interval <= 0.0 {
            return Err(DimensionError::InvalidInterval(sampling_interval));
        }
        Ok(Self {
            sampling_interval,
            offset: 0.0,
            unit: None,
            label: None,
        })
    }

    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn sampling_interval(&self) -> f64 {
        self.sampling_interval
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn unit(&self) -> Option<&str> {
        self.unit.as_deref()
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// index of the sample closest to `position`, rounding half away from
    /// zero; positions before the offset clamp to 0
    pub fn index_of(&self, position: f64) -> usize {
        let index = ((position - self.offset) / self.sampling_interval).round();
        if index < 0.0 { 0 } else { index as usize }
    }

    /// physical position of the sample at `index`
    pub fn position_at(&self, index: usize) -> f64 {
        self.offset + index as f64 * self.sampling_interval
    }

    /// `count` consecutive sample positions starting at `start_index`
    pub fn axis(&self, count: usize, start_index: usize) -> Vec<f64> {
        (start_index..start_index + count)
            .map(|index| self.position_at(index))
            .collect()
    }
}

/// irregular grid given by a non-decreasing tick sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeDimension {
    ticks: Vec<f64>,
    unit: Option<String>,
    label: Option<String>,
}

impl RangeDimension {
    pub fn new(ticks: Vec<f64>) -> Result<Self, DimensionError> {
        if ticks.is_empty() {
            return Err(DimensionError::EmptyTicks);
        }
        if ticks.windows(2).any(|pair| pair[0] > pair[1]) {
            return Err(DimensionError::UnsortedTicks);
        }
        Ok(Self {
            ticks,
            unit: None,
            label: None,
        })
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn ticks(&self) -> &[f64] {
        &self.ticks
    }

    pub fn unit(&self) -> Option<&str> {
        self.unit.as_deref()
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// tick value at `index`, if any
    pub fn tick_at(&self, index: usize) -> Option<f64> {
        self.ticks.get(index).copied()
    }

    /// index of the tick closest to `position`; ties break toward the lower
    /// index, positions outside the tick span clamp to the first or last tick
    pub fn index_of(&self, position: f64) -> usize {
        let last = self.ticks.len() - 1;
        if position <= self.ticks[0] {
            return 0;
        }
        if position >= self.ticks[last] {
            return last;
        }
        // first tick >= position; the clamps above keep this in 1..=last
        let upper = self.ticks.partition_point(|&tick| tick < position);
        let lower = upper - 1;
        if position - self.ticks[lower] <= self.ticks[upper] - position {
            lower
        } else {
            upper
        }
    }
}

/// categorical axis with optional labels and no unit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetDimension {
    labels: Vec<String>,
}

impl SetDimension {
    pub fn new(labels: Vec<String>) -> Self {
        Self { labels }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// categorical index closest to `position`, rounding half away from
    /// zero; negative positions clamp to 0
    pub fn index_of(&self, position: f64) -> usize {
        let index = position.round();
        if index < 0.0 { 0 } else { index as usize }
    }
}

/// tagged union over the three axis kinds of a data array
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Dimension {
    Sampled(SampledDimension),
    Range(RangeDimension),
    Set(SetDimension),
}

impl Dimension {
    /// unit of the axis, if the kind carries one; set dimensions never do
    pub fn unit(&self) -> Option<&str> {
        match self {
            Dimension::Sampled(dim) => dim.unit(),
            Dimension::Range(dim) => dim.unit(),
            Dimension::Set(_) => None,
        }
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            Dimension::Sampled(dim) => dim.label(),
            Dimension::Range(dim) => dim.label(),
            Dimension::Set(_) => None,
        }
    }
}

impl From<SampledDimension> for Dimension {
    fn from(dim: SampledDimension) -> Self {
        Dimension::Sampled(dim)
    }
}

impl From<RangeDimension> for Dimension {
    fn from(dim: RangeDimension) -> Self {
        Dimension::Range(dim)
    }
}

impl From<SetDimension> for Dimension {
    fn from(dim: SetDimension) -> Self {
        Dimension::Set(dim)
    }
}
