//! Per axis accuracy statistics
use crate::{
    constants::CEP_RMS_RATIO,
    error::{Error, ParsingError},
    reference::ReferencePolicy,
    solution::{SolutionBuffer, SolutionRecord},
};

use log::debug;
use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Coordinate axis. Depending on the output frame,
/// this is either (x, y, z) or (e, n, u).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// All three axes, in coordinates order
    pub const ALL: [Axis; 3] = [Self::X, Self::Y, Self::Z];
    /// Index of this axis in a position vector
    pub const fn index(&self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::X => write!(f, "x"),
            Self::Y => write!(f, "y"),
            Self::Z => write!(f, "z"),
        }
    }
}

/// [SampleFilter] selects the solutions that contribute
/// to the statistics. Note that it is independent from the
/// [ReferencePolicy], which has its own validity rules.
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SampleFilter {
    /// All solutions, invalid ones included
    #[default]
    All,
    /// Valid solutions only
    ValidOnly,
}

impl SampleFilter {
    fn accepts(&self, sol: &SolutionRecord) -> bool {
        match self {
            Self::All => true,
            Self::ValidOnly => sol.is_valid(),
        }
    }
}

impl std::str::FromStr for SampleFilter {
    type Err = ParsingError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "valid" => Ok(Self::ValidOnly),
            _ => Err(ParsingError::SampleFilter(s.to_string())),
        }
    }
}

/// Accuracy metrics, for one axis
#[derive(Default, Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AccuracyMetrics {
    /// Sample mean
    pub mean: f64,
    /// Sample standard deviation, null when
    /// a single sample was available.
    pub std_dev: f64,
    /// Root mean square of the deviations to the reference point
    pub rms: f64,
    /// Circular error probable, approximated from the RMS
    pub cep: f64,
}

impl AccuracyMetrics {
    /// Computes [AccuracyMetrics] of given samples, against `reference`.
    /// Returns None when no samples are provided.
    pub fn from_samples(samples: &[f64], reference: f64) -> Option<Self> {
        let n = samples.len();
        if n == 0 {
            return None;
        }
        let mean = samples.iter().sum::<f64>() / n as f64;

        let std_dev = if n > 1 {
            let sum_sq = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>();
            (sum_sq / (n - 1) as f64).sqrt()
        } else {
            0.0
        };

        let sum_sq = samples
            .iter()
            .map(|x| (x - reference).powi(2))
            .sum::<f64>();
        let rms = (sum_sq / n as f64).sqrt();

        Some(Self {
            mean,
            std_dev,
            rms,
            cep: rms / CEP_RMS_RATIO,
        })
    }
}

impl std::fmt::Display for AccuracyMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{:14.4} {:10.4} {:10.4} {:10.4}",
            self.mean, self.std_dev, self.rms, self.cep
        )
    }
}

/// Computes [AccuracyMetrics] on given [Axis], against the `reference` coordinate.
/// Returns None when the [SampleFilter] retains no solution: this is not an error.
pub fn compute_axis_stats(
    buffer: &SolutionBuffer,
    axis: Axis,
    reference: f64,
    filter: SampleFilter,
) -> Option<AccuracyMetrics> {
    let samples = buffer
        .iter()
        .filter(|sol| filter.accepts(sol))
        .map(|sol| sol.position[axis.index()])
        .collect::<Vec<_>>();

    let metrics = AccuracyMetrics::from_samples(&samples, reference)?;
    debug!("{} axis: {:?}", axis, metrics);
    Some(metrics)
}

/// [AccuracyReport] gathers the [AccuracyMetrics] of all three axes
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AccuracyReport {
    /// Reference point that was used
    pub reference: Vector3<f64>,
    /// Reference point policy
    pub policy: ReferencePolicy,
    /// Sample filter
    pub filter: SampleFilter,
    /// Metrics, in [Axis] order
    pub axes: [AccuracyMetrics; 3],
}

impl AccuracyReport {
    /// Resolves the reference point and computes all three axes.
    /// Returns Ok(None) when the buffer holds no sample to analyze,
    /// whatever the [ReferencePolicy].
    pub fn new(
        buffer: &SolutionBuffer,
        policy: ReferencePolicy,
        filter: SampleFilter,
    ) -> Result<Option<Self>, Error> {
        if buffer.is_empty() {
            return Ok(None);
        }
        let reference = policy.select(buffer)?;
        let mut axes = [AccuracyMetrics::default(); 3];
        for axis in Axis::ALL {
            match compute_axis_stats(buffer, axis, reference[axis.index()], filter) {
                Some(metrics) => axes[axis.index()] = metrics,
                None => return Ok(None),
            }
        }
        Ok(Some(Self {
            reference,
            policy,
            filter,
            axes,
        }))
    }
    /// Returns [AccuracyMetrics] for given [Axis]
    pub fn axis(&self, axis: Axis) -> &AccuracyMetrics {
        &self.axes[axis.index()]
    }
    /// Horizontal RMS, from the first two axes
    pub fn rms_2d(&self) -> f64 {
        (self.axes[0].rms.powi(2) + self.axes[1].rms.powi(2)).sqrt()
    }
    /// Spherical RMS, from all three axes
    pub fn rms_3d(&self) -> f64 {
        self.axes.iter().map(|m| m.rms.powi(2)).sum::<f64>().sqrt()
    }
}

impl std::fmt::Display for AccuracyReport {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(
            f,
            "reference ({}): {:.4} {:.4} {:.4}",
            self.policy, self.reference[0], self.reference[1], self.reference[2]
        )?;
        writeln!(
            f,
            "axis {:>14} {:>10} {:>10} {:>10}",
            "mean", "std", "rms", "cep"
        )?;
        for axis in Axis::ALL {
            writeln!(f, "{:<4} {}", axis, self.axis(axis))?;
        }
        write!(f, "rms 2D: {:.4} rms 3D: {:.4}", self.rms_2d(), self.rms_3d())
    }
}
