//! Reference point selection
use crate::{
    error::{Error, ParsingError},
    solution::SolutionBuffer,
};

use log::{debug, warn};
use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// [ReferencePolicy] describes how the reference point,
/// against which RMS and CEP are evaluated, is obtained.
#[derive(Default, Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ReferencePolicy {
    /// First valid solution of the buffer
    FirstEpoch,
    /// Last solution of the buffer, which must be valid
    LastEpoch,
    /// Average of all valid solutions, the last one excepted
    #[default]
    MeanOfValid,
    /// User defined reference position (x, y, z) in meters,
    /// usually a surveyed base station position
    Fixed(Vector3<f64>),
}

impl std::str::FromStr for ReferencePolicy {
    type Err = ParsingError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "first" => Ok(Self::FirstEpoch),
            "last" => Ok(Self::LastEpoch),
            "mean" | "average" => Ok(Self::MeanOfValid),
            _ => Err(ParsingError::ReferencePolicy(s.to_string())),
        }
    }
}

impl std::fmt::Display for ReferencePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::FirstEpoch => write!(f, "first"),
            Self::LastEpoch => write!(f, "last"),
            Self::MeanOfValid => write!(f, "mean"),
            Self::Fixed(pos) => write!(f, "fixed ({}m {}m {}m)", pos[0], pos[1], pos[2]),
        }
    }
}

impl ReferencePolicy {
    /// Selects the reference point from given [SolutionBuffer].
    /// This is a pure function of the buffer content.
    pub fn select(&self, buffer: &SolutionBuffer) -> Result<Vector3<f64>, Error> {
        let reference = match self {
            Self::FirstEpoch => buffer
                .valid_iter()
                .next()
                .map(|sol| sol.position)
                .ok_or(Error::NoValidSolution)?,
            Self::LastEpoch => buffer
                .last()
                .filter(|sol| sol.is_valid())
                .map(|sol| sol.position)
                .ok_or(Error::NoValidSolution)?,
            Self::MeanOfValid => {
                let examined = buffer.len().saturating_sub(1);
                let (sum, count) = buffer
                    .iter()
                    .take(examined)
                    .filter(|sol| sol.is_valid())
                    .fold((Vector3::<f64>::zeros(), 0_usize), |(sum, count), sol| {
                        (sum + sol.position, count + 1)
                    });
                if count > 0 {
                    sum / count as f64
                } else {
                    // degenerate but well defined
                    warn!("no valid solution to average: reference set to origin");
                    Vector3::zeros()
                }
            },
            Self::Fixed(position) => *position,
        };
        debug!("{} reference: {:?}", self, reference);
        Ok(reference)
    }
}
