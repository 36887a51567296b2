//! RAIM exclusion hypotheses
use crate::{error::Error, observation::Observation};

use log::trace;
use nalgebra::{Vector2, Vector6};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// [SatelliteState] is the navigation state of one satellite,
/// as derived from its ephemeris.
#[derive(Default, Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SatelliteState {
    /// Position (x, y, z) [m] and velocity (vx, vy, vz) [m/s]
    pub position_velocity: Vector6<f64>,
    /// Clock bias [s] and drift [s/s]
    pub clock: Vector2<f64>,
}

impl SatelliteState {
    pub fn new(position_velocity: Vector6<f64>, clock: Vector2<f64>) -> Self {
        Self {
            position_velocity,
            clock,
        }
    }
}

/// [ExclusionHypothesis] is the scratch state of one RAIM
/// exclusion hypothesis: the navigation state of the `source`
/// satellite has been substituted into the `destination` slot.
/// The scratch buffer is released when the hypothesis is dropped,
/// whatever the outcome of its evaluation.
#[derive(Debug)]
pub struct ExclusionHypothesis<'a> {
    observations: Vec<Observation>,
    states: &'a mut [SatelliteState],
    variances: Option<&'a mut [f64]>,
    source: usize,
    destination: usize,
    overwritten: SatelliteState,
    overwritten_variance: Option<f64>,
}

impl<'a> ExclusionHypothesis<'a> {
    /// Stages a new hypothesis by copying the position/velocity and clock
    /// blocks of the `source` slot onto the `destination` slot.
    /// Error variances are only copied when provided.
    /// Indexes are verified prior any modification, so a failure
    /// leaves `states` and `variances` untouched.
    pub fn stage(
        observations: &[Observation],
        states: &'a mut [SatelliteState],
        mut variances: Option<&'a mut [f64]>,
        source: usize,
        destination: usize,
    ) -> Result<Self, Error> {
        for index in [source, destination] {
            if index >= states.len() {
                return Err(Error::InvalidSatelliteIndex(index));
            }
        }
        if let Some(variances) = &variances {
            for index in [source, destination] {
                if index >= variances.len() {
                    return Err(Error::IncompleteCopy {
                        index,
                        len: variances.len(),
                    });
                }
            }
        }

        let overwritten = states[destination];
        states[destination] = states[source];

        let overwritten_variance = variances.as_deref_mut().map(|variances| {
            let overwritten = variances[destination];
            variances[destination] = variances[source];
            overwritten
        });

        trace!(
            "staged exclusion hypothesis #{} -> #{} ({} observations)",
            source,
            destination,
            observations.len()
        );

        Ok(Self {
            observations: observations.to_vec(),
            states,
            variances,
            source,
            destination,
            overwritten,
            overwritten_variance,
        })
    }
    /// Slot whose state was duplicated
    pub fn source(&self) -> usize {
        self.source
    }
    /// Slot whose state was overwritten
    pub fn destination(&self) -> usize {
        self.destination
    }
    /// Observations this hypothesis was staged for
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }
    /// Satellite states, as modified by this hypothesis
    pub fn states(&self) -> &[SatelliteState] {
        &self.states[..]
    }
    /// Error variances, as modified by this hypothesis
    pub fn variances(&self) -> Option<&[f64]> {
        self.variances.as_deref()
    }
    /// Discards this hypothesis and restores the destination
    /// slot to its initial content.
    pub fn revert(mut self) {
        self.states[self.destination] = self.overwritten;
        if let (Some(variances), Some(overwritten)) =
            (self.variances.as_deref_mut(), self.overwritten_variance)
        {
            variances[self.destination] = overwritten;
        }
        trace!("reverted exclusion hypothesis #{} -> #{}", self.source, self.destination);
    }
}

impl Drop for ExclusionHypothesis<'_> {
    fn drop(&mut self) {
        trace!(
            "released exclusion hypothesis #{} -> #{}",
            self.source,
            self.destination
        );
    }
}
