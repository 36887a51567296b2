//! Positioning run context
use crate::{
    cfg::PositioningConfig,
    error::Error,
    observation::{Observation, ObservationStage},
    reference::ReferencePolicy,
    solution::{SolutionBuffer, SolutionRecord},
    stats::{AccuracyReport, SampleFilter},
};

use log::debug;

/// [ProcessingContext] owns all the state of a single positioning run:
/// its configuration, the observation stage the positioning engine
/// refreshes every epoch, and the solutions it produced.
/// Only one run is supposed to be active at a time: concurrent
/// runs must each own their [ProcessingContext].
#[derive(Default, Debug, Clone)]
pub struct ProcessingContext {
    /// Run configuration
    pub cfg: PositioningConfig,
    stage: ObservationStage,
    solutions: SolutionBuffer,
}

impl ProcessingContext {
    /// Builds a new [ProcessingContext] from given configuration
    pub fn new(cfg: PositioningConfig) -> Self {
        Self {
            cfg,
            ..Default::default()
        }
    }
    /// Stages the observations of a new epoch, on given frequency
    pub fn stage_epoch(
        &mut self,
        observations: &[Observation],
        frequency_index: usize,
    ) -> Result<(), Error> {
        self.stage.stage(observations, frequency_index)
    }
    /// Returns reference to the [ObservationStage]
    pub fn stage(&self) -> &ObservationStage {
        &self.stage
    }
    /// Returns mutable reference to the [ObservationStage]
    pub fn stage_mut(&mut self) -> &mut ObservationStage {
        &mut self.stage
    }
    /// Appends a new solution
    pub fn push_solution(&mut self, solution: SolutionRecord) {
        self.solutions.push(solution);
    }
    /// Returns all solutions produced so far
    pub fn solutions(&self) -> &SolutionBuffer {
        &self.solutions
    }
    /// Generates the [AccuracyReport] once the run has completed.
    /// Returns Ok(None) if no solutions were produced, whatever the [ReferencePolicy].
    pub fn accuracy_report(
        &self,
        policy: ReferencePolicy,
        filter: SampleFilter,
    ) -> Result<Option<AccuracyReport>, Error> {
        debug!(
            "accuracy report: {} solutions ({} valid)",
            self.solutions.len(),
            self.solutions.valid_count()
        );
        AccuracyReport::new(&self.solutions, policy, filter)
    }
}
