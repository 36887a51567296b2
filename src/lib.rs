#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

/*
 * RTK-Accuracy is part of the rtk-rs framework.
 * Authors: Guillaume W. Bres <guillaume.bressaix@gmail.com> et al.
 * (cf. https://github.com/rtk-rs/rtk-accuracy/graphs/contributors)
 * This framework is shipped under Mozilla Public V2 license.
 */

extern crate gnss_rs as gnss;

#[macro_use]
extern crate num_derive;

pub mod cfg;
pub mod context;
pub mod observation;
pub mod raim;
pub mod reference;
pub mod solution;
pub mod stats;

mod constants;
mod error;

#[cfg(test)]
mod tests;

pub use error::{Error, ParsingError};

/// Package to include all basic structures
pub mod prelude {
    pub use crate::{
        cfg::{
            EphemerisSource, IonosphereCorrection, PositioningConfig, PositioningMode,
            TroposphereCorrection,
        },
        constants::{CEP_RMS_RATIO, MAX_FREQUENCIES, MAX_INPUT_FILES, MAX_SATELLITES},
        context::ProcessingContext,
        error::{Error, ParsingError},
        observation::{Observation, ObservationStage, SatelliteSlot},
        raim::{ExclusionHypothesis, SatelliteState},
        reference::ReferencePolicy,
        solution::{SolutionBuffer, SolutionRecord, SolutionStatus},
        stats::{compute_axis_stats, AccuracyMetrics, AccuracyReport, Axis, SampleFilter},
    };

    // pub re-export
    pub use gnss::prelude::{Constellation, SV};
    pub use hifitime::{Duration, Epoch, TimeScale};
    pub use nalgebra::{Vector2, Vector3, Vector6};
}
