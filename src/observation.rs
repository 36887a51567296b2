//! Per satellite observation staging
use crate::{
    constants::{MAX_FREQUENCIES, MAX_SATELLITES},
    error::Error,
};

use gnss::prelude::SV;
use hifitime::Epoch;
use log::{trace, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// [Observation] is one satellite observation at one [Epoch],
/// for up to [MAX_FREQUENCIES] carrier frequencies.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Observation {
    /// Observed satellite
    pub sv: SV,
    /// Sampling [Epoch]
    pub epoch: Epoch,
    /// Pseudo range [m], per frequency
    pub pseudorange: [f64; MAX_FREQUENCIES],
    /// Doppler [Hz], per frequency
    pub doppler: [f32; MAX_FREQUENCIES],
}

impl Observation {
    /// Builds a new [Observation] without any measurement
    pub fn new(sv: SV, epoch: Epoch) -> Self {
        Self {
            sv,
            epoch,
            pseudorange: [0.0; MAX_FREQUENCIES],
            doppler: [0.0; MAX_FREQUENCIES],
        }
    }
    /// Copies and returns Self with given pseudo range, on given frequency.
    /// Fails with [Error::InvalidFrequencyIndex] if `frequency` is not supported.
    pub fn with_pseudorange(&self, frequency: usize, pseudorange: f64) -> Result<Self, Error> {
        let mut s = *self;
        let pr = s
            .pseudorange
            .get_mut(frequency)
            .ok_or(Error::InvalidFrequencyIndex(frequency))?;
        *pr = pseudorange;
        Ok(s)
    }
    /// Copies and returns Self with given doppler, on given frequency.
    /// Fails with [Error::InvalidFrequencyIndex] if `frequency` is not supported.
    pub fn with_doppler(&self, frequency: usize, doppler: f32) -> Result<Self, Error> {
        let mut s = *self;
        let d = s
            .doppler
            .get_mut(frequency)
            .ok_or(Error::InvalidFrequencyIndex(frequency))?;
        *d = doppler;
        Ok(s)
    }
}

/// [SatelliteSlot] is the staged content for one satellite,
/// on the active frequency.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SatelliteSlot {
    pub sv: SV,
    pub epoch: Epoch,
    pub pseudorange: f64,
    pub doppler: f32,
    pub frequency_index: usize,
}

/// [ObservationStage] is a fixed capacity store, refreshed in bulk
/// once per epoch, that the integrity monitoring reads by index.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationStage {
    capacity: usize,
    slots: Vec<SatelliteSlot>,
    frequency_index: usize,
    has_doppler: bool,
}

impl Default for ObservationStage {
    fn default() -> Self {
        Self::with_capacity(MAX_SATELLITES)
    }
}

impl ObservationStage {
    /// Builds a new [ObservationStage] dimensioned for [MAX_SATELLITES]
    pub fn new() -> Self {
        Self::default()
    }
    /// Builds a new [ObservationStage] that can hold up to `capacity` satellites
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            slots: Vec::with_capacity(capacity),
            frequency_index: 0,
            has_doppler: false,
        }
    }
    /// Stages a new set of [Observation]s, on given frequency.
    /// The previous content is entirely replaced, unless this call fails,
    /// in which case the stage is left untouched.
    pub fn stage(
        &mut self,
        observations: &[Observation],
        frequency_index: usize,
    ) -> Result<(), Error> {
        if observations.len() > self.capacity {
            warn!(
                "rejected staging of {} satellites (capacity: {})",
                observations.len(),
                self.capacity
            );
            return Err(Error::CapacityExceeded {
                requested: observations.len(),
                capacity: self.capacity,
            });
        }
        if frequency_index >= MAX_FREQUENCIES {
            return Err(Error::InvalidFrequencyIndex(frequency_index));
        }

        self.slots.clear();
        self.slots.extend(observations.iter().map(|obs| SatelliteSlot {
            sv: obs.sv,
            epoch: obs.epoch,
            pseudorange: obs.pseudorange[frequency_index],
            doppler: obs.doppler[frequency_index],
            frequency_index,
        }));
        self.frequency_index = frequency_index;

        trace!(
            "staged {} satellites on frequency #{}",
            self.slots.len(),
            frequency_index
        );
        Ok(())
    }
    /// Drops all staged content
    pub fn clear(&mut self) {
        self.slots.clear();
    }
    /// Returns the max. number of satellites this stage can hold
    pub fn capacity(&self) -> usize {
        self.capacity
    }
    /// Returns number of satellites currently staged
    pub fn len(&self) -> usize {
        self.slots.len()
    }
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
    /// Returns frequency index of the latest staging
    pub fn frequency_index(&self) -> usize {
        self.frequency_index
    }
    /// Returns nth [SatelliteSlot]
    pub fn slot(&self, nth: usize) -> Option<&SatelliteSlot> {
        self.slots.get(nth)
    }
    /// Iterates staged [SatelliteSlot]s, in staging order
    pub fn slots(&self) -> std::slice::Iter<'_, SatelliteSlot> {
        self.slots.iter()
    }
    /// Returns nth satellite pseudo range [m]
    pub fn pseudorange(&self, nth: usize) -> Option<f64> {
        self.slot(nth).map(|slot| slot.pseudorange)
    }
    /// Returns nth satellite doppler [Hz]
    pub fn doppler(&self, nth: usize) -> Option<f32> {
        self.slot(nth).map(|slot| slot.doppler)
    }
    /// Returns nth satellite identity
    pub fn sv(&self, nth: usize) -> Option<SV> {
        self.slot(nth).map(|slot| slot.sv)
    }
    /// Returns nth satellite sampling [Epoch]
    pub fn epoch(&self, nth: usize) -> Option<Epoch> {
        self.slot(nth).map(|slot| slot.epoch)
    }
    /// Returns slot index of given [SV], if staged
    pub fn sv_index(&self, sv: SV) -> Option<usize> {
        self.slots.iter().position(|slot| slot.sv == sv)
    }
    /// Declares whether doppler observations are present in the input epochs.
    /// This is not deduced from staged content.
    pub fn set_has_doppler(&mut self, has_doppler: bool) {
        self.has_doppler = has_doppler;
    }
    /// Returns true if doppler observations were declared as available
    pub fn has_doppler(&self) -> bool {
        self.has_doppler
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::str::FromStr;
    #[test]
    fn default_stage() {
        let stage = ObservationStage::default();
        assert_eq!(stage.capacity(), MAX_SATELLITES);
        assert!(stage.is_empty());
        assert!(!stage.has_doppler());
        assert!(stage.pseudorange(0).is_none());
    }
    #[test]
    fn invalid_frequency() {
        let mut stage = ObservationStage::with_capacity(4);
        let obs = Observation::new(
            SV::from_str("G01").unwrap(),
            Epoch::from_str("2021-04-28T05:51:22 GPST").unwrap(),
        );
        assert_eq!(
            stage.stage(&[obs], MAX_FREQUENCIES),
            Err(Error::InvalidFrequencyIndex(MAX_FREQUENCIES))
        );
        assert!(stage.is_empty());
    }
    #[test]
    fn measurement_frequency() {
        let obs = Observation::new(
            SV::from_str("E05").unwrap(),
            Epoch::from_str("2021-04-28T05:51:22 GPST").unwrap(),
        );
        let obs = obs
            .with_pseudorange(2, 22.5E6)
            .and_then(|obs| obs.with_doppler(2, -350.25))
            .unwrap();
        assert_eq!(obs.pseudorange, [0.0, 0.0, 22.5E6]);
        assert_eq!(obs.doppler, [0.0, 0.0, -350.25]);

        assert_eq!(
            obs.with_pseudorange(MAX_FREQUENCIES, 1.0),
            Err(Error::InvalidFrequencyIndex(MAX_FREQUENCIES))
        );
        assert_eq!(
            obs.with_doppler(5, 1.0),
            Err(Error::InvalidFrequencyIndex(5))
        );
    }
}
