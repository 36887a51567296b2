//! Position solutions, as produced by the positioning engine
use hifitime::Epoch;
use nalgebra::Vector3;
use std::num::NonZeroU8;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Solution validity flag. Any non zero raw value
/// describes an invalid solution, so the raw flag
/// and [SolutionStatus] convert back and forth losslessly.
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SolutionStatus {
    #[default]
    Valid,
    Invalid(NonZeroU8),
}

impl From<u8> for SolutionStatus {
    fn from(raw: u8) -> Self {
        match NonZeroU8::new(raw) {
            None => Self::Valid,
            Some(code) => Self::Invalid(code),
        }
    }
}

impl From<SolutionStatus> for u8 {
    fn from(status: SolutionStatus) -> u8 {
        match status {
            SolutionStatus::Valid => 0,
            SolutionStatus::Invalid(code) => code.get(),
        }
    }
}

impl SolutionStatus {
    /// Returns true if this flag describes a valid solution
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

impl std::fmt::Display for SolutionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Valid => write!(f, "valid"),
            Self::Invalid(code) => write!(f, "invalid ({})", code),
        }
    }
}

/// [SolutionRecord] is one position solution, resolved at one [Epoch].
/// It is immutable once appended to a [SolutionBuffer].
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SolutionRecord {
    /// Solution [Epoch]
    pub epoch: Epoch,
    /// Validity flag
    pub status: SolutionStatus,
    /// Resolved position (x, y, z) in meters
    pub position: Vector3<f64>,
}

impl SolutionRecord {
    /// Builds a new [SolutionRecord]
    pub fn new(epoch: Epoch, status: SolutionStatus, position: Vector3<f64>) -> Self {
        Self {
            epoch,
            status,
            position,
        }
    }
    /// Builds a new valid [SolutionRecord]
    pub fn valid(epoch: Epoch, position: Vector3<f64>) -> Self {
        Self::new(epoch, SolutionStatus::Valid, position)
    }
    /// Returns true if this solution is flagged as valid
    pub fn is_valid(&self) -> bool {
        self.status.is_valid()
    }
}

/// [SolutionBuffer] stores [SolutionRecord]s in chronological order.
/// It is append only: the producer pushes new solutions in
/// epoch order, the statistics engine only reads it.
#[derive(Default, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SolutionBuffer {
    inner: Vec<SolutionRecord>,
}

impl SolutionBuffer {
    /// Builds a new empty [SolutionBuffer]
    pub fn new() -> Self {
        Self::default()
    }
    /// Appends a new [SolutionRecord]
    pub fn push(&mut self, record: SolutionRecord) {
        self.inner.push(record);
    }
    /// Returns total number of solutions, valid or not
    pub fn len(&self) -> usize {
        self.inner.len()
    }
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
    /// Returns nth [SolutionRecord]
    pub fn get(&self, nth: usize) -> Option<&SolutionRecord> {
        self.inner.get(nth)
    }
    /// Returns the oldest [SolutionRecord]
    pub fn first(&self) -> Option<&SolutionRecord> {
        self.inner.first()
    }
    /// Returns the latest [SolutionRecord]
    pub fn last(&self) -> Option<&SolutionRecord> {
        self.inner.last()
    }
    /// Iterates all solutions, in chronological order
    pub fn iter(&self) -> std::slice::Iter<'_, SolutionRecord> {
        self.inner.iter()
    }
    /// Iterates valid solutions only, in chronological order
    pub fn valid_iter(&self) -> Box<dyn Iterator<Item = &SolutionRecord> + '_> {
        Box::new(self.inner.iter().filter(|sol| sol.is_valid()))
    }
    /// Returns number of valid solutions
    pub fn valid_count(&self) -> usize {
        self.valid_iter().count()
    }
    /// Returns a copy of Self, reduced to solutions
    /// that lie within [start, end] (both included).
    pub fn within(&self, start: Epoch, end: Epoch) -> Self {
        self.inner
            .iter()
            .filter(|sol| sol.epoch >= start && sol.epoch <= end)
            .copied()
            .collect()
    }
    /// Returns solutions as a slice
    pub fn as_slice(&self) -> &[SolutionRecord] {
        &self.inner
    }
}

impl FromIterator<SolutionRecord> for SolutionBuffer {
    fn from_iter<I: IntoIterator<Item = SolutionRecord>>(iter: I) -> Self {
        Self {
            inner: iter.into_iter().collect(),
        }
    }
}

impl Extend<SolutionRecord> for SolutionBuffer {
    fn extend<I: IntoIterator<Item = SolutionRecord>>(&mut self, iter: I) {
        self.inner.extend(iter)
    }
}

impl<'a> IntoIterator for &'a SolutionBuffer {
    type Item = &'a SolutionRecord;
    type IntoIter = std::slice::Iter<'a, SolutionRecord>;
    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::str::FromStr;
    #[test]
    fn status() {
        assert_eq!(SolutionStatus::from(0), SolutionStatus::Valid);
        assert_eq!(
            SolutionStatus::from(5),
            SolutionStatus::Invalid(NonZeroU8::new(5).unwrap())
        );
        assert_eq!(SolutionStatus::default(), SolutionStatus::Valid);
        assert_eq!(SolutionStatus::from(2).to_string(), "invalid (2)");
    }
    #[test]
    fn status_raw_round_trip() {
        for raw in 0..=u8::MAX {
            let status = SolutionStatus::from(raw);
            assert_eq!(status.is_valid(), raw == 0);
            assert_eq!(u8::from(status), raw);
            assert_eq!(SolutionStatus::from(u8::from(status)), status);
        }
    }
    #[test]
    fn time_window() {
        let t0 = Epoch::from_str("2021-04-28T05:51:22 GPST").unwrap();
        let buffer = (0..10)
            .map(|i| {
                SolutionRecord::valid(
                    t0 + hifitime::Duration::from_seconds(i as f64),
                    Vector3::new(i as f64, 0.0, 0.0),
                )
            })
            .collect::<SolutionBuffer>();
        assert_eq!(buffer.len(), 10);

        let windowed = buffer.within(
            t0 + hifitime::Duration::from_seconds(2.0),
            t0 + hifitime::Duration::from_seconds(5.0),
        );
        assert_eq!(windowed.len(), 4);
        assert_eq!(windowed.first().map(|sol| sol.position[0]), Some(2.0));
        assert_eq!(windowed.last().map(|sol| sol.position[0]), Some(5.0));
    }
}
