use thiserror::Error;

/// Errors that may rise when parsing one of our selectors,
/// either from its textual description or its raw byte value.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParsingError {
    #[error("unknown reference policy \"{0}\"")]
    ReferencePolicy(String),
    #[error("unknown sample filter \"{0}\"")]
    SampleFilter(String),
    #[error("unknown positioning mode \"{0}\"")]
    PositioningMode(String),
    #[error("unknown ionosphere correction \"{0}\"")]
    IonosphereCorrection(String),
    #[error("unknown troposphere correction \"{0}\"")]
    TroposphereCorrection(String),
    #[error("unknown ephemeris source \"{0}\"")]
    EphemerisSource(String),
    #[error("invalid selector byte {0}")]
    SelectorByte(u8),
}

/// Errors raised by the statistics engine, the observation
/// stage and the RAIM scratch operations. None of them are
/// recovered internally.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("no valid solution to serve as reference")]
    NoValidSolution,
    #[error("cannot stage {requested} satellites: capacity is {capacity}")]
    CapacityExceeded { requested: usize, capacity: usize },
    #[error("invalid frequency index #{0}")]
    InvalidFrequencyIndex(usize),
    #[error("satellite index #{0} is out of range")]
    InvalidSatelliteIndex(usize),
    #[error("variance copy cannot be honored: index #{index} in array of {len}")]
    IncompleteCopy { index: usize, len: usize },
    #[error("parsing error: {0}")]
    Parsing(#[from] ParsingError),
}
