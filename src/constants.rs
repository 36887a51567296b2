//! const values used throughout the crate

/// Max. number of PRN tracked per constellation
pub(crate) struct MaxPrn;

impl MaxPrn {
    pub const GPS: usize = 32;
    pub const GLO: usize = 27;
    pub const GAL: usize = 36;
    pub const QZS: usize = 10;
    pub const BDS: usize = 63;
    pub const IRN: usize = 14;
    pub const SBAS: usize = 39;
}

/// Max. number of satellites that may be staged at a single epoch,
/// all constellations combined.
pub const MAX_SATELLITES: usize = MaxPrn::GPS
    + MaxPrn::GLO
    + MaxPrn::GAL
    + MaxPrn::QZS
    + MaxPrn::BDS
    + MaxPrn::IRN
    + MaxPrn::SBAS;

/// Max. number of carrier frequencies per observation
pub const MAX_FREQUENCIES: usize = 3;

/// Number of input files a positioning run accepts
pub const MAX_INPUT_FILES: usize = 4;

/// RMS to CEP (50% circular error) scaling, valid
/// under a circular normal error distribution only.
pub const CEP_RMS_RATIO: f64 = 1.2;
