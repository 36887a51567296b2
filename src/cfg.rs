//! Positioning run configuration
use crate::{
    constants::MAX_INPUT_FILES,
    error::{Error, ParsingError},
};

use gnss::prelude::Constellation;
use num_traits::FromPrimitive;
use std::path::{Path, PathBuf};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Positioning technique
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, FromPrimitive)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum PositioningMode {
    /// Single point positioning
    Single = 0,
    /// Code based differential positioning
    DGPS = 1,
    /// Kinematic RTK
    Kinematic = 2,
    /// Static RTK
    Static = 3,
    /// Moving baseline
    MovingBase = 4,
    /// Fixed reference position
    Fixed = 5,
    /// Kinematic PPP
    PPPKinematic = 6,
    /// Static PPP
    #[default]
    PPPStatic = 7,
    /// Fixed PPP
    PPPFixed = 8,
}

impl std::str::FromStr for PositioningMode {
    type Err = ParsingError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "single" | "spp" => Ok(Self::Single),
            "dgps" | "dgnss" => Ok(Self::DGPS),
            "kinematic" => Ok(Self::Kinematic),
            "static" => Ok(Self::Static),
            "movingbase" | "moving-base" => Ok(Self::MovingBase),
            "fixed" => Ok(Self::Fixed),
            "ppp-kinematic" => Ok(Self::PPPKinematic),
            "ppp-static" => Ok(Self::PPPStatic),
            "ppp-fixed" => Ok(Self::PPPFixed),
            _ => Err(ParsingError::PositioningMode(s.to_string())),
        }
    }
}

/// Ionosphere delay compensation
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, FromPrimitive)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum IonosphereCorrection {
    Off = 0,
    /// Broadcast model
    #[default]
    Broadcast = 1,
    /// SBAS model
    SBAS = 2,
    /// Iono free combination
    IonoFree = 3,
    /// Estimated
    Estimated = 4,
    /// IONEX TEC model
    IonexTEC = 5,
    /// QZSS broadcast model
    QZSBroadcast = 6,
}

impl std::str::FromStr for IonosphereCorrection {
    type Err = ParsingError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "off" => Ok(Self::Off),
            "brdc" | "broadcast" => Ok(Self::Broadcast),
            "sbas" => Ok(Self::SBAS),
            "dual-freq" | "iono-free" => Ok(Self::IonoFree),
            "est-stec" | "estimated" => Ok(Self::Estimated),
            "ionex-tec" => Ok(Self::IonexTEC),
            "qzs-brdc" => Ok(Self::QZSBroadcast),
            _ => Err(ParsingError::IonosphereCorrection(s.to_string())),
        }
    }
}

/// Troposphere delay compensation
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, FromPrimitive)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum TroposphereCorrection {
    Off = 0,
    /// Saastamoinen model
    #[default]
    Saastamoinen = 1,
    /// SBAS model
    SBAS = 2,
    /// Zenith delay estimation
    Estimated = 3,
    /// Zenith delay and gradient estimation
    EstimatedGradient = 4,
}

impl std::str::FromStr for TroposphereCorrection {
    type Err = ParsingError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "off" => Ok(Self::Off),
            "saas" | "saastamoinen" => Ok(Self::Saastamoinen),
            "sbas" => Ok(Self::SBAS),
            "est-ztd" => Ok(Self::Estimated),
            "est-ztdgrad" => Ok(Self::EstimatedGradient),
            _ => Err(ParsingError::TroposphereCorrection(s.to_string())),
        }
    }
}

/// Satellite orbit and clock source
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, FromPrimitive)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum EphemerisSource {
    /// Broadcast ephemeris
    #[default]
    Broadcast = 0,
    /// Precise ephemeris (SP3)
    Precise = 1,
    /// Broadcast ephemeris with SBAS corrections
    BroadcastSBAS = 2,
    /// Broadcast ephemeris with SSR corrections, antenna phase center
    BroadcastSSRAPC = 3,
    /// Broadcast ephemeris with SSR corrections, center of mass
    BroadcastSSRCOM = 4,
}

impl std::str::FromStr for EphemerisSource {
    type Err = ParsingError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "brdc" | "broadcast" => Ok(Self::Broadcast),
            "precise" | "sp3" => Ok(Self::Precise),
            "brdc+sbas" => Ok(Self::BroadcastSBAS),
            "brdc+ssrapc" => Ok(Self::BroadcastSSRAPC),
            "brdc+ssrcom" => Ok(Self::BroadcastSSRCOM),
            _ => Err(ParsingError::EphemerisSource(s.to_string())),
        }
    }
}

fn selector<T: FromPrimitive>(byte: u8) -> Result<T, Error> {
    T::from_u8(byte).ok_or(Error::Parsing(ParsingError::SelectorByte(byte)))
}

fn default_constellations() -> Vec<Constellation> {
    vec![
        Constellation::GPS,
        Constellation::Glonass,
        Constellation::Galileo,
        Constellation::QZSS,
        Constellation::BeiDou,
        Constellation::IRNSS,
        Constellation::SBAS,
    ]
}

fn default_elevation_mask() -> f64 {
    15.0
}

/// [PositioningConfig] is set once prior a positioning run,
/// and read by the positioning engine from then on.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PositioningConfig {
    /// Positioning technique
    #[cfg_attr(feature = "serde", serde(default))]
    pub positioning_mode: PositioningMode,
    /// Ionosphere delay compensation
    #[cfg_attr(feature = "serde", serde(default))]
    pub ionosphere: IonosphereCorrection,
    /// Troposphere delay compensation
    #[cfg_attr(feature = "serde", serde(default))]
    pub troposphere: TroposphereCorrection,
    /// Satellite orbit and clock source
    #[cfg_attr(feature = "serde", serde(default))]
    pub ephemeris: EphemerisSource,
    /// Constellations in use
    #[cfg_attr(feature = "serde", serde(default = "default_constellations"))]
    pub constellations: Vec<Constellation>,
    /// Elevation mask, in degrees
    #[cfg_attr(feature = "serde", serde(default = "default_elevation_mask"))]
    pub elevation_mask_deg: f64,
    /// Input files: rover observations, base observations or
    /// navigation data, and precise products, in that order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub input_files: [Option<PathBuf>; MAX_INPUT_FILES],
    /// Solution output file
    #[cfg_attr(feature = "serde", serde(default))]
    pub output_file: Option<PathBuf>,
}

impl Default for PositioningConfig {
    fn default() -> Self {
        Self {
            positioning_mode: PositioningMode::default(),
            ionosphere: IonosphereCorrection::default(),
            troposphere: TroposphereCorrection::default(),
            ephemeris: EphemerisSource::default(),
            constellations: default_constellations(),
            elevation_mask_deg: default_elevation_mask(),
            input_files: Default::default(),
            output_file: None,
        }
    }
}

impl PositioningConfig {
    pub fn set_positioning_mode(&mut self, mode: PositioningMode) {
        self.positioning_mode = mode;
    }
    pub fn positioning_mode(&self) -> PositioningMode {
        self.positioning_mode
    }
    pub fn set_ionosphere(&mut self, correction: IonosphereCorrection) {
        self.ionosphere = correction;
    }
    pub fn ionosphere(&self) -> IonosphereCorrection {
        self.ionosphere
    }
    pub fn set_troposphere(&mut self, correction: TroposphereCorrection) {
        self.troposphere = correction;
    }
    pub fn troposphere(&self) -> TroposphereCorrection {
        self.troposphere
    }
    pub fn set_ephemeris(&mut self, source: EphemerisSource) {
        self.ephemeris = source;
    }
    pub fn ephemeris(&self) -> EphemerisSource {
        self.ephemeris
    }
    /// Sets positioning mode from its raw selector byte
    pub fn set_positioning_mode_byte(&mut self, byte: u8) -> Result<(), Error> {
        self.positioning_mode = selector(byte)?;
        Ok(())
    }
    /// Sets ionosphere correction from its raw selector byte
    pub fn set_ionosphere_byte(&mut self, byte: u8) -> Result<(), Error> {
        self.ionosphere = selector(byte)?;
        Ok(())
    }
    /// Sets troposphere correction from its raw selector byte
    pub fn set_troposphere_byte(&mut self, byte: u8) -> Result<(), Error> {
        self.troposphere = selector(byte)?;
        Ok(())
    }
    /// Sets ephemeris source from its raw selector byte
    pub fn set_ephemeris_byte(&mut self, byte: u8) -> Result<(), Error> {
        self.ephemeris = selector(byte)?;
        Ok(())
    }
    /// Replaces the input file list
    pub fn set_input_files(&mut self, files: [Option<PathBuf>; MAX_INPUT_FILES]) {
        self.input_files = files;
    }
    /// Iterates the defined input files, in order
    pub fn input_files(&self) -> impl Iterator<Item = &Path> + '_ {
        self.input_files.iter().flatten().map(|path| path.as_path())
    }
}
