use serde::Serialize;
use strum::{Display, EnumIter};

const MIB: u64 = 1024 * 1024;
const GIB: u64 = 1024 * MIB;

/// A class of deployment target the size metric scores against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum HardwareProfile {
    RaspberryPi,
    JetsonNano,
    DesktopPc,
    AwsServer,
}

impl HardwareProfile {
    /// Largest total artifact size the profile handles comfortably
    #[must_use]
    pub const fn comfortable_bytes(self) -> u64 {
        match self {
            Self::RaspberryPi => 50 * MIB,
            Self::JetsonNano => 700 * MIB,
            Self::DesktopPc => 8 * GIB,
            Self::AwsServer => 100 * GIB,
        }
    }
}

/// One score per hardware profile
///
/// Serializes as an object with the profile names as keys, in the order of
/// [`HardwareProfile`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct DeviceScores {
    pub raspberry_pi: f64,
    pub jetson_nano: f64,
    pub desktop_pc: f64,
    pub aws_server: f64,
}

impl DeviceScores {
    pub const ZERO: Self = Self {
        raspberry_pi: 0.0,
        jetson_nano: 0.0,
        desktop_pc: 0.0,
        aws_server: 0.0,
    };

    /// Build scores by evaluating `f` for every profile.
    pub fn from_fn(mut f: impl FnMut(HardwareProfile) -> f64) -> Self {
        Self {
            raspberry_pi: f(HardwareProfile::RaspberryPi),
            jetson_nano: f(HardwareProfile::JetsonNano),
            desktop_pc: f(HardwareProfile::DesktopPc),
            aws_server: f(HardwareProfile::AwsServer),
        }
    }

    #[must_use]
    pub const fn get(&self, profile: HardwareProfile) -> f64 {
        match profile {
            HardwareProfile::RaspberryPi => self.raspberry_pi,
            HardwareProfile::JetsonNano => self.jetson_nano,
            HardwareProfile::DesktopPc => self.desktop_pc,
            HardwareProfile::AwsServer => self.aws_server,
        }
    }

    /// Apply `f` to every score.
    #[must_use]
    pub fn map(&self, mut f: impl FnMut(f64) -> f64) -> Self {
        Self::from_fn(|p| f(self.get(p)))
    }

    /// Mean of the four scores
    #[must_use]
    pub fn average(&self) -> f64 {
        (self.raspberry_pi + self.jetson_nano + self.desktop_pc + self.aws_server) / 4.0
    }
}
