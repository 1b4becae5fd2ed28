//! Standard 11-bit CAN identifiers and the closed set of identifiers the
//! dashboard decodes.
use crate::error::FrameError;

/// Highest value an 11-bit standard identifier can take.
pub const MAX_STANDARD_ID: u16 = 0x7FF;

//==================================================================================FRAME_ID
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Encapsulates a standard CAN identifier (11 bits) stored inside a `u16`.
pub struct FrameId(u16);

impl FrameId {
    /// Validates and wraps a raw identifier.
    pub const fn new(raw: u16) -> Result<Self, FrameError> {
        if raw > MAX_STANDARD_ID {
            return Err(FrameError::InvalidIdentifier { id: raw });
        }
        Ok(Self(raw))
    }

    /// Raw identifier value.
    pub const fn raw(&self) -> u16 {
        self.0
    }

    /// Returns the dashboard metric carried by this identifier, if any.
    pub fn metric(&self) -> Option<MetricId> {
        MetricId::try_from(*self).ok()
    }
}

impl TryFrom<u16> for FrameId {
    type Error = FrameError;

    fn try_from(raw: u16) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<FrameId> for u16 {
    fn from(id: FrameId) -> Self {
        id.0
    }
}

impl From<embedded_can::StandardId> for FrameId {
    fn from(id: embedded_can::StandardId) -> Self {
        // StandardId already guarantees the 11-bit range.
        Self(id.as_raw())
    }
}

impl From<FrameId> for embedded_can::StandardId {
    fn from(id: FrameId) -> Self {
        embedded_can::StandardId::new(id.0).unwrap_or(embedded_can::StandardId::ZERO)
    }
}

//==================================================================================METRIC_ID
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
/// Bus identifiers of interest, each bound to exactly one decode routine.
pub enum MetricId {
    /// Engine torque frame carrying engine speed (RPM).
    Torque3 = 0x0AA,
    /// Wheel speed frame carrying vehicle speed.
    Speed = 0x1A0,
    /// Engine data frame carrying fuel level and coolant temperature.
    EngineData = 0x1D0,
    /// Fuel/mileage frame carrying odometer and fuel range (not decoded yet).
    FuelMileage = 0x330,
}

impl MetricId {
    /// Every identifier the dashboard listens to.
    pub const ALL: [MetricId; 4] = [
        MetricId::Torque3,
        MetricId::Speed,
        MetricId::EngineData,
        MetricId::FuelMileage,
    ];

    /// Raw 11-bit identifier value.
    pub const fn raw(self) -> u16 {
        self as u16
    }

    /// Identifier as a validated [`FrameId`].
    pub const fn id(self) -> FrameId {
        FrameId(self as u16)
    }
}

impl TryFrom<FrameId> for MetricId {
    type Error = FrameId;

    fn try_from(id: FrameId) -> Result<Self, Self::Error> {
        match id.0 {
            0x0AA => Ok(MetricId::Torque3),
            0x1A0 => Ok(MetricId::Speed),
            0x1D0 => Ok(MetricId::EngineData),
            0x330 => Ok(MetricId::FuelMileage),
            _ => Err(id),
        }
    }
}

impl PartialEq<MetricId> for FrameId {
    fn eq(&self, other: &MetricId) -> bool {
        self.0 == other.raw()
    }
}
